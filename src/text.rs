// Copyright (C) 2016 Symtab Project Contributors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-Apache
// or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// at your option. This file may not be copied, modified, or
// distributed except according to those terms.
//! Text symbol table format: one `symbol<sep>key` line per entry.
//!
//! ```text
//! <eps>	0
//! a	1
//! b	100
//! ```
//!
//! Fields may be separated by any character of the configured separator set,
//! and runs of separators count as one.  Blank lines are skipped.  Output
//! uses the first character of the set.
use std::io::{BufRead, BufReader, Read, Write};

use log::{error, warn};

use crate::flags;
use crate::table::SymbolTableImpl;
use crate::traits::SymbolLookup;
use crate::{Error, Result, NO_SYMBOL};

/// Options for reading and writing text tables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextOptions {
    /// Accept negative keys when reading (and don't warn about them when
    /// writing).
    pub allow_negative_labels: bool,
    /// Characters that separate fields.
    pub field_separator: String,
}

impl TextOptions {
    /// Options using the process-wide separator set.
    pub fn new(allow_negative_labels: bool) -> Self {
        TextOptions{allow_negative_labels: allow_negative_labels,
                    field_separator: flags::field_separator()}
    }
}

impl Default for TextOptions {
    fn default() -> Self {
        TextOptions::new(false)
    }
}

/// Read a text table from `reader`.  `source` names the input in
/// diagnostics and becomes the table name.
pub fn read<R: Read>(reader: R, source: &str, opts: &TextOptions) -> Result<SymbolTableImpl> {
    let mut table = SymbolTableImpl::new(source);
    for (nline, line) in BufReader::new(reader).lines().enumerate() {
        let nline = nline + 1;
        let line = line.map_err(|e| {
            error!("SymbolTable::read_text: Read failed, file = {}, line = {}: {}",
                   source, nline, e);
            e
        })?;
        let (symbol, key) = match parse_line(&line, source, nline, opts)? {
            Some(entry) => entry,
            None => continue,
        };
        table.add_symbol_with_key(symbol, key);
    }
    table.shrink_to_fit();
    Ok(table)
}

fn parse_line<'a>(line: &'a str, source: &str, nline: usize, opts: &TextOptions)
                  -> Result<Option<(&'a str, i64)>>
{
    let separators = &opts.field_separator;
    let cols: Vec<&str> = line
        .split(|c: char| c == '\n' || separators.contains(c))
        .filter(|col| !col.is_empty())
        .collect();
    if cols.is_empty() {
        return Ok(None);
    }
    if cols.len() != 2 {
        error!("SymbolTable::read_text: Bad number of columns ({}), file = {}, line = {}:<{}>",
               cols.len(), source, nline, line);
        return Err(Error::BadColumnCount{input: source.to_owned(),
                                         line: nline,
                                         columns: cols.len(),
                                         text: line.to_owned()});
    }
    let (symbol, value) = (cols[0], cols[1]);
    match value.parse::<i64>() {
        Ok(key) if key != NO_SYMBOL && (opts.allow_negative_labels || key >= 0) =>
            Ok(Some((symbol, key))),
        _ => {
            error!("SymbolTable::read_text: Bad non-negative integer {:?}, file = {}, line = {}",
                   value, source, nline);
            Err(Error::BadKey{input: source.to_owned(), line: nline, value: value.to_owned()})
        }
    }
}

/// Write `table` as text, one entry per line in serialization order.
pub fn write<T, W>(table: &T, writer: &mut W, opts: &TextOptions) -> Result<()>
    where T: SymbolLookup + ?Sized,
          W: Write
{
    let separator = match opts.field_separator.chars().next() {
        Some(c) => c,
        None => {
            error!("Missing required field separator");
            return Err(Error::EmptySeparator);
        }
    };
    let mut warned = false;
    for (key, symbol) in table.entries() {
        if key < 0 && !opts.allow_negative_labels && !warned {
            warn!("Negative symbol table entry when not allowed");
            warned = true;
        }
        writeln!(writer, "{}{}{}", symbol, separator, key)?;
    }
    writer.flush()?;
    Ok(())
}
