// Copyright (C) 2016 Symtab Project Contributors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-Apache
// or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// at your option. This file may not be copied, modified, or
// distributed except according to those terms.
//! Shared symbol table handle.
//!
//! A [`SymbolTable`] is a cheap-to-clone handle: clones share one copy of
//! the content, and a mutation through any handle whose content is shared
//! first takes a private copy.  Tables attached to many transducers
//! therefore cost one allocation, however many holders there are.
//!
//! ```rust
//! use symtab::SymbolTable;
//! use symtab::traits::*;
//!
//! let mut syms = SymbolTable::new("phones");
//! syms.add_symbol("<eps>");
//! syms.add_symbol("aa");
//!
//! let shared = syms.clone();
//! syms.add_symbol("ae");
//!
//! assert_eq!(3, syms.num_symbols());
//! assert_eq!(2, shared.num_symbols());
//! ```
//!
//! [`SymbolTable`]: struct.SymbolTable.html
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::sync::Arc;

use log::error;

use crate::binary;
use crate::checksum::{ChecksumCache, Checksums};
use crate::keyspace::KeySpace;
use crate::text::{self, TextOptions};
use crate::traits::SymbolLookup;
use crate::{Error, Result};

/// Mutable table content: name, key space, and cached digests.
#[derive(Clone, Debug, Default)]
pub struct SymbolTableImpl {
    name: String,
    keys: KeySpace,
    check_sums: ChecksumCache,
}

impl SymbolTableImpl {
    pub fn new<S: Into<String>>(name: S) -> Self {
        SymbolTableImpl{name: name.into(), ..Default::default()}
    }

    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    pub fn add_symbol(&mut self, symbol: &str) -> i64 {
        self.check_sums.invalidate();
        self.keys.add_symbol(symbol)
    }

    pub fn add_symbol_with_key(&mut self, symbol: &str, key: i64) -> i64 {
        self.check_sums.invalidate();
        self.keys.add_symbol_with_key(symbol, key)
    }

    pub fn remove_symbol(&mut self, key: i64) {
        self.check_sums.invalidate();
        self.keys.remove_symbol(key);
    }

    /// Raise the next automatically assigned key to at least `key`.
    pub fn reserve_key(&mut self, key: i64) {
        self.keys.reserve_key(key);
    }

    pub fn shrink_to_fit(&mut self) {
        self.keys.shrink_to_fit();
    }

    fn check_sums(&self) -> Checksums {
        self.check_sums.get_or_compute(|| Checksums::compute(&self.keys))
    }
}

impl SymbolLookup for SymbolTableImpl {
    fn name(&self) -> &str {
        &self.name
    }

    fn find_key(&self, symbol: &str) -> i64 {
        self.keys.find_key(symbol)
    }

    fn find_symbol(&self, key: i64) -> Option<String> {
        self.keys.find_symbol(key).map(str::to_owned)
    }

    fn num_symbols(&self) -> usize {
        self.keys.len()
    }

    fn available_key(&self) -> i64 {
        self.keys.available_key()
    }

    fn nth_key(&self, position: usize) -> i64 {
        self.keys.nth_key(position)
    }

    fn entries(&self) -> Vec<(i64, String)> {
        self.keys.entries().map(|(k, s)| (k, s.to_owned())).collect()
    }

    fn checksum(&self) -> String {
        self.check_sums().unlabeled
    }

    fn labeled_checksum(&self) -> String {
        self.check_sums().labeled
    }

    fn member_key(&self, key: i64) -> bool {
        self.keys.find_symbol(key).is_some()
    }
}

#[derive(Clone)]
enum Content {
    Owned(SymbolTableImpl),
    ReadOnly(Arc<dyn SymbolLookup>),
}

/// Reference-counted symbol table.
///
/// All queries come from the [`SymbolLookup`](traits/trait.SymbolLookup.html)
/// implementation, so bring the traits into scope with
/// `use symtab::traits::*`.
#[derive(Clone)]
pub struct SymbolTable {
    content: Arc<Content>,
}

impl SymbolTable {
    /// Create a new, empty table.
    pub fn new<S: Into<String>>(name: S) -> Self {
        SymbolTable::from_impl(SymbolTableImpl::new(name))
    }

    /// Wrap a foreign table so it can be shared without copying.  The
    /// returned handle answers every query by delegating to `table`, and
    /// panics on any attempt to modify it.
    pub fn read_only(table: Arc<dyn SymbolLookup>) -> Self {
        SymbolTable{content: Arc::new(Content::ReadOnly(table))}
    }

    pub(crate) fn from_impl(table: SymbolTableImpl) -> Self {
        SymbolTable{content: Arc::new(Content::Owned(table))}
    }

    /// Check whether this handle is a read-only view.
    pub fn is_read_only(&self) -> bool {
        match *self.content {
            Content::Owned(_) => false,
            Content::ReadOnly(_) => true,
        }
    }

    /// Check whether `self` and `other` share the same content.
    pub fn ptr_eq(&self, other: &SymbolTable) -> bool {
        Arc::ptr_eq(&self.content, &other.content)
    }

    /// Add `symbol` under the next available key and return the key it is
    /// associated with afterwards.
    pub fn add_symbol(&mut self, symbol: &str) -> i64 {
        self.mutate("add_symbol").add_symbol(symbol)
    }

    /// Add `symbol` under `key`.  Adding `NO_SYMBOL` does nothing.  If
    /// `symbol` is already present its existing key is kept and returned.
    pub fn add_symbol_with_key(&mut self, symbol: &str, key: i64) -> i64 {
        self.mutate("add_symbol_with_key").add_symbol_with_key(symbol, key)
    }

    /// Remove the entry for `key`, if any.
    pub fn remove_symbol(&mut self, key: i64) {
        self.mutate("remove_symbol").remove_symbol(key)
    }

    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.mutate("set_name").set_name(name)
    }

    /// Add every symbol of `other` to this table under fresh keys, in
    /// `other`'s backing order.  Symbols already present keep their keys.
    pub fn add_table<T: SymbolLookup + ?Sized>(&mut self, other: &T) {
        let table = self.mutate("add_table");
        for position in 0..other.num_symbols() {
            let key = other.nth_key(position);
            if let Some(symbol) = other.find_symbol(key) {
                table.add_symbol(&symbol);
            }
        }
    }

    /// Iterate over `(key, symbol)` entries in backing order.
    pub fn iter(&self) -> Iter<'_> {
        Iter{table: self, position: 0}
    }

    /// Read a table in binary form.
    pub fn read<R: Read>(reader: &mut R) -> Result<SymbolTable> {
        binary::read(reader).map(SymbolTable::from_impl)
    }

    /// Write the table in binary form.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        binary::write(self, writer)
    }

    /// Read a binary table from the file at `path`.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<SymbolTable> {
        let mut reader = BufReader::new(open(path.as_ref(), "SymbolTable::read")?);
        SymbolTable::read(&mut reader)
    }

    /// Write the table in binary form to the file at `path`.
    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(create(path.as_ref(), "SymbolTable::write")?);
        self.write(&mut writer).map_err(|e| {
            error!("SymbolTable::write: Write failed: {}", path.as_ref().display());
            e
        })
    }

    /// Serialize to an in-memory buffer in binary form.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write(&mut buf)?;
        Ok(buf)
    }

    /// Deserialize from bytes produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<SymbolTable> {
        SymbolTable::read(&mut io::Cursor::new(bytes))
    }

    /// Read a table in text form.  `source` names the input in diagnostics
    /// and becomes the table's name.
    pub fn read_text<R: Read>(reader: R, source: &str, opts: &TextOptions) -> Result<SymbolTable> {
        text::read(reader, source, opts).map(SymbolTable::from_impl)
    }

    /// Write the table in text form.
    pub fn write_text<W: Write>(&self, writer: &mut W, opts: &TextOptions) -> Result<()> {
        text::write(self, writer, opts)
    }

    /// Read a text table from the file at `path`.
    pub fn read_text_from_path<P: AsRef<Path>>(path: P, opts: &TextOptions) -> Result<SymbolTable> {
        let path = path.as_ref();
        let file = open(path, "SymbolTable::read_text")?;
        SymbolTable::read_text(BufReader::new(file), &path.to_string_lossy(), opts)
    }

    /// Write the table in text form to the file at `path`.
    pub fn write_text_to_path<P: AsRef<Path>>(&self, path: P, opts: &TextOptions) -> Result<()> {
        let mut writer = BufWriter::new(create(path.as_ref(), "SymbolTable::write_text")?);
        self.write_text(&mut writer, opts).map_err(|e| {
            error!("SymbolTable::write_text: Write failed: {}", path.as_ref().display());
            e
        })
    }

    fn lookup(&self) -> &dyn SymbolLookup {
        match *self.content {
            Content::Owned(ref table) => table,
            Content::ReadOnly(ref table) => &**table,
        }
    }

    /// Get exclusive access to the content, copying it first if it is
    /// shared.  Mutating a read-only view is a caller bug.
    fn mutate(&mut self, operation: &str) -> &mut SymbolTableImpl {
        if let Content::ReadOnly(ref table) = *self.content {
            panic!("SymbolTable::{}: read-only view of table {:?} cannot be modified",
                   operation, table.name());
        }
        match *Arc::make_mut(&mut self.content) {
            Content::Owned(ref mut table) => table,
            Content::ReadOnly(_) => unreachable!(),
        }
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new("")
    }
}

impl fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SymbolTable")
            .field("name", &self.name())
            .field("num_symbols", &self.num_symbols())
            .field("read_only", &self.is_read_only())
            .finish()
    }
}

impl SymbolLookup for SymbolTable {
    fn name(&self) -> &str {
        self.lookup().name()
    }

    fn find_key(&self, symbol: &str) -> i64 {
        self.lookup().find_key(symbol)
    }

    fn find_symbol(&self, key: i64) -> Option<String> {
        self.lookup().find_symbol(key)
    }

    fn num_symbols(&self) -> usize {
        self.lookup().num_symbols()
    }

    fn available_key(&self) -> i64 {
        self.lookup().available_key()
    }

    fn nth_key(&self, position: usize) -> i64 {
        self.lookup().nth_key(position)
    }

    fn entries(&self) -> Vec<(i64, String)> {
        self.lookup().entries()
    }

    fn checksum(&self) -> String {
        self.lookup().checksum()
    }

    fn labeled_checksum(&self) -> String {
        self.lookup().labeled_checksum()
    }

    fn member_key(&self, key: i64) -> bool {
        self.lookup().member_key(key)
    }
}

impl<'a> IntoIterator for &'a SymbolTable {
    type Item = (i64, String);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Iterator over a table's entries in backing order.
#[derive(Clone)]
pub struct Iter<'a> {
    table: &'a SymbolTable,
    position: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (i64, String);

    fn next(&mut self) -> Option<Self::Item> {
        while self.position < self.table.num_symbols() {
            let key = self.table.nth_key(self.position);
            self.position += 1;
            if let Some(symbol) = self.table.find_symbol(key) {
                return Some((key, symbol));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.table.num_symbols().saturating_sub(self.position)))
    }
}

fn open(path: &Path, operation: &str) -> Result<File> {
    File::open(path).map_err(|cause| {
        error!("{}: Can't open file: {}", operation, path.display());
        Error::OpenFile{path: path.to_owned(), cause}
    })
}

fn create(path: &Path, operation: &str) -> Result<File> {
    File::create(path).map_err(|cause| {
        error!("{}: Can't open file: {}", operation, path.display());
        Error::OpenFile{path: path.to_owned(), cause}
    })
}
