// Copyright (C) 2016 Symtab Project Contributors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-Apache
// or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// at your option. This file may not be copied, modified, or
// distributed except according to those terms.
//! Binary symbol table format.
//!
//! The layout is fixed by existing transducer archives.  All integers are
//! little-endian; strings are an `i32` byte count followed by UTF-8 text.
//!
//! ```text
//! magic          i32     2125658996
//! name           string
//! available_key  i64
//! entry_count    i64
//! entry_count × (symbol string, key i64)
//! ```
//!
//! Entries are written as the dense run by key, then sparse keys ascending.
//! Reading replays them through `add_symbol_with_key`, so the dense/sparse
//! split of the result is recomputed rather than copied.
use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::error;
use num_traits::{FromPrimitive, ToPrimitive};

use crate::table::SymbolTableImpl;
use crate::traits::SymbolLookup;
use crate::{Error, Result};

/// Identifies stream data as a symbol table.
pub const MAGIC_NUMBER: i32 = 2125658996;

/// Write `table` to `writer`.
pub fn write<T, W>(table: &T, writer: &mut W) -> Result<()>
    where T: SymbolLookup + ?Sized,
          W: Write
{
    write_entries(table, writer).map_err(|e| {
        error!("SymbolTable::write: Write failed: {}", e);
        e
    })
}

fn write_entries<T, W>(table: &T, writer: &mut W) -> Result<()>
    where T: SymbolLookup + ?Sized,
          W: Write
{
    let entries = table.entries();
    writer.write_i32::<LittleEndian>(MAGIC_NUMBER)?;
    write_string(writer, table.name())?;
    writer.write_i64::<LittleEndian>(table.available_key())?;
    writer.write_i64::<LittleEndian>(i64::from_usize(entries.len()).unwrap_or(i64::max_value()))?;
    for (key, symbol) in &entries {
        write_string(writer, symbol)?;
        writer.write_i64::<LittleEndian>(*key)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a table from `reader`.  Nothing is returned unless every field was
/// read successfully.
pub fn read<R: Read>(reader: &mut R) -> Result<SymbolTableImpl> {
    read_entries(reader).map_err(|e| {
        error!("SymbolTable::read: Read failed: {}", e);
        e
    })
}

fn read_entries<R: Read>(reader: &mut R) -> Result<SymbolTableImpl> {
    // The magic number is consumed but, as in existing readers, not checked.
    let _magic = reader.read_i32::<LittleEndian>()?;
    let name = read_string(reader)?;
    let mut table = SymbolTableImpl::new(name);
    table.reserve_key(reader.read_i64::<LittleEndian>()?);
    let size = reader.read_i64::<LittleEndian>()?;
    if size < 0 {
        return Err(Error::BadEntryCount(size));
    }
    for _ in 0..size {
        let symbol = read_string(reader)?;
        let key = reader.read_i64::<LittleEndian>()?;
        table.add_symbol_with_key(&symbol, key);
    }
    table.shrink_to_fit();
    Ok(table)
}

fn write_string<W: Write>(writer: &mut W, s: &str) -> Result<()> {
    let len = s.len().to_i32().ok_or(Error::BadLength(i32::max_value()))?;
    writer.write_i32::<LittleEndian>(len)?;
    writer.write_all(s.as_bytes())?;
    Ok(())
}

fn read_string<R: Read>(reader: &mut R) -> Result<String> {
    let len = reader.read_i32::<LittleEndian>()?;
    let len = len.to_usize().ok_or(Error::BadLength(len))?;
    let mut buf = Vec::new();
    // Never trust the length prefix for the allocation size.
    let read = reader.by_ref().take(len as u64).read_to_end(&mut buf)?;
    if read != len {
        return Err(::std::io::Error::from(::std::io::ErrorKind::UnexpectedEof).into());
    }
    String::from_utf8(buf).map_err(|_| Error::InvalidUtf8)
}
