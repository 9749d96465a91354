// Copyright (C) 2016 Symtab Project Contributors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-Apache
// or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// at your option. This file may not be copied, modified, or
// distributed except according to those terms.
//! Traits that define the read-only interface shared by every symbol table.
//!
//! Transducers, archive writers, and string compilers only ever *query*
//! a table: they translate labels into text and back, walk its entries to
//! print or serialize them, and compare checksums to decide whether two
//! alphabets are interchangeable.  [`SymbolLookup`] captures exactly that
//! subset.
//!
//! [`SymbolTable`] implements it, and so can any foreign table
//! representation.  Such a foreign table can then be shared without copying
//! through [`SymbolTable::read_only`], which answers queries by delegating
//! and refuses every mutation.
//!
//! ```rust
//! use symtab::SymbolTable;
//! use symtab::traits::*;
//!
//! let mut syms = SymbolTable::new("letters");
//! syms.add_symbol("<eps>");
//! syms.add_symbol("a");
//!
//! fn spell<T: SymbolLookup + ?Sized>(table: &T, labels: &[i64]) -> Vec<String> {
//!     labels.iter()
//!         .map(|&l| table.find_symbol(l).unwrap_or_else(|| format!("<{}>", l)))
//!         .collect()
//! }
//!
//! assert_eq!(vec!["a", "<eps>", "<7>"], spell(&syms, &[1, 0, 7]));
//! ```
//!
//! [`SymbolLookup`]: trait.SymbolLookup.html
//! [`SymbolTable`]: ../struct.SymbolTable.html
//! [`SymbolTable::read_only`]: ../struct.SymbolTable.html#method.read_only

/// Query interface for symbol tables.
pub trait SymbolLookup: Send + Sync {
    /// Table name, for diagnostics and provenance.
    fn name(&self) -> &str;

    /// Look up the key associated with `symbol`, or `NO_SYMBOL` if the
    /// symbol is absent.
    fn find_key(&self, symbol: &str) -> i64;

    /// Look up the symbol associated with `key`.
    fn find_symbol(&self, key: i64) -> Option<String>;

    /// Number of entries in the table.
    fn num_symbols(&self) -> usize;

    /// Key that the next automatic insertion would receive.
    fn available_key(&self) -> i64;

    /// Key of the entry at backing position `position`, or `NO_SYMBOL` if
    /// the position is out of range.
    fn nth_key(&self, position: usize) -> i64;

    /// Every `(key, symbol)` entry in serialization order: the dense run by
    /// key, then sparse keys ascending.
    fn entries(&self) -> Vec<(i64, String)>;

    /// Label-agnostic digest of the table's symbols.
    fn checksum(&self) -> String;

    /// Digest of the table's `(symbol, key)` pairs.
    fn labeled_checksum(&self) -> String;

    /// Check whether `key` is associated with a symbol.
    fn member_key(&self, key: i64) -> bool {
        self.find_symbol(key).is_some()
    }

    /// Check whether `symbol` is associated with a key.
    fn member_symbol(&self, symbol: &str) -> bool {
        self.find_key(symbol) != crate::NO_SYMBOL
    }
}
