// Copyright (C) 2016 Symtab Project Contributors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-Apache
// or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// at your option. This file may not be copied, modified, or
// distributed except according to those terms.
//! # Symbol tables for weighted finite-state transducers
//!
//! A transducer's arcs carry integer labels.  A [`SymbolTable`] maps each
//! label (a *key*) to a textual *symbol* and back, so that labels can be
//! printed, parsed, and, most importantly, checked for agreement before two
//! transducers built from different sources are combined.
//!
//!   * [`SymbolTable`] is a reference-counted, copy-on-write handle; attach
//!     the same table to as many transducers as you like.
//!
//!   * Keys are usually assigned automatically (`0, 1, 2, ...`), but any
//!     `i64` other than [`NO_SYMBOL`] may be given explicitly.
//!
//!   * Tables are saved and loaded in a binary format shared with existing
//!     transducer archives, or in a simple `symbol<TAB>key` text format.
//!
//! All queries live on the [`traits::SymbolLookup`] trait.
//!
//! # Examples
//!
//! ```rust
//! use symtab::{compat_symbols, SymbolTable, TextOptions};
//! use symtab::traits::*;
//!
//! let mut syms = SymbolTable::new("letters");
//! assert_eq!(0, syms.add_symbol("<eps>"));
//! assert_eq!(1, syms.add_symbol("a"));
//! assert_eq!(100, syms.add_symbol_with_key("b", 100));
//!
//! assert_eq!(Some("b".to_owned()), syms.find_symbol(100));
//! assert_eq!(100, syms.find_key("b"));
//!
//! let mut text = Vec::new();
//! syms.write_text(&mut text, &TextOptions::default()).unwrap();
//! assert_eq!("<eps>\t0\na\t1\nb\t100\n", String::from_utf8(text).unwrap());
//!
//! let copy = SymbolTable::from_bytes(&syms.to_bytes().unwrap()).unwrap();
//! assert!(compat_symbols(Some(&syms), Some(&copy), true));
//! ```
//!
//! [`SymbolTable`]: struct.SymbolTable.html
//! [`NO_SYMBOL`]: constant.NO_SYMBOL.html
//! [`traits::SymbolLookup`]: traits/trait.SymbolLookup.html

use log::warn;

mod hash;
mod intern;
mod keyspace;
mod checksum;
mod error;
mod table;
pub mod binary;
pub mod text;
pub mod traits;
pub mod flags;
pub mod prelude;

pub use error::{Error, Result};
pub use table::{Iter, SymbolTable, SymbolTableImpl};
pub use text::TextOptions;

use traits::SymbolLookup;

/// Key reserved to mean "no symbol" (and, conversely, "no key").
pub const NO_SYMBOL: i64 = -1;

/// Check whether two optional tables may be used interchangeably.
///
/// Tables are compatible unless both are present and their labeled checksums
/// differ.  With `warning` set, a mismatch is logged along with both table
/// sizes.  Disabling [`flags::set_compat_symbols`] makes every pair
/// compatible.
///
/// [`flags::set_compat_symbols`]: flags/fn.set_compat_symbols.html
pub fn compat_symbols<A, B>(syms1: Option<&A>, syms2: Option<&B>, warning: bool) -> bool
    where A: SymbolLookup + ?Sized,
          B: SymbolLookup + ?Sized
{
    if !flags::compat_symbols() {
        return true;
    }
    match (syms1, syms2) {
        (Some(a), Some(b)) if a.labeled_checksum() != b.labeled_checksum() => {
            if warning {
                warn!("compat_symbols: Symbol table checksums do not match. \
                       Table sizes are {} and {}", a.num_symbols(), b.num_symbols());
            }
            false
        }
        _ => true,
    }
}
