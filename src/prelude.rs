// Copyright (C) 2016 Symtab Project Contributors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-Apache
// or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// at your option. This file may not be copied, modified, or
// distributed except according to those terms.
//! Items intended for glob-import.
//!
//! Only the traits needed for method resolution are brought into scope, and
//! they are renamed with a `Symtab` prefix to avoid collisions with the
//! importing crate's own names.  Types must still be imported explicitly.
//!
//! ```rust
//! use symtab::prelude::*;
//! use symtab::SymbolTable;
//!
//! let mut syms = SymbolTable::new("tags");
//! let noun = syms.add_symbol("NN");
//! assert_eq!(Some("NN".to_owned()), syms.find_symbol(noun));
//! ```
// N.B. we're not using a brace-enclosed imports list here because it's harder
// to read when rendered by rustdoc.
pub use crate::traits::SymbolLookup as SymtabLookup;
