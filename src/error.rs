// Copyright (C) 2016 Symtab Project Contributors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-Apache
// or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// at your option. This file may not be copied, modified, or
// distributed except according to those terms.
//! Error types for reading and writing symbol tables.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type used by fallible operations in symtab.
pub type Result<T> = ::std::result::Result<T, Error>;

/// Error type used by this crate.
///
/// Only serialization can fail; lookups report absence through `Option` or
/// the `NO_SYMBOL` sentinel instead.
#[derive(Error, Debug)]
pub enum Error {
    /// The underlying stream failed or ended early.
    #[error("symbol table I/O failed: {0}")]
    Io(#[from] io::Error),

    /// A file could not be opened for reading or writing.
    #[error("can't open file {path:?}: {cause}")]
    OpenFile {
        path: PathBuf,
        #[source]
        cause: io::Error,
    },

    /// A text line did not split into exactly two fields.
    #[error("bad number of columns ({columns}), file = {input}, line = {line}:<{text}>")]
    BadColumnCount { input: String, line: usize, columns: usize, text: String },

    /// A text line's key field is not an acceptable label.
    #[error("bad non-negative integer {value:?}, file = {input}, line = {line}")]
    BadKey { input: String, line: usize, value: String },

    /// A binary string carried a negative length prefix.
    #[error("bad string length {0}")]
    BadLength(i32),

    /// A binary table header announced a negative number of entries.
    #[error("bad entry count {0}")]
    BadEntryCount(i64),

    /// A binary string was not valid UTF-8.
    #[error("symbol text is not valid UTF-8")]
    InvalidUtf8,

    /// Text output was requested with no field separator configured.
    #[error("missing required field separator")]
    EmptySeparator,
}
