// Copyright (C) 2016 Symtab Project Contributors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-Apache
// or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// at your option. This file may not be copied, modified, or
// distributed except according to those terms.
//! Process-wide settings.
//!
//! These mirror the command-line flags of the tools that embed the tables:
//! binaries set them once at start-up and every table consults them.
use std::sync::atomic::{AtomicBool, Ordering};

use lazy_static::lazy_static;
use parking_lot::RwLock;

/// Default set of characters accepted between the fields of a text table.
pub const DEFAULT_FIELD_SEPARATOR: &str = "\t ";

static COMPAT_SYMBOLS: AtomicBool = AtomicBool::new(true);

lazy_static! {
    static ref FIELD_SEPARATOR: RwLock<String> = RwLock::new(DEFAULT_FIELD_SEPARATOR.to_owned());
}

/// Whether `compat_symbols` actually compares checksums.
pub fn compat_symbols() -> bool {
    COMPAT_SYMBOLS.load(Ordering::Relaxed)
}

/// Enable or disable checksum comparison in `compat_symbols`.  When
/// disabled, every pair of tables is reported compatible.
pub fn set_compat_symbols(enabled: bool) {
    COMPAT_SYMBOLS.store(enabled, Ordering::Relaxed);
}

/// Separator set used by `TextOptions::default()`.
pub fn field_separator() -> String {
    FIELD_SEPARATOR.read().clone()
}

/// Replace the separator set used by `TextOptions::default()`.
pub fn set_field_separator<S: Into<String>>(separator: S) {
    *FIELD_SEPARATOR.write() = separator.into();
}
