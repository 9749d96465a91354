// Copyright (C) 2016 Symtab Project Contributors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-Apache
// or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// at your option. This file may not be copied, modified, or
// distributed except according to those terms.
//! Hashing and key/position conversions shared by the table internals.
use std::hash::{Hash, Hasher};

use num_traits::{FromPrimitive, ToPrimitive};

#[cfg(feature = "fnv")]
pub type DefaultHashAlgo = ::fnv::FnvHasher;
#[cfg(not(feature = "fnv"))]
pub type DefaultHashAlgo = ::std::collections::hash_map::DefaultHasher;


/// Hash an object using the given hasher type.
pub fn hash<T: ?Sized + Hash, H: Hasher + Default>(obj: &T) -> u64 {
    let mut hasher = H::default();
    obj.hash(&mut hasher);
    hasher.finish()
}

/// Hash a symbol with the crate's default algorithm.  Values are only stable
/// within a single process.
pub fn hash_symbol(symbol: &str) -> u64 {
    hash::<str, DefaultHashAlgo>(symbol)
}

/// Interpret a key as a backing position, if it can be one.
pub fn key_to_position(key: i64) -> Option<usize> {
    key.to_usize()
}

/// Express a backing position as a key.
pub fn position_to_key(position: usize) -> i64 {
    // Positions are bounded by the length of a `Vec`, which always fits.
    i64::from_usize(position).unwrap_or(i64::max_value())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashing_is_stable_within_process() {
        assert_eq!(hash_symbol("<eps>"), hash_symbol("<eps>"));
        assert!(hash_symbol("a") != hash_symbol("b"));
    }

    #[test]
    fn negative_keys_are_not_positions() {
        assert_eq!(None, key_to_position(-1));
        assert_eq!(Some(7), key_to_position(7));
        assert_eq!(7, position_to_key(7));
    }
}
