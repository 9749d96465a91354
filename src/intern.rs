// Copyright (C) 2016 Symtab Project Contributors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-Apache
// or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// at your option. This file may not be copied, modified, or
// distributed except according to those terms.
//! Open-addressing string interner that hands out dense backing positions.
//!
//! Unlike a general-purpose `HashMap<String, usize>`, [`DenseSymbolMap`]
//! stores each symbol exactly once, in a `Vec` whose indices are the
//! positions returned to callers; the bucket array holds nothing but those
//! positions.  Positions are insertion-ordered and stay stable until
//! a symbol is removed, at which point every later position shifts down by
//! one.
//!
//! [`DenseSymbolMap`]: struct.DenseSymbolMap.html
use crate::hash;

/// Marker stored in unoccupied buckets.
const EMPTY_BUCKET: isize = -1;

/// Bucket count for a fresh map; always a power of two.
const INITIAL_BUCKETS: usize = 1 << 4;

/// String interner backed by a linearly-probed bucket array.
#[derive(Clone, Debug)]
pub struct DenseSymbolMap {
    buckets: Vec<isize>,
    hash_mask: usize,
    symbols: Vec<String>,
}

impl DenseSymbolMap {
    /// Create a new, empty map.
    #[cfg(test)]
    pub fn new() -> Self {
        Default::default()
    }

    /// Get the number of symbols stored in the map.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if the map holds no symbols.
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Fetch the symbol stored at `position`.
    pub fn symbol(&self, position: usize) -> Option<&str> {
        self.symbols.get(position).map(String::as_str)
    }

    /// Iterate over stored symbols in position order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }

    /// Fetch the position of `symbol`, inserting it at the end if it is not
    /// yet present.  The boolean is `true` when an insertion happened.
    pub fn insert_or_find(&mut self, symbol: &str) -> (usize, bool) {
        // Grow when 75% full.
        if self.len() * 4 >= self.buckets.len() * 3 {
            let num_buckets = self.buckets.len() * 2;
            self.rehash(num_buckets);
        }
        let mut idx = self.bucket_of(symbol);
        while self.buckets[idx] != EMPTY_BUCKET {
            let stored = self.buckets[idx] as usize;
            if self.symbols[stored] == symbol {
                return (stored, false);
            }
            idx = (idx + 1) & self.hash_mask;
        }
        let next = self.len();
        self.buckets[idx] = next as isize;
        self.symbols.push(symbol.to_owned());
        (next, true)
    }

    /// Look up the position of `symbol` without modifying the map.
    pub fn find(&self, symbol: &str) -> Option<usize> {
        let mut idx = self.bucket_of(symbol);
        while self.buckets[idx] != EMPTY_BUCKET {
            let stored = self.buckets[idx] as usize;
            if self.symbols[stored] == symbol {
                return Some(stored);
            }
            idx = (idx + 1) & self.hash_mask;
        }
        None
    }

    /// Remove the symbol at `position`, shifting all later symbols down by
    /// one.  This is O(n): the bucket array is rebuilt from scratch since
    /// every bucket past `position` now names the wrong slot.
    pub fn remove(&mut self, position: usize) {
        if position >= self.len() {
            return;
        }
        self.symbols.remove(position);
        let num_buckets = self.buckets.len();
        self.rehash(num_buckets);
    }

    /// Release excess capacity in the symbol storage.
    pub fn shrink_to_fit(&mut self) {
        self.symbols.shrink_to_fit();
    }

    fn bucket_of(&self, symbol: &str) -> usize {
        (hash::hash_symbol(symbol) as usize) & self.hash_mask
    }

    fn rehash(&mut self, num_buckets: usize) {
        debug_assert!(num_buckets.is_power_of_two());
        self.buckets.clear();
        self.buckets.resize(num_buckets, EMPTY_BUCKET);
        self.hash_mask = num_buckets - 1;
        for (i, symbol) in self.symbols.iter().enumerate() {
            let mut idx = (hash::hash_symbol(symbol) as usize) & self.hash_mask;
            while self.buckets[idx] != EMPTY_BUCKET {
                idx = (idx + 1) & self.hash_mask;
            }
            self.buckets[idx] = i as isize;
        }
    }
}

impl Default for DenseSymbolMap {
    fn default() -> Self {
        DenseSymbolMap{buckets: vec![EMPTY_BUCKET; INITIAL_BUCKETS],
                       hash_mask: INITIAL_BUCKETS - 1,
                       symbols: Vec::new()}
    }
}
