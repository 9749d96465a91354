// Copyright (C) 2016 Symtab Project Contributors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-Apache
// or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// at your option. This file may not be copied, modified, or
// distributed except according to those terms.
//! Bidirectional symbol/key mapping layered over [`DenseSymbolMap`].
//!
//! Most alphabets are numbered `0, 1, 2, ...` in insertion order.  For those
//! keys the backing position *is* the key, so nothing else needs storing:
//! this prefix of positions is the *dense run* and ends at the dense key
//! limit `D`.  Every other key (anything at or past `D`, and every negative
//! key) lives in the *sparse map*, together with an inverse list that gives
//! the key for each position `>= D`.
//!
//! The two regions obey these invariants after every operation:
//!
//!   * positions `[0, D)` hold keys equal to their positions, and no sparse
//!     entry uses a key in that range;
//!   * every other live key appears exactly once in the sparse map, and the
//!     inverse list has one entry per position `>= D`.
//!
//! [`DenseSymbolMap`]: ../intern/struct.DenseSymbolMap.html
use std::collections::BTreeMap;

use log::debug;

use crate::hash::{key_to_position, position_to_key};
use crate::intern::DenseSymbolMap;
use crate::NO_SYMBOL;

/// Dense/sparse key manager.
#[derive(Clone, Debug, Default)]
pub struct KeySpace {
    symbols: DenseSymbolMap,
    dense_key_limit: i64,
    available_key: i64,
    /// Sparse key → backing position.
    key_map: BTreeMap<i64, usize>,
    /// Key for each backing position `>= dense_key_limit`, in position order.
    idx_key: Vec<i64>,
}

impl KeySpace {
    /// Create an empty key space.
    #[cfg(test)]
    pub fn new() -> Self {
        Default::default()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if there are no live entries.
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Key that `add_symbol` would assign next.
    pub fn available_key(&self) -> i64 {
        self.available_key
    }

    /// Raise the next auto-assigned key to at least `key`.
    pub fn reserve_key(&mut self, key: i64) {
        if key > self.available_key {
            self.available_key = key;
        }
    }

    /// End of the dense run.
    pub fn dense_key_limit(&self) -> i64 {
        self.dense_key_limit
    }

    /// Add `symbol` under the next available key.
    pub fn add_symbol(&mut self, symbol: &str) -> i64 {
        let key = self.available_key;
        self.add_symbol_with_key(symbol, key)
    }

    /// Add `symbol` under `key`, returning the key now associated with
    /// `symbol`.  If the symbol is already present under another key, that
    /// existing key is kept and returned.  If `key` already belongs to
    /// another symbol, nothing is added and `NO_SYMBOL` is returned.
    pub fn add_symbol_with_key(&mut self, symbol: &str, key: i64) -> i64 {
        if key == NO_SYMBOL {
            return key;
        }
        if let Some(taken) = self.position_of(key) {
            if self.symbols.symbol(taken) == Some(symbol) {
                return key;
            }
            if self.symbols.find(symbol).is_none() {
                debug!("KeySpace::add_symbol: key = {} already belongs to symbol = {:?} \
                        (not adding symbol = {:?})",
                       key, self.symbols.symbol(taken), symbol);
                return NO_SYMBOL;
            }
        }
        let (position, inserted) = self.symbols.insert_or_find(symbol);
        if !inserted {
            let key_already = self.nth_key(position);
            if key_already != key {
                debug!("KeySpace::add_symbol: symbol = {} already present with key = {} \
                        but supplied new key = {} (ignoring new key)",
                       symbol, key_already, key);
            }
            return key_already;
        }
        if key == self.dense_key_limit && key_to_position(key) == Some(position) {
            self.dense_key_limit += 1;
        } else {
            self.idx_key.push(key);
            self.key_map.insert(key, position);
        }
        if key >= self.available_key {
            // Saturates at the largest key; once that key is taken, auto
            // assignment is refused by the taken-key check above.
            self.available_key = key.saturating_add(1);
        }
        key
    }

    /// Remove the entry for `key`, if any.
    pub fn remove_symbol(&mut self, key: i64) {
        let position = match self.position_of(key) {
            Some(position) => position,
            None => return,
        };
        let dense = key >= 0 && key < self.dense_key_limit;
        if !dense {
            self.key_map.remove(&key);
        }
        self.symbols.remove(position);
        for target in self.key_map.values_mut() {
            if *target > position {
                *target -= 1;
            }
        }
        if dense {
            // The hole ends the dense run at `key`; everything that used to
            // follow it moves down one position and becomes sparse.
            let old_limit = self.dense_key_limit;
            for moved in (key + 1)..old_limit {
                self.key_map.insert(moved, (moved - 1) as usize);
            }
            let mut idx_key: Vec<i64> = ((key + 1)..old_limit).collect();
            idx_key.extend_from_slice(&self.idx_key);
            self.idx_key = idx_key;
            self.dense_key_limit = key;
        } else {
            let slot = position - self.dense_position_count();
            self.idx_key.remove(slot);
        }
        if self.available_key.checked_sub(1) == Some(key) {
            self.available_key = key;
        }
    }

    /// Fetch the symbol for `key`.
    pub fn find_symbol(&self, key: i64) -> Option<&str> {
        self.position_of(key).and_then(|p| self.symbols.symbol(p))
    }

    /// Fetch the key for `symbol`, or `NO_SYMBOL` if it is absent.
    pub fn find_key(&self, symbol: &str) -> i64 {
        match self.symbols.find(symbol) {
            Some(position) => self.nth_key(position),
            None => NO_SYMBOL,
        }
    }

    /// Fetch the key stored at backing position `position`, or `NO_SYMBOL`
    /// if the position is out of range.
    pub fn nth_key(&self, position: usize) -> i64 {
        if position >= self.len() {
            return NO_SYMBOL;
        }
        let dense = self.dense_position_count();
        if position < dense {
            position_to_key(position)
        } else {
            self.idx_key.get(position - dense).cloned().unwrap_or(NO_SYMBOL)
        }
    }

    /// Fetch the symbol stored at backing position `position`.
    pub fn nth_symbol(&self, position: usize) -> Option<&str> {
        self.symbols.symbol(position)
    }

    /// Entries of the dense run, by key.
    pub fn dense_entries(&self) -> impl Iterator<Item = (i64, &str)> {
        self.symbols.symbols()
            .take(self.dense_position_count())
            .enumerate()
            .map(|(p, s)| (position_to_key(p), s))
    }

    /// Sparse entries by ascending key.
    pub fn sparse_entries(&self) -> impl Iterator<Item = (i64, &str)> {
        let symbols = &self.symbols;
        self.key_map.iter()
            .filter_map(move |(&key, &p)| symbols.symbol(p).map(|s| (key, s)))
    }

    /// Entries in serialization order: the dense run, then sparse keys in
    /// ascending order.
    pub fn entries(&self) -> impl Iterator<Item = (i64, &str)> {
        self.dense_entries().chain(self.sparse_entries())
    }

    /// Release excess capacity after bulk loads.
    pub fn shrink_to_fit(&mut self) {
        self.symbols.shrink_to_fit();
        self.idx_key.shrink_to_fit();
    }

    fn dense_position_count(&self) -> usize {
        key_to_position(self.dense_key_limit).unwrap_or(0)
    }

    fn position_of(&self, key: i64) -> Option<usize> {
        if key >= 0 && key < self.dense_key_limit {
            key_to_position(key)
        } else {
            self.key_map.get(&key).cloned()
        }
    }

    /// Verify the dense/sparse invariants.
    #[cfg(test)]
    pub fn check_invariants(&self) {
        use std::collections::HashSet;

        let dense = self.dense_position_count();
        assert!(dense <= self.len());
        assert_eq!(self.len() - dense, self.idx_key.len());
        assert_eq!(self.idx_key.len(), self.key_map.len());
        for (slot, &key) in self.idx_key.iter().enumerate() {
            assert!(key < 0 || key >= self.dense_key_limit,
                    "sparse key {} inside dense run [0, {})", key, self.dense_key_limit);
            assert_eq!(Some(&(dense + slot)), self.key_map.get(&key));
        }
        let mut seen = HashSet::new();
        for position in 0..self.len() {
            let key = self.nth_key(position);
            assert!(seen.insert(key), "duplicate key {}", key);
            assert!(key < self.available_key || key == i64::MAX);
            let symbol = self.nth_symbol(position).expect("position in range");
            assert_eq!(key, self.find_key(symbol));
            assert_eq!(Some(symbol), self.find_symbol(key));
        }
    }
}
