// Copyright (C) 2016 Symtab Project Contributors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-Apache
// or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// at your option. This file may not be copied, modified, or
// distributed except according to those terms.
//! Compatibility digests over a table's contents.
//!
//! Two digests are kept.  The unlabeled one covers only the symbol text; the
//! labeled one covers each `symbol<TAB>key` pair and is what
//! [`compat_symbols`](../fn.compat_symbols.html) compares.  Both are computed
//! lazily on first request after a mutation and then cached.
//!
//! The labeled digest skips sparse keys below the dense key limit (in
//! practice: negative keys).  Existing archives were written with that
//! behaviour, so it is kept to let their checksums compare equal.
use parking_lot::{RwLock, RwLockUpgradableReadGuard};

use crate::keyspace::KeySpace;

/// Number of bytes in a digest.
pub const CHECKSUM_LENGTH: usize = 32;

/// Rolling XOR digest: byte `n` of the input is folded into slot
/// `n % CHECKSUM_LENGTH`.
#[derive(Clone, Debug)]
pub struct CheckSummer {
    count: usize,
    check_sum: [u8; CHECKSUM_LENGTH],
}

impl CheckSummer {
    pub fn new() -> Self {
        CheckSummer{count: 0, check_sum: [0; CHECKSUM_LENGTH]}
    }

    pub fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.check_sum[self.count % CHECKSUM_LENGTH] ^= byte;
            self.count += 1;
        }
    }

    /// Render the digest as lowercase hex.
    pub fn digest(&self) -> String {
        hex::encode(self.check_sum)
    }
}

/// Both digests for one version of a table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Checksums {
    pub unlabeled: String,
    pub labeled: String,
}

impl Checksums {
    /// Compute both digests for `keys`.
    pub fn compute(keys: &KeySpace) -> Self {
        let mut check_sum = CheckSummer::new();
        for position in 0..keys.len() {
            if let Some(symbol) = keys.nth_symbol(position) {
                check_sum.update(symbol.as_bytes());
                check_sum.update(&[0]);
            }
        }

        let mut labeled = CheckSummer::new();
        let limit = keys.dense_key_limit();
        let sparse = keys.sparse_entries().filter(|&(key, _)| key >= limit);
        for (key, symbol) in keys.dense_entries().chain(sparse) {
            labeled.update(format!("{}\t{}", symbol, key).as_bytes());
        }

        Checksums{unlabeled: check_sum.digest(), labeled: labeled.digest()}
    }
}

/// Lazily filled checksum slot.
///
/// Readers share the lock while the value is valid.  On a miss, exactly one
/// reader at a time may hold the upgradable lock, so the digests are computed
/// at most once per invalidation however many threads ask for them.
#[derive(Debug, Default)]
pub struct ChecksumCache {
    slot: RwLock<Option<Checksums>>,
}

impl ChecksumCache {
    #[cfg(test)]
    pub fn new() -> Self {
        Default::default()
    }

    /// Drop the cached digests.  Requires exclusive access, which every
    /// mutation of the owning table already has.
    pub fn invalidate(&mut self) {
        *self.slot.get_mut() = None;
    }

    /// Check whether digests are currently cached.
    #[cfg(test)]
    pub fn is_valid(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Fetch the digests, computing them with `compute` if the cache is
    /// stale.
    pub fn get_or_compute<F>(&self, compute: F) -> Checksums
        where F: FnOnce() -> Checksums
    {
        if let Some(ref sums) = *self.slot.read() {
            return sums.clone();
        }
        let guard = self.slot.upgradable_read();
        // Another reader may have filled the slot while we waited.
        if let Some(ref sums) = *guard {
            return sums.clone();
        }
        let sums = compute();
        let mut guard = RwLockUpgradableReadGuard::upgrade(guard);
        *guard = Some(sums.clone());
        sums
    }
}

impl Clone for ChecksumCache {
    fn clone(&self) -> Self {
        ChecksumCache{slot: RwLock::new(self.slot.read().clone())}
    }
}
