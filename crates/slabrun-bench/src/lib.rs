//! Seeded workloads shared by the slabrun benchmarks.
//!
//! - [`shuffled_keys`]: a permutation of `0..n`
//! - [`churn_script`]: an insert/remove mix over a bounded key space

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One step of a map churn workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChurnOp {
    /// Insert the key (no-op if present).
    Insert(u64),
    /// Remove the key (no-op if absent).
    Remove(u64),
}

/// `0..n` in a seed-determined order.
pub fn shuffled_keys(n: usize, seed: u64) -> Vec<u64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut keys: Vec<u64> = (0..n as u64).collect();
    // Fisher-Yates
    for i in (1..keys.len()).rev() {
        let j = (rng.next_u64() % (i as u64 + 1)) as usize;
        keys.swap(i, j);
    }
    keys
}

/// `len` operations over keys in `0..key_space`, roughly two inserts for
/// every remove.
pub fn churn_script(len: usize, key_space: u64, seed: u64) -> Vec<ChurnOp> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            let draw = rng.next_u64();
            let key = (draw >> 2) % key_space.max(1);
            if draw % 3 == 0 {
                ChurnOp::Remove(key)
            } else {
                ChurnOp::Insert(key)
            }
        })
        .collect()
}
