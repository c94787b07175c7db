//! Hash builders with controlled bucket placement.

use std::hash::{BuildHasher, Hasher};

/// Every key hashes to the same value, so every key shares one bucket.
#[derive(Clone, Copy, Debug, Default)]
pub struct CollidingState;

impl BuildHasher for CollidingState {
    type Hasher = ConstantHasher;

    fn build_hasher(&self) -> ConstantHasher {
        ConstantHasher
    }
}

#[derive(Debug)]
pub struct ConstantHasher;

impl Hasher for ConstantHasher {
    fn finish(&self) -> u64 {
        7
    }

    fn write(&mut self, _bytes: &[u8]) {}
}

/// Integer keys hash to themselves, so key `k` lands in bucket
/// `k % bucket_count`.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityState;

impl BuildHasher for IdentityState {
    type Hasher = IdentityHasher;

    fn build_hasher(&self) -> IdentityHasher {
        IdentityHasher(0)
    }
}

#[derive(Debug)]
pub struct IdentityHasher(u64);

impl Hasher for IdentityHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.0 = (self.0 << 8) | u64::from(byte);
        }
    }

    fn write_u8(&mut self, n: u8) {
        self.0 = u64::from(n);
    }

    fn write_u16(&mut self, n: u16) {
        self.0 = u64::from(n);
    }

    fn write_u32(&mut self, n: u32) {
        self.0 = u64::from(n);
    }

    fn write_u64(&mut self, n: u64) {
        self.0 = n;
    }

    fn write_usize(&mut self, n: usize) {
        self.0 = n as u64;
    }

    fn write_i32(&mut self, n: i32) {
        self.0 = n as u32 as u64;
    }

    fn write_i64(&mut self, n: i64) {
        self.0 = n as u64;
    }
}
