//! Random-byte providers.
//!
//! Randomness is handed to key generation and encryption as an explicit
//! capability instead of being pulled from ambient state, so every operation
//! is reproducible once the provider is fixed.

use crate::codec;

use num_bigint::BigUint;
use num_traits::Zero;

use rand::RngCore;
use rand::prelude::{SeedableRng, StdRng};

/// A source of cryptographically secure random bytes.
///
/// Only [`read_random_bytes`](SecureRandom::read_random_bytes) has to be
/// provided; the integer draws are derived from it.
pub trait SecureRandom {
    /// Returns `n` random bytes.
    fn read_random_bytes(&mut self, n: usize) -> Vec<u8>;

    /// Returns a random integer of exactly `bits` bits.
    ///
    /// The top bit is forced set so the result never falls short of the
    /// requested bit length.
    fn read_random_int(&mut self, bits: u64) -> BigUint {
        if bits == 0 {
            return BigUint::zero();
        }

        let nbytes = bits.div_ceil(8) as usize;
        let mut value = codec::bytes_to_int(&self.read_random_bytes(nbytes));

        value >>= nbytes as u64 * 8 - bits;
        value.set_bit(bits - 1, true);

        value
    }

    /// Returns an integer drawn uniformly from `[0, max]`.
    ///
    /// Uses rejection sampling over byte-aligned draws, so no draw is ever
    /// folded back into range (folding would skew the distribution).
    fn random_below(&mut self, max: &BigUint) -> BigUint {
        if max.is_zero() {
            return BigUint::zero();
        }

        let nbytes = codec::byte_size(max);
        loop {
            let candidate = codec::bytes_to_int(&self.read_random_bytes(nbytes));
            if &candidate <= max {
                return candidate;
            }
        }
    }
}

/// The operating-system-backed provider used in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRandom;

impl SecureRandom for SystemRandom {
    fn read_random_bytes(&mut self, n: usize) -> Vec<u8> {
        let mut buf = vec![0u8; n];
        rand::rng().fill_bytes(&mut buf);
        buf
    }
}

/// A deterministic provider for tests and benches.
///
/// Runs a [`StdRng`] from a fixed seed, so key generation and encryption
/// become repeatable. Do not use outside of tests.
#[derive(Debug, Clone)]
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl SecureRandom for SeededRandom {
    fn read_random_bytes(&mut self, n: usize) -> Vec<u8> {
        let mut buf = vec![0u8; n];
        self.0.fill_bytes(&mut buf);
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_random_int_has_exact_bit_length() {
        let mut rng = SeededRandom::from_seed(42);

        for bits in [2u64, 7, 8, 9, 63, 128, 511] {
            let value = rng.read_random_int(bits);
            assert_eq!(value.bits(), bits, "wrong width for {} bits", bits);
        }
    }

    #[test]
    fn test_random_below_stays_in_range() {
        let mut rng = SeededRandom::from_seed(7);
        let max = BigUint::from(1000u32);

        for _ in 0..200 {
            assert!(rng.random_below(&max) <= max);
        }
    }

    #[test]
    fn test_random_below_zero_is_zero() {
        let mut rng = SeededRandom::from_seed(7);
        assert!(rng.random_below(&BigUint::zero()).is_zero());
    }

    #[test]
    fn test_seeded_provider_is_reproducible() {
        let mut a = SeededRandom::from_seed(1234);
        let mut b = SeededRandom::from_seed(1234);

        assert_eq!(a.read_random_bytes(32), b.read_random_bytes(32));
        assert_eq!(a.read_random_int(256), b.read_random_int(256));
    }
}
