//! Probabilistic prime generation.
//!
//! The primality test is a Solovay–Strassen-style Jacobi-witness test. A
//! composite number slips through a single trial with probability up to 1/2
//! (an Euler pseudo-prime fools roughly half of all witnesses), so the error
//! bound after `k` trials is 2^-k at best, not better. The trial count below
//! keeps that original behaviour; swapping in Miller–Rabin would tighten the
//! bound but change which candidates are accepted.

use crate::errors::RsaCryptoError;
use crate::random::SecureRandom;

use log::debug;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

/// Number of witness trials per candidate.
pub const DEFAULT_TRIALS: usize = 6;

/// Computes the Jacobi symbol `(a/b)` for odd positive `b`.
///
/// Returns -1, 0 or 1, by iterated reduction with the quadratic reciprocity
/// rules.
///
/// # Example
///
/// ```
/// # use num_bigint::BigUint;
/// # use rsa_crypto::prime::jacobi;
/// assert_eq!(jacobi(&BigUint::from(2u32), &BigUint::from(7u32)), 1);
/// assert_eq!(jacobi(&BigUint::from(2u32), &BigUint::from(3u32)), -1);
/// assert_eq!(jacobi(&BigUint::from(6u32), &BigUint::from(3u32)), 0);
/// ```
pub fn jacobi(a: &BigUint, b: &BigUint) -> i8 {
    if a.is_zero() {
        return 0;
    }

    let mut a = a.clone();
    let mut b = b.clone();
    let mut result = 1i8;

    while a > BigUint::one() {
        if a.is_odd() {
            if ((&a - 1u32) * (&b - 1u32)).bit(2) {
                result = -result;
            }
            let r = &b % &a;
            b = std::mem::replace(&mut a, r);
        } else {
            if (&b * &b - 1u32).bit(3) {
                result = -result;
            }
            a >>= 1;
        }
    }

    if a.is_zero() {
        return 0;
    }

    result
}

/// Returns `true` when `x` proves `n` composite.
///
/// `x` fails to be a witness exactly when the Jacobi symbol `(x/n)`, reduced
/// modulo `n`, equals `x^((n-1)/2) mod n` (i.e. `n` is an Euler pseudo-prime
/// for base `x`).
pub fn jacobi_witness(x: &BigUint, n: &BigUint) -> bool {
    let j = match jacobi(x, n) {
        0 => BigUint::zero(),
        1 => BigUint::one(),
        _ => n - 1u32,
    };

    let f = x.modpow(&((n - 1u32) >> 1), n);

    j != f
}

/// Tests whether `candidate` is probably prime.
///
/// Draws [`DEFAULT_TRIALS`] independent witnesses from `[1, n-1]`; any single
/// witness mismatch proves compositeness.
pub fn is_prime(candidate: &BigUint, rng: &mut dyn SecureRandom) -> bool {
    let two = BigUint::from(2u32);

    if candidate < &two {
        return false;
    }
    if candidate == &two {
        return true;
    }
    if candidate.is_even() {
        return false;
    }

    for _ in 0..DEFAULT_TRIALS {
        let x = rng.random_below(&(candidate - &two)) + 1u32;
        if jacobi_witness(&x, candidate) {
            return false;
        }
    }

    true
}

/// Generates a probable prime of exactly `bits` bits.
///
/// Candidates are drawn with the top bit set (fixing the bit length) and the
/// low bit set (an even candidate would be pointless); the first one that
/// passes the primality test wins.
///
/// # Errors
///
/// Returns [`RsaCryptoError::PrimeSearchExhausted`] when `max_attempts` is
/// given and that many candidates were rejected. With `None` the search runs
/// until it succeeds.
pub fn generate_prime(
    bits: u64,
    rng: &mut dyn SecureRandom,
    max_attempts: Option<u64>,
) -> Result<BigUint, RsaCryptoError> {
    if bits < 2 {
        return Err(RsaCryptoError::InvalidArgument(format!(
            "cannot generate a prime of {bits} bits"
        )));
    }

    let mut attempts: u64 = 0;
    loop {
        if let Some(max) = max_attempts {
            if attempts >= max {
                return Err(RsaCryptoError::PrimeSearchExhausted(attempts));
            }
        }
        attempts += 1;

        let mut candidate = rng.read_random_int(bits);
        candidate.set_bit(0, true);

        if is_prime(&candidate, rng) {
            debug!("found {bits}-bit probable prime after {attempts} candidate(s)");
            return Ok(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::random::SeededRandom;

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn test_jacobi_matches_euler_criterion_for_primes() {
        // For an odd prime p, (a/p) = a^((p-1)/2) mod p.
        for p in [3u64, 5, 7, 11, 13, 17, 19, 23] {
            for a in 1..p {
                let expected = big(a).modpow(&big((p - 1) / 2), &big(p));
                let symbol = match jacobi(&big(a), &big(p)) {
                    0 => big(0),
                    1 => big(1),
                    _ => big(p - 1),
                };
                assert_eq!(symbol, expected, "jacobi({a}/{p})");
            }
        }
    }

    #[test]
    fn test_is_prime_on_known_values() {
        let mut rng = SeededRandom::from_seed(91);

        assert!(is_prime(&big(41), &mut rng));
        assert!(!is_prime(&big(42), &mut rng));
        assert!(is_prime(&big(2), &mut rng));
        assert!(!is_prime(&big(1), &mut rng));
        assert!(!is_prime(&big(0), &mut rng));

        // 2^61 - 1 is a Mersenne prime; its neighbours are not.
        let mersenne = big(2305843009213693951);
        assert!(is_prime(&mersenne, &mut rng));
        assert!(!is_prime(&(&mersenne - 2u32), &mut rng));
        assert!(!is_prime(&(&mersenne + 2u32), &mut rng));
    }

    #[test]
    fn test_jacobi_witness_exposes_carmichael_numbers() {
        // Fermat pseudo-primes to every coprime base; the Euler criterion
        // still finds a small witness for each of them.
        for carmichael in [561u64, 1105, 1729, 2465, 2821, 6601] {
            let n = big(carmichael);
            let found = (2u64..21).any(|x| jacobi_witness(&big(x), &n));
            assert!(found, "no witness below 21 for {carmichael}");
        }
    }

    #[test]
    fn test_generate_prime_has_requested_shape() {
        let mut rng = SeededRandom::from_seed(5);

        for bits in [64u64, 128, 129] {
            let prime = generate_prime(bits, &mut rng, None).unwrap();
            assert_eq!(prime.bits(), bits);
            assert!(prime.is_odd());
        }
    }

    #[test]
    fn test_generate_prime_respects_attempt_bound() {
        let mut rng = SeededRandom::from_seed(5);

        let err = generate_prime(128, &mut rng, Some(0)).unwrap_err();
        assert!(matches!(err, RsaCryptoError::PrimeSearchExhausted(0)));
    }

    #[test]
    fn test_generate_prime_rejects_tiny_widths() {
        let mut rng = SeededRandom::from_seed(5);

        assert!(generate_prime(1, &mut rng, None).is_err());
        assert!(generate_prime(0, &mut rng, None).is_err());
    }
}
