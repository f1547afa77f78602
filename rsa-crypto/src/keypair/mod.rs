//! Keypair generation.
//!
//! Derives a [`PublicKey`]/[`PrivateKey`] pair satisfying the RSA relations:
//! `n = p·q` for distinct primes `p`, `q`, and `e·d ≡ 1 (mod lcm(p-1, q-1))`.

pub mod keys;

pub use keys::{PRIVATE_KEY_MARKER, PUBLIC_KEY_MARKER, PrivateKey, PublicKey};

use crate::errors::RsaCryptoError;
use crate::number_theory::{are_relatively_prime, inverse};
use crate::prime::generate_prime;
use crate::random::SecureRandom;

use log::debug;

use num_bigint::BigUint;

/// Knobs for [`generate_keypair`]. The defaults match common practice: the
/// Fermat exponent 65537 and an unbounded prime search.
#[derive(Debug, Clone)]
pub struct KeygenOptions {
    /// The public exponent. Must be odd and greater than 1.
    pub exponent: u64,
    /// Upper bound on candidates tried per prime, `None` to search until a
    /// prime turns up.
    pub max_prime_attempts: Option<u64>,
}

impl Default for KeygenOptions {
    fn default() -> Self {
        Self {
            exponent: 65537,
            max_prime_attempts: None,
        }
    }
}

/// Generates a keypair with a modulus of roughly `bits` bits.
///
/// Both primes get `bits / 2` bits, so the modulus ends up at `bits` or
/// `bits - 1` bits. The search retries internally whenever the two primes
/// collide or the exponent shares a factor with `p-1` or `q-1`; neither
/// condition ever surfaces as an error.
///
/// # Errors
///
/// Returns [`RsaCryptoError::InvalidArgument`] for unusably small `bits` and
/// [`RsaCryptoError::PrimeSearchExhausted`] when a configured attempt bound
/// runs out.
pub fn generate_keypair(
    bits: u64,
    rng: &mut dyn SecureRandom,
    options: &KeygenOptions,
) -> Result<(PublicKey, PrivateKey), RsaCryptoError> {
    if bits < 16 {
        return Err(RsaCryptoError::InvalidArgument(format!(
            "modulus of {bits} bits is too small for a keypair"
        )));
    }

    let prime_bits = bits / 2;
    let e = BigUint::from(options.exponent);

    loop {
        let p = generate_prime(prime_bits, rng, options.max_prime_attempts)?;
        let q = generate_prime(prime_bits, rng, options.max_prime_attempts)?;

        if p == q {
            debug!("regenerating: both primes came out identical");
            continue;
        }

        let p_minus_1 = &p - 1u32;
        let q_minus_1 = &q - 1u32;

        // Rare, but a prime with e | p-1 would make d undefined.
        if !are_relatively_prime(&e, &p_minus_1) || !are_relatively_prime(&e, &q_minus_1) {
            debug!("regenerating: exponent {e} shares a factor with p-1 or q-1");
            continue;
        }

        let phi = &p_minus_1 * &q_minus_1;
        let d = inverse(&e, &phi)?;

        let exp1 = &d % &p_minus_1;
        let exp2 = &d % &q_minus_1;
        let coef = inverse(&q, &p)?;

        let n = &p * &q;

        let public = PublicKey {
            n: n.clone(),
            e: e.clone(),
        };
        let private = PrivateKey {
            n,
            e,
            d,
            p,
            q,
            exp1,
            exp2,
            coef,
        };

        return Ok((public, private));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::codec::bit_size;
    use crate::random::SeededRandom;

    use num_traits::One;

    #[test]
    fn test_modulus_is_product_of_distinct_primes() {
        let mut rng = SeededRandom::from_seed(3);
        let (public, private) = generate_keypair(256, &mut rng, &KeygenOptions::default()).unwrap();

        assert_eq!(private.p.clone() * &private.q, public.n);
        assert_ne!(private.p, private.q);
    }

    #[test]
    fn test_modulus_bit_size_is_close_to_requested() {
        for seed in 0..4u64 {
            let mut rng = SeededRandom::from_seed(seed);
            let (public, _) = generate_keypair(256, &mut rng, &KeygenOptions::default()).unwrap();

            let size = bit_size(&public.n);
            assert!(size == 256 || size == 255, "got {size} bits");
        }
    }

    #[test]
    fn test_exponent_relation_holds() {
        let mut rng = SeededRandom::from_seed(11);
        let (public, private) = generate_keypair(256, &mut rng, &KeygenOptions::default()).unwrap();

        assert_eq!(public.e, BigUint::from(65537u32));

        let phi = (&private.p - 1u32) * (&private.q - 1u32);
        assert!(((&private.e * &private.d) % phi).is_one());
    }

    #[test]
    fn test_custom_exponent() {
        let options = KeygenOptions {
            exponent: 17,
            ..KeygenOptions::default()
        };

        let mut rng = SeededRandom::from_seed(23);
        let (public, private) = generate_keypair(256, &mut rng, &options).unwrap();

        assert_eq!(public.e, BigUint::from(17u32));
        let phi = (&private.p - 1u32) * (&private.q - 1u32);
        assert!(((&private.e * &private.d) % phi).is_one());
    }

    #[test]
    fn test_rejects_tiny_modulus() {
        let mut rng = SeededRandom::from_seed(0);
        assert!(generate_keypair(8, &mut rng, &KeygenOptions::default()).is_err());
    }

    #[test]
    fn test_attempt_bound_is_honored() {
        let options = KeygenOptions {
            max_prime_attempts: Some(0),
            ..KeygenOptions::default()
        };

        let mut rng = SeededRandom::from_seed(0);
        let err = generate_keypair(256, &mut rng, &options).unwrap_err();
        assert!(matches!(err, RsaCryptoError::PrimeSearchExhausted(_)));
    }
}
