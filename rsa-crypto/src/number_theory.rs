//! Integer arithmetic underpinning key generation: greatest common divisors,
//! modular inverses and Chinese Remainder reconstruction.

use crate::errors::RsaCryptoError;

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Signed, Zero};

/// Computes the greatest common divisor of two nonnegative numbers.
///
/// # Example
///
/// ```
/// # use num_bigint::BigUint;
/// # use rsa_crypto::number_theory::gcd;
/// let g = gcd(&BigUint::from(48u32), &BigUint::from(180u32));
/// assert_eq!(g, BigUint::from(12u32));
/// ```
pub fn gcd(p: &BigUint, q: &BigUint) -> BigUint {
    let mut p = p.clone();
    let mut q = q.clone();

    while !q.is_zero() {
        if p < q {
            std::mem::swap(&mut p, &mut q);
        }
        let r = &p % &q;
        p = q;
        q = r;
    }

    p
}

/// Returns `true` when `a` and `b` share no factor besides 1.
pub fn are_relatively_prime(a: &BigUint, b: &BigUint) -> bool {
    gcd(a, b).is_one()
}

/// Extended Euclidean algorithm. Returns `(r, i, j)` with `r = gcd(a, b)`,
/// where `i` is the multiplicative inverse of `a` modulo `b` and `j` the
/// inverse of `b` modulo `a` whenever those inverses exist. Both coefficients
/// are wrapped into the nonnegative range before returning, so `i * a ≡ r
/// (mod b)` and `j * b ≡ r (mod a)`.
///
/// # Example
///
/// ```
/// # use num_bigint::BigUint;
/// # use rsa_crypto::number_theory::extended_gcd;
/// let (r, i, j) = extended_gcd(&BigUint::from(7u32), &BigUint::from(4u32));
/// assert_eq!(r, BigUint::from(1u32));
/// assert_eq!(i, BigUint::from(3u32)); // 3 * 7 = 21 = 1 mod 4
/// assert_eq!(j, BigUint::from(2u32)); // 2 * 4 =  8 = 1 mod 7
/// ```
pub fn extended_gcd(a: &BigUint, b: &BigUint) -> (BigUint, BigUint, BigUint) {
    let mut a = BigInt::from(a.clone());
    let mut b = BigInt::from(b.clone());

    let original_a = a.clone();
    let original_b = b.clone();

    let mut x = BigInt::zero();
    let mut y = BigInt::one();
    let mut lx = BigInt::one();
    let mut ly = BigInt::zero();

    while !b.is_zero() {
        let q = &a / &b;
        let r = &a % &b;

        a = std::mem::replace(&mut b, r);

        let next_x = &lx - &q * &x;
        lx = std::mem::replace(&mut x, next_x);

        let next_y = &ly - &q * &y;
        ly = std::mem::replace(&mut y, next_y);
    }

    // Wrap negative coefficients modulo the original operands.
    if lx.is_negative() {
        lx += &original_b;
    }
    if ly.is_negative() {
        ly += &original_a;
    }

    (
        a.magnitude().clone(),
        lx.magnitude().clone(),
        ly.magnitude().clone(),
    )
}

/// Computes the modular multiplicative inverse `x⁻¹ mod n`.
///
/// # Errors
///
/// Returns [`RsaCryptoError::NotCoprime`] when `gcd(x, n) != 1`, carrying the
/// offending divisor.
///
/// # Example
///
/// ```
/// # use num_bigint::BigUint;
/// # use rsa_crypto::number_theory::inverse;
/// let inv = inverse(&BigUint::from(7u32), &BigUint::from(4u32)).unwrap();
/// assert_eq!(inv, BigUint::from(3u32));
/// assert!(inverse(&BigUint::from(2u32), &BigUint::from(4u32)).is_err());
/// ```
pub fn inverse(x: &BigUint, n: &BigUint) -> Result<BigUint, RsaCryptoError> {
    let (divider, inv, _) = extended_gcd(x, n);

    if !divider.is_one() {
        return Err(RsaCryptoError::NotCoprime(divider));
    }

    Ok(inv)
}

/// Chinese Remainder Theorem reconstruction.
///
/// Given pairwise coprime `moduli` and matching `residues`, returns the unique
/// `x` in `[0, ∏ mᵢ)` with `x ≡ aᵢ (mod mᵢ)` for every `i`, computed as
/// `Σ aᵢ · Mᵢ · (Mᵢ⁻¹ mod mᵢ) mod M` where `M = ∏ mᵢ` and `Mᵢ = M / mᵢ`.
///
/// # Errors
///
/// Returns [`RsaCryptoError::InvalidArgument`] when the slices differ in
/// length, and [`RsaCryptoError::NotCoprime`] when the moduli are not pairwise
/// coprime.
///
/// # Example
///
/// ```
/// # use num_bigint::BigUint;
/// # use rsa_crypto::number_theory::crt;
/// let residues = [BigUint::from(2u32), BigUint::from(3u32)];
/// let moduli = [BigUint::from(3u32), BigUint::from(5u32)];
/// assert_eq!(crt(&residues, &moduli).unwrap(), BigUint::from(8u32));
/// ```
pub fn crt(residues: &[BigUint], moduli: &[BigUint]) -> Result<BigUint, RsaCryptoError> {
    if residues.len() != moduli.len() {
        return Err(RsaCryptoError::InvalidArgument(format!(
            "expected as many residues as moduli, got {} and {}",
            residues.len(),
            moduli.len()
        )));
    }

    let combined: BigUint = moduli.iter().product();

    let mut x = BigUint::zero();
    for (a_i, m_i) in residues.iter().zip(moduli) {
        let m_part = &combined / m_i;
        let inv = inverse(&m_part, m_i)?;

        x += a_i * m_part * inv;
    }

    Ok(x % combined)
}
