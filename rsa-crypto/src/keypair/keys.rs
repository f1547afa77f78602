use crate::errors::RsaCryptoError;
use crate::pem;

use num_bigint::BigUint;

use serde::{Deserialize, Serialize};

/// PEM marker used by [`PublicKey::to_pem`].
pub const PUBLIC_KEY_MARKER: &str = "RSA PUBLIC KEY";
/// PEM marker used by [`PrivateKey::to_pem`].
pub const PRIVATE_KEY_MARKER: &str = "RSA PRIVATE KEY";

/// The public half of a keypair. Immutable once generated, so it can be
/// shared freely across threads for concurrent operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    /// The modulus, a product of two primes.
    pub n: BigUint,
    /// The public exponent.
    pub e: BigUint,
}

/// The private half of a keypair.
///
/// Beyond the private exponent `d` it carries the prime factors and the
/// reductions `exp1 = d mod (p-1)`, `exp2 = d mod (q-1)` and
/// `coef = q⁻¹ mod p`. Those exist purely so private-key exponentiation can
/// run through the Chinese Remainder Theorem, which is roughly four times
/// cheaper than a single `c^d mod n`. Recomputing any of them from the other
/// fields reproduces the stored value exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateKey {
    pub n: BigUint,
    pub e: BigUint,
    pub d: BigUint,
    pub p: BigUint,
    pub q: BigUint,
    pub exp1: BigUint,
    pub exp2: BigUint,
    pub coef: BigUint,
}

impl PublicKey {
    /// Renders the key as a PEM block with `RSA PUBLIC KEY` markers.
    pub fn to_pem(&self) -> Result<String, RsaCryptoError> {
        let contents = serde_json::to_vec(self)?;
        Ok(pem::save_pem(&contents, PUBLIC_KEY_MARKER))
    }

    /// Reads a key back from the PEM representation.
    ///
    /// # Errors
    ///
    /// Returns [`RsaCryptoError::InvalidPem`] on bad framing and
    /// [`RsaCryptoError::SerializationError`] when the payload does not
    /// describe a public key.
    pub fn from_pem(contents: &str) -> Result<Self, RsaCryptoError> {
        let payload = pem::load_pem(contents, PUBLIC_KEY_MARKER)?;
        Ok(serde_json::from_slice(&payload)?)
    }
}

impl PrivateKey {
    /// Renders the key as a PEM block with `RSA PRIVATE KEY` markers.
    pub fn to_pem(&self) -> Result<String, RsaCryptoError> {
        let contents = serde_json::to_vec(self)?;
        Ok(pem::save_pem(&contents, PRIVATE_KEY_MARKER))
    }

    /// Reads a key back from the PEM representation.
    pub fn from_pem(contents: &str) -> Result<Self, RsaCryptoError> {
        let payload = pem::load_pem(contents, PRIVATE_KEY_MARKER)?;
        Ok(serde_json::from_slice(&payload)?)
    }

    /// The public half of this key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            n: self.n.clone(),
            e: self.e.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::keypair::{KeygenOptions, generate_keypair};
    use crate::random::SeededRandom;

    #[test]
    fn test_public_key_pem_round_trip() {
        let mut rng = SeededRandom::from_seed(2024);
        let (public, _) = generate_keypair(256, &mut rng, &KeygenOptions::default()).unwrap();

        let encoded = public.to_pem().unwrap();
        assert!(encoded.starts_with("-----BEGIN RSA PUBLIC KEY-----\n"));

        let decoded = PublicKey::from_pem(&encoded).unwrap();
        assert_eq!(decoded, public);
    }

    #[test]
    fn test_private_key_pem_round_trip() {
        let mut rng = SeededRandom::from_seed(2024);
        let (_, private) = generate_keypair(256, &mut rng, &KeygenOptions::default()).unwrap();

        let decoded = PrivateKey::from_pem(&private.to_pem().unwrap()).unwrap();
        assert_eq!(decoded, private);
    }

    #[test]
    fn test_markers_are_not_interchangeable() {
        let mut rng = SeededRandom::from_seed(2024);
        let (public, _) = generate_keypair(256, &mut rng, &KeygenOptions::default()).unwrap();

        let encoded = public.to_pem().unwrap();
        assert!(PrivateKey::from_pem(&encoded).is_err());
    }

    #[test]
    fn test_public_key_extraction() {
        let mut rng = SeededRandom::from_seed(77);
        let (public, private) = generate_keypair(256, &mut rng, &KeygenOptions::default()).unwrap();

        assert_eq!(private.public_key(), public);
    }
}
