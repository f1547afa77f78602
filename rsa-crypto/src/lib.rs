//! # RSA Crypto
//!
//! A self-contained RSA engine: keypair generation over probabilistically
//! tested primes, and PKCS#1 v1.5 encryption, decryption, signing and
//! verification.
//!
//! Randomness and hashing come in through the [`random::SecureRandom`] and
//! [`hash::HashProvider`] capabilities, so the whole engine is deterministic
//! once the providers are fixed.
//!
//! ```
//! use rsa_crypto::keypair::{KeygenOptions, generate_keypair};
//! use rsa_crypto::pkcs1;
//! use rsa_crypto::random::SystemRandom;
//!
//! # fn main() -> Result<(), rsa_crypto::errors::RsaCryptoError> {
//! let mut rng = SystemRandom;
//! let (public, private) = generate_keypair(512, &mut rng, &KeygenOptions::default())?;
//!
//! let ciphertext = pkcs1::encrypt(b"hello", &public, &mut rng)?;
//! assert_eq!(pkcs1::decrypt(&ciphertext, &private)?, b"hello");
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod errors;
pub mod hash;
pub mod keypair;
pub mod number_theory;
pub mod pem;
pub mod pkcs1;
pub mod prime;
pub mod random;
