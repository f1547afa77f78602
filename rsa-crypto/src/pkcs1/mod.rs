//! PKCS#1 v1.5 encryption and signatures.
//!
//! Encryption blocks are type 2 (`00 02 <random PS> 00 <message>`), signature
//! blocks are type 1 (`00 01 <FF…FF> 00 <DigestInfo>`). Private-key
//! exponentiation runs through the Chinese Remainder Theorem fields of the
//! key.
//!
//! Every operation is a pure function of its inputs and the injected
//! providers; there is no engine state between calls, so operations on the
//! same key can run concurrently without synchronization.

use crate::codec;
use crate::errors::RsaCryptoError;
use crate::hash::{HASH_ASN1, HashAlg, HashProvider};
use crate::keypair::{PrivateKey, PublicKey};
use crate::random::SecureRandom;

use num_bigint::BigUint;

/// Bytes of overhead in an encryption block: the two header bytes, the
/// separator, and at least eight bytes of padding.
const ENCRYPTION_OVERHEAD: usize = 11;

/// Encrypts `message` with the public key.
///
/// The message is wrapped in a type 2 block before exponentiation: `00 02`,
/// then `k - len - 3` padding bytes drawn fresh from `rng` (zero bytes are
/// redrawn, the separator must stay unambiguous), then `00`, then the
/// message. The same message therefore encrypts differently on every call.
///
/// # Errors
///
/// Returns [`RsaCryptoError::MessageTooLong`] when the message exceeds
/// `byte_size(n) - 11` bytes.
pub fn encrypt(
    message: &[u8],
    public_key: &PublicKey,
    rng: &mut dyn SecureRandom,
) -> Result<Vec<u8>, RsaCryptoError> {
    let k = codec::byte_size(&public_key.n);

    if message.len() + ENCRYPTION_OVERHEAD > k {
        return Err(RsaCryptoError::MessageTooLong {
            max: k.saturating_sub(ENCRYPTION_OVERHEAD),
            actual: message.len(),
        });
    }

    let block = pad_for_encryption(message, k, rng);

    let m = codec::bytes_to_int(&block);
    let c = m.modpow(&public_key.e, &public_key.n);

    codec::int_to_bytes(&c, Some(k))
}

/// Decrypts a ciphertext produced by [`encrypt`].
///
/// # Errors
///
/// Returns [`RsaCryptoError::Decryption`] for a ciphertext of the wrong
/// length or a decrypted block that is not a well-formed type 2 block. All
/// failure modes report the same error: distinguishing them would leak which
/// structural check rejected the block and open the engine to a
/// padding-oracle attack.
pub fn decrypt(ciphertext: &[u8], private_key: &PrivateKey) -> Result<Vec<u8>, RsaCryptoError> {
    let k = codec::byte_size(&private_key.n);

    if ciphertext.len() != k {
        return Err(RsaCryptoError::Decryption);
    }

    let c = codec::bytes_to_int(ciphertext);
    let m = crt_power(&c, private_key);

    let block = codec::int_to_bytes(&m, Some(k)).map_err(|_| RsaCryptoError::Decryption)?;

    if !block.starts_with(&[0x00, 0x02]) {
        return Err(RsaCryptoError::Decryption);
    }

    // The padding run is everything up to the first zero byte; its bytes are
    // nonzero by construction of the search.
    let separator = block[2..]
        .iter()
        .position(|&byte| byte == 0x00)
        .ok_or(RsaCryptoError::Decryption)?;

    Ok(block[2 + separator + 1..].to_vec())
}

/// Signs `message` with the private key, hashing it with the named algorithm
/// (`"MD5"`, `"SHA-1"`, `"SHA-256"`, `"SHA-384"` or `"SHA-512"`).
///
/// The digest is wrapped in its DigestInfo prefix and a type 1 block:
/// `00 01`, then `FF` padding, then `00`, then the DigestInfo. The padding is
/// fixed, which is exactly what makes signing reproducible.
///
/// # Errors
///
/// Returns [`RsaCryptoError::InvalidArgument`] for an unknown hash name and
/// [`RsaCryptoError::MessageTooLong`] when the modulus is too small for the
/// chosen digest.
pub fn sign(
    message: &[u8],
    private_key: &PrivateKey,
    hash_name: &str,
    hashes: &dyn HashProvider,
) -> Result<Vec<u8>, RsaCryptoError> {
    let algorithm: HashAlg = hash_name.parse()?;

    let mut digest_info = HASH_ASN1[&algorithm].to_vec();
    digest_info.extend(hashes.digest(algorithm, message));

    let k = codec::byte_size(&private_key.n);
    if digest_info.len() + ENCRYPTION_OVERHEAD > k {
        return Err(RsaCryptoError::MessageTooLong {
            max: k.saturating_sub(ENCRYPTION_OVERHEAD),
            actual: digest_info.len(),
        });
    }

    let block = pad_for_signing(&digest_info, k);

    let m = codec::bytes_to_int(&block);
    let s = crt_power(&m, private_key);

    codec::int_to_bytes(&s, Some(k))
}

/// Verifies a signature over `message` against the public key.
///
/// Recovers the signed block with the public exponent, checks the type 1
/// structure, reads the hash algorithm out of the DigestInfo prefix and
/// compares the embedded digest against a fresh digest of `message`.
///
/// Success is the absence of an error.
///
/// # Errors
///
/// Returns [`RsaCryptoError::Verification`] for every failure mode: wrong
/// signature length, malformed block, unknown DigestInfo, or a digest
/// mismatch.
pub fn verify(
    message: &[u8],
    signature: &[u8],
    public_key: &PublicKey,
    hashes: &dyn HashProvider,
) -> Result<(), RsaCryptoError> {
    let k = codec::byte_size(&public_key.n);

    if signature.len() != k {
        return Err(RsaCryptoError::Verification);
    }

    let s = codec::bytes_to_int(signature);
    let m = s.modpow(&public_key.e, &public_key.n);

    let block = codec::int_to_bytes(&m, Some(k)).map_err(|_| RsaCryptoError::Verification)?;

    if !block.starts_with(&[0x00, 0x01]) {
        return Err(RsaCryptoError::Verification);
    }

    let padded = &block[2..];
    let run = padded
        .iter()
        .position(|&byte| byte != 0xff)
        .ok_or(RsaCryptoError::Verification)?;
    if padded[run] != 0x00 {
        return Err(RsaCryptoError::Verification);
    }

    let digest_info = &padded[run + 1..];
    let (algorithm, embedded_digest) =
        split_digest_info(digest_info).ok_or(RsaCryptoError::Verification)?;

    if hashes.digest(algorithm, message) != embedded_digest {
        return Err(RsaCryptoError::Verification);
    }

    Ok(())
}

/// Builds the type 2 block `00 02 <PS> 00 <message>` of exactly `k` bytes.
fn pad_for_encryption(message: &[u8], k: usize, rng: &mut dyn SecureRandom) -> Vec<u8> {
    let padding_len = k - message.len() - 3;

    let mut block = Vec::with_capacity(k);
    block.push(0x00);
    block.push(0x02);

    // Zero bytes would terminate the padding run early, so they are dropped
    // and redrawn until the run is full.
    while block.len() < 2 + padding_len {
        let wanted = 2 + padding_len - block.len();
        let fresh = rng.read_random_bytes(wanted);
        block.extend(fresh.into_iter().filter(|&byte| byte != 0x00));
    }

    block.push(0x00);
    block.extend_from_slice(message);

    block
}

/// Builds the type 1 block `00 01 <FF…FF> 00 <digest_info>` of exactly `k`
/// bytes.
fn pad_for_signing(digest_info: &[u8], k: usize) -> Vec<u8> {
    let padding_len = k - digest_info.len() - 3;

    let mut block = Vec::with_capacity(k);
    block.push(0x00);
    block.push(0x01);
    block.extend(std::iter::repeat_n(0xffu8, padding_len));
    block.push(0x00);
    block.extend_from_slice(digest_info);

    block
}

/// Splits a DigestInfo blob into algorithm and raw digest by matching the
/// known prefixes. No two prefixes are ambiguous, so order does not matter.
fn split_digest_info(digest_info: &[u8]) -> Option<(HashAlg, &[u8])> {
    HashAlg::ALL.into_iter().find_map(|algorithm| {
        let prefix = HASH_ASN1[&algorithm];

        if digest_info.len() == prefix.len() + algorithm.digest_len()
            && digest_info.starts_with(prefix)
        {
            Some((algorithm, &digest_info[prefix.len()..]))
        } else {
            None
        }
    })
}

/// Private-key exponentiation through the CRT fields: two half-size
/// exponentiations glued back together, algebraically identical to
/// `c^d mod n` at roughly a quarter of the cost.
fn crt_power(c: &BigUint, key: &PrivateKey) -> BigUint {
    let m1 = c.modpow(&key.exp1, &key.p);
    let m2 = c.modpow(&key.exp2, &key.q);

    // h = coef * (m1 - m2) mod p, lifted by p to keep the difference
    // nonnegative in unsigned arithmetic.
    let h = (&key.coef * (&key.p + &m1 - &m2 % &key.p)) % &key.p;

    &m2 + h * &key.q
}
