//! Hash-digest provider and the DigestInfo prefixes used for signing.

use crate::errors::RsaCryptoError;

use lazy_static::lazy_static;

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// The hash algorithms supported for signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlg {
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlg {
    /// All supported algorithms, in prefix-lookup order.
    pub const ALL: [HashAlg; 5] = [
        HashAlg::Md5,
        HashAlg::Sha1,
        HashAlg::Sha256,
        HashAlg::Sha384,
        HashAlg::Sha512,
    ];

    /// The conventional name, as it appears in signing requests.
    pub fn name(&self) -> &'static str {
        match self {
            HashAlg::Md5 => "MD5",
            HashAlg::Sha1 => "SHA-1",
            HashAlg::Sha256 => "SHA-256",
            HashAlg::Sha384 => "SHA-384",
            HashAlg::Sha512 => "SHA-512",
        }
    }

    /// Digest length in bytes.
    pub fn digest_len(&self) -> usize {
        match self {
            HashAlg::Md5 => 16,
            HashAlg::Sha1 => 20,
            HashAlg::Sha256 => 32,
            HashAlg::Sha384 => 48,
            HashAlg::Sha512 => 64,
        }
    }
}

impl fmt::Display for HashAlg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlg {
    type Err = RsaCryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HashAlg::ALL
            .into_iter()
            .find(|alg| alg.name() == s)
            .ok_or_else(|| {
                RsaCryptoError::InvalidArgument(format!("unknown hash algorithm: {s}"))
            })
    }
}

lazy_static! {
    /// The fixed ASN.1 DigestInfo prefix for each algorithm. Prepending the
    /// prefix to a raw digest yields the DigestInfo block that PKCS#1 v1.5
    /// signatures carry; the prefix also identifies the algorithm when a
    /// signature is opened back up.
    pub static ref HASH_ASN1: HashMap<HashAlg, &'static [u8]> = {
        let mut map: HashMap<HashAlg, &'static [u8]> = HashMap::new();

        map.insert(
            HashAlg::Md5,
            &[
                0x30, 0x20, 0x30, 0x0c, 0x06, 0x08, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x02,
                0x05, 0x05, 0x00, 0x04, 0x10,
            ],
        );
        map.insert(
            HashAlg::Sha1,
            &[
                0x30, 0x21, 0x30, 0x09, 0x06, 0x05, 0x2b, 0x0e, 0x03, 0x02, 0x1a, 0x05, 0x00,
                0x04, 0x14,
            ],
        );
        map.insert(
            HashAlg::Sha256,
            &[
                0x30, 0x31, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04,
                0x02, 0x01, 0x05, 0x00, 0x04, 0x20,
            ],
        );
        map.insert(
            HashAlg::Sha384,
            &[
                0x30, 0x41, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04,
                0x02, 0x02, 0x05, 0x00, 0x04, 0x30,
            ],
        );
        map.insert(
            HashAlg::Sha512,
            &[
                0x30, 0x51, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04,
                0x02, 0x03, 0x05, 0x00, 0x04, 0x40,
            ],
        );

        map
    };
}

/// A provider of message digests for named algorithms.
///
/// Injected into signing and verification so that the engine itself stays
/// free of hashing details.
pub trait HashProvider {
    fn digest(&self, algorithm: HashAlg, message: &[u8]) -> Vec<u8>;
}

/// The default provider, backed by the RustCrypto digest implementations.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardHashes;

impl HashProvider for StandardHashes {
    fn digest(&self, algorithm: HashAlg, message: &[u8]) -> Vec<u8> {
        match algorithm {
            HashAlg::Md5 => Md5::digest(message).to_vec(),
            HashAlg::Sha1 => Sha1::digest(message).to_vec(),
            HashAlg::Sha256 => Sha256::digest(message).to_vec(),
            HashAlg::Sha384 => Sha384::digest(message).to_vec(),
            HashAlg::Sha512 => Sha512::digest(message).to_vec(),
        }
    }
}
