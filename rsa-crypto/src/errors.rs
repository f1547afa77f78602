use num_bigint::BigUint;

#[derive(thiserror::Error, Debug)]
pub enum RsaCryptoError {
    /// Error for arguments the operation cannot work with, such as an unknown
    /// hash algorithm name or residue/modulus slices of different lengths.
    #[error("InvalidArgument: {0}")]
    InvalidArgument(String),
    /// Error when trying to find a modular inverse that doesn't exist (gcd(x, n) != 1).
    #[error("NotCoprime: operands share the factor {0}")]
    NotCoprime(BigUint),
    /// Error when a number does not fit into a requested fixed block size.
    #[error("Overflow: needed {needed} bytes for number, but block size is {block_size}")]
    Overflow { needed: usize, block_size: usize },
    /// Error when a message is longer than the modulus and padding scheme allow.
    #[error("MessageTooLong: at most {max} bytes supported, got {actual}")]
    MessageTooLong { max: usize, actual: usize },

    /// Decryption failed. Carries no detail on purpose: reporting which
    /// structural check rejected the block would hand an attacker a padding
    /// oracle.
    #[error("decryption failed")]
    Decryption,
    /// Signature verification failed. Generic for the same reason as
    /// [`RsaCryptoError::Decryption`].
    #[error("verification failed")]
    Verification,

    /// Error when a bounded prime search ran out of attempts.
    #[error("PrimeSearchExhausted: no prime found within {0} attempts")]
    PrimeSearchExhausted(u64),

    /// Error when PEM contents are malformed (missing or duplicated markers).
    #[error("InvalidPem: {0}")]
    InvalidPem(String),

    #[error("Data serialization: {0}")]
    SerializationError(#[from] serde_json::Error),
}
