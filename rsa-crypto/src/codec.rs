//! Conversions between big-endian byte blocks and unsigned integers.
//!
//! Every wire-facing operation goes through this module so that block sizing
//! is checked in exactly one place.

use crate::errors::RsaCryptoError;

use num_bigint::BigUint;
use num_traits::Zero;

/// Interprets a byte sequence as a big-endian unsigned integer.
///
/// # Example
///
/// ```
/// # use num_bigint::BigUint;
/// # use rsa_crypto::codec::bytes_to_int;
/// assert_eq!(bytes_to_int(&[128, 64, 15]), BigUint::from(8405007u32));
/// ```
pub fn bytes_to_int(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Encodes a number as big-endian bytes.
///
/// Without a `block_size` the encoding is minimal. With one, the result is
/// left-padded with zero bytes to exactly `block_size` bytes.
///
/// # Errors
///
/// Returns [`RsaCryptoError::Overflow`] when the number's minimal encoding is
/// already longer than `block_size`.
///
/// # Example
///
/// ```
/// # use num_bigint::BigUint;
/// # use rsa_crypto::codec::int_to_bytes;
/// let number = BigUint::from(123456789u32);
/// assert_eq!(int_to_bytes(&number, None).unwrap(), vec![0x07, 0x5b, 0xcd, 0x15]);
/// assert_eq!(
///     int_to_bytes(&number, Some(6)).unwrap(),
///     vec![0x00, 0x00, 0x07, 0x5b, 0xcd, 0x15]
/// );
/// assert!(int_to_bytes(&number, Some(3)).is_err());
/// ```
pub fn int_to_bytes(number: &BigUint, block_size: Option<usize>) -> Result<Vec<u8>, RsaCryptoError> {
    let bytes = number.to_bytes_be();

    let Some(block_size) = block_size else {
        return Ok(bytes);
    };

    let needed = byte_size(number);
    if needed > block_size {
        return Err(RsaCryptoError::Overflow { needed, block_size });
    }

    let mut block = vec![0u8; block_size - needed];
    block.extend_from_slice(&bytes);

    Ok(block)
}

/// Returns the number of bits required to hold `number`. Zero still takes one
/// bit to write down.
///
/// # Example
///
/// ```
/// # use num_bigint::BigUint;
/// # use rsa_crypto::codec::bit_size;
/// assert_eq!(bit_size(&BigUint::from(1023u32)), 10);
/// assert_eq!(bit_size(&BigUint::from(1024u32)), 11);
/// assert_eq!(bit_size(&BigUint::from(1025u32)), 11);
/// # use num_traits::Zero;
/// assert_eq!(bit_size(&BigUint::zero()), 1);
/// ```
pub fn bit_size(number: &BigUint) -> u64 {
    if number.is_zero() {
        return 1;
    }

    number.bits()
}

/// Returns the number of bytes required to hold `number`, rounded up.
pub fn byte_size(number: &BigUint) -> usize {
    bit_size(number).div_ceil(8) as usize
}
