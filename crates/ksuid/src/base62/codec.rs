use crate::{Error, FormatError, Result};

/// Number of characters in an encoded KSUID.
pub const BASE62_CHARS: usize = 27;

/// Number of 32-bit words in the 160-bit intermediate number.
pub const WORDS: usize = 5;

const RADIX: u64 = 62;
const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const NO_VALUE: u8 = 255;

/// Lookup table for base-62 decoding
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    while i < 62 {
        lut[ALPHABET[i as usize] as usize] = i;
        i += 1;
    }
    lut
};

/// A 160-bit unsigned number as five big-endian 32-bit words.
///
/// Word 0 is the most significant. Only used transiently while converting
/// between the binary and the string form.
pub type Words = [u32; WORDS];

/// Encodes a 160-bit number into exactly [`BASE62_CHARS`] base-62 ASCII
/// bytes, left-padded with `'0'`.
///
/// Digits are produced least-significant first by repeated long division of
/// the word array by 62.
#[must_use]
pub fn encode_base62(words: &Words) -> [u8; BASE62_CHARS] {
    let mut buf = [ALPHABET[0]; BASE62_CHARS];
    let mut number = *words;
    let mut out = BASE62_CHARS;

    while !is_zero(&number) && out > 0 {
        let remainder = div_rem(&mut number, RADIX);
        out -= 1;
        buf[out] = ALPHABET[remainder as usize];
    }
    debug_assert!(is_zero(&number), "160-bit value needs more than 27 digits");

    buf
}

/// Decodes a base-62 string into a 160-bit number.
///
/// # Errors
///
/// - [`Error::InvalidFormat`] if the input is not exactly [`BASE62_CHARS`]
///   bytes or contains a byte outside the alphabet
/// - [`Error::InvalidOverflow`] if the value does not fit in 160 bits
pub fn decode_base62(encoded: &str) -> Result<Words> {
    let bytes = encoded.as_bytes();
    if bytes.len() != BASE62_CHARS {
        return Err(FormatError::Length { len: bytes.len() }.into());
    }

    let mut number = [0_u32; WORDS];
    for (index, &byte) in bytes.iter().enumerate() {
        let digit = LOOKUP[byte as usize];
        if digit == NO_VALUE {
            return Err(FormatError::Character { byte, index }.into());
        }
        if mul_add(&mut number, RADIX, u64::from(digit)) != 0 {
            return Err(Error::InvalidOverflow);
        }
    }

    Ok(number)
}

/// Returns `true` if `encoded` is 27 characters of the base-62 alphabet.
///
/// This is a structural check only: a string that passes may still be
/// rejected by [`decode_base62`] with [`Error::InvalidOverflow`].
#[must_use]
pub fn is_valid_base62(encoded: &str) -> bool {
    encoded.len() == BASE62_CHARS
        && encoded
            .bytes()
            .all(|byte| LOOKUP[byte as usize] != NO_VALUE)
}

/// Divides `number` in place by `divisor`, most significant word first, and
/// returns the remainder.
fn div_rem(number: &mut Words, divisor: u64) -> u64 {
    let mut carry = 0_u64;
    for word in number.iter_mut() {
        let acc = (carry << 32) | u64::from(*word);
        *word = (acc / divisor) as u32;
        carry = acc % divisor;
    }
    carry
}

/// Computes `number * multiplier + addend` in place, least significant word
/// first, and returns the carry out of the most significant word.
fn mul_add(number: &mut Words, multiplier: u64, addend: u64) -> u64 {
    let mut carry = addend;
    for word in number.iter_mut().rev() {
        let acc = u64::from(*word) * multiplier + carry;
        *word = acc as u32;
        carry = acc >> 32;
    }
    carry
}

fn is_zero(number: &Words) -> bool {
    number.iter().all(|&word| word == 0)
}
