//! crypt(3) base-64 as used by `$7$` scrypt strings.
//!
//! Alphabet `./0-9A-Za-z`. Values are emitted least-significant 6-bit group
//! first, and byte strings are packed little-endian in 24-bit groups, so this
//! is **not** interchangeable with RFC 4648 base64.

/// The crypt alphabet, indexed by 6-bit value.
pub const ITOA64: &[u8; 64] = b"./0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Number of characters [`encode_bytes`] produces for `len` input bytes.
#[must_use]
pub const fn encoded_len(len: usize) -> usize {
    len.saturating_mul(8).div_ceil(6)
}

/// The 6-bit value of alphabet character `c`.
#[must_use]
pub fn char_value(c: u8) -> Option<u32> {
    ITOA64
        .iter()
        .position(|&a| a == c)
        .and_then(|i| u32::try_from(i).ok())
}

/// Encode the low `bits` of `value`, six bits per character.
#[allow(clippy::arithmetic_side_effects)] // shifts by 6 on a u32, bounded by `bits <= 32`
pub fn encode_u32(out: &mut String, value: u32, bits: u32) {
    let mut value = value;
    for _ in 0..bits.div_ceil(6) {
        out.push(char::from(ITOA64[(value & 0x3f) as usize]));
        value >>= 6;
    }
}

/// Decode a `bits`-wide value from the start of `src`.
///
/// Returns `None` if `src` is too short or holds a character outside the
/// alphabet.
#[must_use]
#[allow(clippy::arithmetic_side_effects)] // 6 * i < bits <= 30
pub fn decode_u32(src: &[u8], bits: u32) -> Option<u32> {
    let count = usize::try_from(bits.div_ceil(6)).ok()?;
    let chars = src.get(..count)?;
    let mut value = 0u32;
    for (i, &c) in chars.iter().enumerate() {
        value |= char_value(c)? << (6 * i);
    }
    Some(value)
}

/// Encode a byte string.
#[must_use]
#[allow(clippy::arithmetic_side_effects)] // chunks hold at most 3 bytes, so 8 * i < 24
pub fn encode_bytes(src: &[u8]) -> String {
    let mut out = String::with_capacity(encoded_len(src.len()));
    for chunk in src.chunks(3) {
        let mut value = 0u32;
        for (i, &byte) in chunk.iter().enumerate() {
            value |= u32::from(byte) << (8 * i);
        }
        // `chunk.len()` is 1..=3
        encode_u32(&mut out, value, 8 * chunk.len() as u32);
    }
    out
}
