//! Bit-expansion transcoding
//!
//! Every input bit becomes two output bits, `0 -> 01` and `1 -> 10`, read and
//! written most-significant bit first. Each input byte therefore maps to
//! exactly one 16-bit output word, so the output is always twice the input
//! length and no padding is ever needed.

use crate::error::CodecError;

/// Expand each bit of `input` into a two-bit pair
///
/// # Example
/// ```
/// use blob_transform::bit_expand;
/// // 0b1000_0001 -> 10 01 01 01 | 01 01 01 10
/// assert_eq!(bit_expand(&[0x81]), vec![0x95, 0x56]);
/// ```
pub fn bit_expand(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len() * 2);
    for &byte in input {
        out.extend_from_slice(&expand_byte(byte).to_be_bytes());
    }
    out
}

fn expand_byte(byte: u8) -> u16 {
    let mut word = 0u16;
    for bit in (0..8).rev() {
        let pair = if byte & (1 << bit) != 0 { 0b10 } else { 0b01 };
        word = (word << 2) | pair;
    }
    word
}

/// Invert [`bit_expand`]
///
/// Fails on odd-length input or on any `00`/`11` pair.
pub fn bit_collapse(input: &[u8]) -> Result<Vec<u8>, CodecError> {
    if input.len() % 2 != 0 {
        return Err(CodecError::OddLength(input.len()));
    }

    let mut out = Vec::with_capacity(input.len() / 2);
    for (i, pair) in input.chunks_exact(2).enumerate() {
        let word = u16::from_be_bytes([pair[0], pair[1]]);
        let mut byte = 0u8;
        for slot in (0..8).rev() {
            let bits = ((word >> (slot * 2)) & 0b11) as u8;
            let bit = match bits {
                0b01 => 0,
                0b10 => 1,
                _ => {
                    // slots 7..4 live in the first byte of the pair
                    let offset = if slot >= 4 { i * 2 } else { i * 2 + 1 };
                    return Err(CodecError::InvalidBitPair { offset, pair: bits });
                }
            };
            byte = (byte << 1) | bit;
        }
        out.push(byte);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_extremes() {
        assert_eq!(bit_expand(&[0x00]), vec![0x55, 0x55]);
        assert_eq!(bit_expand(&[0xFF]), vec![0xAA, 0xAA]);
        assert_eq!(bit_expand(&[]), Vec::<u8>::new());
    }

    #[test]
    fn test_expand_matches_bit_string_definition() {
        let input = [0xDE, 0xAD, 0x01];

        // build the expanded bit string the long way
        let bits: String = input
            .iter()
            .map(|b| format!("{:08b}", b))
            .collect::<String>()
            .chars()
            .map(|c| if c == '1' { "10" } else { "01" })
            .collect();
        assert_eq!(bits.len() % 8, 0);
        let expected: Vec<u8> = bits
            .as_bytes()
            .chunks(8)
            .map(|chunk| u8::from_str_radix(std::str::from_utf8(chunk).unwrap(), 2).unwrap())
            .collect();

        assert_eq!(bit_expand(&input), expected);
    }

    #[test]
    fn test_collapse_round_trip() {
        let input = b"transport".to_vec();
        assert_eq!(bit_collapse(&bit_expand(&input)).unwrap(), input);
    }

    #[test]
    fn test_collapse_rejects_bad_input() {
        assert_eq!(bit_collapse(&[0x55]), Err(CodecError::OddLength(1)));
        // second byte starts with a 11 pair
        assert_eq!(
            bit_collapse(&[0x55, 0xD5]),
            Err(CodecError::InvalidBitPair { offset: 1, pair: 0b11 })
        );
        assert_eq!(
            bit_collapse(&[0x15, 0x55]),
            Err(CodecError::InvalidBitPair { offset: 0, pair: 0b00 })
        );
    }
}
