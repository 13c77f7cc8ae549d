//! Bitstream assembler (spec §4.D): mode indicator, character count
//! indicator, mode-specific payload, terminator, bit-alignment padding and
//! alternating byte padding, producing exactly `8 * data_codewords` bits.

use crate::bits::BitBuffer;
use crate::capacity::CapacityRecord;
use crate::error::QrError;
use crate::mode::Mode;

const ALPHANUMERIC_CHARSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

fn alphanumeric_code(c: u8) -> Option<u16> {
    ALPHANUMERIC_CHARSET
        .iter()
        .position(|&x| x == c)
        .map(|p| p as u16)
}

pub fn assemble(
    message: &str,
    mode: Mode,
    version: u8,
    record: &CapacityRecord,
) -> Result<Vec<u8>, QrError> {
    let len = match mode {
        Mode::Byte => message.len(),
        _ => message.chars().count(),
    };

    let mut buf = BitBuffer::new();
    buf.push_bits(mode.indicator(), 4);
    buf.push_bits(len as u32, mode.char_count_bits(version));

    match mode {
        Mode::Numeric => push_numeric(&mut buf, message)?,
        Mode::Alphanumeric => push_alphanumeric(&mut buf, message)?,
        Mode::Byte => push_byte(&mut buf, message),
    }

    let target_bits = record.data_codewords as usize * 8;
    buf.push_terminator(4, target_bits);
    buf.align_to_byte();
    buf.pad_with_codewords(target_bits);

    Ok(buf.into_bytes())
}

fn push_numeric(buf: &mut BitBuffer, message: &str) -> Result<(), QrError> {
    let digits: Vec<u8> = message
        .bytes()
        .map(|b| {
            if b.is_ascii_digit() {
                Ok(b - b'0')
            } else {
                Err(QrError::InvalidCharacter {
                    mode: Mode::Numeric,
                    ch: b as char,
                })
            }
        })
        .collect::<Result<_, _>>()?;

    for chunk in digits.chunks(3) {
        let value = chunk.iter().fold(0u32, |acc, &d| acc * 10 + d as u32);
        let bits = match chunk.len() {
            1 => 4,
            2 => 7,
            _ => 10,
        };
        buf.push_bits(value, bits);
    }
    Ok(())
}

fn push_alphanumeric(buf: &mut BitBuffer, message: &str) -> Result<(), QrError> {
    let upper = message.to_ascii_uppercase();
    let codes: Vec<u16> = upper
        .bytes()
        .map(|b| {
            alphanumeric_code(b).ok_or(QrError::InvalidCharacter {
                mode: Mode::Alphanumeric,
                ch: b as char,
            })
        })
        .collect::<Result<_, _>>()?;

    for chunk in codes.chunks(2) {
        if chunk.len() == 2 {
            buf.push_bits(45 * chunk[0] as u32 + chunk[1] as u32, 11);
        } else {
            buf.push_bits(chunk[0] as u32, 6);
        }
    }
    Ok(())
}

fn push_byte(buf: &mut BitBuffer, message: &str) {
    // Byte mode is scoped to ISO-8859-1: every `char` of the input is
    // expected to already be a single octet's worth of value (ASCII in
    // practice); values above 0xFF cannot occur from a `str`'s bytes.
    for b in message.bytes() {
        buf.push_bits(b as u32, 8);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capacity::{self, BlockGroup};
    use crate::mode::EcLevel;

    #[test]
    fn spec_s1_hello_world_alphanumeric_q_v1() {
        let record = capacity::table().lookup(1, EcLevel::Q).unwrap();
        let data = assemble("HELLO WORLD", Mode::Alphanumeric, 1, &record).unwrap();
        let expected: Vec<u8> = vec![
            0x20, 0x5B, 0x0B, 0x78, 0xD1, 0x72, 0xDC, 0x4D, 0x43, 0x40, 0xEC, 0x11, 0xEC,
        ];
        assert_eq!(data, expected);
    }

    #[test]
    fn spec_s2_numeric_01234567_m_v1() {
        let record = capacity::table().lookup(1, EcLevel::M).unwrap();
        let data = assemble("01234567", Mode::Numeric, 1, &record).unwrap();
        let expected: Vec<u8> = vec![
            0x10, 0x20, 0x0C, 0x56, 0x61, 0x80, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11,
            0xEC, 0x11,
        ];
        assert_eq!(data, expected);
    }

    #[test]
    fn spec_s3_empty_byte_l_v1() {
        let record = capacity::table().lookup(1, EcLevel::L).unwrap();
        let data = assemble("", Mode::Byte, 1, &record).unwrap();
        let expected: Vec<u8> = vec![
            0x40, 0x00, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11,
            0xEC, 0x11, 0xEC, 0x11, 0xEC,
        ];
        assert_eq!(data, expected);
    }

    #[test]
    fn invalid_numeric_character_rejected() {
        let record = capacity::table().lookup(1, EcLevel::M).unwrap();
        let err = assemble("12a4", Mode::Numeric, 1, &record).unwrap_err();
        assert!(matches!(err, QrError::InvalidCharacter { .. }));
    }

    #[test]
    fn alphanumeric_lowercase_is_uppercased() {
        let record = capacity::table().lookup(1, EcLevel::Q).unwrap();
        let lower = assemble("hello world", Mode::Alphanumeric, 1, &record).unwrap();
        let upper = assemble("HELLO WORLD", Mode::Alphanumeric, 1, &record).unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn output_size_matches_data_codewords() {
        let record = CapacityRecord {
            data_codewords: 16,
            ec_per_block: 10,
            groups: (BlockGroup { block_count: 1, data_per_block: 16 }, None),
        };
        let data = assemble("HELLO", Mode::Byte, 1, &record).unwrap();
        assert_eq!(data.len(), 16);
    }
}
