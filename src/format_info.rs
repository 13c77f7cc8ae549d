//! Format word and version word BCH encoding (spec §4.I).
//!
//! Both words are computed with the same shift-and-XOR remainder technique:
//! repeatedly shift the working value left and XOR in the generator
//! polynomial whenever the departing bit is set. This mirrors the public
//! domain QR reference's format/version bit generation (`draw_format_bits`,
//! `draw_version`) rather than the teacher's bit-precise `awint_core`
//! arithmetic, which turned out to have no remaining use once the
//! polynomial width settled on plain `u32` shifts (see `DESIGN.md`).

use crate::mode::EcLevel;

const FORMAT_GENERATOR: u32 = 0x537; // 10100110111
const FORMAT_MASK: u32 = 0x5412; // 101010000010010
const VERSION_GENERATOR: u32 = 0x1F25; // 1111100100101

/// Computes the 15-bit format word for `(ec_level, mask_id)`, MSB first
/// (`bits[0]` is the most significant bit).
pub fn encode_format(ec_level: EcLevel, mask_id: u8) -> [bool; 15] {
    debug_assert!(mask_id < 8);
    let data = (ec_level.format_bits() as u32) << 3 | mask_id as u32;

    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * FORMAT_GENERATOR);
    }
    let word = ((data << 10) | rem) ^ FORMAT_MASK;
    debug_assert_eq!(word >> 15, 0);

    let mut bits = [false; 15];
    for (i, b) in bits.iter_mut().enumerate() {
        *b = (word >> (14 - i)) & 1 != 0;
    }
    bits
}

/// Computes the 18-bit version word for `version` (7..=40), MSB first.
pub fn encode_version(version: u8) -> [bool; 18] {
    debug_assert!((7..=40).contains(&version));
    let mut rem = version as u32;
    for _ in 0..12 {
        rem = (rem << 1) ^ ((rem >> 11) * VERSION_GENERATOR);
    }
    let word = (version as u32) << 12 | rem;
    debug_assert_eq!(word >> 18, 0);

    let mut bits = [false; 18];
    for (i, b) in bits.iter_mut().enumerate() {
        *b = (word >> (17 - i)) & 1 != 0;
    }
    bits
}
