//! QR Code symbol encoder conforming to ISO/IEC 18004.
//!
//! Turns a text string into the square matrix of dark/light modules: version
//! and mode selection, bitstream assembly, Reed-Solomon error correction,
//! codeword interleaving, functional pattern layout, zigzag data steering,
//! and mask scoring/selection. Rendering, scanning, and the command line are
//! intentionally out of scope - [`encode`] hands back a flat `Vec<bool>`
//! matrix and a small [`Stats`] record, and nothing else.

#![allow(dead_code)]

mod bits;
mod bitstream;
pub mod capacity;
pub mod ecc;
mod error;
pub mod format_info;
mod gf;
pub mod matrix;
pub mod mode;
pub mod mask;
mod zigzag;

pub use error::QrError;
pub use mode::{EcLevel, Mode};

/// Inputs to [`encode`] beyond the message text itself.
#[derive(Debug, Clone, Copy)]
pub struct EncodeOptions {
    /// Explicit symbol version (1..=40). `None` picks the smallest version
    /// that fits the message at `ec_level`.
    pub version: Option<u8>,
    pub ec_level: EcLevel,
    pub mode: Mode,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            version: None,
            ec_level: EcLevel::M,
            mode: Mode::Byte,
        }
    }
}

/// A fully encoded QR Code symbol.
#[derive(Debug, Clone)]
pub struct QrCode {
    pub version: u8,
    pub ec_level: EcLevel,
    pub mask_id: u8,
    /// Side length of the symbol, `4*version + 17`.
    pub size: usize,
    /// Row-major `size * size` module grid; `true` is dark.
    pub matrix: Vec<bool>,
    pub stats: Stats,
}

#[derive(Debug, Clone, Copy)]
pub struct Stats {
    pub side: usize,
    pub total_codewords: usize,
    pub data_codewords: usize,
    pub ec_codewords: usize,
    pub mask_id: u8,
    pub message_len: usize,
}

/// Encodes `message` into a QR Code symbol.
pub fn encode(message: &str, options: EncodeOptions) -> Result<QrCode, QrError> {
    let EncodeOptions { version, ec_level, mode } = options;

    let message_len = match mode {
        Mode::Byte => message.len(),
        _ => message.chars().count(),
    };

    let version = mode::select_version(message_len, mode, ec_level, version)?;
    let record = capacity::table().lookup(version, ec_level)?;

    let data = bitstream::assemble(message, mode, version, &record)?;
    let codewords = ecc::interleave(&data, &record);
    let data_bits = bytes_to_bits(&codewords);

    let mut base = matrix::Matrix::new(version);
    zigzag::place_bits(&mut base, &data_bits);
    if version >= 7 {
        base.place_version_word(&format_info::encode_version(version));
    }

    let size = base.size;
    let (mask_id, final_matrix) = mask::select_best(size, |id| {
        let mut scratch = base.clone();
        scratch.place_format_word(&format_info::encode_format(ec_level, id));
        mask::apply(&scratch, id)
    });

    log::debug!(
        "encoded version={version} mode={mode:?} ec_level={ec_level:?} mask={mask_id}"
    );

    let ec_codewords = record.ec_per_block as usize * record.total_blocks() as usize;
    Ok(QrCode {
        version,
        ec_level,
        mask_id,
        size,
        matrix: final_matrix,
        stats: Stats {
            side: size,
            total_codewords: record.total_codewords(),
            data_codewords: record.data_codewords as usize,
            ec_codewords,
            mask_id,
            message_len,
        },
    })
}

fn bytes_to_bits(bytes: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for i in (0..8).rev() {
            bits.push((byte >> i) & 1 != 0);
        }
    }
    bits
}
