//! Error kinds surfaced by the encoding pipeline. All fallible entry points
//! return `Result<T, QrError>`; no partial [`crate::QrCode`] is ever handed
//! back to the caller.

use thiserror::Error;

use crate::mode::{EcLevel, Mode};

#[derive(Debug, Error)]
pub enum QrError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("character {ch:?} cannot be encoded in {mode:?} mode")]
    InvalidCharacter { mode: Mode, ch: char },

    #[error("message of {len} characters does not fit any version 1..=40 at {mode:?}/{ec_level:?}")]
    MessageTooLong {
        len: usize,
        mode: Mode,
        ec_level: EcLevel,
    },

    #[error("no capacity record for version {version} at {ec_level:?}")]
    CapacityUnavailable { version: u8, ec_level: EcLevel },

    #[error("failed to load capacity table: {0}")]
    TableLoadError(String),

    #[error("internal error: {0}")]
    InternalError(String),
}
