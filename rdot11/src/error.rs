//! Error taxonomy shared by the parse and serialize paths.
//!
//! Every length-prefixed read is bounds-checked before any byte is touched,
//! so a truncated capture surfaces as one of these variants instead of a
//! panic. "Option not found" and "unknown subtype" are valid results and do
//! not appear here.

use thiserror::Error;

/// Errors produced while decoding or encoding 802.11 frames.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Dot11Error {
    /// A fixed-size header requires more bytes than the buffer holds.
    #[error("header needs {required} bytes, buffer holds {available}")]
    MalformedHeader {
        /// Bytes the fixed structure requires.
        required: usize,
        /// Bytes actually available.
        available: usize,
    },

    /// A tagged option's declared length would read past the buffer end.
    #[error("option {tag} needs {required} bytes, buffer holds {available}")]
    MalformedOption {
        /// The option's tag byte.
        tag: u8,
        /// Bytes required from the start of the option.
        required: usize,
        /// Bytes actually available.
        available: usize,
    },

    /// A frame variant's fixed body is shorter than the variant requires.
    #[error("frame body needs {required} bytes, buffer holds {available}")]
    MalformedBody {
        /// Bytes the fixed body requires.
        required: usize,
        /// Bytes actually available.
        available: usize,
    },

    /// An option value longer than 255 bytes cannot be encoded in one tag.
    /// This is a caller contract violation, not wire-level corruption.
    #[error("option value of {len} bytes exceeds the 255 byte limit")]
    OversizedOption {
        /// Length of the rejected value.
        len: usize,
    },

    /// The serialization target buffer is smaller than `total_size()`.
    #[error("serialization needs {required} bytes, buffer holds {available}")]
    BufferTooSmall {
        /// Bytes the frame chain serializes to.
        required: usize,
        /// Bytes actually available.
        available: usize,
    },

    /// Interface name resolution failed.
    #[error("no such interface: {name}")]
    InterfaceNotFound {
        /// The name that could not be resolved.
        name: String,
    },
}

/// Result alias used across the crate.
pub type Result<T> = core::result::Result<T, Dot11Error>;
