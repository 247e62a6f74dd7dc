use std::num::ParseIntError;

use thiserror::Error;

use crate::buffer::BufferPlacement;

/// Creation-time failure: a compressor could not be built from its options.
///
/// Never retried. The engine rejects the table/page configuration and
/// surfaces the message to whoever supplied it.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("unable to read '{key}' as '{value}': invalid value")]
    InvalidOption {
        key: String,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Call-time failure of a compress or uncompress operation.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("{codec} compressor does not support {placement} buffers")]
    UnsupportedPlacement {
        codec: &'static str,
        placement: BufferPlacement,
    },

    #[error("{codec} failed: {msg}")]
    Algorithm { codec: &'static str, msg: String },

    #[error("buffer too small: need {needed} bytes, {available} available")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("invalid cursor: position {position}, limit {limit}, capacity {capacity}")]
    InvalidCursor {
        position: usize,
        limit: usize,
        capacity: usize,
    },

    #[error("range {offset}+{length} out of bounds for slice of length {len}")]
    OutOfBounds {
        offset: usize,
        length: usize,
        len: usize,
    },
}

impl CodecError {
    /// Wrap a provider error with the name of the codec that raised it.
    pub fn algorithm(codec: &'static str, err: impl std::fmt::Display) -> Self {
        CodecError::Algorithm {
            codec,
            msg: err.to_string(),
        }
    }
}

pub type Result<T, E = CodecError> = std::result::Result<T, E>;
