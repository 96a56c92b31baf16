//! Error types for the postings store.
//!
//! Every fallible operation in this crate returns [`Result<T, PostingsError>`].
//! Callers that need to distinguish failure modes should match on
//! [`PostingsError`] rather than parse message text.

use std::path::PathBuf;
use thiserror::Error;

/// Error kinds produced by the bit stream, codec, list format, and container
/// layers.
#[derive(Debug, Error)]
pub enum PostingsError {
    /// An expected input file is absent.
    #[error("missing input: {path}")]
    MissingInput {
        /// Path that was expected to exist.
        path: PathBuf,
    },

    /// On-disk header sizes, block-offset monotonicity, or checksums
    /// disagree.
    #[error("corrupt index: {reason}")]
    CorruptIndex {
        /// Human-readable description of the disagreement.
        reason: String,
    },

    /// Posting format truncated, or a codec's length prefix contradicts its
    /// payload.
    #[error("corrupt input: {reason}")]
    CorruptInput {
        /// Human-readable description of the truncation or mismatch.
        reason: String,
    },

    /// A backend compression library signalled an error.
    #[error("codec failure ({codec}): {backend_message}")]
    CodecFailure {
        /// Name of the codec/backend that failed.
        codec: &'static str,
        /// The backend's own status text or code, carried verbatim.
        backend_message: String,
    },

    /// An internal invariant was violated: a seek past the end of a
    /// buffer, an unaligned alignment call, or similar programming error.
    /// This is returned as an error rather than a panic so a library
    /// caller can report it instead of crashing a shared process.
    #[error("invariant violation: {reason}")]
    InvariantViolation {
        /// Which invariant was violated and where.
        reason: String,
    },

    /// Underlying I/O failure (disk full, permission denied, ...),
    /// distinguished from the logical-corruption kinds above.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PostingsError>;

impl PostingsError {
    /// Build a [`PostingsError::MissingInput`] for the given path.
    pub fn missing_input(path: impl Into<PathBuf>) -> Self {
        PostingsError::MissingInput { path: path.into() }
    }

    /// Build a [`PostingsError::CorruptIndex`] from a `format!`-style reason.
    pub fn corrupt_index(reason: impl Into<String>) -> Self {
        PostingsError::CorruptIndex {
            reason: reason.into(),
        }
    }

    /// Build a [`PostingsError::CorruptInput`] from a `format!`-style reason.
    pub fn corrupt_input(reason: impl Into<String>) -> Self {
        PostingsError::CorruptInput {
            reason: reason.into(),
        }
    }

    /// Build a [`PostingsError::InvariantViolation`] from a `format!`-style
    /// reason.
    pub fn invariant(reason: impl Into<String>) -> Self {
        PostingsError::InvariantViolation {
            reason: reason.into(),
        }
    }

    /// Build a [`PostingsError::CodecFailure`].
    pub fn codec_failure(codec: &'static str, backend_message: impl Into<String>) -> Self {
        PostingsError::CodecFailure {
            codec,
            backend_message: backend_message.into(),
        }
    }
}
