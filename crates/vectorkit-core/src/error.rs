//! Error handling for VectorKit.
//!
//! Two families of failure surface out of the document core:
//! - Validation errors: a malformed item descriptor, a path with fewer than
//!   two points, a structural edit that would create a hierarchy cycle.
//! - Format errors: a document file that cannot be loaded, distinguished
//!   further so a host can tell "please upgrade" apart from "file is corrupt".
//!
//! Stale indices and unknown ids are deliberately NOT errors; those
//! operations degrade to no-ops and return sentinels instead.
//!
//! All error types use `thiserror`.

use thiserror::Error;

/// Error type for document validation and file loading.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// An item descriptor or structural edit failed validation.
    #[error("Validation error: {message}")]
    Validation {
        /// What was wrong with the input.
        message: String,
    },

    /// The document file was written by a newer version of the software.
    #[error("Unsupported document version {found} (supported up to {supported})")]
    UnsupportedVersion {
        /// The version number found in the file.
        found: u32,
        /// The highest version this build can read.
        supported: u32,
    },

    /// The document record carries no version field at all.
    #[error("Document is missing the required version field")]
    MissingVersion,

    /// The file is not a parseable document record.
    #[error("Invalid document format: {message}")]
    InvalidFormat {
        /// Parser diagnostic.
        message: String,
    },
}

impl Error {
    /// Shorthand for a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// True for the load-time format family (version/parse failures).
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedVersion { .. } | Self::MissingVersion | Self::InvalidFormat { .. }
        )
    }
}

/// Result alias used throughout VectorKit.
pub type Result<T> = std::result::Result<T, Error>;
