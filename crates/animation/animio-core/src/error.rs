//! Error types for export/import of animation documents.

use std::path::PathBuf;

use thiserror::Error;

use crate::data::ChannelKind;

/// Everything that can abort an export or import.
///
/// Every variant is raised before the target object is mutated, with the
/// exception of [`AnimIoError::Host`], which reports a host refusal mid-import.
#[derive(Debug, Error)]
pub enum AnimIoError {
    /// Neither translation nor rotation carries an animation node.
    #[error("no animation found on Translation or Rotation of {object}")]
    NoAnimationFound { object: String },

    /// Document structure is unusable (missing channel, wrong axis count, unordered keys).
    #[error("invalid animation document: {reason}")]
    InvalidDocument { reason: String },

    /// A single record is missing a field, carries an unknown ordinal, or holds
    /// a number JSON cannot represent.
    #[error("malformed record {channel} axis {axis} index {index}: {reason}")]
    MalformedRecord {
        channel: ChannelKind,
        axis: usize,
        index: usize,
        reason: String,
    },

    /// File read/write failure.
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Text was not JSON of the expected document shape.
    #[error("animation json: {0}")]
    Json(#[from] serde_json::Error),

    /// Session asked to run before an object was picked.
    #[error("no object added; select and add an object to import or export")]
    NoObjectSelected,

    /// The host refused an operation the import depends on.
    #[error("host error: {reason}")]
    Host { reason: String },
}

impl AnimIoError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidDocument {
            reason: reason.into(),
        }
    }

    pub fn host(reason: impl Into<String>) -> Self {
        Self::Host {
            reason: reason.into(),
        }
    }

    /// True for the errors that surface a problem with the document itself.
    #[inline]
    pub fn is_document_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDocument { .. } | Self::MalformedRecord { .. } | Self::Json(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AnimIoError>;
