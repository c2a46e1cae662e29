//! Error types for the identity and persistence adapters.

use std::path::PathBuf;

use thiserror::Error;

/// Failure of a [`crate::store::ScoreStore`] call.
///
/// Store failures never reach gameplay; the score service logs and drops them.
#[derive(Error, Debug)]
pub enum StoreError {
    /// IO error (file system operations)
    #[error("IO error at '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Score document could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Score document written by an unknown format version
    #[error("Unsupported score file version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// Results are only stored for a known user
    #[error("Invalid user id: {0:?}")]
    InvalidUser(String),

    /// A writer panicked while holding the store lock
    #[error("Score store lock poisoned")]
    Poisoned,
}

impl StoreError {
    /// Creates an IO error for `path`
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failure of an [`crate::identity::IdentityProvider`] call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Display name must contain at least one letter or digit")]
    EmptyName,

    #[error("Sign-in is not supported by this identity provider")]
    Unsupported,
}
