//! Error types for migration operations

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MigrateError>;

/// Errors that can occur while loading a plan or migrating a unit.
///
/// Config-load and engine-connection errors are fatal; everything else is
/// caught per unit at the orchestrator boundary.
#[derive(Debug, Error)]
pub enum MigrateError {
    /// Migration plan file unreadable or malformed.
    #[error("failed to load migration plan from {path}: {reason}")]
    ConfigLoad {
        /// Path of the plan file.
        path: String,
        /// The reason for the failure.
        reason: String,
    },

    /// Failed to pull the source image.
    #[error("failed to pull image {image}: {reason}")]
    Pull {
        /// The image that failed to pull.
        image: String,
        /// The reason for the failure.
        reason: String,
    },

    /// Failed to tag the pulled image with its destination reference.
    #[error("failed to tag image {source_ref} as {destination}: {reason}")]
    Tag {
        /// The locally present source reference.
        source_ref: String,
        /// The destination reference.
        destination: String,
        /// The reason for the failure.
        reason: String,
    },

    /// Failed to push the tagged image to its registry.
    #[error("failed to push image {image}: {reason}")]
    Push {
        /// The image that failed to push.
        image: String,
        /// The reason for the failure.
        reason: String,
    },

    /// Registry auth token could not be encoded or decoded.
    #[error("registry auth encoding error: {0}")]
    AuthEncoding(String),

    /// Docker engine API error.
    #[error("Docker engine error: {0}")]
    Engine(#[from] bollard::errors::Error),
}

impl MigrateError {
    /// Creates a config load error.
    pub fn config_load(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a pull error.
    pub fn pull(image: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Pull {
            image: image.into(),
            reason: reason.into(),
        }
    }

    /// Creates a tag error.
    pub fn tag(
        source: impl Into<String>,
        destination: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Tag {
            source_ref: source.into(),
            destination: destination.into(),
            reason: reason.into(),
        }
    }

    /// Creates a push error.
    pub fn push(image: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Push {
            image: image.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if this error aborts the whole run rather than one unit.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ConfigLoad { .. })
    }
}
