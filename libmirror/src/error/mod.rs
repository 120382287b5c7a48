//! Error types for mirror synchronization.
//!
//! Most data-path failures in this crate are absorbed at the call site
//! (a failed tag listing becomes "absent data", a failed copy is logged
//! and isolated). The variants here cover the cases that are reported to
//! callers: manifest fetching, subprocess plumbing, per-task copy
//! failures, and invalid input.

use thiserror::Error;

#[cfg(test)]
mod tests;

/// Main error type for mirror operations.
#[derive(Error, Debug)]
pub enum MirrorError {
    /// Remote manifest unreachable or unreadable.
    #[error("Manifest error: {message}")]
    Manifest {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Tag-listing produced no usable data.
    #[error("Inspect error: {message}")]
    Inspect { message: String },

    /// A single copy task failed; isolated to that task.
    #[error("Copy error: {message}")]
    Copy { message: String },

    /// Subprocess could not be spawned or awaited.
    #[error("Process error: {message}")]
    Process {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid input (malformed reference, zero concurrency, empty hub).
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Invalid client or run configuration.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result type alias for mirror operations.
pub type Result<T> = std::result::Result<T, MirrorError>;

impl MirrorError {
    /// Creates a new manifest error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libmirror::error::MirrorError;
    ///
    /// let err = MirrorError::manifest("connection refused");
    /// assert!(matches!(err, MirrorError::Manifest { .. }));
    /// ```
    pub fn manifest<S: Into<String>>(message: S) -> Self {
        Self::Manifest {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new manifest error with a source error.
    pub fn manifest_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Manifest {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new inspect error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libmirror::error::MirrorError;
    ///
    /// let err = MirrorError::inspect("no tag data for docker.io/library/nginx");
    /// assert!(matches!(err, MirrorError::Inspect { .. }));
    /// ```
    pub fn inspect<S: Into<String>>(message: S) -> Self {
        Self::Inspect {
            message: message.into(),
        }
    }

    /// Creates a new copy error.
    pub fn copy<S: Into<String>>(message: S) -> Self {
        Self::Copy {
            message: message.into(),
        }
    }

    /// Creates a new process error with a source error.
    pub fn process_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Process {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new validation error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libmirror::error::MirrorError;
    ///
    /// let err = MirrorError::validation("reference must contain a '/'");
    /// assert!(matches!(err, MirrorError::Validation { .. }));
    /// ```
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new configuration error with a source error.
    pub fn config_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
