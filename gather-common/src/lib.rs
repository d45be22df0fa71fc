//! Common types and utilities shared across gather crates.
//!
//! This crate holds the shared error type and the logging initialiser. It is
//! intentionally small so every crate in the workspace can depend on it
//! without pulling in the browser or HTML stacks.
//!
//! # Overview
//!
//! - [`observability`]: Centralised tracing/logging initialisation
//! - [`GatherError`] and [`Result`]: Shared error handling
//!
//! # Examples
//!
//! ```rust
//! use gather_common::GatherError;
//!
//! let err = GatherError::Capture("page source was empty".into());
//! assert_eq!(err.to_string(), "Capture error: page source was empty");
//! ```
use std::path::PathBuf;

pub mod observability;

/// Error types used across the gather workspace.
#[derive(thiserror::Error, Debug)]
pub enum GatherError {
    /// The browser driver (WebDriver session, navigation) reported an error.
    #[error("Driver error: {0}")]
    Driver(#[from] anyhow::Error),

    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A page source could not produce HTML.
    #[error("Capture error: {0}")]
    Capture(String),

    /// Reading or writing a snapshot file failed.
    #[error("Output error at {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot (de)serialization failed.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A target URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl GatherError {
    /// Wrap an I/O failure with the path it happened on.
    pub fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Output {
            path: path.into(),
            source,
        }
    }
}

/// Convenient alias for results that use [`GatherError`].
pub type Result<T> = std::result::Result<T, GatherError>;
