//! Error types for seapack operations.
//!
//! This module defines all error types with actionable error messages and
//! recovery suggestions.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for seapack operations
pub type Result<T> = std::result::Result<T, SeaError>;

/// Main error type for all seapack operations
#[derive(Error, Debug)]
pub enum SeaError {
    /// Input validation errors
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// Host runtime errors
    #[error("unsupported environment: {0}")]
    UnsupportedEnvironment(#[from] EnvironmentError),

    /// File system error with path context.
    ///
    /// Created by the [`ErrorExt`] trait's `fs_context` method.
    #[error("{context} {path}: {error}")]
    Fs {
        /// Context describing the operation (e.g., "copying runtime binary")
        context: &'static str,
        /// Path that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// Generic I/O error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Descriptor serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// External tool failure (non-zero exit or spawn failure)
    #[error(
        "external tool '{tool}' failed ({status}): {stderr}",
        status = describe_exit(.exit_code)
    )]
    ExternalTool {
        /// Name of the failing tool ("blob-builder" or "binary-injector")
        tool: String,
        /// Exit code, if the process ran at all
        exit_code: Option<i32>,
        /// Captured standard error, or the spawn error text
        stderr: String,
    },
}

/// Input validation errors
#[derive(Error, Debug)]
pub enum InputError {
    /// Entry script path does not resolve to anything
    #[error("script entry path {path} does not exist")]
    EntryMissing {
        /// Path that was given as the script entry
        path: PathBuf,
    },

    /// Entry script path resolves to something other than a regular file
    #[error("script entry path {path} is not a regular file")]
    EntryNotFile {
        /// Path that was given as the script entry
        path: PathBuf,
    },
}

/// Host runtime environment errors
#[derive(Error, Debug)]
pub enum EnvironmentError {
    /// No node executable on PATH
    #[error("could not locate a node runtime on PATH: {source}")]
    RuntimeNotFound {
        /// The underlying lookup error
        #[source]
        source: which::Error,
    },

    /// `node --version` did not run or produced no usable output
    #[error("could not query the runtime version: {reason}")]
    VersionProbeFailed {
        /// What went wrong while probing
        reason: String,
    },

    /// Version string could not be parsed
    #[error("could not parse runtime version '{raw}': {source}")]
    VersionUnparseable {
        /// Raw version string as reported by the runtime
        raw: String,
        /// The underlying parse error
        #[source]
        source: semver::Error,
    },

    /// Runtime is older than the supported minimum
    #[error("node {found} is too old, needs to be at least {minimum}")]
    VersionTooOld {
        /// Version the runtime reported
        found: semver::Version,
        /// Minimum supported version
        minimum: semver::Version,
    },
}

fn describe_exit(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("exit code {code}"),
        None => "did not start".to_string(),
    }
}

impl SeaError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            SeaError::UnsupportedEnvironment(EnvironmentError::RuntimeNotFound { .. }) => vec![
                "Install Node.js 20 or newer: https://nodejs.org".to_string(),
                "Ensure the node executable is on PATH".to_string(),
            ],
            SeaError::UnsupportedEnvironment(EnvironmentError::VersionTooOld {
                minimum, ..
            }) => vec![format!("Upgrade Node.js to {minimum} or newer")],
            SeaError::ExternalTool { tool, .. } if tool.as_str() == "binary-injector" => vec![
                "Ensure npx is on PATH, or install postject directly: npm install -g postject"
                    .to_string(),
            ],
            SeaError::Fs { path, .. } => vec![format!(
                "Check permissions and free space for {}",
                path.display()
            )],
            _ => vec![],
        }
    }
}

/// Extension trait for filesystem operations with automatic path context.
///
/// Wraps I/O errors with the path that caused them for better diagnostics.
pub trait ErrorExt<T> {
    /// Add filesystem context to an I/O error.
    ///
    /// The `context` should be a present-tense verb phrase describing the
    /// operation, e.g., "reading file", "creating directory".
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| SeaError::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}
