//! Host Node.js runtime discovery and validation.
//!
//! The packaged executable starts life as a byte-for-byte copy of the host
//! runtime binary, so the runtime must both exist and be new enough to carry
//! an embedded application blob.

use crate::error::{EnvironmentError, Result, SeaError};
use crate::packager::tool::ToolCommand;
use semver::Version;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Oldest runtime that supports single-executable applications.
static MIN_NODE_VERSION: LazyLock<Version> = LazyLock::new(|| Version::new(20, 0, 0));

/// Minimum supported Node.js version (20.0.0).
pub fn min_node_version() -> &'static Version {
    &MIN_NODE_VERSION
}

/// A resolved Node.js runtime: executable path plus reported version.
#[derive(Debug, Clone)]
pub struct NodeRuntime {
    exec_path: PathBuf,
    version: Version,
}

impl NodeRuntime {
    /// Locate `node` on PATH and query its version.
    pub async fn detect() -> Result<Self> {
        let exec_path = which::which("node")
            .map_err(|source| EnvironmentError::RuntimeNotFound { source })?;
        log::debug!("found node runtime at {}", exec_path.display());
        Self::from_exec_path(exec_path).await
    }

    /// Build a runtime from an explicit executable path, querying its
    /// version with `--version`.
    pub async fn from_exec_path(exec_path: impl Into<PathBuf>) -> Result<Self> {
        let exec_path = exec_path.into();
        let probe = ToolCommand::new("node", exec_path.as_os_str())
            .arg("--version")
            .run()
            .await;
        let probe = match probe {
            Ok(output) => output,
            Err(SeaError::ExternalTool { stderr, .. }) => {
                return Err(EnvironmentError::VersionProbeFailed { reason: stderr }.into());
            }
            Err(other) => return Err(other),
        };

        let raw = probe.stdout.trim().to_string();
        let version = parse_node_version(&raw)
            .map_err(|source| EnvironmentError::VersionUnparseable { raw, source })?;
        log::debug!("node runtime reports version {version}");

        Ok(Self { exec_path, version })
    }

    /// Build a runtime from an already-known executable path and version.
    ///
    /// Skips the version probe; useful when the caller has validated the
    /// runtime itself.
    pub fn with_version(exec_path: impl Into<PathBuf>, version: Version) -> Self {
        Self {
            exec_path: exec_path.into(),
            version,
        }
    }

    /// Path to the runtime executable.
    pub fn exec_path(&self) -> &Path {
        &self.exec_path
    }

    /// Version the runtime reported.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Fail unless the runtime meets the supported minimum.
    ///
    /// The comparison is semantic, not lexicographic, so version 9.x is
    /// correctly rejected against a 20.x minimum.
    pub fn ensure_supported(&self) -> Result<()> {
        if self.version < *MIN_NODE_VERSION {
            return Err(EnvironmentError::VersionTooOld {
                found: self.version.clone(),
                minimum: MIN_NODE_VERSION.clone(),
            }
            .into());
        }
        Ok(())
    }
}

/// Parse a `node --version` string such as `v20.5.0`.
fn parse_node_version(raw: &str) -> std::result::Result<Version, semver::Error> {
    Version::parse(raw.trim().trim_start_matches('v'))
}
