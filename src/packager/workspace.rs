//! Scratch workspace for build-time artifacts.
//!
//! One workspace per packaging run, holding the build-configuration
//! descriptor and the generated blob. The directory path is fixed per
//! packager rather than uniquified, so concurrent runs sharing a path will
//! race on its contents; running one packaging operation at a time is a
//! documented precondition.

use crate::error::{ErrorExt, Result};
use std::path::{Path, PathBuf};

/// Default scratch directory, relative to the current directory.
pub const DEFAULT_WORK_DIR: &str = ".seapack";

const CONFIG_FILE_NAME: &str = "sea-config.json";
const BLOB_FILE_NAME: &str = "sea-prep.blob";

/// A scratch directory owned by a single packaging run.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Create the workspace directory if absent; reuse it if present.
    pub async fn ensure(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .fs_context("creating scratch workspace", &root)?;
        Ok(Self { root })
    }

    /// Workspace root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the build-configuration descriptor inside the workspace.
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }

    /// Path the blob builder writes the generated blob to.
    pub fn blob_path(&self) -> PathBuf {
        self.root.join(BLOB_FILE_NAME)
    }

    /// Recursively remove the workspace.
    ///
    /// Removal failure is logged and swallowed; a stale scratch directory
    /// does not invalidate an otherwise successful packaging run.
    pub async fn remove(self) {
        if let Err(error) = tokio::fs::remove_dir_all(&self.root).await {
            log::warn!(
                "failed to remove scratch workspace {}: {error}",
                self.root.display()
            );
        }
    }
}
