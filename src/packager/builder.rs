//! Packaging orchestration.
//!
//! This module provides the main [`Packager`] orchestrator that turns a
//! script entry point into a standalone executable:
//!
//! 1. Validates the entry script and the host runtime version
//! 2. Copies the runtime binary to the output path
//! 3. Stages a build-configuration descriptor in a scratch workspace
//! 4. Runs the external blob builder against the descriptor
//! 5. Runs the external binary injector to embed the blob and sentinel fuse
//! 6. Removes the scratch workspace
//!
//! # Example
//!
//! ```no_run
//! use seapack::packager::Packager;
//! use std::path::Path;
//!
//! # async fn example() -> seapack::Result<()> {
//! let packager = Packager::builder().build().await?;
//! let artifact = packager
//!     .package(Path::new("build/app.js"), Path::new("dist/app"))
//!     .await?;
//! println!("created {} ({} bytes)", artifact.path.display(), artifact.size);
//! # Ok(())
//! # }
//! ```

use crate::error::{ErrorExt, InputError, Result};
use crate::packager::config::{PackageOptions, SeaConfig};
use crate::packager::runtime::NodeRuntime;
use crate::packager::tool::ToolCommand;
use crate::packager::workspace::{DEFAULT_WORK_DIR, Workspace};
use crate::packager::{PackagedArtifact, SEA_BLOB_RESOURCE, SEA_SENTINEL_FUSE};
use path_absolutize::Absolutize;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Builder for [`Packager`].
///
/// Every knob has a default matching the standard toolchain: the runtime is
/// detected on PATH, the injector is `npx postject`, and the scratch
/// workspace lives at `.seapack` under the current directory.
#[derive(Debug, Default)]
pub struct PackagerBuilder {
    runtime: Option<NodeRuntime>,
    injector: Option<Vec<OsString>>,
    work_dir: Option<PathBuf>,
    options: PackageOptions,
}

impl PackagerBuilder {
    /// Create a builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit runtime instead of detecting `node` on PATH.
    pub fn runtime(mut self, runtime: NodeRuntime) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Override the injector command line prefix.
    ///
    /// The target path, resource name, blob path and sentinel-fuse flag are
    /// appended to this prefix at invocation time. Defaults to
    /// `["npx", "postject"]`; an empty prefix is ignored.
    pub fn injector<I, S>(mut self, command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let command: Vec<OsString> = command.into_iter().map(Into::into).collect();
        if !command.is_empty() {
            self.injector = Some(command);
        }
        self
    }

    /// Override the scratch workspace directory.
    pub fn work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = Some(dir.into());
        self
    }

    /// Set the build flags for packaging runs.
    pub fn options(mut self, options: PackageOptions) -> Self {
        self.options = options;
        self
    }

    /// Resolve the runtime (detecting it on PATH if none was supplied) and
    /// build the packager.
    pub async fn build(self) -> Result<Packager> {
        let runtime = match self.runtime {
            Some(runtime) => runtime,
            None => NodeRuntime::detect().await?,
        };
        let mut injector = self
            .injector
            .unwrap_or_else(|| vec![OsString::from("npx"), OsString::from("postject")])
            .into_iter();
        let injector_program = injector.next().unwrap_or_else(|| OsString::from("npx"));
        let work_dir = self.work_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_WORK_DIR));

        Ok(Packager {
            runtime,
            injector_program,
            injector_args: injector.collect(),
            work_dir,
            options: self.options,
        })
    }
}

/// Main packaging orchestrator.
///
/// A `Packager` holds the resolved runtime, the injector command and the
/// scratch-workspace location. [`Packager::package`] performs one packaging
/// run; runs are strictly sequential with no retries, and concurrent runs
/// sharing a workspace path are unsupported (they race on the descriptor
/// and blob files).
#[derive(Debug)]
pub struct Packager {
    runtime: NodeRuntime,
    injector_program: OsString,
    injector_args: Vec<OsString>,
    work_dir: PathBuf,
    options: PackageOptions,
}

impl Packager {
    /// Create a builder with default configuration.
    pub fn builder() -> PackagerBuilder {
        PackagerBuilder::new()
    }

    /// Create a packager with defaults throughout (PATH-detected runtime,
    /// `npx postject` injector, `.seapack` workspace).
    pub async fn new() -> Result<Self> {
        Self::builder().build().await
    }

    /// The resolved host runtime.
    pub fn runtime(&self) -> &NodeRuntime {
        &self.runtime
    }

    /// Build flags applied to packaging runs.
    pub fn options(&self) -> &PackageOptions {
        &self.options
    }

    /// Package `entry_script` into a standalone executable at
    /// `output_executable`.
    ///
    /// On success the output file is a superset of the runtime binary: the
    /// original bytes plus the injected blob and the sentinel fuse marker,
    /// and the scratch workspace has been removed. An existing output file
    /// is overwritten (with a warning). If the blob builder or the injector
    /// fails, the scratch workspace is intentionally left behind so the
    /// descriptor and any partial blob can be inspected.
    pub async fn package(
        &self,
        entry_script: &Path,
        output_executable: &Path,
    ) -> Result<PackagedArtifact> {
        // The descriptor and both tool invocations cross process boundaries,
        // so every path is made absolute up front.
        let entry_script = absolutize(entry_script)?;
        let output_executable = absolutize(output_executable)?;

        // Entry script must exist and be a regular file.
        let entry_metadata = match tokio::fs::metadata(&entry_script).await {
            Ok(metadata) => metadata,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                return Err(InputError::EntryMissing { path: entry_script }.into());
            }
            Err(error) => {
                return Err(error).fs_context("inspecting script entry", entry_script);
            }
        };
        if !entry_metadata.is_file() {
            return Err(InputError::EntryNotFile { path: entry_script }.into());
        }

        // Runtime version gate, before any filesystem mutation.
        self.runtime.ensure_supported()?;

        // Overwriting an existing output is intentional, but say so once.
        if tokio::fs::try_exists(&output_executable).await.unwrap_or(false) {
            log::warn!(
                "executable path {} already exists, will be overwritten",
                output_executable.display()
            );
        }

        // Copy the runtime binary as the output executable. The parent
        // directory must already exist; a missing directory fails the run.
        log::debug!(
            "copying runtime {} to {}",
            self.runtime.exec_path().display(),
            output_executable.display()
        );
        tokio::fs::copy(self.runtime.exec_path(), &output_executable)
            .await
            .fs_context("copying runtime binary to", &output_executable)?;

        // Stage the scratch workspace and the build-configuration descriptor.
        let workspace = Workspace::ensure(absolutize(&self.work_dir)?).await?;
        let config_path = workspace.config_path();
        let blob_path = workspace.blob_path();
        log::debug!("writing build configuration into {}", config_path.display());
        SeaConfig::new(entry_script, blob_path.clone(), self.options)
            .write_to(&config_path)
            .await?;

        // Generate the blob to be injected.
        log::debug!("generating blob into {}", blob_path.display());
        ToolCommand::new("blob-builder", self.runtime.exec_path().as_os_str())
            .arg("--experimental-sea-config")
            .arg(&config_path)
            .current_dir(workspace.root())
            .run()
            .await?;
        if let Ok(metadata) = tokio::fs::metadata(&blob_path).await {
            log::debug!("blob builder produced {} bytes", metadata.len());
        }

        // Inject the blob into the copied binary.
        log::debug!("injecting blob into {}", output_executable.display());
        let mut injector = ToolCommand::new("binary-injector", &self.injector_program);
        for arg in &self.injector_args {
            injector = injector.arg(arg);
        }
        injector
            .arg(&output_executable)
            .arg(SEA_BLOB_RESOURCE)
            .arg(&blob_path)
            .arg("--sentinel-fuse")
            .arg(SEA_SENTINEL_FUSE)
            .current_dir(workspace.root())
            .run()
            .await?;

        // Both tools have run; the scratch artifacts are no longer needed.
        log::debug!("removing scratch workspace {}", workspace.root().display());
        workspace.remove().await;

        let size = tokio::fs::metadata(&output_executable)
            .await
            .fs_context("reading packaged executable", &output_executable)?
            .len();
        let checksum = calculate_sha256(&output_executable).await?;
        log::info!(
            "packaged {} ({size} bytes)",
            output_executable.display()
        );

        Ok(PackagedArtifact {
            path: output_executable,
            size,
            checksum,
        })
    }
}

/// Resolve a path against the current directory without touching the
/// filesystem.
fn absolutize(path: &Path) -> Result<PathBuf> {
    path.absolutize()
        .map(|resolved| resolved.into_owned())
        .fs_context("resolving path", path)
}

/// Calculates the SHA-256 checksum of a file.
///
/// Reads in 8KB chunks to avoid loading the whole executable into memory.
async fn calculate_sha256(path: &Path) -> Result<String> {
    use sha2::{Digest, Sha256};
    use tokio::io::AsyncReadExt;

    let mut file = tokio::fs::File::open(path)
        .await
        .fs_context("opening file for hashing", path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading file for hash calculation", path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}
