//! Single-executable application packaging.
//!
//! This module turns a Node.js script into a standalone executable by
//! copying the host runtime binary and embedding a preparation blob into the
//! copy. The blob is produced and injected by two external tools invoked as
//! subprocesses:
//!
//! | Tool | Invocation | Contract |
//! |------|------------|----------|
//! | blob builder | `node --experimental-sea-config <descriptor>` | reads the descriptor, writes the blob, exits 0 |
//! | binary injector | `npx postject <target> NODE_SEA_BLOB <blob> --sentinel-fuse <fuse>` | embeds the blob and sentinel marker in place |
//!
//! Both tools are opaque collaborators; their internal formats are
//! version-dependent on the host runtime and not reproduced here.
//!
//! # Example
//!
//! ```no_run
//! use seapack::packager::{PackageOptions, Packager};
//! use std::path::Path;
//!
//! # async fn example() -> seapack::Result<()> {
//! let packager = Packager::builder()
//!     .options(PackageOptions::default())
//!     .build()
//!     .await?;
//! packager
//!     .package(Path::new("build/app.js"), Path::new("dist/app"))
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Concurrency
//!
//! At most one packaging run at a time. The scratch workspace path is fixed
//! per packager; concurrent runs sharing it race on the descriptor and blob
//! files, and one run's cleanup can delete the other's in-flight artifacts.

mod builder;
mod config;
mod runtime;
mod tool;
mod workspace;

pub use builder::{Packager, PackagerBuilder};
pub use config::{PackageOptions, SeaConfig};
pub use runtime::{NodeRuntime, min_node_version};
pub use tool::{ToolCommand, ToolOutput};
pub use workspace::{DEFAULT_WORK_DIR, Workspace};

/// Resource name under which the blob is embedded in the executable.
pub const SEA_BLOB_RESOURCE: &str = "NODE_SEA_BLOB";

/// Sentinel marker written into the executable so it can detect at startup
/// that it carries an embedded payload.
pub const SEA_SENTINEL_FUSE: &str = "NODE_SEA_FUSE_fce680ab2cc467b6e072b8b5df1996b2";

/// A packaged executable result.
///
/// Returned after a successful packaging run.
#[derive(Debug, Clone)]
pub struct PackagedArtifact {
    /// Absolute path of the packaged executable.
    pub path: std::path::PathBuf,

    /// Size of the executable in bytes.
    pub size: u64,

    /// SHA-256 checksum of the executable for integrity verification.
    pub checksum: String,
}
