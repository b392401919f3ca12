//! # seapack
//!
//! Package a Node.js script as a single executable application.
//!
//! This crate copies the host node runtime binary, generates a preparation
//! blob from the entry script via `node --experimental-sea-config`, and
//! embeds the blob into the copy via `postject`, producing one
//! self-contained executable.
//!
//! ## Usage
//!
//! ```bash
//! seapack build/app.js dist/app            # package with default flags
//! seapack build/app.js dist/app --use-code-cache
//! RUST_LOG=debug seapack build/app.js dist/app
//! ```
//!
//! Or as a library:
//!
//! ```no_run
//! use seapack::Packager;
//! use std::path::Path;
//!
//! # async fn example() -> seapack::Result<()> {
//! let packager = Packager::builder().build().await?;
//! packager
//!     .package(Path::new("build/app.js"), Path::new("dist/app"))
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! Requires Node.js 20 or newer on PATH, plus `npx` (for `postject`) at
//! injection time.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod cli;
pub mod error;
pub mod packager;

// Re-export main types for public API
pub use error::{EnvironmentError, InputError, Result, SeaError};
pub use packager::{
    NodeRuntime, PackageOptions, PackagedArtifact, Packager, PackagerBuilder, SEA_BLOB_RESOURCE,
    SEA_SENTINEL_FUSE,
};
