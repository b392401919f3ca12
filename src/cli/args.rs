//! Command line argument parsing.
//!
//! This module provides minimal CLI argument parsing.
//! The tool is designed to "just work" - point it at a script, it packages.

use crate::packager::PackageOptions;
use clap::Parser;
use std::path::PathBuf;

/// Package a Node.js script as a single executable application
#[derive(Parser, Debug)]
#[command(
    name = "seapack",
    version,
    about = "Package a Node.js script as a single executable application",
    long_about = "Copy the host node runtime and embed a script into the copy.

Usage:
  seapack build/app.js dist/app
  seapack build/app.js dist/app --use-code-cache
  seapack build/app.js dist/app --work-dir /tmp/sea-build"
)]
pub struct Args {
    /// Path to the script entry point
    #[arg(index = 1, value_name = "ENTRY")]
    pub entry: PathBuf,

    /// Path for the packaged executable (overwritten if it exists)
    #[arg(index = 2, value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Keep the experimental-SEA warning the packaged executable prints at startup
    #[arg(long)]
    pub sea_warning: bool,

    /// Build the blob with a startup snapshot
    #[arg(long)]
    pub use_snapshot: bool,

    /// Build the blob with a V8 code cache
    #[arg(long)]
    pub use_code_cache: bool,

    /// Scratch directory for build-time artifacts
    #[arg(long, value_name = "DIR")]
    pub work_dir: Option<PathBuf>,

    /// Suppress normal output (errors are still shown)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Build flags derived from the parsed switches
    pub fn package_options(&self) -> PackageOptions {
        PackageOptions {
            disable_experimental_sea_warning: !self.sea_warning,
            use_snapshot: self.use_snapshot,
            use_code_cache: self.use_code_cache,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_package_options_defaults() {
        let args = Args::parse_from(["seapack", "build/app.js", "dist/app"]);
        assert_eq!(args.package_options(), PackageOptions::default());
    }

    #[test]
    fn sea_warning_switch_inverts_the_disable_flag() {
        let args = Args::parse_from(["seapack", "a.js", "out", "--sea-warning"]);
        assert!(!args.package_options().disable_experimental_sea_warning);
    }

    #[test]
    fn blob_build_switches() {
        let args = Args::parse_from([
            "seapack",
            "a.js",
            "out",
            "--use-snapshot",
            "--use-code-cache",
        ]);
        let options = args.package_options();
        assert!(options.use_snapshot);
        assert!(options.use_code_cache);
    }

    #[test]
    fn entry_and_output_are_required() {
        assert!(Args::try_parse_from(["seapack", "only-entry.js"]).is_err());
    }
}
