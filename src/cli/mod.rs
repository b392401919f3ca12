//! Command line interface for seapack.
//!
//! Parses arguments, drives one packaging run and reports the outcome.

mod args;
mod output;

pub use args::Args;
pub use output::OutputManager;

use crate::error::Result;
use crate::packager::Packager;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(args).await
}

/// Execute one packaging run from parsed arguments
pub async fn execute(args: Args) -> Result<i32> {
    let output = OutputManager::new(args.quiet);

    let mut builder = Packager::builder().options(args.package_options());
    if let Some(dir) = &args.work_dir {
        builder = builder.work_dir(dir);
    }
    let packager = builder.build().await?;

    let _ = output.info(&format!(
        "packaging {} with node {}",
        args.entry.display(),
        packager.runtime().version()
    ));

    let artifact = packager.package(&args.entry, &args.output).await?;

    let _ = output.success(&format!(
        "created {} ({} bytes)",
        artifact.path.display(),
        artifact.size
    ));
    let _ = output.indent(&format!("sha256: {}", artifact.checksum));

    Ok(0)
}
