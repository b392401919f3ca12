//! Build-configuration descriptor for the blob builder.
//!
//! The descriptor is the single input of the external blob builder: a JSON
//! file naming the entry script, the blob output path and the three build
//! flags. Field names are part of the blob builder's contract and must not
//! change.

use crate::error::{ErrorExt, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Build flags for one packaging run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageOptions {
    /// Suppress the runtime's experimental-SEA warning at startup.
    ///
    /// Default: true
    pub disable_experimental_sea_warning: bool,

    /// Build the blob with a startup snapshot.
    ///
    /// Default: false
    pub use_snapshot: bool,

    /// Build the blob with a V8 code cache.
    ///
    /// Default: false
    pub use_code_cache: bool,
}

impl Default for PackageOptions {
    fn default() -> Self {
        Self {
            disable_experimental_sea_warning: true,
            use_snapshot: false,
            use_code_cache: false,
        }
    }
}

/// The descriptor record consumed by the blob builder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeaConfig {
    /// Absolute path to the entry script
    pub main: PathBuf,

    /// Absolute path the builder writes the generated blob to
    pub output: PathBuf,

    /// Suppress the experimental-SEA startup warning
    #[serde(rename = "disableExperimentalSEAWarning")]
    pub disable_experimental_sea_warning: bool,

    /// Build the blob with a startup snapshot
    pub use_snapshot: bool,

    /// Build the blob with a V8 code cache
    pub use_code_cache: bool,
}

impl SeaConfig {
    /// Assemble a descriptor from absolute paths and build flags.
    pub fn new(main: PathBuf, output: PathBuf, options: PackageOptions) -> Self {
        Self {
            main,
            output,
            disable_experimental_sea_warning: options.disable_experimental_sea_warning,
            use_snapshot: options.use_snapshot,
            use_code_cache: options.use_code_cache,
        }
    }

    /// Serialize the descriptor to `path`.
    pub async fn write_to(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_vec(self)?;
        tokio::fs::write(path, contents)
            .await
            .fs_context("writing build configuration", path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flags() {
        let options = PackageOptions::default();
        assert!(options.disable_experimental_sea_warning);
        assert!(!options.use_snapshot);
        assert!(!options.use_code_cache);
    }

    #[test]
    fn descriptor_field_names_match_the_blob_builder_contract() {
        let config = SeaConfig::new(
            PathBuf::from("/work/app.js"),
            PathBuf::from("/work/.seapack/sea-prep.blob"),
            PackageOptions::default(),
        );
        let value = serde_json::to_value(&config).unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "disableExperimentalSEAWarning",
                "main",
                "output",
                "useCodeCache",
                "useSnapshot",
            ]
        );
        assert_eq!(object["main"], "/work/app.js");
        assert_eq!(object["disableExperimentalSEAWarning"], true);
        assert_eq!(object["useSnapshot"], false);
    }

    #[test]
    fn descriptor_round_trips() {
        let config = SeaConfig::new(
            PathBuf::from("/a/b.js"),
            PathBuf::from("/a/blob"),
            PackageOptions {
                disable_experimental_sea_warning: false,
                use_snapshot: true,
                use_code_cache: true,
            },
        );
        let json = serde_json::to_string(&config).unwrap();
        let parsed: SeaConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[tokio::test]
    async fn write_to_produces_parseable_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sea-config.json");
        let config = SeaConfig::new(
            PathBuf::from("/work/app.js"),
            PathBuf::from("/work/blob"),
            PackageOptions::default(),
        );
        config.write_to(&path).await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: SeaConfig = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed, config);
    }
}
