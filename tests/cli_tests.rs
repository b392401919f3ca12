//! CLI-level tests for the seapack binary.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_describes_the_tool() {
    Command::cargo_bin("seapack")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("single executable application"));
}

#[test]
fn usage_error_without_arguments() {
    Command::cargo_bin("seapack")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[cfg(unix)]
mod with_stub_tools {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    fn write_stub(dir: &Path, name: &str, script: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, script).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    /// PATH with `dir` prepended, so stub `node` and `npx` win the lookup.
    fn stub_path_env(dir: &Path) -> String {
        format!(
            "{}:{}",
            dir.display(),
            std::env::var("PATH").unwrap_or_default()
        )
    }

    fn write_node_stub(dir: &Path) {
        write_stub(
            dir,
            "node",
            "#!/bin/sh\n\
             case \"$1\" in\n\
               --version) echo \"v22.2.0\" ;;\n\
               --experimental-sea-config) printf 'SEA-BLOB-CONTENT' > sea-prep.blob ;;\n\
             esac\n",
        );
    }

    fn write_npx_stub(dir: &Path) {
        // npx stub: $1=postject $2=target $3=NODE_SEA_BLOB $4=blob
        //           $5=--sentinel-fuse $6=fuse
        write_stub(
            dir,
            "npx",
            "#!/bin/sh\ncat \"$4\" >> \"$2\"\nprintf '%s' \"$6\" >> \"$2\"\n",
        );
    }

    #[test]
    fn packages_a_script_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        write_node_stub(dir.path());
        write_npx_stub(dir.path());
        std::fs::write(dir.path().join("app.js"), "console.log('hi');\n").unwrap();

        Command::cargo_bin("seapack")
            .unwrap()
            .env("PATH", stub_path_env(dir.path()))
            .current_dir(dir.path())
            .args(["app.js", "app", "--work-dir", "work"])
            .assert()
            .success()
            .stdout(predicate::str::contains("created"));

        let packaged = std::fs::read(dir.path().join("app")).unwrap();
        assert!(packaged.ends_with(seapack::SEA_SENTINEL_FUSE.as_bytes()));
        assert!(!dir.path().join("work").exists());
    }

    #[test]
    fn missing_entry_is_a_fatal_error() {
        let dir = tempfile::tempdir().unwrap();
        write_node_stub(dir.path());

        Command::cargo_bin("seapack")
            .unwrap()
            .env("PATH", stub_path_env(dir.path()))
            .current_dir(dir.path())
            .args(["definitely-missing.js", "app"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("does not exist"));

        assert!(!dir.path().join("app").exists());
    }

    #[test]
    fn overwrite_warning_is_emitted_once() {
        let dir = tempfile::tempdir().unwrap();
        write_node_stub(dir.path());
        write_npx_stub(dir.path());
        std::fs::write(dir.path().join("app.js"), "console.log('hi');\n").unwrap();
        std::fs::write(dir.path().join("app"), b"stale").unwrap();

        let assert = Command::cargo_bin("seapack")
            .unwrap()
            .env("PATH", stub_path_env(dir.path()))
            .current_dir(dir.path())
            .args(["app.js", "app", "--work-dir", "work"])
            .assert()
            .success();

        let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
        assert_eq!(stderr.matches("already exists").count(), 1);
    }
}
