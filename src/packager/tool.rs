//! External tool invocation.
//!
//! All subprocess execution goes through [`ToolCommand`] to ensure argv-style
//! invocation (no shell strings) and a structured outcome: captured streams
//! plus exit-code checking, surfaced through the crate error taxonomy.
//!
//! Every tool is attempted exactly once and runs without a timeout; a hung
//! tool blocks the packaging run until it exits.

use crate::error::{Result, SeaError};
use std::ffi::OsString;
use std::path::PathBuf;

/// A single external tool invocation.
#[derive(Debug, Clone)]
pub struct ToolCommand {
    name: &'static str,
    program: OsString,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
}

/// Captured output of a completed tool run.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Captured standard output, lossily decoded
    pub stdout: String,
    /// Captured standard error, lossily decoded
    pub stderr: String,
}

impl ToolCommand {
    /// Create a new invocation of `program`, reported as `name` on failure.
    pub fn new(name: &'static str, program: impl Into<OsString>) -> Self {
        Self {
            name,
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Set the working directory for the child process.
    ///
    /// The directory is scoped to the child; the calling process never
    /// changes its own working directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Run the tool to completion, capturing stdout and stderr.
    ///
    /// A spawn failure or a non-zero exit maps to
    /// [`SeaError::ExternalTool`] carrying the tool name, the exit code (if
    /// the process ran) and the captured stderr.
    pub async fn run(self) -> Result<ToolOutput> {
        log::debug!(
            "running {}: {:?} {:?}",
            self.name,
            self.program,
            self.args
        );

        let mut command = tokio::process::Command::new(&self.program);
        command.args(&self.args);
        if let Some(dir) = &self.cwd {
            command.current_dir(dir);
        }

        let output = command.output().await.map_err(|error| SeaError::ExternalTool {
            tool: self.name.to_string(),
            exit_code: None,
            stderr: error.to_string(),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(SeaError::ExternalTool {
                tool: self.name.to_string(),
                exit_code: output.status.code(),
                stderr,
            });
        }

        Ok(ToolOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_stdout_on_success() {
        let output = ToolCommand::new("echo", "echo")
            .arg("hello")
            .run()
            .await
            .unwrap();
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[tokio::test]
    async fn nonzero_exit_carries_the_code() {
        let err = ToolCommand::new("stub", "sh")
            .arg("-c")
            .arg("echo oops >&2; exit 3")
            .run()
            .await
            .unwrap_err();
        match err {
            SeaError::ExternalTool {
                tool,
                exit_code,
                stderr,
            } => {
                assert_eq!(tool, "stub");
                assert_eq!(exit_code, Some(3));
                assert_eq!(stderr, "oops");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn spawn_failure_has_no_exit_code() {
        let err = ToolCommand::new("missing", "/nonexistent/definitely-not-a-tool")
            .run()
            .await
            .unwrap_err();
        match err {
            SeaError::ExternalTool { exit_code, .. } => assert_eq!(exit_code, None),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn current_dir_scopes_the_child() {
        let dir = tempfile::tempdir().unwrap();
        let before = std::env::current_dir().unwrap();
        let output = ToolCommand::new("pwd", "pwd")
            .current_dir(dir.path())
            .run()
            .await
            .unwrap();
        let reported = std::path::PathBuf::from(output.stdout.trim());
        assert_eq!(
            reported.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
        // the calling process never moved
        assert_eq!(std::env::current_dir().unwrap(), before);
    }
}
