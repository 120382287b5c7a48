//! Subprocess execution capability.
//!
//! The synchronizer never talks to registries directly; it shells out to
//! an external image-transfer tool. That dependency is kept behind the
//! [`ProcessExecutor`] trait so the tool can be substituted in tests.
//!
//! A failure to spawn or await the subprocess is an error; the
//! subprocess exiting non-zero is not — callers get the exit status as
//! data and decide what it means.

use crate::error::{MirrorError, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;


/// Captured result of a completed subprocess.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Whether the process exited with status zero.
    pub success: bool,
    /// The exit code, if the process exited normally.
    pub code: Option<i32>,
    /// Captured stdout bytes.
    pub stdout: Vec<u8>,
}

/// Exit status of a subprocess run with inherited stdio.
#[derive(Debug, Clone, Copy)]
pub struct ExitInfo {
    /// Whether the process exited with status zero.
    pub success: bool,
    /// The exit code, if the process exited normally.
    pub code: Option<i32>,
}

/// Capability to run external commands.
#[async_trait]
pub trait ProcessExecutor: Send + Sync {
    /// Runs `program` with `args` to completion, capturing stdout.
    /// Stderr is passed through to the parent process.
    async fn run_capture(&self, program: &str, args: &[String]) -> Result<CommandOutput>;

    /// Runs `program` with `args` to completion with inherited stdio.
    async fn run_streamed(&self, program: &str, args: &[String]) -> Result<ExitInfo>;
}

/// [`ProcessExecutor`] backed by real system processes.
#[derive(Debug, Clone, Default)]
pub struct SystemExecutor;

impl SystemExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessExecutor for SystemExecutor {
    async fn run_capture(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .await
            .map_err(|e| {
                MirrorError::process_with_source(format!("failed to run {}", program), e)
            })?;

        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: output.stdout,
        })
    }

    async fn run_streamed(&self, program: &str, args: &[String]) -> Result<ExitInfo> {
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|e| {
                MirrorError::process_with_source(format!("failed to run {}", program), e)
            })?;

        Ok(ExitInfo {
            success: status.success(),
            code: status.code(),
        })
    }
}
