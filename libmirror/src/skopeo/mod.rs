//! External image-transfer tool integration.
//!
//! Tag listing and the actual registry wire protocol are delegated to an
//! external tool (skopeo by default) invoked as a subprocess through the
//! [`ProcessExecutor`] capability. This module owns the tool's command
//! line contract:
//!
//! - `<tool> list-tags docker://<reference>` emits
//!   `{"Repository": "...", "Tags": ["..."]}` on success;
//! - `<tool> copy [flags] docker://<src>:<tag> docker://<dst>:<tag>`
//!   performs one transfer.

use crate::error::{MirrorError, Result};
use crate::executor::ProcessExecutor;
use crate::reference::Reference;
use crate::scheduler::{CopyTask, TagCopier};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

#[cfg(test)]
mod tests;

/// Tag listing for one repository, as reported by the external tool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TagSet {
    /// Repository name.
    #[serde(rename = "Repository")]
    pub repository: String,
    /// Ordered tags; the tool's order is preserved.
    #[serde(rename = "Tags", default)]
    pub tags: Vec<String>,
}

/// Configuration for the external transfer tool.
///
/// TLS verification is relaxed by default: mirrors commonly sit behind
/// self-signed or relaxed-trust endpoints, and the tool is invoked with
/// `--insecure-policy`, `--src-tls-verify=false` and
/// `--dest-tls-verify=false` unless verification is turned back on with
/// [`SkopeoConfig::with_tls_verify`].
///
/// # Examples
///
/// ```
/// use libmirror::SkopeoConfig;
///
/// let config = SkopeoConfig::new()
///     .with_binary("/usr/local/bin/skopeo")
///     .with_tls_verify(true);
/// assert!(config.src_tls_verify);
/// ```
#[derive(Debug, Clone)]
pub struct SkopeoConfig {
    /// Binary to invoke (default: `skopeo`).
    pub binary: String,
    /// Pass `--insecure-policy` to copy operations (default: true).
    pub insecure_policy: bool,
    /// Verify TLS for the source registry (default: false).
    pub src_tls_verify: bool,
    /// Verify TLS for the destination registry (default: false).
    pub dest_tls_verify: bool,
}

impl Default for SkopeoConfig {
    fn default() -> Self {
        Self {
            binary: "skopeo".to_string(),
            insecure_policy: true,
            src_tls_verify: false,
            dest_tls_verify: false,
        }
    }
}

impl SkopeoConfig {
    /// Creates a configuration with the relaxed-trust defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the binary to invoke.
    pub fn with_binary<S: Into<String>>(mut self, binary: S) -> Self {
        self.binary = binary.into();
        self
    }

    /// Turns full TLS verification on or off for both sides.
    ///
    /// Turning verification on also drops `--insecure-policy`.
    pub fn with_tls_verify(mut self, verify: bool) -> Self {
        self.src_tls_verify = verify;
        self.dest_tls_verify = verify;
        self.insecure_policy = !verify;
        self
    }
}

/// Client for the external transfer tool.
///
/// `list_tags` is a read-only, idempotent query; `copy_tag` performs one
/// transfer with the tool's own output streamed through.
pub struct SkopeoClient {
    executor: Arc<dyn ProcessExecutor>,
    config: SkopeoConfig,
}

impl SkopeoClient {
    /// Creates a client over the given executor.
    pub fn new(executor: Arc<dyn ProcessExecutor>, config: SkopeoConfig) -> Self {
        Self { executor, config }
    }

    /// Lists the tags of `reference`.
    ///
    /// Returns `None` when no data could be obtained: subprocess spawn
    /// failure, non-zero exit, or unparsable output. Callers must treat
    /// `None` as "unknown/absent", not as a hard failure — a destination
    /// repository that does not exist yet and one whose listing failed
    /// are indistinguishable here, and both lead to a full sync of the
    /// entry.
    pub async fn list_tags(&self, reference: &Reference) -> Option<TagSet> {
        let args = vec!["list-tags".to_string(), format!("docker://{}", reference)];
        debug!(binary = %self.config.binary, reference = %reference, "listing tags");

        let output = match self.executor.run_capture(&self.config.binary, &args).await {
            Ok(output) => output,
            Err(e) => {
                warn!(reference = %reference, error = %e, "tag listing failed to run");
                return None;
            }
        };
        if !output.success {
            warn!(
                reference = %reference,
                code = ?output.code,
                "tag listing exited non-zero"
            );
            return None;
        }

        match serde_json::from_slice::<TagSet>(&output.stdout) {
            Ok(tag_set) => Some(tag_set),
            Err(e) => {
                warn!(reference = %reference, error = %e, "tag listing output is not valid JSON");
                None
            }
        }
    }

    fn copy_args(&self, task: &CopyTask) -> Vec<String> {
        let mut args = vec!["copy".to_string()];
        if self.config.insecure_policy {
            args.push("--insecure-policy".to_string());
        }
        if !self.config.src_tls_verify {
            args.push("--src-tls-verify=false".to_string());
        }
        if !self.config.dest_tls_verify {
            args.push("--dest-tls-verify=false".to_string());
        }
        args.push("-q".to_string());
        args.push(format!("docker://{}", task.source.tagged(&task.tag)));
        args.push(format!("docker://{}", task.destination.tagged(&task.tag)));
        args
    }
}

#[async_trait]
impl TagCopier for SkopeoClient {
    /// Copies one tag from source to destination.
    ///
    /// A non-zero exit maps to [`MirrorError::Copy`]; the scheduler
    /// logs and isolates it.
    async fn copy_tag(&self, task: &CopyTask) -> Result<()> {
        let args = self.copy_args(task);
        debug!(binary = %self.config.binary, task = %task, "copying tag");

        let exit = self
            .executor
            .run_streamed(&self.config.binary, &args)
            .await?;
        if !exit.success {
            return Err(MirrorError::copy(format!(
                "{} copy of {} exited with status {:?}",
                self.config.binary, task, exit.code
            )));
        }
        Ok(())
    }
}
