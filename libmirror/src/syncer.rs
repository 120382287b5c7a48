//! High-level synchronization API.
//!
//! [`Syncer`] drives one synchronization pass: for each manifest entry it
//! discovers the source tags, maps the destination name, looks up the
//! destination tags, reconciles the two sets, and enqueues copy tasks on
//! a single scheduler whose permit pool is shared across all entries.
//!
//! # Examples
//!
//! ```no_run
//! use libmirror::Syncer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let syncer = Syncer::builder()
//!         .hub("registry.example.com/mirror")
//!         .concurrency(10)
//!         .build()?;
//!
//!     let entries = vec!["docker.io/library/nginx".to_string()];
//!     let report = syncer.sync(&entries).await?;
//!     println!("{} tasks scheduled", report.tasks_scheduled);
//!     Ok(())
//! }
//! ```

use crate::diff::missing_tags;
use crate::error::{MirrorError, Result};
use crate::executor::{ProcessExecutor, SystemExecutor};
use crate::mapping::map_destination;
use crate::policy::TagPolicy;
use crate::reference::Reference;
use crate::scheduler::{CopyTask, Scheduler, TagCopier};
use crate::skopeo::{SkopeoClient, SkopeoConfig};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Outcome counters for one synchronization pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncReport {
    /// Manifest entries seen.
    pub entries_total: usize,
    /// Entries abandoned before scheduling (no source data, bad
    /// reference).
    pub entries_skipped: usize,
    /// Copy tasks submitted to the scheduler.
    pub tasks_scheduled: usize,
    /// Copy tasks that failed; each failure was logged and isolated.
    pub tasks_failed: usize,
}

/// One-pass repository synchronizer.
///
/// Discovery over manifest entries is sequential; the copy tasks it
/// produces run concurrently under one global concurrency budget. The
/// run holds no persistent state: everything it creates is discarded
/// when [`Syncer::sync`] returns.
pub struct Syncer {
    skopeo: Arc<SkopeoClient>,
    policy: TagPolicy,
    hub: String,
    concurrency: usize,
    copy_timeout: Option<Duration>,
}

impl std::fmt::Debug for Syncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Syncer")
            .field("policy", &self.policy)
            .field("hub", &self.hub)
            .field("concurrency", &self.concurrency)
            .field("copy_timeout", &self.copy_timeout)
            .finish_non_exhaustive()
    }
}

impl Syncer {
    /// Creates a builder for configuring a `Syncer`.
    pub fn builder() -> SyncerBuilder {
        SyncerBuilder::new()
    }

    /// Runs one synchronization pass over `entries`.
    ///
    /// Entries that yield no source data are logged and skipped; copy
    /// failures are logged and isolated inside the scheduler. Neither
    /// aborts the pass. The returned report is the only completion
    /// signal.
    pub async fn sync(&self, entries: &[String]) -> Result<SyncReport> {
        let copier = Arc::clone(&self.skopeo) as Arc<dyn TagCopier>;
        let mut scheduler =
            Scheduler::new(copier, self.concurrency)?.with_copy_timeout(self.copy_timeout);
        let mut skipped = 0;

        for entry in entries {
            match self.plan_entry(entry).await {
                Ok(tasks) => {
                    for task in tasks {
                        scheduler.submit(task).await;
                    }
                }
                Err(e) => {
                    skipped += 1;
                    warn!(entry = %entry, error = %e, "abandoning manifest entry");
                }
            }
        }

        let stats = scheduler.drain().await;
        let report = SyncReport {
            entries_total: entries.len(),
            entries_skipped: skipped,
            tasks_scheduled: stats.submitted,
            tasks_failed: stats.failed,
        };
        info!(
            entries = report.entries_total,
            skipped = report.entries_skipped,
            scheduled = report.tasks_scheduled,
            failed = report.tasks_failed,
            "synchronization pass complete"
        );
        Ok(report)
    }

    /// Plans the copy tasks for one manifest entry.
    ///
    /// Walks the per-entry states in order: discover source tags, map
    /// the destination name (once, reused for every task of the entry),
    /// look up destination tags, reconcile, and materialize one
    /// [`CopyTask`] per surviving tag.
    async fn plan_entry(&self, entry: &str) -> Result<Vec<CopyTask>> {
        let entry_ref: Reference = entry.parse()?;

        // Discovering.
        let source_set = self
            .skopeo
            .list_tags(&entry_ref)
            .await
            .ok_or_else(|| MirrorError::inspect(format!("no tag data for {}", entry_ref)))?;
        if source_set.repository.is_empty() {
            return Err(MirrorError::inspect(format!(
                "empty repository name for {}",
                entry_ref
            )));
        }
        // The tool reports the canonical repository name; tasks are built
        // from it rather than from the raw manifest line.
        let source: Reference = source_set.repository.parse()?;

        // Mapping.
        let destination = map_destination(&source, &self.hub)?;

        // DestinationLookup + Reconciling. An absent destination (not yet
        // created, or a failed listing — the two are indistinguishable)
        // syncs the full filtered source set; otherwise the raw diff is
        // taken first and the filter applied to the diff result.
        let tags = match self.skopeo.list_tags(&destination).await {
            Some(destination_set) => {
                debug!(
                    destination = %destination,
                    existing = destination_set.tags.len(),
                    "destination tags found"
                );
                self.policy
                    .filter(&missing_tags(&source_set.tags, &destination_set.tags))
            }
            None => {
                debug!(destination = %destination, "destination absent, syncing all tags");
                self.policy.filter(&source_set.tags)
            }
        };

        debug!(
            source = %source,
            destination = %destination,
            tags = tags.len(),
            "entry planned"
        );

        // Scheduling input: one immutable task per surviving tag.
        Ok(tags
            .into_iter()
            .map(|tag| CopyTask {
                source: source.clone(),
                destination: destination.clone(),
                tag,
            })
            .collect())
    }
}

/// Builder for [`Syncer`].
///
/// # Examples
///
/// ```
/// use libmirror::{SkopeoConfig, Syncer, TagPolicy};
///
/// let syncer = Syncer::builder()
///     .hub("registry.example.com/mirror")
///     .concurrency(5)
///     .policy(TagPolicy::signatures_only())
///     .skopeo_config(SkopeoConfig::new().with_tls_verify(true))
///     .build()
///     .unwrap();
/// ```
pub struct SyncerBuilder {
    hub: Option<String>,
    concurrency: usize,
    policy: TagPolicy,
    skopeo_config: SkopeoConfig,
    executor: Option<Arc<dyn ProcessExecutor>>,
    copy_timeout: Option<Duration>,
}

impl SyncerBuilder {
    /// Creates a builder with default settings: curated tag policy and a
    /// concurrency budget of 10.
    pub fn new() -> Self {
        Self {
            hub: None,
            concurrency: 10,
            policy: TagPolicy::curated(),
            skopeo_config: SkopeoConfig::default(),
            executor: None,
            copy_timeout: None,
        }
    }

    /// Sets the destination hub prefix (required).
    pub fn hub<S: Into<String>>(mut self, hub: S) -> Self {
        self.hub = Some(hub.into());
        self
    }

    /// Sets the global copy concurrency budget.
    pub fn concurrency(mut self, limit: usize) -> Self {
        self.concurrency = limit;
        self
    }

    /// Sets the tag filtering policy.
    pub fn policy(mut self, policy: TagPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the external-tool configuration.
    pub fn skopeo_config(mut self, config: SkopeoConfig) -> Self {
        self.skopeo_config = config;
        self
    }

    /// Substitutes the process executor (used by tests).
    pub fn executor(mut self, executor: Arc<dyn ProcessExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Sets an optional per-task copy timeout.
    pub fn copy_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.copy_timeout = timeout;
        self
    }

    /// Builds the `Syncer`.
    ///
    /// Fails if the hub is missing or empty, or the concurrency budget
    /// is zero.
    pub fn build(self) -> Result<Syncer> {
        let hub = self
            .hub
            .filter(|h| !h.trim().is_empty())
            .ok_or_else(|| MirrorError::validation("destination hub is required"))?;
        if self.concurrency == 0 {
            return Err(MirrorError::validation(
                "concurrency limit must be greater than 0",
            ));
        }

        let executor = self
            .executor
            .unwrap_or_else(|| Arc::new(SystemExecutor::new()));
        let skopeo = Arc::new(SkopeoClient::new(executor, self.skopeo_config));

        Ok(Syncer {
            skopeo,
            policy: self.policy,
            hub,
            concurrency: self.concurrency,
            copy_timeout: self.copy_timeout,
        })
    }
}

impl Default for SyncerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
