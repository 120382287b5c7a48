//! Bounded-concurrency copy scheduling.
//!
//! The scheduler dispatches one unit of work per [`CopyTask`], bounded by
//! a counting-permit pool ([`tokio::sync::Semaphore`]) that is shared
//! across the entire run, and waits for all units on a completion barrier
//! ([`tokio::task::JoinSet`]). The permit is acquired by the dispatching
//! flow before a unit starts, held for the duration of the external copy,
//! and released on every exit path when the owned permit drops.
//!
//! Each unit's failure is isolated: it is counted and logged with the
//! failing task's identity, and never cancels siblings, aborts the run,
//! or triggers a retry.

use crate::error::{MirrorError, Result};
use crate::reference::Reference;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::error;


/// One unit of copy work: transfer a single tag from source to
/// destination. Immutable once created, consumed exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyTask {
    /// Source repository reference.
    pub source: Reference,
    /// Destination repository reference.
    pub destination: Reference,
    /// The tag to transfer.
    pub tag: String,
}

impl fmt::Display for CopyTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}",
            self.source.tagged(&self.tag),
            self.destination.tagged(&self.tag)
        )
    }
}

/// Capability to transfer one tag between repositories.
///
/// Implemented by [`crate::skopeo::SkopeoClient`]; substitutable in tests.
#[async_trait]
pub trait TagCopier: Send + Sync {
    async fn copy_tag(&self, task: &CopyTask) -> Result<()>;
}

/// Counters reported once the scheduler has drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Number of tasks submitted over the run.
    pub submitted: usize,
    /// Number of tasks that failed (and were logged).
    pub failed: usize,
}

/// Bounded-concurrency task runner for copy work.
///
/// The permit pool is a global budget: one `Scheduler` is shared by all
/// manifest entries of a run, so at most `limit` copies are in flight at
/// any instant regardless of which entry produced them.
pub struct Scheduler {
    copier: Arc<dyn TagCopier>,
    semaphore: Arc<Semaphore>,
    tasks: JoinSet<()>,
    submitted: usize,
    failed: Arc<AtomicUsize>,
    copy_timeout: Option<Duration>,
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("submitted", &self.submitted)
            .field("copy_timeout", &self.copy_timeout)
            .finish_non_exhaustive()
    }
}

impl Scheduler {
    /// Creates a scheduler running at most `limit` tasks concurrently.
    ///
    /// A `limit` of zero is a validation error.
    pub fn new(copier: Arc<dyn TagCopier>, limit: usize) -> Result<Self> {
        if limit == 0 {
            return Err(MirrorError::validation(
                "concurrency limit must be greater than 0",
            ));
        }
        Ok(Self {
            copier,
            semaphore: Arc::new(Semaphore::new(limit)),
            tasks: JoinSet::new(),
            submitted: 0,
            failed: Arc::new(AtomicUsize::new(0)),
            copy_timeout: None,
        })
    }

    /// Sets an optional per-task timeout for the external copy.
    ///
    /// The original tool has no cancellation mechanism; this hook is off
    /// by default and a timed-out task is treated like any other failed
    /// task.
    pub fn with_copy_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.copy_timeout = timeout;
        self
    }

    /// Submits one task, suspending until a concurrency permit is free.
    ///
    /// The permit is acquired here, in the dispatching flow, so a full
    /// pool backpressures discovery of further work. The spawned unit
    /// holds the permit until its copy finishes and releases it when the
    /// owned permit drops, on success, failure, and panic alike.
    pub async fn submit(&mut self, task: CopyTask) {
        let Ok(permit) = Arc::clone(&self.semaphore).acquire_owned().await else {
            // The semaphore is never closed while the scheduler lives.
            return;
        };
        self.submitted += 1;

        let copier = Arc::clone(&self.copier);
        let failed = Arc::clone(&self.failed);
        let copy_timeout = self.copy_timeout;

        self.tasks.spawn(async move {
            let _permit = permit;

            let outcome = match copy_timeout {
                Some(limit) => match tokio::time::timeout(limit, copier.copy_tag(&task)).await {
                    Ok(result) => result,
                    Err(_) => Err(MirrorError::copy(format!(
                        "timed out after {}s",
                        limit.as_secs()
                    ))),
                },
                None => copier.copy_tag(&task).await,
            };

            if let Err(e) = outcome {
                failed.fetch_add(1, Ordering::Relaxed);
                error!(task = %task, error = %e, "copy task failed");
            }
        });
    }

    /// Waits for every submitted task to finish and returns the counters.
    pub async fn drain(mut self) -> SchedulerStats {
        while let Some(joined) = self.tasks.join_next().await {
            if let Err(e) = joined {
                // A panicked unit already released its permit on drop.
                self.failed.fetch_add(1, Ordering::Relaxed);
                error!(error = %e, "copy task aborted");
            }
        }
        SchedulerStats {
            submitted: self.submitted,
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}
