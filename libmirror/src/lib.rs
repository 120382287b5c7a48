//! libmirror - Container Image Mirror Synchronization Library
//!
//! libmirror mirrors the image repositories listed in a remote manifest
//! into a destination registry. It copies only release-like tags, skips
//! tags already present at the destination, and bounds how many copy
//! operations run at once. The registry wire protocol itself is
//! delegated to an external transfer tool (skopeo) invoked as a
//! subprocess.
//!
//! # Quick Start
//!
//! ```no_run
//! use libmirror::{ManifestClient, ManifestConfig, Syncer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manifest = ManifestClient::new(ManifestConfig::default())?;
//!     let entries = manifest
//!         .fetch("https://example.com/private-mirrors.txt")
//!         .await?;
//!
//!     let syncer = Syncer::builder()
//!         .hub("registry.example.com/mirror")
//!         .concurrency(10)
//!         .build()?;
//!
//!     let report = syncer.sync(&entries).await?;
//!     println!(
//!         "{} scheduled, {} failed",
//!         report.tasks_scheduled, report.tasks_failed
//!     );
//!     Ok(())
//! }
//! ```
//!
//! # Main Types
//!
//! - [`Syncer`] - One-pass synchronization orchestrator
//! - [`SyncerBuilder`] - Builder for hub, concurrency, policy, and tool
//!   configuration
//! - [`TagPolicy`] - Release-like tag classification rules
//! - [`Reference`] - Opaque slash-delimited image reference
//! - [`ManifestClient`] - Remote manifest fetching
//! - [`SkopeoClient`] - External transfer tool invocation
//!
//! # Architecture
//!
//! Discovery (tag listing, name mapping, diffing) is sequential per
//! manifest entry; the copy tasks it produces run concurrently on a
//! permit pool shared across the whole run. Per-task failures are
//! logged and isolated — one failed copy never aborts the pass.

#![warn(clippy::all)]

/// Returns the libmirror crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// High-level public API (main entry point)
mod syncer;
pub use syncer::{SyncReport, Syncer, SyncerBuilder};

// Re-export commonly used types for convenience
pub use diff::missing_tags;
pub use error::{MirrorError, Result};
pub use executor::{CommandOutput, ExitInfo, ProcessExecutor, SystemExecutor};
pub use manifest::{ManifestClient, ManifestConfig};
pub use mapping::map_destination;
pub use policy::TagPolicy;
pub use reference::Reference;
pub use scheduler::{CopyTask, Scheduler, SchedulerStats, TagCopier};
pub use skopeo::{SkopeoClient, SkopeoConfig, TagSet};

// Low-level implementation modules
pub mod diff;
pub mod error;
pub mod executor;
pub mod manifest;
pub mod mapping;
pub mod policy;
pub mod reference;
pub mod scheduler;
pub mod skopeo;
