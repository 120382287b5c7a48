use clap::Parser;
use libmirror::{ManifestClient, ManifestConfig, SkopeoConfig, Syncer, TagPolicy};
use tracing::{error, info};

mod context;
mod logging;

/// mirror-sync - Container Image Mirror Synchronizer
///
/// Mirrors the image repositories listed in a remote manifest into a
/// destination registry, copying only release-like tags that are not
/// already present at the destination.
#[derive(Parser, Debug)]
#[command(name = "mirror-sync")]
#[command(version, about, long_about = None)]
struct Cli {
    /// URL of the manifest listing the image references to synchronize
    #[arg(
        long,
        env = "MIRROR_SYNC_MIRROR",
        default_value = "https://ghp.ci/https://raw.githubusercontent.com/cnsync/mirror-sync/main/private-mirrors.txt"
    )]
    mirror: String,

    /// Global copy concurrency bound (default 10; 5 with --signatures-only)
    #[arg(long, env = "MIRROR_SYNC_CONCURRENCY")]
    concurrency: Option<usize>,

    /// Destination registry/namespace prefix
    #[arg(
        long,
        env = "MIRROR_SYNC_HUB",
        default_value = "registry.cn-hangzhou.aliyuncs.com/grove"
    )]
    hub: String,

    /// Exclude only signature tags instead of the full curated rule set
    #[arg(long)]
    signatures_only: bool,

    /// Verify TLS certificates for registries and the manifest host
    /// (relaxed by default: mirrors commonly use self-signed endpoints)
    #[arg(long)]
    tls_verify: bool,

    /// Path to the image-transfer tool binary
    #[arg(long, env = "MIRROR_SYNC_SKOPEO", default_value = "skopeo")]
    skopeo: String,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let ctx = context::AppContext::resolve(&cli);

    // A fetch failure degrades to an empty run: log it and finish as a
    // no-op rather than exiting non-zero.
    let manifest = match ManifestClient::new(
        ManifestConfig::new().with_accept_invalid_certs(!ctx.tls_verify),
    ) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to set up manifest client");
            std::process::exit(1);
        }
    };
    let entries = match manifest.fetch(&ctx.mirror).await {
        Ok(entries) => entries,
        Err(e) => {
            error!(url = %ctx.mirror, error = %e, "manifest fetch failed, nothing to do");
            return;
        }
    };
    if entries.is_empty() {
        info!(url = %ctx.mirror, "manifest has no entries");
        return;
    }
    info!(entries = entries.len(), hub = %ctx.hub, "starting synchronization");

    let policy = if ctx.signatures_only {
        TagPolicy::signatures_only()
    } else {
        TagPolicy::curated()
    };
    let syncer = match Syncer::builder()
        .hub(&ctx.hub)
        .concurrency(ctx.concurrency)
        .policy(policy)
        .skopeo_config(
            SkopeoConfig::new()
                .with_binary(&ctx.skopeo)
                .with_tls_verify(ctx.tls_verify),
        )
        .build()
    {
        Ok(syncer) => syncer,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    match syncer.sync(&entries).await {
        Ok(report) => {
            println!(
                "{} entries ({} skipped): {} tags copied, {} failed",
                report.entries_total,
                report.entries_skipped,
                report.tasks_scheduled - report.tasks_failed,
                report.tasks_failed
            );
        }
        Err(e) => {
            error!(error = %e, "synchronization failed to start");
            std::process::exit(1);
        }
    }
}
