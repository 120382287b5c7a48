//! Resolved runtime settings.

use crate::Cli;

/// Settings after applying defaults that depend on other flags.
///
/// Clap handles flag/environment precedence; the only cross-flag rule
/// resolved here is the concurrency default, which drops from 10 to 5
/// when only signature tags are being mirrored (those runs touch many
/// more repositories per pass).
#[derive(Debug, Clone)]
pub struct AppContext {
    pub mirror: String,
    pub hub: String,
    pub concurrency: usize,
    pub signatures_only: bool,
    pub tls_verify: bool,
    pub skopeo: String,
}

impl AppContext {
    pub fn resolve(cli: &Cli) -> Self {
        let concurrency = cli
            .concurrency
            .unwrap_or(if cli.signatures_only { 5 } else { 10 });
        Self {
            mirror: cli.mirror.clone(),
            hub: cli.hub.clone(),
            concurrency,
            signatures_only: cli.signatures_only,
            tls_verify: cli.tls_verify,
            skopeo: cli.skopeo.clone(),
        }
    }
}
