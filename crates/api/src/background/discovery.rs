//! Periodic upstream discovery.
//!
//! Refreshes the shared model catalog on a fixed interval. The probe is
//! read-only and idempotent, and runs independently of the generation path.
//! Runs until cancelled.

use std::sync::Arc;
use std::time::Duration;

use quill_ollama::OllamaClient;
use tokio_util::sync::CancellationToken;

use crate::state::SharedCatalog;

/// Run the discovery loop. The first probe fires immediately.
pub async fn run(
    client: Arc<OllamaClient>,
    catalog: SharedCatalog,
    period: Duration,
    cancel: CancellationToken,
) {
    tracing::info!(
        upstream = %client.base_url(),
        period_secs = period.as_secs(),
        "Upstream discovery started"
    );

    let mut interval = tokio::time::interval(period);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Upstream discovery stopping");
                break;
            }
            _ = interval.tick() => {
                refresh(&client, &catalog).await;
            }
        }
    }
}

/// Probe the upstream once and publish the new catalog.
///
/// The model listing doubles as the availability probe: it hits the same
/// upstream endpoint as the health check, so a live catalog implies a
/// reachable instance. Reachability transitions are logged at info level.
pub async fn refresh(client: &OllamaClient, catalog: &SharedCatalog) {
    let fresh = client.list_models().await;

    let mut current = catalog.write().await;
    if current.is_degraded() && !fresh.is_degraded() {
        tracing::info!(models = fresh.models().len(), "Upstream reachable, catalog is live");
    } else if !current.is_degraded() && fresh.is_degraded() {
        tracing::warn!("Upstream lost, catalog degraded to fallback");
    }
    *current = fresh;
}
