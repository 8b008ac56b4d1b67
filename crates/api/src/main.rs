use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quill_api::background;
use quill_api::config::ServerConfig;
use quill_api::journal::Journal;
use quill_api::router::build_app_router;
use quill_api::state::{self, AppState};
use quill_history::HistoryStore;
use quill_ollama::OllamaClient;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quill_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, upstream = %config.ollama_url, "Loaded server configuration");

    // --- Upstream client ---
    let ollama = Arc::new(OllamaClient::new(config.ollama_url.clone()));

    // --- History store ---
    let history = HistoryStore::load(&config.history_path);
    tracing::info!(
        path = %config.history_path.display(),
        entries = history.len(),
        "History store loaded"
    );
    let history = Arc::new(Mutex::new(history));

    // --- Journal ---
    let (journal, journal_handle) = Journal::spawn(config.journal_path.clone());
    tracing::info!(path = %config.journal_path.display(), "Journal writer started");

    // --- Upstream discovery ---
    let catalog = state::initial_catalog();
    let discovery_cancel = tokio_util::sync::CancellationToken::new();
    let discovery_handle = tokio::spawn(background::discovery::run(
        Arc::clone(&ollama),
        Arc::clone(&catalog),
        Duration::from_secs(config.discovery_interval_secs),
        discovery_cancel.clone(),
    ));

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        ollama,
        history,
        journal,
        catalog,
        generation_gate: AppState::new_generation_gate(),
    };

    // --- Router ---
    let app = build_app_router(state.clone(), &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // Stop upstream discovery.
    discovery_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), discovery_handle).await;
    tracing::info!("Upstream discovery stopped");

    // Drop the last journal handle so the writer drains and exits.
    drop(state);
    let _ = tokio::time::timeout(Duration::from_secs(5), journal_handle).await;
    tracing::info!("Journal drained");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
