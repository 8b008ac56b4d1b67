use std::sync::Arc;

use quill_history::HistoryStore;
use quill_ollama::{ModelCatalog, OllamaClient};
use tokio::sync::{Mutex, RwLock, Semaphore};

use crate::config::ServerConfig;
use crate::journal::Journal;

/// Shared handle to the most recent model catalog, refreshed by the
/// background discovery task.
pub type SharedCatalog = Arc<RwLock<ModelCatalog>>;

/// Build the catalog handle in its pre-probe state.
pub fn initial_catalog() -> SharedCatalog {
    Arc::new(RwLock::new(ModelCatalog::degraded(
        "upstream not probed yet",
    )))
}

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Client for the upstream Ollama instance.
    pub ollama: Arc<OllamaClient>,
    /// Bounded most-recent-first generation history.
    pub history: Arc<Mutex<HistoryStore>>,
    /// Fire-and-forget generation journal.
    pub journal: Journal,
    /// Latest model catalog from upstream discovery.
    pub catalog: SharedCatalog,
    /// Single-flight guard: one generation in flight at a time.
    pub generation_gate: Arc<Semaphore>,
}

impl AppState {
    /// Create the single-permit generation gate.
    pub fn new_generation_gate() -> Arc<Semaphore> {
        Arc::new(Semaphore::new(1))
    }
}
