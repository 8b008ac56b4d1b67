//! Shared helpers for the API integration tests.
//!
//! [`build_test_app`] mirrors the state and router construction in
//! `main.rs` (minus the background discovery loop, which tests replace with
//! a single synchronous refresh), so the tests exercise the same middleware
//! stack that production uses. The upstream Ollama instance is a real axum
//! server bound to an ephemeral port.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, Response, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use http_body_util::BodyExt;
use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinHandle;
use tower::ServiceExt;

use quill_api::background::discovery;
use quill_api::config::ServerConfig;
use quill_api::journal::Journal;
use quill_api::router::build_app_router;
use quill_api::state::{self, AppState};
use quill_history::HistoryStore;
use quill_ollama::OllamaClient;

// ---------------------------------------------------------------------------
// Stub upstream
// ---------------------------------------------------------------------------

/// A running stub Ollama server.
pub struct StubUpstream {
    /// Base URL to point the client at.
    pub base_url: String,
    /// Number of `POST /api/generate` requests received.
    pub generate_hits: Arc<AtomicUsize>,
    /// Request bodies received by `POST /api/generate`, oldest first.
    pub captured: Arc<std::sync::Mutex<Vec<serde_json::Value>>>,
}

impl StubUpstream {
    /// Block until the stub has received at least one generate request.
    pub async fn wait_for_generate_hit(&self) {
        while self.generate_hits.load(Ordering::SeqCst) == 0 {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
    }
}

/// Spawn a stub upstream whose generate endpoint replies immediately.
pub async fn spawn_upstream(status: StatusCode, body: serde_json::Value) -> StubUpstream {
    spawn_upstream_gated(status, body, None).await
}

/// Spawn a stub upstream. When `gate` is given, the generate endpoint
/// records the hit, then parks until the test adds a permit.
pub async fn spawn_upstream_gated(
    status: StatusCode,
    body: serde_json::Value,
    gate: Option<Arc<Semaphore>>,
) -> StubUpstream {
    let generate_hits = Arc::new(AtomicUsize::new(0));
    let captured: Arc<std::sync::Mutex<Vec<serde_json::Value>>> =
        Arc::new(std::sync::Mutex::new(Vec::new()));

    let hits = Arc::clone(&generate_hits);
    let reply = body.clone();
    let app = Router::new()
        .route(
            "/api/generate",
            post(
                move |State(captured): State<Arc<std::sync::Mutex<Vec<serde_json::Value>>>>,
                      Json(request): Json<serde_json::Value>| {
                    let hits = Arc::clone(&hits);
                    let gate = gate.clone();
                    let reply = reply.clone();
                    async move {
                        captured.lock().unwrap().push(request);
                        hits.fetch_add(1, Ordering::SeqCst);
                        if let Some(gate) = gate {
                            gate.acquire().await.unwrap().forget();
                        }
                        (status, Json(reply))
                    }
                },
            ),
        )
        .route(
            "/api/tags",
            get(|| async {
                Json(serde_json::json!({
                    "models": [{"name": "llama3:8b"}, {"name": "gemma3:4b"}]
                }))
            }),
        )
        .with_state(Arc::clone(&captured));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubUpstream {
        base_url: format!("http://{addr}"),
        generate_hits,
        captured,
    }
}

/// A base URL that nothing is listening on.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

// ---------------------------------------------------------------------------
// Test app
// ---------------------------------------------------------------------------

/// A fully wired application plus the handles tests need to inspect it.
pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub journal_handle: JoinHandle<()>,
    pub journal_path: PathBuf,
    pub history_path: PathBuf,
    pub tmp: Arc<tempfile::TempDir>,
}

impl TestApp {
    /// Drop every journal sender, wait for the writer to drain, and return
    /// the journal file contents (empty string if nothing was written).
    pub async fn drain_journal(self) -> String {
        let TestApp {
            app,
            state,
            journal_handle,
            journal_path,
            tmp,
            ..
        } = self;
        drop(app);
        drop(state);
        journal_handle.await.unwrap();
        let contents = std::fs::read_to_string(&journal_path).unwrap_or_default();
        drop(tmp);
        contents
    }
}

/// Build a test app against the given upstream with failure journaling off.
pub async fn build_test_app(ollama_url: &str) -> TestApp {
    build_test_app_with(ollama_url, false).await
}

/// Build a test app, choosing whether failed attempts are journaled.
pub async fn build_test_app_with(ollama_url: &str, journal_failures: bool) -> TestApp {
    let tmp = Arc::new(tempfile::tempdir().unwrap());
    build_test_app_in(ollama_url, journal_failures, tmp).await
}

/// Build a test app using an existing temp dir, so a second app can reuse
/// the first one's journal and history files (restart scenarios).
pub async fn build_test_app_in(
    ollama_url: &str,
    journal_failures: bool,
    tmp: Arc<tempfile::TempDir>,
) -> TestApp {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        ollama_url: ollama_url.to_string(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        journal_path: tmp.path().join("outputs.log"),
        journal_failures,
        history_path: tmp.path().join("history.json"),
        static_dir: tmp.path().to_path_buf(),
        discovery_interval_secs: 30,
    };

    let ollama = Arc::new(OllamaClient::new(config.ollama_url.clone()));
    let history = Arc::new(Mutex::new(HistoryStore::load(&config.history_path)));
    let (journal, journal_handle) = Journal::spawn(config.journal_path.clone());
    let catalog = state::initial_catalog();

    // One synchronous refresh in place of the background loop.
    discovery::refresh(&ollama, &catalog).await;

    let state = AppState {
        config: Arc::new(config.clone()),
        ollama,
        history,
        journal,
        catalog,
        generation_gate: AppState::new_generation_gate(),
    };

    let app = build_app_router(state.clone(), &config);

    TestApp {
        app,
        state,
        journal_handle,
        journal_path: config.journal_path,
        history_path: config.history_path,
        tmp,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Issue a GET request against the app.
pub async fn get_request(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Issue a POST request with a JSON body against the app.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
