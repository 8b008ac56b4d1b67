use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Base URL of the upstream Ollama instance.
    pub ollama_url: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds. Generous by default: a completion
    /// can legitimately take minutes on small hardware.
    pub request_timeout_secs: u64,
    /// Path of the append-only generation journal.
    pub journal_path: PathBuf,
    /// Whether failed generation attempts are journaled too.
    pub journal_failures: bool,
    /// Path of the persisted generation history.
    pub history_path: PathBuf,
    /// Directory served as the UI bundle at `/`.
    pub static_dir: PathBuf,
    /// Period of the upstream discovery probe in seconds.
    pub discovery_interval_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                         | Default                   |
    /// |---------------------------------|---------------------------|
    /// | `HOST`                          | `0.0.0.0`                 |
    /// | `PORT`                          | `3000`                    |
    /// | `OLLAMA_URL`                    | `http://localhost:11434`  |
    /// | `CORS_ORIGINS`                  | `http://localhost:5173`   |
    /// | `REQUEST_TIMEOUT_SECS`          | `300`                     |
    /// | `QUILL_JOURNAL_PATH`            | `outputs.log`             |
    /// | `QUILL_JOURNAL_FAILURES`        | `false`                   |
    /// | `QUILL_HISTORY_PATH`            | `history.json`            |
    /// | `QUILL_STATIC_DIR`              | `public`                  |
    /// | `QUILL_DISCOVERY_INTERVAL_SECS` | `30`                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let ollama_url =
            std::env::var("OLLAMA_URL").unwrap_or_else(|_| "http://localhost:11434".into());

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let journal_path =
            PathBuf::from(std::env::var("QUILL_JOURNAL_PATH").unwrap_or_else(|_| "outputs.log".into()));

        let journal_failures = std::env::var("QUILL_JOURNAL_FAILURES")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let history_path =
            PathBuf::from(std::env::var("QUILL_HISTORY_PATH").unwrap_or_else(|_| "history.json".into()));

        let static_dir =
            PathBuf::from(std::env::var("QUILL_STATIC_DIR").unwrap_or_else(|_| "public".into()));

        let discovery_interval_secs: u64 = std::env::var("QUILL_DISCOVERY_INTERVAL_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("QUILL_DISCOVERY_INTERVAL_SECS must be a valid u64");

        Self {
            host,
            port,
            ollama_url,
            cors_origins,
            request_timeout_secs,
            journal_path,
            journal_failures,
            history_path,
            static_dir,
            discovery_interval_secs,
        }
    }
}
