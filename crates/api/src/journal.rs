//! Append-only generation journal.
//!
//! Handlers push [`JournalRecord`]s onto an unbounded channel and never
//! wait; a dedicated writer task appends one JSON line per record to the
//! journal file. A slow or failing write can therefore never affect request
//! latency or correctness. Write failures are logged and otherwise dropped.
//! The journal has no rotation and no size bound.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use quill_core::content::ContentType;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// One journaled generation attempt.
///
/// Successful attempts carry `output`; failed attempts (journaled only when
/// enabled in config) carry `error` instead. The two are mutually exclusive.
#[derive(Debug, Clone, Serialize)]
pub struct JournalRecord {
    /// When the attempt completed (UTC, ISO-8601).
    pub timestamp: DateTime<Utc>,
    /// The user's topic text.
    pub prompt: String,
    /// Generated text, present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Content-type tag of the request.
    #[serde(rename = "type")]
    pub content_type: ContentType,
    /// Model identifier used.
    pub model: String,
    /// Sampling temperature used.
    pub temperature: f64,
    /// Upstream error message, present on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JournalRecord {
    /// Record for a completed generation.
    pub fn success(
        prompt: impl Into<String>,
        output: impl Into<String>,
        content_type: ContentType,
        model: impl Into<String>,
        temperature: f64,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            prompt: prompt.into(),
            output: Some(output.into()),
            content_type,
            model: model.into(),
            temperature,
            error: None,
        }
    }

    /// Record for a failed generation attempt.
    pub fn failure(
        prompt: impl Into<String>,
        error: impl Into<String>,
        content_type: ContentType,
        model: impl Into<String>,
        temperature: f64,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            prompt: prompt.into(),
            output: None,
            content_type,
            model: model.into(),
            temperature,
            error: Some(error.into()),
        }
    }
}

/// Cloneable handle for submitting records to the journal writer.
#[derive(Clone)]
pub struct Journal {
    tx: mpsc::UnboundedSender<JournalRecord>,
}

impl Journal {
    /// Spawn the writer task appending to `path`.
    ///
    /// Returns the submit handle and the writer's join handle. The writer
    /// drains remaining records and exits once every [`Journal`] clone has
    /// been dropped; await the join handle during shutdown to flush.
    pub fn spawn(path: PathBuf) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(write_loop(path, rx));
        (Self { tx }, handle)
    }

    /// Submit a record, fire-and-forget.
    ///
    /// Never blocks and never fails the caller; if the writer is gone the
    /// record is dropped with a diagnostic.
    pub fn record(&self, record: JournalRecord) {
        if self.tx.send(record).is_err() {
            tracing::error!("Journal writer is gone, dropping record");
        }
    }
}

/// Writer task: append one JSON line per record.
///
/// The file is opened per record (append + create), so a journal file
/// removed or rotated out from under the server is simply recreated.
async fn write_loop(path: PathBuf, mut rx: mpsc::UnboundedReceiver<JournalRecord>) {
    while let Some(record) = rx.recv().await {
        let line = match serde_json::to_string(&record) {
            Ok(line) => line,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize journal record");
                continue;
            }
        };

        if let Err(e) = append_line(&path, &line).await {
            tracing::error!(path = %path.display(), error = %e, "Failed to write journal record");
        }
    }
}

async fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(line.as_bytes()).await?;
    file.write_all(b"\n").await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
