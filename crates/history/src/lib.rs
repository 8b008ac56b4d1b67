//! Bounded, most-recent-first store of prior generations.
//!
//! [`HistoryStore`] keeps the last [`HistoryStore::CAPACITY`] generations,
//! newest first, persisted as a single JSON array that is rewritten in full
//! on every mutation. Loading is fail-soft: a missing or corrupt file yields
//! an empty store rather than a startup failure. One logical writer is
//! assumed; concurrent processes sharing a file are not supported.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use quill_core::content::ContentType;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One prior generation. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Time-ordered v7 UUID assigned at insertion.
    pub id: Uuid,
    /// When the generation completed (UTC).
    pub timestamp: DateTime<Utc>,
    /// The user's topic text.
    pub prompt: String,
    /// The generated completion.
    pub content: String,
    /// Content-type tag the generation was made with.
    #[serde(rename = "type")]
    pub content_type: ContentType,
    /// Model identifier used.
    pub model: String,
    /// Sampling temperature used.
    pub temperature: f64,
}

/// Fields for a new entry; id and timestamp are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub prompt: String,
    pub content: String,
    pub content_type: ContentType,
    pub model: String,
    pub temperature: f64,
}

/// Bounded most-recent-first generation history backed by a JSON file.
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Maximum number of entries retained.
    pub const CAPACITY: usize = 10;

    /// Load the store from `path`.
    ///
    /// A missing file yields an empty store silently. An unreadable or
    /// unparsable file yields an empty store with a warning; the next
    /// successful [`add`](Self::add) overwrites the damaged file.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
                Ok(mut entries) => {
                    entries.truncate(Self::CAPACITY);
                    entries
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "History file is corrupt, starting empty");
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read history file, starting empty");
                Vec::new()
            }
        };

        Self { path, entries }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert a new entry at the front, evicting the oldest beyond capacity,
    /// and persist the full list.
    ///
    /// A persistence failure is logged but does not fail the insert; the
    /// in-memory list stays authoritative for this process.
    pub fn add(&mut self, new: NewEntry) -> HistoryEntry {
        let entry = HistoryEntry {
            id: Uuid::now_v7(),
            timestamp: Utc::now(),
            prompt: new.prompt,
            content: new.content,
            content_type: new.content_type,
            model: new.model,
            temperature: new.temperature,
        };

        self.entries.insert(0, entry.clone());
        self.entries.truncate(Self::CAPACITY);
        self.persist();

        entry
    }

    /// All entries, most recent first.
    pub fn list(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Look up an entry by id.
    pub fn get(&self, id: Uuid) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rewrite the backing file with the current list.
    fn persist(&self) {
        let json = match serde_json::to_string_pretty(&self.entries) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize history");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, json) {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to write history file");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
