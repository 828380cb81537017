//! Read-only access to the `media` collection.
//!
//! The checklist only ever needs one thing from a media item: its alt
//! text. Lookups go through [`MediaLookup`] so the platform's storage, the
//! CMS REST API, or a fixture file can stand behind it.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde::Deserialize;

use crate::error::LarderError;
use crate::types::{DocumentId, MediaRecord};

/// Fetches a media item by id, without populating nested relations.
///
/// `Ok(None)` means the item does not exist. Implementations must be
/// `Send + Sync` so one store can serve concurrent write requests.
pub trait MediaLookup: Send + Sync {
    fn find_by_id(&self, id: &DocumentId) -> Result<Option<MediaRecord>, LarderError>;
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// A map-backed media store. Counts every lookup it serves.
#[derive(Debug, Default)]
pub struct InMemoryMediaStore {
    records: HashMap<String, MediaRecord>,
    failing: HashSet<String>,
    lookups: AtomicUsize,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MediaFile {
    Docs { docs: Vec<MediaRecord> },
    List(Vec<MediaRecord>),
}

impl InMemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, record: MediaRecord) -> Self {
        self.insert(record);
        self
    }

    /// Makes lookups of `id` fail with a transport-style error.
    pub fn with_failure(mut self, id: impl Into<DocumentId>) -> Self {
        self.failing.insert(id.into().to_string());
        self
    }

    pub fn insert(&mut self, record: MediaRecord) {
        self.records.insert(record.id.to_string(), record);
    }

    /// Loads media documents from a JSON file holding either an array of
    /// documents or a REST list response (`{"docs": [...]}`).
    pub fn from_json_file(path: &Path) -> Result<Self, LarderError> {
        let content = std::fs::read_to_string(path)?;
        let parsed: MediaFile = serde_json::from_str(&content)?;
        let records = match parsed {
            MediaFile::Docs { docs } => docs,
            MediaFile::List(list) => list,
        };
        let mut store = Self::new();
        for record in records {
            store.insert(record);
        }
        Ok(store)
    }

    /// Number of `find_by_id` calls served so far.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl MediaLookup for InMemoryMediaStore {
    fn find_by_id(&self, id: &DocumentId) -> Result<Option<MediaRecord>, LarderError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let key = id.to_string();
        if self.failing.contains(&key) {
            return Err(LarderError::MediaLookup(format!("media {key} unavailable")));
        }
        Ok(self.records.get(&key).cloned())
    }
}

// ---------------------------------------------------------------------------
// CMS REST API
// ---------------------------------------------------------------------------

/// Connection settings for [`HttpMediaStore`].
#[derive(Debug, Clone)]
pub struct MediaApiConfig {
    /// Server root, e.g. `https://cms.example.com`.
    pub base_url: String,
    /// API key of a `users` document, sent as `users API-Key <key>`.
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl MediaApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

/// Looks media up through `GET {base}/api/media/{id}?depth=0`.
pub struct HttpMediaStore {
    config: MediaApiConfig,
    client: reqwest::blocking::Client,
}

impl HttpMediaStore {
    pub fn new(config: MediaApiConfig) -> Result<Self, LarderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, client })
    }

    fn item_url(&self, id: &DocumentId) -> String {
        format!(
            "{}/api/media/{id}?depth=0",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

impl MediaLookup for HttpMediaStore {
    fn find_by_id(&self, id: &DocumentId) -> Result<Option<MediaRecord>, LarderError> {
        let mut request = self.client.get(self.item_url(id));
        if let Some(key) = &self.config.api_key {
            request = request.header("Authorization", format!("users API-Key {key}"));
        }

        let response = request
            .send()
            .map_err(|e| LarderError::MediaLookup(format!("Request failed: {e}")))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().unwrap_or_default();
            return Err(LarderError::MediaLookup(format!("HTTP {status}: {text}")));
        }

        let record: MediaRecord = response
            .json()
            .map_err(|e| LarderError::MediaLookup(format!("Failed to parse response: {e}")))?;
        Ok(Some(record))
    }
}
