pub mod preview;
pub mod translate;
pub mod validate;
pub mod webhook;

use std::path::Path;
use std::sync::Arc;

use larder_core::media::{InMemoryMediaStore, MediaLookup};
use larder_core::LarderError;
use serde_json::Value;

use crate::output::Reporter;

/// Reads a JSON document, reporting failures.
pub fn read_json(path: &Path, reporter: &mut Reporter) -> Option<Value> {
    let parsed = std::fs::read_to_string(path)
        .map_err(LarderError::from)
        .and_then(|raw| serde_json::from_str(&raw).map_err(LarderError::from));
    match parsed {
        Ok(value) => Some(value),
        Err(e) => {
            reporter.error(&format!("Cannot read {}: {e}", path.display()));
            None
        }
    }
}

/// Loads a media fixture file, or an empty store when none is given.
pub fn load_media_file(
    path: Option<&Path>,
    reporter: &mut Reporter,
) -> Option<Arc<dyn MediaLookup>> {
    let Some(path) = path else {
        return Some(Arc::new(InMemoryMediaStore::new()));
    };
    match InMemoryMediaStore::from_json_file(path) {
        Ok(store) => Some(Arc::new(store)),
        Err(e) => {
            reporter.error(&format!("Cannot load media from {}: {e}", path.display()));
            None
        }
    }
}
