use std::collections::HashMap;

use tracing::debug;

use super::lookup::MediaLookup;
use crate::types::DocumentId;

/// Alt text resolved during one checklist run, keyed by the media id's
/// string form (so `7` and `"7"` share an entry).
///
/// Owned by a single validation call and dropped with it. A failed lookup
/// is remembered as "no alt".
pub struct MediaAltCache<'a> {
    lookup: &'a dyn MediaLookup,
    resolved: HashMap<String, Option<String>>,
}

impl<'a> MediaAltCache<'a> {
    pub fn new(lookup: &'a dyn MediaLookup) -> Self {
        Self {
            lookup,
            resolved: HashMap::new(),
        }
    }

    /// Returns the trimmed alt text stored for `id`, if any.
    pub fn alt_for(&mut self, id: &DocumentId) -> Option<&str> {
        let key = id.to_string();
        if !self.resolved.contains_key(&key) {
            let alt = match self.lookup.find_by_id(id) {
                Ok(Some(record)) => record.usable_alt().map(str::to_string),
                Ok(None) => None,
                Err(e) => {
                    debug!(media_id = %id, error = %e, "media lookup failed; treating alt as missing");
                    None
                }
            };
            self.resolved.insert(key.clone(), alt);
        }
        self.resolved.get(&key).and_then(|alt| alt.as_deref())
    }

    /// Number of distinct ids resolved so far.
    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::InMemoryMediaStore;
    use crate::types::MediaRecord;

    #[test]
    fn repeated_ids_hit_the_store_once() {
        let store = InMemoryMediaStore::new().with_record(MediaRecord::new(1, Some("Scones")));
        let mut cache = MediaAltCache::new(&store);
        assert_eq!(cache.alt_for(&DocumentId::Int(1)), Some("Scones"));
        assert_eq!(cache.alt_for(&DocumentId::Int(1)), Some("Scones"));
        assert_eq!(store.lookup_count(), 1);
    }

    #[test]
    fn failures_are_cached_as_missing() {
        let store = InMemoryMediaStore::new().with_failure(2);
        let mut cache = MediaAltCache::new(&store);
        assert_eq!(cache.alt_for(&DocumentId::Int(2)), None);
        assert_eq!(cache.alt_for(&DocumentId::Int(2)), None);
        assert_eq!(store.lookup_count(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn numeric_and_string_ids_share_an_entry() {
        let store = InMemoryMediaStore::new().with_record(MediaRecord::new(4, Some("Bread")));
        let mut cache = MediaAltCache::new(&store);
        assert_eq!(cache.alt_for(&DocumentId::Int(4)), Some("Bread"));
        assert_eq!(cache.alt_for(&DocumentId::from("4")), Some("Bread"));
        assert_eq!(store.lookup_count(), 1);
    }

    #[test]
    fn blank_stored_alt_is_missing() {
        let store = InMemoryMediaStore::new().with_record(MediaRecord::new(3, Some("  ")));
        let mut cache = MediaAltCache::new(&store);
        assert_eq!(cache.alt_for(&DocumentId::Int(3)), None);
    }
}
