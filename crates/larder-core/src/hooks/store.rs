use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use crate::error::LarderError;
use crate::hooks::merge_documents;
use crate::types::{Collection, DocumentId, Operation};

/// Persistent storage for CMS documents.
pub trait DocumentStore: Send + Sync {
    fn find(&self, collection: Collection, id: &DocumentId) -> Result<Option<Value>, LarderError>;

    /// Persists `data` atomically and returns the stored document, which
    /// always carries its `id`.
    fn commit(
        &self,
        collection: Collection,
        operation: Operation,
        id: Option<&DocumentId>,
        data: Value,
    ) -> Result<Value, LarderError>;
}

#[derive(Default)]
struct Inner {
    docs: HashMap<(Collection, String), Value>,
    next_id: i64,
}

/// A map-backed [`DocumentStore`]. Creates without an id get sequential
/// integer ids; updates merge over the stored document.
#[derive(Default)]
pub struct MemoryDocumentStore {
    inner: Mutex<Inner>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `doc` as-is under its `id` field.
    pub fn with_document(self, collection: Collection, doc: Value) -> Self {
        if let Some(id) = doc.get("id").and_then(DocumentId::from_value) {
            if let Ok(mut inner) = self.inner.lock() {
                inner.docs.insert((collection, id.to_string()), doc);
            }
        }
        self
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|i| i.docs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> LarderError {
    LarderError::Other("document store lock poisoned".to_string())
}

impl DocumentStore for MemoryDocumentStore {
    fn find(&self, collection: Collection, id: &DocumentId) -> Result<Option<Value>, LarderError> {
        let inner = self.inner.lock().map_err(|_| poisoned())?;
        Ok(inner.docs.get(&(collection, id.to_string())).cloned())
    }

    fn commit(
        &self,
        collection: Collection,
        operation: Operation,
        id: Option<&DocumentId>,
        data: Value,
    ) -> Result<Value, LarderError> {
        let mut inner = self.inner.lock().map_err(|_| poisoned())?;

        let id = match id.cloned().or_else(|| data.get("id").and_then(DocumentId::from_value)) {
            Some(id) => id,
            None => {
                inner.next_id += 1;
                DocumentId::Int(inner.next_id)
            }
        };
        let key = (collection, id.to_string());

        let previous = match operation {
            Operation::Update => inner.docs.get(&key),
            Operation::Create => None,
        };
        let mut doc = merge_documents(&data, previous);
        if let Value::Object(map) = &mut doc {
            map.insert("id".to_string(), serde_json::to_value(&id)?);
        }

        inner.docs.insert(key, doc.clone());
        Ok(doc)
    }
}
