//! The write path: pre-commit validation, storage and post-commit dispatch.

pub mod article;
pub mod pipeline;
pub mod store;

use serde_json::{Map, Value};

pub use article::ArticlePublicationHook;
pub use pipeline::{WriteOutcome, WritePipeline};
pub use store::{DocumentStore, MemoryDocumentStore};

/// Shallow-merges an incoming change over the stored document. Incoming
/// keys win, including explicit `null`s. Non-object inputs count as empty.
pub fn merge_documents(incoming: &Value, previous: Option<&Value>) -> Value {
    let mut merged = Map::new();
    if let Some(Value::Object(stored)) = previous {
        merged.extend(stored.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    if let Value::Object(changes) = incoming {
        merged.extend(changes.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    Value::Object(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn incoming_overrides_stored() {
        let stored = json!({"title": "Old", "slug": "cake", "excerpt": "Kept"});
        let merged = merge_documents(&json!({"title": "New", "excerpt": null}), Some(&stored));
        assert_eq!(merged, json!({"title": "New", "slug": "cake", "excerpt": null}));
    }

    #[test]
    fn missing_or_non_object_inputs_are_empty() {
        assert_eq!(merge_documents(&json!({"a": 1}), None), json!({"a": 1}));
        assert_eq!(merge_documents(&json!(null), Some(&json!({"a": 1}))), json!({"a": 1}));
        assert_eq!(merge_documents(&json!([1]), Some(&json!("x"))), json!({}));
    }
}
