use serde::Serialize;
use serde_json::Value;

use crate::types::{Collection, DocumentId, Operation};

/// `event_type` of the CI repository-dispatch envelope.
pub const DISPATCH_EVENT_TYPE: &str = "payload-update";

/// A committed change worth announcing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookEvent {
    pub collection: Collection,
    pub operation: Operation,
    pub id: Option<DocumentId>,
    pub slug: Option<String>,
}

impl WebhookEvent {
    pub fn new(collection: Collection, operation: Operation) -> Self {
        Self {
            collection,
            operation,
            id: None,
            slug: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<DocumentId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Builds the event for a committed document, taking the slug from the
    /// first non-blank field the collection names (see
    /// [`Collection::slug_fields`]).
    pub fn from_document(collection: Collection, operation: Operation, doc: &Value) -> Self {
        let id = doc.get("id").and_then(DocumentId::from_value);
        let slug = collection
            .slug_fields()
            .iter()
            .filter_map(|field| doc.get(*field).and_then(Value::as_str))
            .find(|s| !s.is_empty())
            .map(str::to_string);
        Self {
            collection,
            operation,
            id,
            slug,
        }
    }

    /// Slug when known, otherwise the id; used in log lines.
    pub fn label(&self) -> String {
        match (&self.slug, &self.id) {
            (Some(slug), _) => slug.clone(),
            (None, Some(id)) => id.to_string(),
            (None, None) => "-".to_string(),
        }
    }
}

/// Whether a destination is a developer's machine or a remote CI service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Local,
    Remote,
}

impl Destination {
    /// `localhost` and `127.0.0.1` are local; anything else, including a URL
    /// that does not parse, is remote.
    pub fn classify(url: &str) -> Self {
        match url::Url::parse(url) {
            Ok(parsed) => match parsed.host_str() {
                Some("localhost") | Some("127.0.0.1") => Destination::Local,
                _ => Destination::Remote,
            },
            Err(_) => Destination::Remote,
        }
    }
}

/// The fields every payload shape carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeSummary {
    pub collection: Collection,
    pub operation: Operation,
    pub id: Option<DocumentId>,
    pub slug: Option<String>,
}

/// Body of a webhook request, shaped for its destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum WebhookPayload {
    /// Flat summary posted to a local rebuild listener.
    Local(ChangeSummary),
    /// Repository-dispatch envelope for the CI service.
    Remote {
        event_type: &'static str,
        client_payload: ChangeSummary,
    },
}

impl WebhookPayload {
    pub fn for_destination(event: &WebhookEvent, destination: Destination) -> Self {
        let summary = ChangeSummary {
            collection: event.collection,
            operation: event.operation,
            id: event.id.clone(),
            slug: event.slug.clone(),
        };
        match destination {
            Destination::Local => WebhookPayload::Local(summary),
            Destination::Remote => WebhookPayload::Remote {
                event_type: DISPATCH_EVENT_TYPE,
                client_payload: summary,
            },
        }
    }

    pub fn to_json(&self) -> Value {
        // Serializing plain enums and strings cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
