use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::collection::DocumentId;

/// A reference from a document to an item in the `media` collection.
///
/// Populated relations arrive as objects (possibly carrying their own
/// `alt`), unpopulated ones as a bare id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MediaReference {
    Inline {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<DocumentId>,
        #[serde(skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
    Id(DocumentId),
    /// A value that is present but cannot point at a media item.
    Invalid(Value),
}

impl MediaReference {
    pub fn id(id: impl Into<DocumentId>) -> Self {
        MediaReference::Id(id.into())
    }

    pub fn with_alt(id: impl Into<DocumentId>, alt: impl Into<String>) -> Self {
        MediaReference::Inline {
            id: Some(id.into()),
            alt: Some(alt.into()),
            url: None,
        }
    }

    /// Reads a reference from a raw field value. `null` and `""` are absent.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(ref s) if s.is_empty() => None,
            Value::String(_) | Value::Number(_) => reference_id(&value).map(MediaReference::Id),
            Value::Object(ref map) => Some(MediaReference::Inline {
                id: map.get("id").and_then(reference_id),
                alt: map.get("alt").and_then(Value::as_str).map(str::to_string),
                url: map.get("url").and_then(Value::as_str).map(str::to_string),
            }),
            other => Some(MediaReference::Invalid(other)),
        }
    }

    /// Alt text carried on the reference itself, trimmed.
    pub fn inline_alt(&self) -> Option<&str> {
        match self {
            MediaReference::Inline { alt: Some(alt), .. } => {
                let trimmed = alt.trim();
                (!trimmed.is_empty()).then_some(trimmed)
            }
            _ => None,
        }
    }

    /// The id to resolve through the media store, if any.
    pub fn media_id(&self) -> Option<&DocumentId> {
        match self {
            MediaReference::Inline { id, .. } => id.as_ref(),
            MediaReference::Id(id) => Some(id),
            MediaReference::Invalid(_) => None,
        }
    }

    pub fn inline_url(&self) -> Option<&str> {
        match self {
            MediaReference::Inline { url, .. } => url.as_deref(),
            _ => None,
        }
    }
}

/// Any non-empty string or number names a media item, even one no store
/// will find (`" "`, `1.5`); those fail the alt lookup instead.
fn reference_id(value: &Value) -> Option<DocumentId> {
    match value {
        Value::Number(n) => Some(match n.as_i64() {
            Some(int) => DocumentId::Int(int),
            None => DocumentId::Str(n.to_string()),
        }),
        Value::String(s) if !s.is_empty() => Some(DocumentId::Str(s.clone())),
        _ => None,
    }
}

/// Deserializes an optional media reference field.
pub fn optional_media<'de, D>(deserializer: D) -> Result<Option<MediaReference>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(MediaReference::from_value(Value::deserialize(deserializer)?))
}

/// A stored media document, as returned by a media lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRecord {
    pub id: DocumentId,
    #[serde(default, deserialize_with = "super::de::loose_string")]
    pub alt: Option<String>,
    #[serde(default, deserialize_with = "super::de::loose_string")]
    pub url: Option<String>,
}

impl MediaRecord {
    pub fn new(id: impl Into<DocumentId>, alt: Option<&str>) -> Self {
        Self {
            id: id.into(),
            alt: alt.map(str::to_string),
            url: None,
        }
    }

    /// Trimmed alt text, or `None` when blank.
    pub fn usable_alt(&self) -> Option<&str> {
        self.alt
            .as_deref()
            .map(str::trim)
            .filter(|alt| !alt.is_empty())
    }
}
