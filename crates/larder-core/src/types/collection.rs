use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LarderError;

/// Collections that announce committed changes to the site build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Articles,
    Authors,
    Categories,
    Tags,
    Media,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Articles,
        Collection::Authors,
        Collection::Categories,
        Collection::Tags,
        Collection::Media,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Articles => "articles",
            Collection::Authors => "authors",
            Collection::Categories => "categories",
            Collection::Tags => "tags",
            Collection::Media => "media",
        }
    }

    /// Document fields tried, in order, for the webhook `slug`.
    ///
    /// Authors have no slug of their own and are announced by name; media
    /// items are announced by id only.
    pub fn slug_fields(&self) -> &'static [&'static str] {
        match self {
            Collection::Articles => &["slug"],
            Collection::Authors => &["name"],
            Collection::Categories | Collection::Tags => &["slug", "name"],
            Collection::Media => &[],
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = LarderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| LarderError::Other(format!("Unknown collection: {s}")))
    }
}

/// The kind of write that committed a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Update => "update",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = LarderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Operation::Create),
            "update" => Ok(Operation::Update),
            other => Err(LarderError::Other(format!("Unknown operation: {other}"))),
        }
    }
}

/// Document ids are numeric on SQL adapters and strings elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentId {
    Int(i64),
    Str(String),
}

impl DocumentId {
    /// Reads an id from a JSON scalar. Blank strings are not ids.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_i64().map(DocumentId::Int),
            serde_json::Value::String(s) if !s.trim().is_empty() => {
                Some(DocumentId::Str(s.clone()))
            }
            _ => None,
        }
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentId::Int(n) => write!(f, "{n}"),
            DocumentId::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for DocumentId {
    fn from(value: i64) -> Self {
        DocumentId::Int(value)
    }
}

impl From<i32> for DocumentId {
    fn from(value: i32) -> Self {
        DocumentId::Int(i64::from(value))
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        DocumentId::Str(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn collection_round_trips_through_str() {
        for c in Collection::ALL {
            assert_eq!(c.as_str().parse::<Collection>().unwrap(), c);
        }
        assert!("pages".parse::<Collection>().is_err());
    }

    #[test]
    fn categories_fall_back_to_name() {
        assert_eq!(Collection::Categories.slug_fields(), &["slug", "name"]);
        assert!(Collection::Media.slug_fields().is_empty());
    }

    #[test]
    fn document_id_accepts_numbers_and_strings() {
        assert_eq!(DocumentId::from_value(&json!(7)), Some(DocumentId::Int(7)));
        assert_eq!(
            DocumentId::from_value(&json!("65f0c2")),
            Some(DocumentId::Str("65f0c2".into()))
        );
        assert_eq!(DocumentId::from_value(&json!("  ")), None);
        assert_eq!(DocumentId::from_value(&json!(null)), None);
    }

    #[test]
    fn document_id_serializes_untagged() {
        assert_eq!(serde_json::to_string(&DocumentId::Int(3)).unwrap(), "3");
        assert_eq!(
            serde_json::to_string(&DocumentId::from("abc")).unwrap(),
            "\"abc\""
        );
    }

    #[test]
    fn operation_parses_lowercase() {
        assert_eq!("update".parse::<Operation>().unwrap(), Operation::Update);
        assert!("delete".parse::<Operation>().is_err());
    }
}
