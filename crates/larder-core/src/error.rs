use serde::Serialize;
use thiserror::Error;

use crate::translate::TranslateError;
use crate::types::Collection;

#[derive(Debug, Error)]
pub enum LarderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Media lookup failed: {0}")]
    MediaLookup(String),

    #[error("Validation failed for {collection}: {} issue(s)", issues.len())]
    Validation {
        collection: Collection,
        issues: Vec<ValidationIssue>,
    },

    #[error(transparent)]
    Translate(#[from] TranslateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl LarderError {
    /// Returns the issue list when this is a validation failure.
    pub fn issues(&self) -> Option<&[ValidationIssue]> {
        match self {
            LarderError::Validation { issues, .. } => Some(issues),
            _ => None,
        }
    }
}

/// A single failed checklist rule, located by a dotted field path such as
/// `recipeBlocks.1.ingredients.0.item`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Ordered accumulator of [`ValidationIssue`]s. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn issue(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.push(ValidationIssue::new(path, message));
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.issues.extend(other.issues);
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Paths of all issues, in the order they were reported.
    pub fn paths(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.path.as_str()).collect()
    }

    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }

    /// Converts a non-empty report into the structured write failure.
    pub fn into_result(self, collection: Collection) -> Result<(), LarderError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(LarderError::Validation {
                collection,
                issues: self.issues,
            })
        }
    }
}
