use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use crate::error::LarderError;
use crate::hooks::merge_documents;
use crate::media::MediaLookup;
use crate::types::{ArticleDraft, Collection};
use crate::validation::validate_publication_checklist;

/// Pre-commit hook for the articles collection.
pub struct ArticlePublicationHook {
    media: Arc<dyn MediaLookup>,
}

impl ArticlePublicationHook {
    pub fn new(media: Arc<dyn MediaLookup>) -> Self {
        Self { media }
    }

    /// Validates the change as it would be stored and returns the incoming
    /// data untouched when it passes.
    ///
    /// Drafts whose merged `readyForPublication` is not literally `true`
    /// pass without being parsed. Otherwise every checklist issue is
    /// returned in one [`LarderError::Validation`].
    pub fn before_change(&self, data: Value, original: Option<&Value>) -> Result<Value, LarderError> {
        let merged = merge_documents(&data, original);
        if merged.get("readyForPublication") != Some(&Value::Bool(true)) {
            return Ok(data);
        }

        let draft = ArticleDraft::from_value(merged)?;
        let report = validate_publication_checklist(&draft, self.media.as_ref());
        if !report.is_empty() {
            info!(
                slug = draft.slug.as_deref().unwrap_or("-"),
                issues = report.len(),
                "article blocked from publication"
            );
        } else {
            debug!(slug = draft.slug.as_deref().unwrap_or("-"), "publication checklist passed");
        }
        report.into_result(Collection::Articles)?;
        Ok(data)
    }
}
