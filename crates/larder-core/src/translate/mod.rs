//! Translation proxy: request parsing, the DeepL client and the HTTP-shaped
//! handler used by the admin UI.

pub mod client;
pub mod handler;
pub mod request;

use serde_json::{json, Value};
use thiserror::Error;

pub use client::{DeepLClient, MockTranslator, Translator};
pub use handler::{handle_translate, preflight, TranslateResponse, CORS_HEADERS};
pub use request::{normalize_target_lang, TranslateRequest};

/// A translation request that could not be served.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    #[error("DEEPL_API_KEY not configured")]
    MissingApiKey,

    #[error("Empty request body")]
    EmptyBody { content_type: String },

    #[error("Invalid JSON body")]
    InvalidJson {
        content_type: String,
        body_preview: String,
    },

    #[error("targetLang is required")]
    MissingTargetLang,

    #[error("texts must be a non-empty array")]
    EmptyTexts,

    #[error("DeepL request failed")]
    Upstream { details: String },
}

impl TranslateError {
    /// HTTP status the proxy answers with.
    pub fn status(&self) -> u16 {
        match self {
            TranslateError::MissingApiKey => 500,
            TranslateError::Upstream { .. } => 502,
            TranslateError::EmptyBody { .. }
            | TranslateError::InvalidJson { .. }
            | TranslateError::MissingTargetLang
            | TranslateError::EmptyTexts => 400,
        }
    }

    /// JSON error body: `{"error": ...}` plus any diagnostic fields.
    pub fn to_body(&self) -> Value {
        let error = self.to_string();
        match self {
            TranslateError::EmptyBody { content_type } => json!({
                "error": error,
                "contentType": content_type,
            }),
            TranslateError::InvalidJson {
                content_type,
                body_preview,
            } => json!({
                "error": error,
                "contentType": content_type,
                "bodyPreview": body_preview,
            }),
            TranslateError::Upstream { details } => json!({
                "error": error,
                "details": details,
            }),
            _ => json!({ "error": error }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        assert_eq!(TranslateError::MissingApiKey.status(), 500);
        assert_eq!(TranslateError::EmptyTexts.status(), 400);
        assert_eq!(
            TranslateError::Upstream {
                details: "quota".into()
            }
            .status(),
            502
        );
    }

    #[test]
    fn error_bodies_carry_diagnostics() {
        let err = TranslateError::Upstream {
            details: "Quota exceeded".into(),
        };
        assert_eq!(
            err.to_body(),
            json!({"error": "DeepL request failed", "details": "Quota exceeded"})
        );
        assert_eq!(
            TranslateError::MissingTargetLang.to_body(),
            json!({"error": "targetLang is required"})
        );
    }
}
