use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::TranslateConfig;
use crate::translate::{TranslateError, TranslateRequest, Translator};

/// Headers attached to every proxy response, including errors.
pub const CORS_HEADERS: [(&str, &str); 4] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "POST, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
    ("Access-Control-Max-Age", "86400"),
];

/// A framework-neutral HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslateResponse {
    pub status: u16,
    pub body: Option<Value>,
    pub headers: Vec<(&'static str, String)>,
}

impl TranslateResponse {
    fn with_cors(status: u16, body: Option<Value>) -> Self {
        Self {
            status,
            body,
            headers: CORS_HEADERS
                .iter()
                .map(|(name, value)| (*name, value.to_string()))
                .collect(),
        }
    }

    fn error(err: &TranslateError) -> Self {
        Self::with_cors(err.status(), Some(err.to_body()))
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Answer to a CORS preflight `OPTIONS` request.
pub fn preflight() -> TranslateResponse {
    TranslateResponse::with_cors(204, None)
}

/// Serves one `POST` to the translation proxy.
///
/// The API key is checked before the body is read; a missing key is a
/// server misconfiguration (500). Malformed input answers 400, upstream
/// failures 502, success 200 with `{"translations": [...]}`.
pub fn handle_translate(
    config: &TranslateConfig,
    content_type: &str,
    raw: &str,
    translator: &dyn Translator,
) -> TranslateResponse {
    if config.api_key.is_none() {
        warn!("translation requested but DEEPL_API_KEY is not set");
        return TranslateResponse::error(&TranslateError::MissingApiKey);
    }

    let request = match TranslateRequest::parse(content_type, raw) {
        Ok(request) => request,
        Err(err) => {
            debug!(error = %err, "rejected translation request");
            return TranslateResponse::error(&err);
        }
    };

    match translator.translate(&request) {
        Ok(translations) => {
            debug!(
                backend = translator.name(),
                target = %request.target_lang,
                count = translations.len(),
                "translated"
            );
            TranslateResponse::with_cors(200, Some(json!({ "translations": translations })))
        }
        Err(err) => {
            warn!(backend = translator.name(), error = %err, "translation failed");
            TranslateResponse::error(&err)
        }
    }
}
