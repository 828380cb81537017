//! Translation backends.

use std::sync::Mutex;

use serde::Deserialize;

use crate::config::TranslateConfig;
use crate::error::LarderError;
use crate::translate::{TranslateError, TranslateRequest};

/// Translates a batch of texts into one target language.
///
/// The call is blocking; the proxy serves one request at a time per caller.
pub trait Translator: Send + Sync {
    /// Returns one translation per input text, in order.
    fn translate(&self, request: &TranslateRequest) -> Result<Vec<String>, TranslateError>;

    /// Backend name, e.g. `"deepl"`.
    fn name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// DeepL
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct DeepLResponse {
    #[serde(default)]
    translations: Vec<DeepLTranslation>,
}

#[derive(Deserialize)]
struct DeepLTranslation {
    #[serde(default)]
    text: String,
}

/// Client for the DeepL `/v2/translate` form API.
pub struct DeepLClient {
    api_key: String,
    api_url: String,
    client: reqwest::blocking::Client,
}

impl DeepLClient {
    /// Fails with [`TranslateError::MissingApiKey`] when no key is configured.
    pub fn new(config: &TranslateConfig) -> Result<Self, LarderError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(TranslateError::MissingApiKey)?;
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            api_key,
            api_url: config.api_url.clone(),
            client,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

impl Translator for DeepLClient {
    fn translate(&self, request: &TranslateRequest) -> Result<Vec<String>, TranslateError> {
        let mut form: Vec<(&str, &str)> = vec![
            ("auth_key", self.api_key.as_str()),
            ("target_lang", request.target_lang.as_str()),
        ];
        form.extend(request.texts.iter().map(|t| ("text", t.as_str())));

        let response = self
            .client
            .post(&self.api_url)
            .form(&form)
            .send()
            .map_err(|e| TranslateError::Upstream {
                details: format!("Request failed: {e}"),
            })?;

        if !response.status().is_success() {
            let details = response.text().unwrap_or_default();
            return Err(TranslateError::Upstream { details });
        }

        let body: DeepLResponse = response.json().map_err(|e| TranslateError::Upstream {
            details: format!("Failed to parse response: {e}"),
        })?;

        Ok(body.translations.into_iter().map(|t| t.text).collect())
    }

    fn name(&self) -> &str {
        "deepl"
    }
}

// ---------------------------------------------------------------------------
// Mock (for testing)
// ---------------------------------------------------------------------------

/// Prefixes every text with `[TARGET] ` and records the requests it saw.
#[derive(Default)]
pub struct MockTranslator {
    failure: Option<TranslateError>,
    seen: Mutex<Vec<TranslateRequest>>,
}

impl MockTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A translator that always fails with `error`.
    pub fn failing(error: TranslateError) -> Self {
        Self {
            failure: Some(error),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<TranslateRequest> {
        self.seen.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl Translator for MockTranslator {
    fn translate(&self, request: &TranslateRequest) -> Result<Vec<String>, TranslateError> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(request.clone());
        }
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        Ok(request
            .texts
            .iter()
            .map(|t| format!("[{}] {t}", request.target_lang))
            .collect())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
