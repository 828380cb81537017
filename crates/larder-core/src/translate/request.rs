use serde_json::Value;

use crate::translate::TranslateError;

const PREVIEW_CHARS: usize = 200;

/// Maps a language code to the DeepL target code: `en`, `fr`, `es`,
/// `pt-br` and `ar` have fixed mappings, anything else is uppercased.
/// Empty input has no target.
pub fn normalize_target_lang(value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    let mapped = match value.to_lowercase().as_str() {
        "en" => "EN",
        "fr" => "FR",
        "es" => "ES",
        "pt-br" => "PT-BR",
        "ar" => "AR",
        _ => return Some(value.to_uppercase()),
    };
    Some(mapped.to_string())
}

/// A validated translation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateRequest {
    pub target_lang: String,
    pub texts: Vec<String>,
}

impl TranslateRequest {
    /// Builds a request from already-separated parts, applying the same
    /// normalization as [`parse`](Self::parse).
    pub fn new<I, S>(target: &str, texts: I) -> Result<Self, TranslateError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let target_lang = normalize_target_lang(target);
        let texts = clean_texts(texts);
        Self::checked(target_lang, texts)
    }

    /// Parses a raw request body.
    ///
    /// Form encoding is used when the content type says so or the body
    /// contains `targetLang=`; form bodies carry `targetLang` and repeated
    /// `text` fields. Anything else is read as JSON with the target under
    /// `targetLang`, `target` or `target_lang` and a `texts` array.
    pub fn parse(content_type: &str, raw: &str) -> Result<Self, TranslateError> {
        if raw.is_empty() {
            return Err(TranslateError::EmptyBody {
                content_type: content_type.to_string(),
            });
        }

        let is_form = content_type.contains("application/x-www-form-urlencoded")
            || raw.contains("targetLang=");

        if is_form {
            Self::parse_form(raw)
        } else {
            Self::parse_json(content_type, raw)
        }
    }

    fn parse_form(raw: &str) -> Result<Self, TranslateError> {
        let mut target = None;
        let mut texts = Vec::new();
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "targetLang" if target.is_none() => target = Some(value.into_owned()),
                "text" => texts.push(value.into_owned()),
                _ => {}
            }
        }
        let target_lang = target.as_deref().and_then(normalize_target_lang);
        Self::checked(target_lang, clean_texts(texts))
    }

    fn parse_json(content_type: &str, raw: &str) -> Result<Self, TranslateError> {
        let body: Value =
            serde_json::from_str(raw).map_err(|_| TranslateError::InvalidJson {
                content_type: content_type.to_string(),
                body_preview: raw.chars().take(PREVIEW_CHARS).collect(),
            })?;

        let target_lang = ["targetLang", "target", "target_lang"]
            .into_iter()
            .filter_map(|key| body.get(key).and_then(Value::as_str))
            .find(|s| !s.is_empty())
            .and_then(normalize_target_lang);

        let texts = match body.get("texts") {
            Some(Value::Array(items)) => clean_texts(items.iter().map(stringify)),
            _ => Vec::new(),
        };

        Self::checked(target_lang, texts)
    }

    fn checked(target_lang: Option<String>, texts: Vec<String>) -> Result<Self, TranslateError> {
        let target_lang = target_lang.ok_or(TranslateError::MissingTargetLang)?;
        if texts.is_empty() {
            return Err(TranslateError::EmptyTexts);
        }
        Ok(Self { target_lang, texts })
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn clean_texts<I, S>(texts: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    texts
        .into_iter()
        .map(|t| t.as_ref().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}
