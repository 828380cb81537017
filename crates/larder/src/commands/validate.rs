use std::path::Path;
use std::sync::Arc;

use larder_core::media::{HttpMediaStore, MediaApiConfig, MediaLookup};
use larder_core::{ArticlePublicationHook, LarderError};

use crate::commands::{load_media_file, read_json};
use crate::output::Reporter;

/// Environment variable holding the CMS API key for `--media-api`.
const API_KEY_VAR: &str = "LARDER_API_KEY";

pub fn run_validate_article(
    file: &Path,
    previous: Option<&Path>,
    media_file: Option<&Path>,
    media_api: Option<&str>,
    reporter: &mut Reporter,
) -> bool {
    let Some(incoming) = read_json(file, reporter) else {
        return false;
    };
    let original = match previous {
        Some(path) => match read_json(path, reporter) {
            Some(doc) => Some(doc),
            None => return false,
        },
        None => None,
    };

    let media: Arc<dyn MediaLookup> = match media_api {
        Some(base_url) => match http_media(base_url) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                reporter.error(&format!("Cannot set up media API client: {e}"));
                return false;
            }
        },
        None => match load_media_file(media_file, reporter) {
            Some(store) => store,
            None => return false,
        },
    };

    reporter.section(&format!("Checking {}", file.display()));

    let hook = ArticlePublicationHook::new(media);
    match hook.before_change(incoming, original.as_ref()) {
        Ok(_) => {
            reporter.success(&format!("Ready to save: {}", file.display()));
            true
        }
        Err(LarderError::Validation { issues, .. }) => {
            reporter.report_issues(&issues);
            reporter.error(&format!(
                "Publication checklist failed with {} issue(s)",
                issues.len()
            ));
            false
        }
        Err(e) => {
            reporter.error(&format!("{e}"));
            false
        }
    }
}

fn http_media(base_url: &str) -> Result<HttpMediaStore, LarderError> {
    let mut config = MediaApiConfig::new(base_url);
    if let Some(key) = std::env::var(API_KEY_VAR).ok().filter(|k| !k.is_empty()) {
        config = config.with_api_key(key);
    }
    HttpMediaStore::new(config)
}
