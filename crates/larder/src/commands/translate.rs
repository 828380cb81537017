use larder_core::translate::{DeepLClient, TranslateError, TranslateRequest, Translator};
use larder_core::TranslateConfig;

use crate::output::Reporter;

pub fn run_translate(target: &str, texts: &[String], reporter: &mut Reporter) -> bool {
    let request = match TranslateRequest::new(target, texts) {
        Ok(r) => r,
        Err(e) => {
            reporter.error(&e.to_string());
            return false;
        }
    };

    let client = match DeepLClient::new(&TranslateConfig::from_env()) {
        Ok(c) => c,
        Err(e) => {
            reporter.error(&e.to_string());
            return false;
        }
    };

    match client.translate(&request) {
        Ok(translations) => {
            reporter.section(&format!("{} text(s) → {}", texts.len(), request.target_lang));
            reporter.output(&request.target_lang, &translations.join("\n"));
            true
        }
        Err(TranslateError::Upstream { details }) => {
            reporter.error(&format!("DeepL request failed: {details}"));
            false
        }
        Err(e) => {
            reporter.error(&e.to_string());
            false
        }
    }
}
