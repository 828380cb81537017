use std::path::Path;

use larder_core::{render_outline, ArticleDraft};

use crate::commands::{load_media_file, read_json};
use crate::output::Reporter;

pub fn run_preview(file: &Path, media_file: Option<&Path>, reporter: &mut Reporter) -> bool {
    let Some(doc) = read_json(file, reporter) else {
        return false;
    };
    let Some(media) = load_media_file(media_file, reporter) else {
        return false;
    };

    let draft = match ArticleDraft::from_value(doc) {
        Ok(draft) => draft,
        Err(e) => {
            reporter.error(&format!("Not an article: {e}"));
            return false;
        }
    };

    let outline = render_outline(&draft, media.as_ref());
    reporter.output("preview", &outline);
    true
}
