//! Plain-text outline of an article, as the authenticated preview page
//! would lay it out.

use crate::media::{MediaAltCache, MediaLookup};
use crate::types::{
    ArticleDraft, ContentBlock, EditorialNoteBlock, ImageGalleryBlock, IntroductionBlock,
    MediaReference, RecipeCardBlock, RichTextDocument,
};

#[derive(Default)]
struct Outline {
    out: String,
}

impl Outline {
    fn line(&mut self, text: impl AsRef<str>) {
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    fn blank(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    fn rich_text(&mut self, doc: Option<&RichTextDocument>) {
        if let Some(doc) = doc.filter(|d| d.has_content()) {
            let text = doc.plain_text();
            let text = text.trim();
            if !text.is_empty() {
                self.line(text);
            }
        }
    }
}

fn or_default<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(default)
}

fn media_alt(cache: &mut MediaAltCache<'_>, reference: &MediaReference) -> Option<String> {
    if let Some(alt) = reference.inline_alt() {
        return Some(alt.to_string());
    }
    let id = reference.media_id()?;
    cache.alt_for(id).map(str::to_string)
}

/// Renders the draft's title, excerpt, featured image and body.
///
/// Modern articles render rich text, then content blocks, recipe blocks and
/// galleries in that order. Articles with no modern content render a note
/// that the legacy HTML body is shown instead.
pub fn render_outline(draft: &ArticleDraft, media: &dyn MediaLookup) -> String {
    let mut cache = MediaAltCache::new(media);
    let mut outline = Outline::default();

    outline.line(format!("# {}", or_default(draft.title.as_deref(), "(untitled)")));
    if let Some(excerpt) = draft.excerpt.as_deref().filter(|e| !e.trim().is_empty()) {
        outline.line(format!("> {}", excerpt.trim()));
    }

    let featured_alt = match &draft.featured_media {
        Some(reference) => media_alt(&mut cache, reference),
        None => None,
    };
    let legacy = draft.featured_image.as_ref();
    if draft.featured_media.is_some() || legacy.and_then(|i| i.url.as_deref()).is_some() {
        let alt = featured_alt
            .or_else(|| legacy.and_then(|i| i.alt.clone()))
            .or_else(|| draft.title.clone())
            .unwrap_or_default();
        outline.line(format!("[featured image: {alt}]"));
    }

    if !draft.has_modern_content() {
        outline.blank();
        outline.line("(legacy HTML body)");
        if let Some(content) = draft.content.as_deref().filter(|c| !c.trim().is_empty()) {
            outline.line(format!("{} characters of HTML", content.len()));
        }
        return outline.out;
    }

    if draft.has_rich_text() {
        outline.blank();
        outline.rich_text(draft.content_v2.as_ref());
    }
    for block in &draft.content_blocks {
        render_block(&mut outline, &mut cache, block);
    }
    for recipe in &draft.recipe_blocks {
        outline.blank();
        render_recipe(&mut outline, recipe);
    }
    for gallery in &draft.image_blocks {
        outline.blank();
        render_gallery(&mut outline, &mut cache, gallery);
    }

    outline.out
}

fn render_block(outline: &mut Outline, cache: &mut MediaAltCache<'_>, block: &ContentBlock) {
    outline.blank();
    match block {
        ContentBlock::Introduction(intro) => render_introduction(outline, intro),
        ContentBlock::EditorialNote(note) => render_note(outline, note),
        ContentBlock::RecipeCard(recipe) => render_recipe(outline, recipe),
        ContentBlock::ImageGallery(gallery) => render_gallery(outline, cache, gallery),
        ContentBlock::Unrecognized(_) => {
            outline.line(format!("## {} ({})", block.heading(), block.kind()));
        }
    }
}

fn render_introduction(outline: &mut Outline, block: &IntroductionBlock) {
    outline.line(format!("## {}", or_default(block.title.as_deref(), "Introduction")));
    outline.rich_text(block.body.as_ref());
}

fn render_note(outline: &mut Outline, block: &EditorialNoteBlock) {
    let heading = or_default(block.title.as_deref(), "Notes");
    match block.tone {
        Some(tone) => outline.line(format!("### {heading} [{}]", tone.as_str())),
        None => outline.line(format!("### {heading}")),
    }
    outline.rich_text(block.body.as_ref());
}

fn render_recipe(outline: &mut Outline, block: &RecipeCardBlock) {
    outline.line(format!("## {}", or_default(block.title.as_deref(), "Recipe card")));
    outline.line(format!(
        "Prep: {} min | Cook: {} min | Difficulty: {} | {}",
        block.preparation_time_minutes.unwrap_or(0),
        block.cooking_time_minutes.unwrap_or(0),
        block.difficulty.unwrap_or_default().as_str(),
        or_default(block.servings.as_deref(), "Servings not set"),
    ));

    if !block.ingredients.is_empty() {
        outline.line("Ingredients:");
        for ingredient in &block.ingredients {
            let quantity = ingredient.quantity.as_deref().unwrap_or("");
            let item = ingredient.item.as_deref().unwrap_or("");
            let mut entry = format!("- {quantity} {item}").trim_end().to_string();
            if let Some(notes) = ingredient.notes.as_deref().filter(|n| !n.is_empty()) {
                entry.push_str(&format!(" ({notes})"));
            }
            outline.line(entry);
        }
    }

    if !block.steps.is_empty() {
        outline.line("Steps:");
        for (i, step) in block.steps.iter().enumerate() {
            outline.line(format!("{}. {}", i + 1, step.instruction.as_deref().unwrap_or("")));
        }
    }

    outline.rich_text(block.tips.as_ref());
    outline.rich_text(block.personal_notes.as_ref());
}

fn render_gallery(outline: &mut Outline, cache: &mut MediaAltCache<'_>, block: &ImageGalleryBlock) {
    outline.line(format!("## {}", or_default(block.title.as_deref(), "Image gallery")));
    for item in &block.images {
        let Some(reference) = &item.image else {
            continue;
        };
        let alt = media_alt(cache, reference).unwrap_or_else(|| "(no alt text)".to_string());
        match item.caption.as_deref().filter(|c| !c.is_empty()) {
            Some(caption) => outline.line(format!("- [{alt}] {caption}")),
            None => outline.line(format!("- [{alt}]")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::InMemoryMediaStore;
    use crate::types::MediaRecord;
    use serde_json::json;

    fn draft(value: serde_json::Value) -> ArticleDraft {
        ArticleDraft::from_value(value).unwrap()
    }

    #[test]
    fn recipe_defaults() {
        let d = draft(json!({
            "title": "Scones",
            "recipeBlocks": [{"blockType": "recipeCard",
                "ingredients": [{"quantity": "250 g", "item": "flour", "notes": "sifted"}],
                "steps": [{"instruction": "Rub in butter."}, {"instruction": "Bake."}]}]
        }));
        let out = render_outline(&d, &InMemoryMediaStore::new());
        assert!(out.contains("## Recipe card\n"));
        assert!(out.contains("Prep: 0 min | Cook: 0 min | Difficulty: medium | Servings not set"));
        assert!(out.contains("- 250 g flour (sifted)\n"));
        assert!(out.contains("2. Bake.\n"));
    }

    #[test]
    fn content_blocks_use_default_headings() {
        let d = draft(json!({
            "title": "Bread",
            "contentBlocks": [
                {"blockType": "introduction", "body": {"root": {"children": [
                    {"type": "paragraph", "children": [{"type": "text", "text": "Start here."}]}
                ]}}},
                {"blockType": "editorialNote", "tone": "tip"}
            ]
        }));
        let out = render_outline(&d, &InMemoryMediaStore::new());
        assert!(out.contains("## Introduction\nStart here.\n"));
        assert!(out.contains("### Notes [tip]\n"));
    }

    #[test]
    fn unrecognized_blocks_keep_their_place() {
        let d = draft(json!({
            "title": "Bread",
            "contentBlocks": [{"blockType": "video", "title": "Shaping"}, {"blockName": "x"}]
        }));
        let out = render_outline(&d, &InMemoryMediaStore::new());
        assert!(out.contains("## Shaping (video)\n"));
        assert!(out.contains("## Content block (unknown)\n"));
    }

    #[test]
    fn gallery_alt_is_resolved_through_lookup() {
        let store = InMemoryMediaStore::new().with_record(MediaRecord::new(4, Some("Crumb")));
        let d = draft(json!({
            "title": "Loaf",
            "imageBlocks": [{"blockType": "imageGallery", "title": "Bake day", "images": [
                {"image": 4, "caption": "Open crumb"},
                {"image": 5},
                {"caption": "no image"}
            ]}]
        }));
        let out = render_outline(&d, &store);
        assert!(out.contains("## Bake day\n- [Crumb] Open crumb\n- [(no alt text)]\n"));
        assert!(!out.contains("no image"));
    }

    #[test]
    fn legacy_article_notes_html_body() {
        let d = draft(json!({
            "title": "Old post",
            "content": "<p>Hi</p>",
            "featuredImage": {"url": "https://old.example/pic.jpg"}
        }));
        let out = render_outline(&d, &InMemoryMediaStore::new());
        assert!(out.starts_with("# Old post\n[featured image: Old post]\n"));
        assert!(out.contains("(legacy HTML body)\n9 characters of HTML\n"));
    }
}
