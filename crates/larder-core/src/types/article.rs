use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::blocks::{ContentBlock, ImageGalleryBlock, RecipeCardBlock};
use super::de::{is_non_empty, loose_object, loose_records, loose_string, loose_vec};
use super::media::{optional_media, MediaReference};
use super::rich_text::{has_rich_content, RichTextDocument};

/// An article as the publication checklist sees it: stored fields with the
/// incoming change applied on top.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDraft {
    #[serde(default, deserialize_with = "loose_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub date: Option<Value>,
    /// Legacy HTML body from the pre-blocks editor.
    #[serde(default, deserialize_with = "loose_string")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "loose_object")]
    pub content_v2: Option<RichTextDocument>,
    #[serde(default, deserialize_with = "loose_vec")]
    pub content_blocks: Vec<ContentBlock>,
    #[serde(default, deserialize_with = "loose_records")]
    pub recipe_blocks: Vec<RecipeCardBlock>,
    #[serde(default, deserialize_with = "loose_records")]
    pub image_blocks: Vec<ImageGalleryBlock>,
    #[serde(default, deserialize_with = "optional_media")]
    pub featured_media: Option<MediaReference>,
    /// Imported image metadata kept from the legacy site.
    #[serde(default, deserialize_with = "loose_object")]
    pub featured_image: Option<LegacyImage>,
    #[serde(default, deserialize_with = "optional_media")]
    pub seo_image: Option<MediaReference>,
    #[serde(default)]
    pub ready_for_publication: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyImage {
    #[serde(default, deserialize_with = "loose_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub alt: Option<String>,
}

impl ArticleDraft {
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Only a literal `true` opts the draft into the publication checklist.
    pub fn is_ready_for_publication(&self) -> bool {
        matches!(self.ready_for_publication, Some(Value::Bool(true)))
    }

    /// A date counts as set unless it is null, `false`, `0` or blank.
    pub fn has_date(&self) -> bool {
        match &self.date {
            None | Some(Value::Null) | Some(Value::Bool(false)) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Some(_) => true,
        }
    }

    pub fn has_rich_text(&self) -> bool {
        has_rich_content(self.content_v2.as_ref())
    }

    /// Rich text with content or any block in any of the three block lists.
    pub fn has_modern_content(&self) -> bool {
        self.has_rich_text()
            || !self.content_blocks.is_empty()
            || !self.recipe_blocks.is_empty()
            || !self.image_blocks.is_empty()
    }

    pub fn has_legacy_content(&self) -> bool {
        is_non_empty(self.content.as_deref())
    }

    /// Galleries alone do not make a body.
    pub fn has_primary_body(&self) -> bool {
        self.has_rich_text() || !self.content_blocks.is_empty() || !self.recipe_blocks.is_empty()
    }
}
