use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::de::{loose_enum, loose_minutes, loose_object, loose_records, loose_string};
use super::media::{optional_media, MediaReference};
use super::rich_text::RichTextDocument;

/// Layout blocks an editor can place in an article, keyed by `blockType`.
///
/// An element with a missing or unknown `blockType` is kept as
/// [`ContentBlock::Unrecognized`] so it still counts as article content.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    Introduction(IntroductionBlock),
    EditorialNote(EditorialNoteBlock),
    RecipeCard(RecipeCardBlock),
    ImageGallery(ImageGalleryBlock),
    Unrecognized(Value),
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "blockType", rename_all = "camelCase")]
enum TaggedBlock {
    Introduction(IntroductionBlock),
    EditorialNote(EditorialNoteBlock),
    RecipeCard(RecipeCardBlock),
    ImageGallery(ImageGalleryBlock),
}

impl From<TaggedBlock> for ContentBlock {
    fn from(block: TaggedBlock) -> Self {
        match block {
            TaggedBlock::Introduction(b) => ContentBlock::Introduction(b),
            TaggedBlock::EditorialNote(b) => ContentBlock::EditorialNote(b),
            TaggedBlock::RecipeCard(b) => ContentBlock::RecipeCard(b),
            TaggedBlock::ImageGallery(b) => ContentBlock::ImageGallery(b),
        }
    }
}

impl<'de> Deserialize<'de> for ContentBlock {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match TaggedBlock::deserialize(&value) {
            Ok(block) => block.into(),
            Err(_) => ContentBlock::Unrecognized(value),
        })
    }
}

impl Serialize for ContentBlock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let tagged = match self {
            ContentBlock::Introduction(b) => TaggedBlock::Introduction(b.clone()),
            ContentBlock::EditorialNote(b) => TaggedBlock::EditorialNote(b.clone()),
            ContentBlock::RecipeCard(b) => TaggedBlock::RecipeCard(b.clone()),
            ContentBlock::ImageGallery(b) => TaggedBlock::ImageGallery(b.clone()),
            ContentBlock::Unrecognized(value) => return value.serialize(serializer),
        };
        tagged.serialize(serializer)
    }
}

impl ContentBlock {
    /// The `blockType` tag, or `"unknown"` when the element carries none.
    pub fn kind(&self) -> &str {
        match self {
            ContentBlock::Introduction(_) => "introduction",
            ContentBlock::EditorialNote(_) => "editorialNote",
            ContentBlock::RecipeCard(_) => "recipeCard",
            ContentBlock::ImageGallery(_) => "imageGallery",
            ContentBlock::Unrecognized(value) => value
                .get("blockType")
                .and_then(Value::as_str)
                .filter(|t| !t.is_empty())
                .unwrap_or("unknown"),
        }
    }

    /// The heading shown for the block, falling back to the editor default.
    pub fn heading(&self) -> &str {
        let (title, default) = match self {
            ContentBlock::Introduction(b) => (b.title.as_deref(), "Introduction"),
            ContentBlock::EditorialNote(b) => (b.title.as_deref(), "Notes"),
            ContentBlock::RecipeCard(b) => (b.title.as_deref(), "Recipe card"),
            ContentBlock::ImageGallery(b) => (b.title.as_deref(), "Image gallery"),
            ContentBlock::Unrecognized(value) => (
                value.get("title").and_then(Value::as_str),
                "Content block",
            ),
        };
        title.filter(|t| !t.is_empty()).unwrap_or(default)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntroductionBlock {
    #[serde(default, deserialize_with = "loose_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "loose_object")]
    pub body: Option<RichTextDocument>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Note,
    Tip,
    Variation,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Note => "note",
            Tone::Tip => "tip",
            Tone::Variation => "variation",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorialNoteBlock {
    #[serde(default, deserialize_with = "loose_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "loose_enum")]
    pub tone: Option<Tone>,
    #[serde(default, deserialize_with = "loose_object")]
    pub body: Option<RichTextDocument>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCardBlock {
    #[serde(default, deserialize_with = "loose_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "loose_minutes")]
    pub preparation_time_minutes: Option<u32>,
    #[serde(default, deserialize_with = "loose_minutes")]
    pub cooking_time_minutes: Option<u32>,
    #[serde(default, deserialize_with = "loose_string")]
    pub servings: Option<String>,
    #[serde(default, deserialize_with = "loose_enum")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, deserialize_with = "loose_records")]
    pub ingredients: Vec<Ingredient>,
    #[serde(default, deserialize_with = "loose_records")]
    pub steps: Vec<RecipeStep>,
    #[serde(default, deserialize_with = "loose_object")]
    pub tips: Option<RichTextDocument>,
    #[serde(default, deserialize_with = "loose_object")]
    pub personal_notes: Option<RichTextDocument>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default, deserialize_with = "loose_string")]
    pub quantity: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub item: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub notes: Option<String>,
}

impl Ingredient {
    pub fn new(quantity: &str, item: &str) -> Self {
        Self {
            quantity: Some(quantity.to_string()),
            item: Some(item.to_string()),
            notes: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeStep {
    #[serde(default, deserialize_with = "loose_string")]
    pub instruction: Option<String>,
}

impl RecipeStep {
    pub fn new(instruction: &str) -> Self {
        Self {
            instruction: Some(instruction.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageGalleryBlock {
    #[serde(default, deserialize_with = "loose_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "loose_records")]
    pub images: Vec<GalleryImage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    #[serde(default, deserialize_with = "optional_media")]
    pub image: Option<MediaReference>,
    #[serde(default, deserialize_with = "loose_string")]
    pub caption: Option<String>,
}
