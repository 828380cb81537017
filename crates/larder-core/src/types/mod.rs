pub mod article;
pub mod blocks;
pub mod collection;
pub mod de;
pub mod media;
pub mod rich_text;

pub use article::{ArticleDraft, LegacyImage};
pub use blocks::{
    ContentBlock, Difficulty, EditorialNoteBlock, GalleryImage, ImageGalleryBlock, Ingredient,
    IntroductionBlock, RecipeCardBlock, RecipeStep, Tone,
};
pub use collection::{Collection, DocumentId, Operation};
pub use media::{MediaRecord, MediaReference};
pub use rich_text::{RichTextDocument, RichTextNode};
