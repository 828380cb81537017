pub mod article;
pub mod gallery;
pub mod media;
pub mod recipe;

pub use article::{is_valid_slug, validate_publication_checklist};
pub use gallery::validate_image_blocks;
pub use media::ensure_media_alt;
pub use recipe::validate_recipe_blocks;
