pub mod cache;
pub mod lookup;

pub use cache::MediaAltCache;
pub use lookup::{HttpMediaStore, InMemoryMediaStore, MediaApiConfig, MediaLookup};
