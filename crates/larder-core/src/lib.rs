//! Publishing core for the larder CMS: the article publication checklist,
//! the write pipeline around it, post-commit rebuild webhooks and the
//! translation proxy.

pub mod config;
pub mod error;
pub mod hooks;
pub mod media;
pub mod preview;
pub mod translate;
pub mod types;
pub mod validation;
pub mod webhook;

pub use config::{TranslateConfig, WebhookConfig};
pub use error::{LarderError, ValidationIssue, ValidationReport};
pub use hooks::{merge_documents, ArticlePublicationHook, DocumentStore, MemoryDocumentStore, WritePipeline};
pub use preview::render_outline;
pub use types::*;
pub use validation::validate_publication_checklist;
pub use webhook::{DispatchOutcome, WebhookDispatcher, WebhookEvent};
