use serde_json::Value;
use tracing::debug;

use crate::error::LarderError;
use crate::hooks::article::ArticlePublicationHook;
use crate::hooks::store::DocumentStore;
use crate::types::{Collection, DocumentId, Operation};
use crate::webhook::{DispatchOutcome, WebhookDispatcher, WebhookEvent};

/// Result of a committed write.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteOutcome {
    pub operation: Operation,
    pub document: Value,
    pub dispatch: DispatchOutcome,
}

/// Validate, commit, then announce.
///
/// A validation failure returns before anything is stored or sent. Once the
/// commit succeeds the webhook outcome cannot fail the write.
pub struct WritePipeline {
    store: Box<dyn DocumentStore>,
    articles: ArticlePublicationHook,
    dispatcher: WebhookDispatcher,
}

impl WritePipeline {
    pub fn new(
        store: Box<dyn DocumentStore>,
        articles: ArticlePublicationHook,
        dispatcher: WebhookDispatcher,
    ) -> Self {
        Self {
            store,
            articles,
            dispatcher,
        }
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    /// Writes `data` to `collection`: an update when `id` names a stored
    /// document, a create otherwise.
    pub fn write(
        &self,
        collection: Collection,
        id: Option<&DocumentId>,
        data: Value,
    ) -> Result<WriteOutcome, LarderError> {
        let previous = match id {
            Some(id) => self.store.find(collection, id)?,
            None => None,
        };
        let operation = if previous.is_some() {
            Operation::Update
        } else {
            Operation::Create
        };

        let data = match collection {
            Collection::Articles => self.articles.before_change(data, previous.as_ref())?,
            Collection::Authors | Collection::Categories | Collection::Tags | Collection::Media => {
                data
            }
        };

        let document = self.store.commit(collection, operation, id, data)?;
        debug!(%collection, %operation, "document committed");

        let event = WebhookEvent::from_document(collection, operation, &document);
        let dispatch = self.dispatcher.dispatch(&event);

        Ok(WriteOutcome {
            operation,
            document,
            dispatch,
        })
    }
}
