use std::path::Path;

use larder_core::{
    Collection, DispatchOutcome, Operation, WebhookConfig, WebhookDispatcher, WebhookEvent,
};

use crate::commands::read_json;
use crate::output::Reporter;

/// Announces a committed document. Delivery problems are reported as
/// warnings; only an unreadable document fails the command.
pub fn run_webhook(
    collection: Collection,
    file: &Path,
    operation: Operation,
    force: bool,
    reporter: &mut Reporter,
) -> bool {
    let Some(doc) = read_json(file, reporter) else {
        return false;
    };

    let mut config = WebhookConfig::from_env();
    if force {
        config = config.with_force(true);
    }

    let dispatcher = match WebhookDispatcher::from_config(config) {
        Ok(d) => d,
        Err(e) => {
            reporter.error(&format!("Cannot set up HTTP client: {e}"));
            return false;
        }
    };

    let event = WebhookEvent::from_document(collection, operation, &doc);
    let target = dispatcher.config().url.clone();

    match dispatcher.dispatch(&event) {
        DispatchOutcome::Delivered { status } => reporter.success_with_details(
            &format!("Webhook sent for {collection} {}", event.label()),
            &format!("{target} answered {status}"),
        ),
        DispatchOutcome::SkippedNotProduction => reporter.info(
            "Not in production; webhook skipped (use --force or FORCE_WEBHOOKS=true)",
        ),
        DispatchOutcome::SkippedMissingToken => {
            reporter.warning("GITHUB_DISPATCH_TOKEN is not set; webhook skipped")
        }
        DispatchOutcome::Rejected { status, body } => {
            reporter.warning(&format!("{target} rejected the webhook with {status}: {body}"))
        }
        DispatchOutcome::TransportFailed(message) => {
            reporter.warning(&format!("Webhook request failed: {message}"))
        }
    }
    true
}
