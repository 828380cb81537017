use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::config::WebhookConfig;
use crate::error::LarderError;
use crate::webhook::payload::{Destination, WebhookEvent, WebhookPayload};
use crate::webhook::transport::{HttpTransport, WebhookTransport};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// What happened to one dispatch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Not production and not forced; nothing was sent.
    SkippedNotProduction,
    /// Remote destination with no token; nothing was sent.
    SkippedMissingToken,
    Delivered { status: u16 },
    Rejected { status: u16, body: String },
    TransportFailed(String),
}

impl DispatchOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DispatchOutcome::Delivered { .. })
    }

    /// True when a request went out, whatever the response.
    pub fn was_sent(&self) -> bool {
        matches!(
            self,
            DispatchOutcome::Delivered { .. }
                | DispatchOutcome::Rejected { .. }
                | DispatchOutcome::TransportFailed(_)
        )
    }
}

/// Announces committed changes to the static-site build.
///
/// Each call makes at most one request. Failures are logged under the
/// `larder::webhook` target and reported through [`DispatchOutcome`]; they
/// never surface as errors.
pub struct WebhookDispatcher {
    config: WebhookConfig,
    transport: Arc<dyn WebhookTransport>,
}

impl WebhookDispatcher {
    pub fn new(config: WebhookConfig, transport: Arc<dyn WebhookTransport>) -> Self {
        Self { config, transport }
    }

    /// Builds a dispatcher that sends over HTTP with the configured timeout.
    pub fn from_config(config: WebhookConfig) -> Result<Self, LarderError> {
        let transport = HttpTransport::new(config.timeout)?;
        Ok(Self::new(config, Arc::new(transport)))
    }

    pub fn config(&self) -> &WebhookConfig {
        &self.config
    }

    pub fn dispatch(&self, event: &WebhookEvent) -> DispatchOutcome {
        if !self.config.dispatch_enabled() {
            debug!(
                target: "larder::webhook",
                collection = %event.collection,
                "not production and FORCE_WEBHOOKS unset; skipping"
            );
            return DispatchOutcome::SkippedNotProduction;
        }

        let url = self.config.url.as_str();
        let destination = Destination::classify(url);

        let mut headers = vec![("Content-Type", "application/json".to_string())];
        if destination == Destination::Remote {
            let Some(token) = self.config.token.as_deref() else {
                warn!(
                    target: "larder::webhook",
                    url,
                    "GITHUB_DISPATCH_TOKEN is not set; skipping remote dispatch"
                );
                return DispatchOutcome::SkippedMissingToken;
            };
            headers.push(("Accept", GITHUB_ACCEPT.to_string()));
            headers.push(("Authorization", format!("token {token}")));
        }

        let body = WebhookPayload::for_destination(event, destination).to_json();

        match self.transport.post(url, &headers, &body) {
            Ok(response) if response.is_success() => {
                info!(
                    target: "larder::webhook",
                    collection = %event.collection,
                    operation = %event.operation,
                    doc = %event.label(),
                    status = response.status,
                    "webhook delivered"
                );
                DispatchOutcome::Delivered {
                    status: response.status,
                }
            }
            Ok(response) => {
                error!(
                    target: "larder::webhook",
                    status = response.status,
                    body = %response.body,
                    "webhook rejected"
                );
                DispatchOutcome::Rejected {
                    status: response.status,
                    body: response.body,
                }
            }
            Err(err) => {
                error!(target: "larder::webhook", error = %err, "webhook request failed");
                DispatchOutcome::TransportFailed(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Collection, Operation};
    use crate::webhook::transport::RecordingTransport;

    const LOCAL: &str = "http://localhost:4321/api/rebuild";
    const REMOTE: &str = "https://api.github.com/repos/acme/site/dispatches";

    fn event() -> WebhookEvent {
        WebhookEvent::new(Collection::Articles, Operation::Update)
            .with_id(7)
            .with_slug("cake")
    }

    fn dispatcher(config: WebhookConfig, transport: &Arc<RecordingTransport>) -> WebhookDispatcher {
        WebhookDispatcher::new(config, transport.clone())
    }

    #[test]
    fn development_without_override_sends_nothing() {
        let transport = Arc::new(RecordingTransport::responding(200));
        let config = WebhookConfig {
            url: LOCAL.to_string(),
            ..WebhookConfig::default()
        };
        let outcome = dispatcher(config, &transport).dispatch(&event());
        assert_eq!(outcome, DispatchOutcome::SkippedNotProduction);
        assert_eq!(transport.call_count(), 0);
    }

    #[test]
    fn override_flag_dispatches_outside_production() {
        let transport = Arc::new(RecordingTransport::responding(200));
        let config = WebhookConfig {
            url: LOCAL.to_string(),
            ..WebhookConfig::default()
        }
        .with_force(true);
        let outcome = dispatcher(config, &transport).dispatch(&event());
        assert!(outcome.is_delivered());
        assert_eq!(transport.call_count(), 1);
    }

    #[test]
    fn local_destination_is_unauthenticated_and_flat() {
        let transport = Arc::new(RecordingTransport::responding(200));
        let config = WebhookConfig::production(LOCAL).with_token("ghp_secret");
        dispatcher(config, &transport).dispatch(&event());

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.url, LOCAL);
        assert_eq!(request.header("Authorization"), None);
        assert_eq!(request.header("Accept"), None);
        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(request.body["slug"], "cake");
        assert!(request.body.get("event_type").is_none());
    }

    #[test]
    fn remote_destination_without_token_is_skipped() {
        let transport = Arc::new(RecordingTransport::responding(204));
        let config = WebhookConfig::production(REMOTE);
        let outcome = dispatcher(config, &transport).dispatch(&event());
        assert_eq!(outcome, DispatchOutcome::SkippedMissingToken);
        assert!(!outcome.was_sent());
        assert_eq!(transport.call_count(), 0);
    }

    #[test]
    fn remote_destination_gets_envelope_and_token() {
        let transport = Arc::new(RecordingTransport::responding(204));
        let config = WebhookConfig::production(REMOTE).with_token("ghp_secret");
        let outcome = dispatcher(config, &transport).dispatch(&event());
        assert_eq!(outcome, DispatchOutcome::Delivered { status: 204 });

        let request = &transport.requests()[0];
        assert_eq!(request.header("Authorization"), Some("token ghp_secret"));
        assert_eq!(request.header("Accept"), Some("application/vnd.github+json"));
        assert_eq!(request.body["event_type"], "payload-update");
        assert_eq!(request.body["client_payload"]["operation"], "update");
        assert_eq!(request.body["client_payload"]["id"], 7);
    }

    #[test]
    fn non_2xx_is_reported_not_retried() {
        let transport = Arc::new(RecordingTransport::responding_with(422, "Unprocessable"));
        let config = WebhookConfig::production(REMOTE).with_token("t");
        let outcome = dispatcher(config, &transport).dispatch(&event());
        assert_eq!(
            outcome,
            DispatchOutcome::Rejected {
                status: 422,
                body: "Unprocessable".to_string()
            }
        );
        assert_eq!(transport.call_count(), 1);
    }

    #[test]
    fn transport_error_is_swallowed() {
        let transport = Arc::new(RecordingTransport::failing("connection reset"));
        let config = WebhookConfig::production(LOCAL);
        let outcome = dispatcher(config, &transport).dispatch(&event());
        assert!(matches!(outcome, DispatchOutcome::TransportFailed(ref m) if m.contains("connection reset")));
        assert!(outcome.was_sent());
    }
}
