//! Post-commit rebuild notifications.

pub mod dispatcher;
pub mod payload;
pub mod transport;

pub use dispatcher::{DispatchOutcome, WebhookDispatcher};
pub use payload::{ChangeSummary, Destination, WebhookEvent, WebhookPayload, DISPATCH_EVENT_TYPE};
pub use transport::{
    HttpTransport, RecordedRequest, RecordingTransport, TransportResponse, WebhookTransport,
};
