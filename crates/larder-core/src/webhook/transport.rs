//! HTTP delivery for webhook payloads.

use std::sync::Mutex;
use std::time::Duration;

use serde_json::Value;

use crate::error::LarderError;

/// Status and body of a delivered request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one JSON POST. Errors are transport-level failures only; any HTTP
/// status, including 4xx/5xx, comes back as a [`TransportResponse`].
pub trait WebhookTransport: Send + Sync {
    fn post(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
        body: &Value,
    ) -> Result<TransportResponse, LarderError>;
}

// ---------------------------------------------------------------------------
// reqwest
// ---------------------------------------------------------------------------

/// Blocking reqwest transport with a request timeout.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, LarderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("larder/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl WebhookTransport for HttpTransport {
    fn post(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
        body: &Value,
    ) -> Result<TransportResponse, LarderError> {
        let mut request = self.client.post(url).json(body);
        for (name, value) in headers {
            request = request.header(*name, value);
        }

        let response = request.send()?;
        let status = response.status().as_u16();
        let body = response.text().unwrap_or_default();
        Ok(TransportResponse { status, body })
    }
}

// ---------------------------------------------------------------------------
// Recording (for testing)
// ---------------------------------------------------------------------------

/// A request captured by [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Value,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

enum Reply {
    Status(u16, String),
    Fail(String),
}

/// A transport that records every request and answers with a fixed reply.
pub struct RecordingTransport {
    reply: Reply,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl RecordingTransport {
    /// Answers every request with `status` and an empty body.
    pub fn responding(status: u16) -> Self {
        Self::responding_with(status, "")
    }

    pub fn responding_with(status: u16, body: impl Into<String>) -> Self {
        Self {
            reply: Reply::Status(status, body.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fails every request as if the connection broke.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Reply::Fail(message.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }
}

impl WebhookTransport for RecordingTransport {
    fn post(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
        body: &Value,
    ) -> Result<TransportResponse, LarderError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                url: url.to_string(),
                headers: headers.to_vec(),
                body: body.clone(),
            });
        }
        match &self.reply {
            Reply::Status(status, body) => Ok(TransportResponse {
                status: *status,
                body: body.clone(),
            }),
            Reply::Fail(message) => Err(LarderError::Other(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn recording_transport_captures_requests() {
        let transport = RecordingTransport::responding(204);
        let response = transport
            .post(
                "http://localhost/hook",
                &[("Content-Type", "application/json".to_string())],
                &json!({"a": 1}),
            )
            .unwrap();
        assert!(response.is_success());
        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].header("content-type"), Some("application/json"));
        assert_eq!(requests[0].header("authorization"), None);
    }

    #[test]
    fn failing_transport_errors_but_still_records() {
        let transport = RecordingTransport::failing("connection refused");
        let result = transport.post("http://localhost/hook", &[], &json!({}));
        assert!(result.is_err());
        assert_eq!(transport.call_count(), 1);
    }

    #[test]
    fn success_is_2xx_only() {
        let ok = TransportResponse { status: 299, body: String::new() };
        let redirect = TransportResponse { status: 301, body: String::new() };
        assert!(ok.is_success());
        assert!(!redirect.is_success());
    }
}
