// Decision service client.
//
// `DecisionTransport` is the seam between the cycle logic and the network;
// `HttpTransport` is the reqwest-backed implementation used by the binary.

use std::error::Error as StdError;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

use crate::error::DecisionError;
use crate::protocol::{DecisionRequest, DecisionResponse, HealthStatus};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const DECISION_PATH: &str = "/api/decision";
pub const HEALTH_PATH: &str = "/health";

// ---------------------------------------------------------------------------
// Transport trait
// ---------------------------------------------------------------------------

#[async_trait]
pub trait DecisionTransport: Send + Sync {
    /// POST one decision request and return the parsed verdict.
    async fn post_decision(
        &self,
        request: &DecisionRequest,
    ) -> Result<DecisionResponse, DecisionError>;

    /// Ok when the service answers its health probe with `{"status":"ok"}`.
    async fn check_health(&self) -> Result<(), DecisionError>;
}

// ---------------------------------------------------------------------------
// HttpTransport
// ---------------------------------------------------------------------------

/// reqwest client bound to one service base URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    decision_url: String,
    health_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, decision_path: &str, health_path: &str) -> Self {
        let base = normalize_base_url(base_url);
        Self {
            http: reqwest::Client::new(),
            decision_url: format!("{base}{decision_path}"),
            health_url: format!("{base}{health_path}"),
        }
    }

    /// Client using the service's standard paths.
    pub fn with_default_paths(base_url: &str) -> Self {
        Self::new(base_url, DECISION_PATH, HEALTH_PATH)
    }

    pub fn decision_url(&self) -> &str {
        &self.decision_url
    }
}

#[async_trait]
impl DecisionTransport for HttpTransport {
    async fn post_decision(
        &self,
        request: &DecisionRequest,
    ) -> Result<DecisionResponse, DecisionError> {
        debug!(url = %self.decision_url, query = %request.query, "posting decision request");

        let response = self
            .http
            .post(&self.decision_url)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| DecisionError::Transport(format_reqwest_error(&e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DecisionError::Transport(format_reqwest_error(&e)))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "decision service returned an error status");
            return Err(DecisionError::Service {
                status: status.as_u16(),
                body,
            });
        }

        parse_decision_body(&body)
    }

    async fn check_health(&self) -> Result<(), DecisionError> {
        let response = self
            .http
            .get(&self.health_url)
            .send()
            .await
            .map_err(|e| DecisionError::Transport(format_reqwest_error(&e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DecisionError::Transport(format_reqwest_error(&e)))?;

        if !status.is_success() {
            return Err(DecisionError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let health: HealthStatus = serde_json::from_str(&body)
            .map_err(|e| DecisionError::MalformedResponse(e.to_string()))?;
        if health.is_ok() {
            Ok(())
        } else {
            Err(DecisionError::MalformedResponse(format!(
                "health status {:?}",
                health.status
            )))
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a 2xx decision body.
pub fn parse_decision_body(body: &str) -> Result<DecisionResponse, DecisionError> {
    serde_json::from_str(body).map_err(|e| DecisionError::MalformedResponse(e.to_string()))
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

/// Flatten a reqwest error and its causes into one line.
fn format_reqwest_error(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();

    while let Some(cause) = source {
        let cause_msg = cause.to_string();
        if !cause_msg.is_empty() && !message.contains(&cause_msg) {
            message.push_str(": ");
            message.push_str(&cause_msg);
        }
        source = cause.source();
    }

    message
}
