use thiserror::Error;

/// Everything that can end a decision cycle early.
#[derive(Debug, Error)]
pub enum DecisionError {
    /// Local input problem; nothing was sent.
    #[error("{0}")]
    Validation(String),

    /// The service answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Service { status: u16, body: String },

    /// The request never completed (connect, DNS, reset, ...).
    #[error("{0}")]
    Transport(String),

    /// 2xx response whose body is not a decision.
    #[error("malformed decision response: {0}")]
    MalformedResponse(String),
}

/// Status line shown when a cycle is rejected for a missing query.
pub const STATUS_QUERY_REQUIRED: &str = "Enter a card to analyze.";

impl DecisionError {
    /// Text for the status line when a cycle ends with this error.
    pub fn status_message(&self) -> String {
        match self {
            DecisionError::Validation(_) => STATUS_QUERY_REQUIRED.to_string(),
            other => format!("Error: {other}"),
        }
    }

    /// True when the service could not be reached at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, DecisionError::Transport(_))
    }
}
