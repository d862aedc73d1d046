// Wire types exchanged with the decision service.
//
// Requests serialize exactly as the service expects them. Responses are
// deserialized leniently where the service is loose: money fields arrive
// either as JSON numbers or as decimal strings, and decision/risk values
// outside the known set are kept verbatim instead of failing the parse.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Grade labels in the order they are always displayed.
pub const GRADE_ORDER: [&str; 5] = ["PSA10", "PSA9", "PSA8", "PSA7", "LT7"];

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Condition scores read from the four sliders plus the disclosed-defect flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionMetrics {
    pub centering: f64,
    pub corners: f64,
    pub edges: f64,
    pub surface: f64,
    pub issue_flag: bool,
}

/// Body of `POST /api/decision`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionRequest {
    /// Trimmed, never empty.
    pub query: String,
    /// Serialized as `null` when absent.
    pub listed_price: Option<f64>,
    pub metrics: ConditionMetrics,
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// The service's verdict for a card.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Decision {
    Grade,
    Buy,
    Pass,
    Sell,
    /// Any other verdict (the service also emits `HOLD`).
    Other(String),
}

impl Decision {
    pub fn as_str(&self) -> &str {
        match self {
            Decision::Grade => "GRADE",
            Decision::Buy => "BUY",
            Decision::Pass => "PASS",
            Decision::Sell => "SELL",
            Decision::Other(raw) => raw,
        }
    }
}

impl From<String> for Decision {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "GRADE" => Decision::Grade,
            "BUY" => Decision::Buy,
            "PASS" => Decision::Pass,
            "SELL" => Decision::Sell,
            _ => Decision::Other(raw),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk tier reported alongside the verdict.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Other(String),
}

impl RiskLevel {
    pub fn as_str(&self) -> &str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Other(raw) => raw,
        }
    }
}

impl From<String> for RiskLevel {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Low" => RiskLevel::Low,
            "Medium" => RiskLevel::Medium,
            "High" => RiskLevel::High,
            _ => RiskLevel::Other(raw),
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Market value quartiles from recent sold comps.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarketValue {
    #[serde(deserialize_with = "money_value")]
    pub p25: f64,
    #[serde(deserialize_with = "money_value")]
    pub median: f64,
    #[serde(deserialize_with = "money_value")]
    pub p75: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

/// Return-on-investment estimate for grading the card.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoiEstimate {
    #[serde(deserialize_with = "money_value")]
    pub expected_net: f64,
    pub breakeven_grade: String,
    pub roi_pct: f64,
}

/// Successful body of `POST /api/decision`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DecisionResponse {
    pub decision: Decision,
    pub confidence: i64,
    pub risk: RiskLevel,
    pub market_value: MarketValue,
    pub roi: RoiEstimate,
    pub grade_probabilities: HashMap<String, f64>,
    pub explanation: Vec<String>,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

// ---------------------------------------------------------------------------
// Serde helpers
// ---------------------------------------------------------------------------

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Accept a money amount as either a JSON number or a decimal string.
fn money_value<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid money amount {text:?}: {e}"))),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
