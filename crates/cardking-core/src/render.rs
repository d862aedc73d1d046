// Mapping of a decision response onto the display port.
//
// Every function here is pure over the response; `render_response` only
// sequences them onto a `DisplayPort`.

use std::collections::HashMap;

use crate::display::{DisplayPort, RiskClass, TextRegion, Tone};
use crate::format::{fixed, money, whole_percent};
use crate::protocol::{
    Decision, DecisionResponse, MarketValue, RiskLevel, RoiEstimate, GRADE_ORDER,
};

pub fn decision_tone(decision: &Decision) -> Tone {
    match decision {
        Decision::Grade | Decision::Buy => Tone::Good,
        Decision::Pass => Tone::Bad,
        Decision::Sell => Tone::Warn,
        Decision::Other(_) => Tone::Neutral,
    }
}

/// Low is green, Medium amber, everything else red.
pub fn risk_class(risk: &RiskLevel) -> RiskClass {
    match risk {
        RiskLevel::Low => RiskClass::Green,
        RiskLevel::Medium => RiskClass::Amber,
        RiskLevel::High | RiskLevel::Other(_) => RiskClass::Red,
    }
}

pub fn risk_label(risk: &RiskLevel) -> String {
    format!("Risk: {risk}")
}

pub fn confidence_line(confidence: i64) -> String {
    format!("Confidence: {confidence}/100")
}

pub fn market_range(market: &MarketValue) -> String {
    format!("{} – {}", money(market.p25), money(market.p75))
}

pub fn market_meta(market: &MarketValue) -> String {
    format!("Median {}", money(market.median))
}

pub fn roi_line(roi: &RoiEstimate) -> String {
    format!("{} net", money(roi.expected_net))
}

/// `roi_pct` is rounded here for display only.
pub fn breakeven_line(roi: &RoiEstimate) -> String {
    format!(
        "Breakeven: {} • ROI {}%",
        roi.breakeven_grade,
        fixed(roi.roi_pct, 0)
    )
}

/// One line per canonical grade, in canonical order; absent grades are 0%.
pub fn probability_lines(probabilities: &HashMap<String, f64>) -> Vec<String> {
    GRADE_ORDER
        .iter()
        .map(|grade| {
            let p = probabilities.get(*grade).copied().unwrap_or(0.0);
            format!("{grade}: {}%", whole_percent(p))
        })
        .collect()
}

/// Push every field of `response` onto `display`.
pub fn render_response<D: DisplayPort + ?Sized>(response: &DecisionResponse, display: &mut D) {
    display.set_text(TextRegion::Decision, response.decision.as_str());
    display.set_decision_tone(decision_tone(&response.decision));

    display.set_text(TextRegion::Confidence, &confidence_line(response.confidence));

    display.set_risk_class(risk_class(&response.risk));
    display.set_text(TextRegion::Risk, &risk_label(&response.risk));

    display.set_text(TextRegion::Market, &market_range(&response.market_value));
    display.set_text(TextRegion::MarketMeta, &market_meta(&response.market_value));

    display.set_text(TextRegion::Roi, &roi_line(&response.roi));
    display.set_text(TextRegion::Breakeven, &breakeven_line(&response.roi));

    display.replace_probabilities(probability_lines(&response.grade_probabilities));
    display.replace_explanation(response.explanation.clone());
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
