// Input collection: the editable form state and its conversion into a
// `DecisionRequest`.
//
// Sliders own their label text and recompute it on construction and on
// every value change, so a label can never lag behind its slider.

use crate::error::DecisionError;
use crate::format;
use crate::protocol::{ConditionMetrics, DecisionRequest};

/// The service rejects longer queries.
pub const QUERY_MAX_CHARS: usize = 200;

// ---------------------------------------------------------------------------
// Slider
// ---------------------------------------------------------------------------

/// Bounds and step size shared by the condition sliders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for SliderRange {
    fn default() -> Self {
        SliderRange {
            min: 0.0,
            max: 10.0,
            step: 0.5,
        }
    }
}

impl SliderRange {
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Snap to the nearest step above `min`, then clamp.
    fn snap(&self, value: f64) -> f64 {
        let steps = ((value - self.min) / self.step).round();
        self.clamp(self.min + steps * self.step)
    }
}

/// A bounded condition score with a live one-decimal label.
#[derive(Debug, Clone, PartialEq)]
pub struct Slider {
    value: f64,
    range: SliderRange,
    label: String,
}

impl Slider {
    pub fn new(value: f64, range: SliderRange) -> Self {
        let mut slider = Slider {
            value: range.clamp(value),
            range,
            label: String::new(),
        };
        slider.refresh_label();
        slider
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn range(&self) -> SliderRange {
        self.range
    }

    /// Move the slider to `value` (clamped to the range).
    pub fn set(&mut self, value: f64) {
        self.value = self.range.clamp(value);
        self.refresh_label();
    }

    pub fn increment(&mut self) {
        let next = self.range.snap(self.value + self.range.step);
        self.set(next);
    }

    pub fn decrement(&mut self) {
        let next = self.range.snap(self.value - self.range.step);
        self.set(next);
    }

    /// Position of the value within the range, 0.0 at `min` and 1.0 at `max`.
    pub fn ratio(&self) -> f64 {
        let span = self.range.max - self.range.min;
        if span <= 0.0 {
            return 0.0;
        }
        (self.value - self.range.min) / span
    }

    fn refresh_label(&mut self) {
        self.label = format::one_decimal(self.value);
    }
}

// ---------------------------------------------------------------------------
// ConditionForm
// ---------------------------------------------------------------------------

/// The four condition metrics, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricField {
    Centering,
    Corners,
    Edges,
    Surface,
}

impl MetricField {
    pub const ALL: [MetricField; 4] = [
        MetricField::Centering,
        MetricField::Corners,
        MetricField::Edges,
        MetricField::Surface,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MetricField::Centering => "Centering",
            MetricField::Corners => "Corners",
            MetricField::Edges => "Edges",
            MetricField::Surface => "Surface",
        }
    }
}

/// Everything the user can edit before asking for a decision.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionForm {
    pub query: String,
    /// Raw listed-price text as typed.
    pub listed_price: String,
    pub centering: Slider,
    pub corners: Slider,
    pub edges: Slider,
    pub surface: Slider,
    pub issue_flag: bool,
}

impl ConditionForm {
    /// Empty form with every slider at `initial`.
    pub fn new(range: SliderRange, initial: f64) -> Self {
        ConditionForm {
            query: String::new(),
            listed_price: String::new(),
            centering: Slider::new(initial, range),
            corners: Slider::new(initial, range),
            edges: Slider::new(initial, range),
            surface: Slider::new(initial, range),
            issue_flag: false,
        }
    }

    pub fn slider(&self, field: MetricField) -> &Slider {
        match field {
            MetricField::Centering => &self.centering,
            MetricField::Corners => &self.corners,
            MetricField::Edges => &self.edges,
            MetricField::Surface => &self.surface,
        }
    }

    pub fn slider_mut(&mut self, field: MetricField) -> &mut Slider {
        match field {
            MetricField::Centering => &mut self.centering,
            MetricField::Corners => &mut self.corners,
            MetricField::Edges => &mut self.edges,
            MetricField::Surface => &mut self.surface,
        }
    }

    /// Append a character to the query unless it is already at the limit.
    pub fn push_query_char(&mut self, c: char) -> bool {
        if self.query.chars().count() >= QUERY_MAX_CHARS {
            return false;
        }
        self.query.push(c);
        true
    }

    pub fn metrics(&self) -> ConditionMetrics {
        ConditionMetrics {
            centering: self.centering.value(),
            corners: self.corners.value(),
            edges: self.edges.value(),
            surface: self.surface.value(),
            issue_flag: self.issue_flag,
        }
    }
}

impl Default for ConditionForm {
    fn default() -> Self {
        ConditionForm::new(SliderRange::default(), 8.0)
    }
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// Build a request from the current form, or refuse when the query is blank.
pub fn collect(form: &ConditionForm) -> Result<DecisionRequest, DecisionError> {
    let query = form.query.trim();
    if query.is_empty() {
        return Err(DecisionError::Validation("card query required".to_string()));
    }

    Ok(DecisionRequest {
        query: query.to_string(),
        listed_price: parse_listed_price(&form.listed_price),
        metrics: form.metrics(),
    })
}

/// Blank or non-numeric text yields `None`; it is never an error.
pub fn parse_listed_price(raw: &str) -> Option<f64> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
