// Display port: the only way the decision pipeline touches the screen.
//
// The pipeline never owns widgets. It calls one method per named region and
// the front end decides how that looks. `DecisionView` is the plain-state
// implementation the terminal front end renders from.

/// Regions that hold a single line of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextRegion {
    Decision,
    Confidence,
    Risk,
    Market,
    MarketMeta,
    Roi,
    Breakeven,
    Status,
}

/// Color tone of the decision label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Bad,
    Warn,
    Neutral,
}

/// Color class of the risk chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskClass {
    Green,
    Amber,
    Red,
}

/// Sink for everything a decision cycle shows.
pub trait DisplayPort {
    fn set_text(&mut self, region: TextRegion, text: &str);

    fn set_decision_tone(&mut self, tone: Tone);

    /// Replaces whatever class the chip had before.
    fn set_risk_class(&mut self, class: RiskClass);

    /// Replaces the probability list.
    fn replace_probabilities(&mut self, lines: Vec<String>);

    /// Replaces the explanation list.
    fn replace_explanation(&mut self, lines: Vec<String>);

    fn set_submit_enabled(&mut self, enabled: bool);

    fn set_status(&mut self, text: &str) {
        self.set_text(TextRegion::Status, text);
    }
}

// ---------------------------------------------------------------------------
// DecisionView
// ---------------------------------------------------------------------------

/// Current contents of every output region.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionView {
    pub decision: String,
    pub decision_tone: Tone,
    pub confidence: String,
    pub risk: String,
    /// `None` until the first verdict arrives.
    pub risk_class: Option<RiskClass>,
    pub market: String,
    pub market_meta: String,
    pub roi: String,
    pub breakeven: String,
    pub probabilities: Vec<String>,
    pub explanation: Vec<String>,
    pub status: String,
    pub submit_enabled: bool,
}

impl Default for DecisionView {
    fn default() -> Self {
        DecisionView {
            decision: "—".to_string(),
            decision_tone: Tone::Neutral,
            confidence: String::new(),
            risk: String::new(),
            risk_class: None,
            market: String::new(),
            market_meta: String::new(),
            roi: String::new(),
            breakeven: String::new(),
            probabilities: Vec::new(),
            explanation: Vec::new(),
            status: "Ready.".to_string(),
            submit_enabled: true,
        }
    }
}

impl DecisionView {
    pub fn text(&self, region: TextRegion) -> &str {
        match region {
            TextRegion::Decision => &self.decision,
            TextRegion::Confidence => &self.confidence,
            TextRegion::Risk => &self.risk,
            TextRegion::Market => &self.market,
            TextRegion::MarketMeta => &self.market_meta,
            TextRegion::Roi => &self.roi,
            TextRegion::Breakeven => &self.breakeven,
            TextRegion::Status => &self.status,
        }
    }

    fn text_mut(&mut self, region: TextRegion) -> &mut String {
        match region {
            TextRegion::Decision => &mut self.decision,
            TextRegion::Confidence => &mut self.confidence,
            TextRegion::Risk => &mut self.risk,
            TextRegion::Market => &mut self.market,
            TextRegion::MarketMeta => &mut self.market_meta,
            TextRegion::Roi => &mut self.roi,
            TextRegion::Breakeven => &mut self.breakeven,
            TextRegion::Status => &mut self.status,
        }
    }

    /// True once a verdict has been rendered.
    pub fn has_verdict(&self) -> bool {
        self.risk_class.is_some()
    }
}

impl DisplayPort for DecisionView {
    fn set_text(&mut self, region: TextRegion, text: &str) {
        let slot = self.text_mut(region);
        slot.clear();
        slot.push_str(text);
    }

    fn set_decision_tone(&mut self, tone: Tone) {
        self.decision_tone = tone;
    }

    fn set_risk_class(&mut self, class: RiskClass) {
        self.risk_class = Some(class);
    }

    fn replace_probabilities(&mut self, lines: Vec<String>) {
        self.probabilities = lines;
    }

    fn replace_explanation(&mut self, lines: Vec<String>) {
        self.explanation = lines;
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }
}
