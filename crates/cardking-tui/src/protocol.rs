// Messages exchanged between the TUI task and the app task.

use cardking_core::collector::ConditionForm;
use cardking_core::display::{DisplayPort, RiskClass, TextRegion, Tone};

/// Reachability of the decision service as last observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Unknown,
    Connected,
    Disconnected,
}

/// Display changes pushed from the app task to the TUI.
///
/// One variant per `DisplayPort` method, plus connection status.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    Text { region: TextRegion, text: String },
    DecisionTone(Tone),
    RiskClass(RiskClass),
    Probabilities(Vec<String>),
    Explanation(Vec<String>),
    SubmitEnabled(bool),
    ConnectionStatus(ConnectionStatus),
}

impl UiUpdate {
    /// Replay a port update onto `port`. Returns the update back when it is
    /// not a port update (connection status).
    pub fn apply_to<D: DisplayPort + ?Sized>(self, port: &mut D) -> Option<UiUpdate> {
        match self {
            UiUpdate::Text { region, text } => port.set_text(region, &text),
            UiUpdate::DecisionTone(tone) => port.set_decision_tone(tone),
            UiUpdate::RiskClass(class) => port.set_risk_class(class),
            UiUpdate::Probabilities(lines) => port.replace_probabilities(lines),
            UiUpdate::Explanation(lines) => port.replace_explanation(lines),
            UiUpdate::SubmitEnabled(enabled) => port.set_submit_enabled(enabled),
            other @ UiUpdate::ConnectionStatus(_) => return Some(other),
        }
        None
    }
}

/// Commands sent from the TUI to the app task.
///
/// Scan never travels here: it does no I/O, so the TUI handles it locally
/// and it stays responsive while a request is in flight.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Run a decision cycle on a snapshot of the form.
    Decide {
        form: Box<ConditionForm>,
        /// Submit re-enables the TUI had applied when the press was made.
        generation: u64,
    },
    Quit,
}
