// Application orchestration.
//
// The app task owns the decision renderer and runs cycles strictly one at a
// time. It never touches the terminal: every display change travels to the
// TUI as a `UiUpdate` through a `ChannelDisplay`.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use cardking_core::client::DecisionTransport;
use cardking_core::collector::ConditionForm;
use cardking_core::display::{DisplayPort, RiskClass, TextRegion, Tone};
use cardking_core::session::{run_cycle, CycleOutcome, DecisionRenderer};

use crate::protocol::{ConnectionStatus, UiUpdate, UserCommand};

// ---------------------------------------------------------------------------
// ChannelDisplay
// ---------------------------------------------------------------------------

/// `DisplayPort` that forwards every call to the TUI task.
///
/// Sends are fire-and-forget: once the TUI has gone away there is nobody
/// left to show anything to.
#[derive(Debug, Clone)]
pub struct ChannelDisplay {
    tx: mpsc::UnboundedSender<UiUpdate>,
    releases: u64,
}

impl ChannelDisplay {
    pub fn new(tx: mpsc::UnboundedSender<UiUpdate>) -> Self {
        Self { tx, releases: 0 }
    }

    /// Number of `SubmitEnabled(true)` updates sent so far.
    pub fn releases(&self) -> u64 {
        self.releases
    }

    fn send(&self, update: UiUpdate) {
        if self.tx.send(update).is_err() {
            debug!("UI channel closed; dropping update");
        }
    }

    pub fn set_connection_status(&mut self, status: ConnectionStatus) {
        self.send(UiUpdate::ConnectionStatus(status));
    }
}

impl DisplayPort for ChannelDisplay {
    fn set_text(&mut self, region: TextRegion, text: &str) {
        self.send(UiUpdate::Text {
            region,
            text: text.to_string(),
        });
    }

    fn set_decision_tone(&mut self, tone: Tone) {
        self.send(UiUpdate::DecisionTone(tone));
    }

    fn set_risk_class(&mut self, class: RiskClass) {
        self.send(UiUpdate::RiskClass(class));
    }

    fn replace_probabilities(&mut self, lines: Vec<String>) {
        self.send(UiUpdate::Probabilities(lines));
    }

    fn replace_explanation(&mut self, lines: Vec<String>) {
        self.send(UiUpdate::Explanation(lines));
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        if enabled {
            self.releases += 1;
        }
        self.send(UiUpdate::SubmitEnabled(enabled));
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub renderer: DecisionRenderer,
    pub connection_status: ConnectionStatus,
    pub cycles_run: u64,
}

impl AppState {
    pub fn new(transport: Arc<dyn DecisionTransport>) -> Self {
        AppState {
            renderer: DecisionRenderer::new(transport),
            connection_status: ConnectionStatus::Unknown,
            cycles_run: 0,
        }
    }

    /// Record a new connection status; returns true when it changed.
    fn observe_connection(&mut self, status: ConnectionStatus) -> bool {
        if self.connection_status == status {
            return false;
        }
        self.connection_status = status;
        true
    }
}

/// What a finished cycle says about service reachability, if anything.
///
/// Any HTTP answer (even an error status) means the service is up; only a
/// transport failure means it is not. Rejected cycles never reached it.
pub fn connection_after(outcome: &CycleOutcome) -> Option<ConnectionStatus> {
    match outcome {
        CycleOutcome::Rejected(_) => None,
        CycleOutcome::Rendered(_) => Some(ConnectionStatus::Connected),
        CycleOutcome::Failed(e) if e.is_transport() => Some(ConnectionStatus::Disconnected),
        CycleOutcome::Failed(_) => Some(ConnectionStatus::Connected),
    }
}

/// Probe the service's health endpoint.
pub async fn probe_health(transport: &dyn DecisionTransport) -> ConnectionStatus {
    match transport.check_health().await {
        Ok(()) => ConnectionStatus::Connected,
        Err(e) if e.is_transport() => {
            warn!("Decision service unreachable: {}", e);
            ConnectionStatus::Disconnected
        }
        Err(e) => {
            warn!("Decision service health probe failed: {}", e);
            ConnectionStatus::Connected
        }
    }
}

// ---------------------------------------------------------------------------
// Main loop
// ---------------------------------------------------------------------------

/// Run the app loop until a `Quit` command arrives or the TUI hangs up.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::UnboundedSender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    let mut display = ChannelDisplay::new(ui_tx);

    let status = probe_health(state.renderer.transport().as_ref()).await;
    state.observe_connection(status);
    display.set_connection_status(status);

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            UserCommand::Decide { form, generation } => {
                if is_stale_press(generation, &display) {
                    let releases = display.releases();
                    debug!(
                        generation,
                        releases,
                        "Discarding decide pressed while submit was disabled"
                    );
                    continue;
                }
                run_decision(&mut state, &form, &mut display).await;
            }
            UserCommand::Quit => {
                info!("Quit command received");
                break;
            }
        }
    }

    info!("App loop finished after {} decision cycles", state.cycles_run);
    Ok(())
}

async fn run_decision(
    state: &mut AppState,
    form: &ConditionForm,
    display: &mut ChannelDisplay,
) {
    let outcome = run_cycle(form, &state.renderer, display).await;
    state.cycles_run += 1;

    match &outcome {
        CycleOutcome::Rejected(e) => debug!("Decision cycle rejected: {}", e),
        CycleOutcome::Rendered(resp) => info!("Decision cycle rendered: {}", resp.decision),
        CycleOutcome::Failed(e) => warn!("Decision cycle failed: {}", e),
    }

    if let Some(status) = connection_after(&outcome) {
        if state.observe_connection(status) {
            display.set_connection_status(status);
        }
    }
}

/// A press is stale when the TUI made it before applying the latest
/// re-enable, i.e. against a disabled submit control.
fn is_stale_press(generation: u64, display: &ChannelDisplay) -> bool {
    generation < display.releases()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
