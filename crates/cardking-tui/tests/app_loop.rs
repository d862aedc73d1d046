// App task driven through its channels, with a scripted decision service.
//
// Most tests queue their commands up front, run `app::run` to completion,
// then inspect the UiUpdate stream it produced. Tests that need a live TUI
// side feed keys through `input::handle_key` and replay updates as they
// arrive.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::{mpsc, Notify};

use cardking_core::client::DecisionTransport;
use cardking_core::collector::ConditionForm;
use cardking_core::display::{RiskClass, TextRegion};
use cardking_core::error::DecisionError;
use cardking_core::protocol::{
    Decision, DecisionRequest, DecisionResponse, MarketValue, RiskLevel, RoiEstimate,
};
use cardking_core::scan::SCAN_PLACEHOLDER_STATUS;
use cardking_core::session::{STATUS_COMPUTING, STATUS_DONE};

use cardking_tui::app::{self, AppState};
use cardking_tui::protocol::{ConnectionStatus, UiUpdate, UserCommand};
use cardking_tui::tui::{apply_ui_update, input, ViewState};

// ===========================================================================
// Test doubles
// ===========================================================================

struct ScriptedService {
    healthy: bool,
    replies: Mutex<Vec<Result<DecisionResponse, DecisionError>>>,
    requests: Mutex<Vec<DecisionRequest>>,
    calls: AtomicUsize,
}

impl ScriptedService {
    fn new(healthy: bool, replies: Vec<Result<DecisionResponse, DecisionError>>) -> Arc<Self> {
        Arc::new(Self {
            healthy,
            replies: Mutex::new(replies),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DecisionTransport for ScriptedService {
    async fn post_decision(
        &self,
        request: &DecisionRequest,
    ) -> Result<DecisionResponse, DecisionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Err(DecisionError::Transport("script exhausted".into()));
        }
        replies.remove(0)
    }

    async fn check_health(&self) -> Result<(), DecisionError> {
        if self.healthy {
            Ok(())
        } else {
            Err(DecisionError::Transport("connection refused".into()))
        }
    }
}

// ===========================================================================
// Helpers
// ===========================================================================

fn verdict() -> DecisionResponse {
    let mut probs = HashMap::new();
    probs.insert("PSA10".to_string(), 0.25);
    probs.insert("PSA9".to_string(), 0.5);
    DecisionResponse {
        decision: Decision::Grade,
        confidence: 81,
        risk: RiskLevel::Low,
        market_value: MarketValue {
            p25: 40.0,
            median: 55.5,
            p75: 70.0,
            currency: "USD".to_string(),
        },
        roi: RoiEstimate {
            expected_net: 32.1,
            breakeven_grade: "PSA9".to_string(),
            roi_pct: 58.0,
        },
        grade_probabilities: probs,
        explanation: vec!["Strong centering".to_string()],
    }
}

fn decide(query: &str, generation: u64) -> UserCommand {
    let mut form = ConditionForm::default();
    form.query = query.to_string();
    UserCommand::Decide {
        form: Box::new(form),
        generation,
    }
}

/// Queue `commands`, run the app loop to completion, return every update.
async fn drive(
    service: Arc<ScriptedService>,
    commands: Vec<UserCommand>,
) -> Vec<UiUpdate> {
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, mut ui_rx) = mpsc::unbounded_channel();

    for command in commands {
        cmd_tx.send(command).await.unwrap();
    }
    drop(cmd_tx);

    app::run(cmd_rx, ui_tx, AppState::new(service)).await.unwrap();

    let mut updates = Vec::new();
    while let Ok(update) = ui_rx.try_recv() {
        updates.push(update);
    }
    updates
}

fn replay(updates: &[UiUpdate]) -> ViewState {
    let mut state = ViewState::default();
    for update in updates {
        apply_ui_update(&mut state, update.clone());
    }
    state
}

fn status(text: &str) -> UiUpdate {
    UiUpdate::Text {
        region: TextRegion::Status,
        text: text.to_string(),
    }
}

fn toggles(updates: &[UiUpdate]) -> Vec<bool> {
    updates
        .iter()
        .filter_map(|u| match u {
            UiUpdate::SubmitEnabled(b) => Some(*b),
            _ => None,
        })
        .collect()
}

// ===========================================================================
// Tests
// ===========================================================================

#[tokio::test]
async fn successful_cycle_updates_in_order() {
    let service = ScriptedService::new(true, vec![Ok(verdict())]);
    let updates = drive(
        service.clone(),
        vec![decide("Charizard Base Set", 0), UserCommand::Quit],
    )
    .await;

    assert_eq!(updates[0], UiUpdate::ConnectionStatus(ConnectionStatus::Connected));
    assert_eq!(updates[1], status(STATUS_COMPUTING));
    assert_eq!(updates[2], UiUpdate::SubmitEnabled(false));
    let n = updates.len();
    assert_eq!(updates[n - 2], UiUpdate::SubmitEnabled(true));
    assert_eq!(updates[n - 1], status(STATUS_DONE));
    assert_eq!(toggles(&updates), vec![false, true]);

    let view = replay(&updates);
    assert_eq!(view.verdict.decision, "GRADE");
    assert_eq!(view.verdict.confidence, "Confidence: 81/100");
    assert_eq!(view.verdict.risk_class, Some(RiskClass::Green));
    assert_eq!(view.verdict.market, "$40.00 – $70.00");
    assert_eq!(view.verdict.probabilities[0], "PSA10: 25%");
    assert_eq!(view.verdict.explanation, vec!["Strong centering".to_string()]);
    assert!(view.verdict.submit_enabled);
    assert_eq!(view.connection_status, ConnectionStatus::Connected);

    let requests = service.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].query, "Charizard Base Set");
}

#[tokio::test]
async fn blank_query_never_reaches_the_service() {
    let service = ScriptedService::new(true, vec![Ok(verdict())]);
    let updates = drive(
        service.clone(),
        vec![decide("   ", 0), UserCommand::Quit],
    )
    .await;

    assert_eq!(service.call_count(), 0);
    assert!(toggles(&updates).is_empty());
    assert_eq!(updates.last(), Some(&status("Enter a card to analyze.")));
    assert!(!replay(&updates).verdict.has_verdict());
}

#[tokio::test]
async fn transport_failure_marks_service_disconnected() {
    let service = ScriptedService::new(
        true,
        vec![Err(DecisionError::Transport("connection reset".into()))],
    );
    let updates = drive(
        service,
        vec![decide("Pikachu Illustrator", 0), UserCommand::Quit],
    )
    .await;

    assert_eq!(toggles(&updates), vec![false, true]);
    let view = replay(&updates);
    assert_eq!(view.connection_status, ConnectionStatus::Disconnected);
    assert!(view.verdict.status.starts_with("Error: "));
    assert!(view.verdict.submit_enabled);
    assert!(!view.verdict.has_verdict());
}

#[tokio::test]
async fn service_error_keeps_previous_verdict() {
    let service = ScriptedService::new(
        true,
        vec![
            Ok(verdict()),
            Err(DecisionError::Service {
                status: 500,
                body: "boom".into(),
            }),
        ],
    );
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, mut ui_rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(app::run(cmd_rx, ui_tx, AppState::new(service.clone())));

    // Second decide is sent only after the first cycle finished, so it is
    // not discarded as stale.
    cmd_tx.send(decide("Mewtwo", 0)).await.unwrap();
    let mut updates = Vec::new();
    while let Some(update) = ui_rx.recv().await {
        let done = update == status(STATUS_DONE);
        updates.push(update);
        if done {
            break;
        }
    }
    cmd_tx.send(decide("Mewtwo", 1)).await.unwrap();
    cmd_tx.send(UserCommand::Quit).await.unwrap();
    handle.await.unwrap().unwrap();
    while let Ok(update) = ui_rx.try_recv() {
        updates.push(update);
    }

    assert_eq!(service.call_count(), 2);
    let view = replay(&updates);
    assert_eq!(view.verdict.status, "Error: HTTP 500: boom");
    assert_eq!(view.verdict.decision, "GRADE");
    assert_eq!(view.connection_status, ConnectionStatus::Connected);
}

#[tokio::test]
async fn unreachable_service_reported_at_startup() {
    let service = ScriptedService::new(false, Vec::new());
    let updates = drive(service, vec![UserCommand::Quit]).await;
    assert_eq!(
        updates,
        vec![UiUpdate::ConnectionStatus(ConnectionStatus::Disconnected)]
    );
}

#[tokio::test]
async fn presses_against_a_disabled_control_are_discarded() {
    let service = ScriptedService::new(true, vec![Ok(verdict()), Ok(verdict())]);
    drive(
        service.clone(),
        vec![
            decide("Blastoise", 0),
            decide("Blastoise", 0),
            decide("Blastoise", 0),
            UserCommand::Quit,
        ],
    )
    .await;

    assert_eq!(service.call_count(), 1);
}

#[tokio::test]
async fn press_after_re_enable_is_honoured() {
    let service = ScriptedService::new(true, vec![Ok(verdict()), Ok(verdict())]);
    drive(
        service.clone(),
        vec![
            decide("Venusaur", 0),
            decide("Venusaur", 0),
            decide("Venusaur", 1),
            UserCommand::Quit,
        ],
    )
    .await;

    assert_eq!(service.call_count(), 2);
}

/// Holds every decision request until released.
struct HeldService {
    release: Notify,
}

#[async_trait]
impl DecisionTransport for HeldService {
    async fn post_decision(
        &self,
        _request: &DecisionRequest,
    ) -> Result<DecisionResponse, DecisionError> {
        self.release.notified().await;
        Err(DecisionError::Transport("released".into()))
    }

    async fn check_health(&self) -> Result<(), DecisionError> {
        Ok(())
    }
}

fn f2() -> KeyEvent {
    KeyEvent::new(KeyCode::F(2), KeyModifiers::NONE)
}

#[tokio::test]
async fn scan_stays_responsive_during_a_held_request() {
    let service = Arc::new(HeldService {
        release: Notify::new(),
    });
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, mut ui_rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(app::run(cmd_rx, ui_tx, AppState::new(service.clone())));

    let mut view = ViewState::default();
    view.form.query = "Mickey Mantle 1952".to_string();
    let command = input::handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), &mut view)
        .expect("enter should submit");
    cmd_tx.send(command).await.unwrap();

    // Wait until the request is in flight.
    while view.verdict.submit_enabled {
        let update = ui_rx.recv().await.unwrap();
        apply_ui_update(&mut view, update);
    }

    // Many scans while held: handled locally, nothing reaches the app task.
    for _ in 0..200 {
        assert!(input::handle_key(f2(), &mut view).is_none());
    }
    assert_eq!(view.verdict.status, SCAN_PLACEHOLDER_STATUS);
    assert_eq!(cmd_tx.capacity(), 64);

    service.release.notify_one();
    while !view.verdict.submit_enabled || view.verdict.status == SCAN_PLACEHOLDER_STATUS {
        let update = ui_rx.recv().await.unwrap();
        apply_ui_update(&mut view, update);
    }

    cmd_tx.send(UserCommand::Quit).await.unwrap();
    handle.await.unwrap().unwrap();
    while let Ok(update) = ui_rx.try_recv() {
        apply_ui_update(&mut view, update);
    }

    assert_eq!(view.verdict.status, "Error: released");
    assert!(view.verdict.submit_enabled);
    assert_eq!(view.gate_generation, 1);
}

#[tokio::test]
async fn closed_command_channel_ends_the_loop() {
    let service = ScriptedService::new(true, Vec::new());
    let updates = drive(service, Vec::new()).await;
    assert_eq!(updates.len(), 1);
}
