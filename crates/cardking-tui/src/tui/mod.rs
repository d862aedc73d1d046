// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding the form being edited and a
// `DecisionView` mirror of the result panels. The app task pushes
// `UiUpdate` messages over an mpsc channel; the TUI applies them to
// `ViewState` and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::warn;

use cardking_core::collector::ConditionForm;
use cardking_core::display::DecisionView;

use crate::protocol::{ConnectionStatus, UiUpdate, UserCommand};

use input::FocusField;
use layout::{build_layout, AppLayout};

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state: the editable form plus the rendered decision panels.
pub struct ViewState {
    /// Form the user is editing. Snapshotted into `UserCommand::Decide`.
    pub form: ConditionForm,
    /// Which form control receives key input.
    pub focus: FocusField,
    /// Result panels, status line, and the submit gate.
    pub verdict: DecisionView,
    /// Decision service reachability.
    pub connection_status: ConnectionStatus,
    /// Base URL shown in the status bar.
    pub service_url: String,
    /// Count of `SubmitEnabled(true)` updates applied; stamped on every
    /// decide press.
    pub gate_generation: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::new(ConditionForm::default(), String::new())
    }
}

impl ViewState {
    pub fn new(form: ConditionForm, service_url: String) -> Self {
        ViewState {
            form,
            focus: FocusField::Query,
            verdict: DecisionView::default(),
            connection_status: ConnectionStatus::Unknown,
            service_url,
            gate_generation: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    if update == UiUpdate::SubmitEnabled(true) {
        state.gate_generation += 1;
    }
    if let Some(UiUpdate::ConnectionStatus(status)) = update.apply_to(&mut state.verdict) {
        state.connection_status = status;
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::form::render(frame, layout.form, state);
    widgets::verdict::render(frame, layout.verdict, state);
    widgets::market::render(frame, layout.market, state);
    widgets::probabilities::render(frame, layout.probabilities, state);
    widgets::explanation::render(frame, layout.explanation, state);
    render_help_bar(frame, &layout);
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout) {
    let text = " Tab/↑↓:Focus | ←→:Adjust | Space:Toggle | Enter:Decide | F2:Scan | Esc:Quit";
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// Initializes the terminal, installs a panic hook that restores it, then
/// selects over UI updates, keyboard input and render ticks until the user
/// quits or the app task closes the update channel.
pub async fn run(
    mut ui_rx: mpsc::UnboundedReceiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    mut view_state: ViewState,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    // App task is gone.
                    None => break Ok(()),
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(command) = input::handle_key(key_event, &mut view_state) {
                            if forward_command(&cmd_tx, command) == Forwarded::Stop {
                                break Ok(());
                            }
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => break Err(anyhow::Error::from(e)),
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(anyhow::Error::from(e));
                }
            }
        }
    };

    ratatui::restore();

    result
}

#[derive(Debug, PartialEq, Eq)]
enum Forwarded {
    Continue,
    Stop,
}

/// Hand a command to the app task without ever blocking the TUI loop.
///
/// A full channel drops the command; `Quit` stops the loop either way.
fn forward_command(cmd_tx: &mpsc::Sender<UserCommand>, command: UserCommand) -> Forwarded {
    let quit = command == UserCommand::Quit;
    match cmd_tx.try_send(command) {
        Ok(()) => {}
        Err(mpsc::error::TrySendError::Full(dropped)) => {
            warn!("Command channel full; dropping {:?}", dropped);
        }
        Err(mpsc::error::TrySendError::Closed(_)) => return Forwarded::Stop,
    }
    if quit {
        Forwarded::Stop
    } else {
        Forwarded::Continue
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use cardking_core::display::{RiskClass, TextRegion, Tone};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn default_view_state() {
        let state = ViewState::default();
        assert_eq!(state.focus, FocusField::Query);
        assert_eq!(state.connection_status, ConnectionStatus::Unknown);
        assert!(state.verdict.submit_enabled);
        assert!(!state.verdict.has_verdict());
    }

    #[test]
    fn apply_port_updates_to_verdict() {
        let mut state = ViewState::default();
        apply_ui_update(
            &mut state,
            UiUpdate::Text {
                region: TextRegion::Decision,
                text: "GRADE".into(),
            },
        );
        apply_ui_update(&mut state, UiUpdate::DecisionTone(Tone::Good));
        apply_ui_update(&mut state, UiUpdate::RiskClass(RiskClass::Amber));
        apply_ui_update(&mut state, UiUpdate::SubmitEnabled(false));

        assert_eq!(state.verdict.decision, "GRADE");
        assert_eq!(state.verdict.decision_tone, Tone::Good);
        assert_eq!(state.verdict.risk_class, Some(RiskClass::Amber));
        assert!(!state.verdict.submit_enabled);
    }

    #[test]
    fn apply_connection_status() {
        let mut state = ViewState::default();
        apply_ui_update(
            &mut state,
            UiUpdate::ConnectionStatus(ConnectionStatus::Disconnected),
        );
        assert_eq!(state.connection_status, ConnectionStatus::Disconnected);
    }

    #[test]
    fn replacing_lists_discards_previous_entries() {
        let mut state = ViewState::default();
        apply_ui_update(
            &mut state,
            UiUpdate::Explanation(vec!["old a".into(), "old b".into()]),
        );
        apply_ui_update(&mut state, UiUpdate::Explanation(vec!["new".into()]));
        assert_eq!(state.verdict.explanation, vec!["new".to_string()]);
    }

    #[test]
    fn render_frame_shows_every_panel() {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let mut state = ViewState::new(ConditionForm::default(), "http://127.0.0.1:8000".into());
        state.verdict.status = "Ready.".into();
        terminal
            .draw(|frame| render_frame(frame, &state))
            .unwrap();

        let text = buffer_text(&terminal);
        for title in ["Card", "Decision", "Market & ROI", "Grade odds", "Why"] {
            assert!(text.contains(title), "missing panel {title}");
        }
        assert!(text.contains("http://127.0.0.1:8000"));
        assert!(text.contains("Ready."));
        assert!(text.contains("F2:Scan"));
    }

    #[test]
    fn re_enables_advance_gate_generation() {
        let mut state = ViewState::default();
        apply_ui_update(&mut state, UiUpdate::SubmitEnabled(false));
        assert_eq!(state.gate_generation, 0);
        apply_ui_update(&mut state, UiUpdate::SubmitEnabled(true));
        assert_eq!(state.gate_generation, 1);
    }

    #[test]
    fn quit_stops_even_when_channel_is_full() {
        let (tx, _rx) = mpsc::channel(1);
        let decide = UserCommand::Decide {
            form: Box::new(ConditionForm::default()),
            generation: 0,
        };
        assert_eq!(forward_command(&tx, decide.clone()), Forwarded::Continue);
        assert_eq!(forward_command(&tx, decide), Forwarded::Continue);
        assert_eq!(forward_command(&tx, UserCommand::Quit), Forwarded::Stop);
    }

    #[test]
    fn closed_channel_stops_the_loop() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        assert_eq!(forward_command(&tx, UserCommand::Quit), Forwarded::Stop);
    }

    #[test]
    fn render_frame_small_terminal_does_not_panic() {
        let mut terminal = Terminal::new(TestBackend::new(20, 6)).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render_frame(frame, &state))
            .unwrap();
    }
}
