// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages sent to the
// app task, or into local edits (typing, slider moves, focus changes, the
// scan placeholder).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use cardking_core::collector::MetricField;
use cardking_core::scan::trigger_scan;

use super::ViewState;
use crate::protocol::UserCommand;

/// Form controls in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusField {
    Query,
    ListedPrice,
    Metric(MetricField),
    IssueFlag,
    Submit,
    Scan,
}

/// Tab order of the form controls.
pub const FOCUS_ORDER: [FocusField; 9] = [
    FocusField::Query,
    FocusField::ListedPrice,
    FocusField::Metric(MetricField::Centering),
    FocusField::Metric(MetricField::Corners),
    FocusField::Metric(MetricField::Edges),
    FocusField::Metric(MetricField::Surface),
    FocusField::IssueFlag,
    FocusField::Submit,
    FocusField::Scan,
];

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app task. Returns `None` when it was handled locally by editing the form
/// or moving focus.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events. On Windows, crossterm emits both
    // Press and Release events for each physical keypress.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    match key_event.code {
        KeyCode::Esc => return Some(UserCommand::Quit),
        KeyCode::Tab | KeyCode::Down => {
            move_focus(view_state, 1);
            return None;
        }
        KeyCode::BackTab | KeyCode::Up => {
            move_focus(view_state, -1);
            return None;
        }
        KeyCode::F(2) => return scan(view_state),
        KeyCode::Enter => {
            return match view_state.focus {
                FocusField::Scan => scan(view_state),
                _ => decide_command(view_state),
            };
        }
        _ => {}
    }

    match view_state.focus {
        FocusField::Query => {
            edit_text(key_event.code, view_state, TextTarget::Query);
            None
        }
        FocusField::ListedPrice => {
            edit_text(key_event.code, view_state, TextTarget::ListedPrice);
            None
        }
        FocusField::Metric(field) => {
            let slider = view_state.form.slider_mut(field);
            match key_event.code {
                KeyCode::Left | KeyCode::Char('-') | KeyCode::Char('h') => slider.decrement(),
                KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('l') => slider.increment(),
                _ => {}
            }
            None
        }
        FocusField::IssueFlag => {
            if key_event.code == KeyCode::Char(' ') {
                view_state.form.issue_flag = !view_state.form.issue_flag;
            }
            None
        }
        FocusField::Submit => match key_event.code {
            KeyCode::Char(' ') => decide_command(view_state),
            _ => None,
        },
        FocusField::Scan => match key_event.code {
            KeyCode::Char(' ') => scan(view_state),
            _ => None,
        },
    }
}

/// A decide command for the current form, or nothing while a cycle is
/// in flight.
fn decide_command(view_state: &ViewState) -> Option<UserCommand> {
    if !view_state.verdict.submit_enabled {
        return None;
    }
    Some(UserCommand::Decide {
        form: Box::new(view_state.form.clone()),
        generation: view_state.gate_generation,
    })
}

/// The scan placeholder only touches the status line.
fn scan(view_state: &mut ViewState) -> Option<UserCommand> {
    trigger_scan(&mut view_state.verdict);
    None
}

fn move_focus(view_state: &mut ViewState, delta: isize) {
    let len = FOCUS_ORDER.len() as isize;
    let current = FOCUS_ORDER
        .iter()
        .position(|f| *f == view_state.focus)
        .unwrap_or(0) as isize;
    let next = (current + delta).rem_euclid(len) as usize;
    view_state.focus = FOCUS_ORDER[next];
}

enum TextTarget {
    Query,
    ListedPrice,
}

fn edit_text(code: KeyCode, view_state: &mut ViewState, target: TextTarget) {
    let form = &mut view_state.form;
    match (code, target) {
        (KeyCode::Backspace, TextTarget::Query) => {
            form.query.pop();
        }
        (KeyCode::Backspace, TextTarget::ListedPrice) => {
            form.listed_price.pop();
        }
        (KeyCode::Char(c), TextTarget::Query) => {
            form.push_query_char(c);
        }
        (KeyCode::Char(c), TextTarget::ListedPrice) => {
            form.listed_price.push(c);
        }
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
