// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +----------------------+---------------------------+
// | Form (40%)           | Verdict (5 rows)          |
// |                      +---------------------------+
// |                      | Market / ROI (6 rows)     |
// |                      +---------------------------+
// |                      | Grade odds (7 rows)       |
// |                      +---------------------------+
// |                      | Explanation (fill)        |
// +----------------------+---------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: status line and service connection.
    pub status_bar: Rect,
    /// Left column: query, price, sliders, flag, buttons.
    pub form: Rect,
    /// Decision label, confidence and risk chip.
    pub verdict: Rect,
    /// Market range, median, ROI and breakeven.
    pub market: Rect,
    /// Five grade probability rows.
    pub probabilities: Rect,
    /// Explanation list.
    pub explanation: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    // Vertical: status(1) | middle(fill) | help(1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(area);

    let status_bar = vertical[0];
    let middle = vertical[1];
    let help_bar = vertical[2];

    // Horizontal: form (40%) | results (60%)
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(middle);

    let form = horizontal[0];
    let results = horizontal[1];

    let result_sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(6),
            Constraint::Length(7),
            Constraint::Min(3),
        ])
        .split(results);

    AppLayout {
        status_bar,
        form,
        verdict: result_sections[0],
        market: result_sections[1],
        probabilities: result_sections[2],
        explanation: result_sections[3],
        help_bar,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
