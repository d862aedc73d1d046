// Verdict widget: decision label (toned), confidence, and the risk chip.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use cardking_core::display::{DecisionView, RiskClass, Tone};

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(build_verdict_lines(&state.verdict)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Decision"),
    );
    frame.render_widget(paragraph, area);
}

fn build_verdict_lines(view: &DecisionView) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        format!(" {}", view.decision),
        Style::default()
            .fg(tone_color(view.decision_tone))
            .add_modifier(Modifier::BOLD),
    ))];

    if view.has_verdict() {
        lines.push(Line::from(Span::styled(
            format!(" {}", view.confidence),
            Style::default().fg(Color::White),
        )));
        lines.push(Line::from(vec![
            Span::raw(" "),
            Span::styled(format!(" {} ", view.risk), risk_chip_style(view.risk_class)),
        ]));
    }

    lines
}

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Good => Color::Green,
        Tone::Bad => Color::Red,
        Tone::Warn => Color::Yellow,
        Tone::Neutral => Color::White,
    }
}

/// Chip background for the active risk class.
pub fn risk_chip_style(class: Option<RiskClass>) -> Style {
    let bg = match class {
        Some(RiskClass::Green) => Color::Green,
        Some(RiskClass::Amber) => Color::Rgb(255, 191, 0),
        Some(RiskClass::Red) => Color::Red,
        None => Color::DarkGray,
    };
    Style::default()
        .fg(Color::Black)
        .bg(bg)
        .add_modifier(Modifier::BOLD)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
