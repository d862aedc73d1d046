// Status bar widget: service connection, busy marker, status message.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::ConnectionStatus;
use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [connection indicator] [service url] | [busy marker] [status]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (dot, dot_color) = connection_indicator(state.connection_status);
    let mut spans = vec![
        Span::styled(format!(" {dot} "), Style::default().fg(dot_color)),
        Span::styled(state.service_url.clone(), Style::default().fg(Color::Gray)),
        Span::styled(" | ", Style::default().fg(Color::Gray)),
    ];

    if !state.verdict.submit_enabled {
        spans.push(Span::styled(
            "[busy] ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }

    spans.push(Span::styled(
        state.verdict.status.clone(),
        status_style(&state.verdict.status),
    ));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Return the connection dot character and its color.
pub fn connection_indicator(status: ConnectionStatus) -> (&'static str, Color) {
    match status {
        ConnectionStatus::Connected => ("●", Color::Green),
        ConnectionStatus::Disconnected => ("●", Color::Red),
        ConnectionStatus::Unknown => ("○", Color::Gray),
    }
}

/// Error messages stand out in red.
pub fn status_style(status: &str) -> Style {
    if status.starts_with("Error:") {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::White)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
