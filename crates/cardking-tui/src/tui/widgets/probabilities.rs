// Grade odds widget: one row per canonical grade with a proportional bar.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

const BAR_WIDTH: usize = 25;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let lines: Vec<Line> = state
        .verdict
        .probabilities
        .iter()
        .map(|entry| probability_line(entry))
        .collect();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Grade odds"),
    );
    frame.render_widget(paragraph, area);
}

/// Render `"PSA9: 40%"` as the text plus a bar sized from its percentage.
fn probability_line(entry: &str) -> Line<'static> {
    let pct = percent_of(entry).unwrap_or(0);
    let filled = (pct as usize * BAR_WIDTH / 100).min(BAR_WIDTH);
    Line::from(vec![
        Span::styled(format!(" {entry:<11}"), Style::default().fg(Color::White)),
        Span::styled("█".repeat(filled), Style::default().fg(Color::Cyan)),
    ])
}

/// Percentage parsed back out of a rendered entry.
///
/// The display port carries text only, so the bar reads its length from
/// the `"<grade>: <n>%"` line that `probability_lines` produced.
pub fn percent_of(entry: &str) -> Option<u32> {
    let (_, rest) = entry.rsplit_once(": ")?;
    rest.strip_suffix('%')?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_of_rendered_entry() {
        assert_eq!(percent_of("PSA9: 40%"), Some(40));
        assert_eq!(percent_of("LT7: 0%"), Some(0));
        assert_eq!(percent_of("garbage"), None);
    }

    #[test]
    fn bar_scales_with_percentage() {
        let line = probability_line("PSA10: 100%");
        assert_eq!(line.spans[1].content.chars().count(), BAR_WIDTH);
        let line = probability_line("PSA7: 0%");
        assert!(line.spans[1].content.is_empty());
    }

    #[test]
    fn render_does_not_panic_with_data() {
        let backend = ratatui::backend::TestBackend::new(40, 7);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.verdict.probabilities = vec![
            "PSA10: 0%".into(),
            "PSA9: 40%".into(),
            "PSA8: 0%".into(),
            "PSA7: 0%".into(),
            "LT7: 10%".into(),
        ];
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
