// Market widget: value range, median, expected net and breakeven.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use cardking_core::display::DecisionView;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(build_market_lines(&state.verdict)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Market & ROI"),
    );
    frame.render_widget(paragraph, area);
}

fn build_market_lines(view: &DecisionView) -> Vec<Line<'static>> {
    if !view.has_verdict() {
        return vec![Line::from(Span::styled(
            " No decision yet.",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    let strong = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(Color::Gray);

    vec![
        Line::from(Span::styled(format!(" {}", view.market), strong)),
        Line::from(Span::styled(format!(" {}", view.market_meta), muted)),
        Line::from(Span::styled(format!(" {}", view.roi), strong)),
        Line::from(Span::styled(format!(" {}", view.breakeven), muted)),
    ]
}
