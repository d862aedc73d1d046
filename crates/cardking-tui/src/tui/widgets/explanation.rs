// Explanation widget: the service's reasons, one list item per line.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let items: Vec<ListItem> = state
        .verdict
        .explanation
        .iter()
        .map(|line| ListItem::new(format!(" • {line}")).style(Style::default().fg(Color::White)))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Why"),
    );
    frame.render_widget(list, area);
}
