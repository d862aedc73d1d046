// Form widget: query, listed price, condition sliders, issue flag and the
// submit / scan buttons.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use cardking_core::collector::{MetricField, Slider};

use crate::tui::input::FocusField;
use crate::tui::ViewState;

/// Width of the slider track in cells.
const TRACK_WIDTH: usize = 20;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let lines = build_form_lines(state);
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Card"),
    );
    frame.render_widget(paragraph, area);
}

fn build_form_lines(state: &ViewState) -> Vec<Line<'static>> {
    let form = &state.form;
    let mut lines = Vec::new();

    lines.push(field_line(
        "Card query ",
        text_with_cursor(&form.query, state.focus == FocusField::Query),
        state.focus == FocusField::Query,
    ));
    lines.push(field_line(
        "Listed $   ",
        text_with_cursor(&form.listed_price, state.focus == FocusField::ListedPrice),
        state.focus == FocusField::ListedPrice,
    ));
    lines.push(Line::from(""));

    for field in MetricField::ALL {
        let focused = state.focus == FocusField::Metric(field);
        lines.push(slider_line(field, form.slider(field), focused));
    }
    lines.push(Line::from(""));

    let check = if form.issue_flag { "[x]" } else { "[ ]" };
    lines.push(field_line(
        "Issue flag ",
        format!("{check} disclosed defect"),
        state.focus == FocusField::IssueFlag,
    ));
    lines.push(Line::from(""));

    lines.push(Line::from(vec![
        Span::raw(" "),
        button_span(
            " Decide ",
            state.focus == FocusField::Submit,
            state.verdict.submit_enabled,
        ),
        Span::raw("  "),
        button_span(" Scan ", state.focus == FocusField::Scan, true),
    ]));

    lines
}

fn field_line(label: &'static str, value: String, focused: bool) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {label}"), label_style(focused)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn slider_line(field: MetricField, slider: &Slider, focused: bool) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {:<11}", field.label()), label_style(focused)),
        Span::styled(slider_track(slider), Style::default().fg(Color::Cyan)),
        Span::styled(
            format!(" {}", slider.label()),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

/// `[=====-----]` track with the filled share proportional to the value.
pub fn slider_track(slider: &Slider) -> String {
    let filled = (slider.ratio() * TRACK_WIDTH as f64).round() as usize;
    let filled = filled.min(TRACK_WIDTH);
    format!("[{}{}]", "=".repeat(filled), "-".repeat(TRACK_WIDTH - filled))
}

fn text_with_cursor(text: &str, focused: bool) -> String {
    if focused {
        format!("{text}_")
    } else {
        text.to_string()
    }
}

fn label_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    }
}

/// A disabled button is dimmed; a focused one is inverted.
pub fn button_span(label: &'static str, focused: bool, enabled: bool) -> Span<'static> {
    let mut style = if focused {
        Style::default().fg(Color::Black).bg(Color::White)
    } else {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    };
    if !enabled {
        style = style.add_modifier(Modifier::DIM | Modifier::CROSSED_OUT);
    }
    Span::styled(label, style)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
