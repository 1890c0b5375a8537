//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const CURSOR: &str = "▌";

/// Draw a form field using FormField from the domain layer
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    draw_text_box(
        frame,
        area,
        &field.label,
        &field.display_value(),
        Some("(empty)"),
        is_active,
        field.is_multiline,
    );
}

/// Draw a bordered text box.
///
/// `placeholder` is shown dimmed when the value is empty and the box is not
/// focused; it is never part of the value.
pub fn draw_text_box(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    placeholder: Option<&str>,
    is_active: bool,
    is_multiline: bool,
) {
    let accent = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut lines: Vec<Line> = match placeholder {
        Some(hint) if value.is_empty() && !is_active => vec![Line::from(Span::styled(
            hint.to_string(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))],
        _ if is_multiline => value
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), accent)))
            .collect(),
        _ => vec![Line::from(Span::styled(value.replace('\n', " "), accent))],
    };

    if is_active {
        let cursor = Span::styled(CURSOR, Style::default().fg(Color::Cyan));
        match lines.last_mut() {
            Some(last) => last.spans.push(cursor),
            None => lines.push(Line::from(cursor)),
        }
    }

    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(accent);

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}
