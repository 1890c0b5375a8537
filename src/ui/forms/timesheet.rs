//! Timesheet entry view

use super::field_renderer::draw_field;
use crate::app::App;
use crate::i18n::Text;
use crate::platform::{EXPORT_SHORTCUT, SAVE_SHORTCUT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the timesheet entry form
pub fn draw_timesheet(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.timesheet;
    let block = Block::default()
        .title(format!(" {} ", app.text(Text::Timesheet)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Date
            Constraint::Length(3), // Hours
            Constraint::Min(5),    // Description
            Constraint::Length(1), // Shortcuts
        ])
        .split(inner);

    for idx in 0..form.field_count() {
        if let Some(field) = form.get_field(idx) {
            draw_field(frame, chunks[idx], field, idx == form.active_field_index);
        }
    }

    let key_style = Style::default().fg(Color::Cyan);
    let help = Line::from(vec![
        Span::styled(SAVE_SHORTCUT, key_style),
        Span::raw(" save entry   "),
        Span::styled(EXPORT_SHORTCUT, key_style),
        Span::raw(" export my timesheet"),
    ]);
    frame.render_widget(Paragraph::new(help), chunks[3]);
}
