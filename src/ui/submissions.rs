//! Submitted forms list

use super::render_scrollable_list;
use crate::app::App;
use crate::i18n::Text;
use chrono::Local;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Draw the operator's submissions, newest first as returned by the backend
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(format!(" {} ", app.text(Text::Submissions)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if app.state.submissions.is_empty() {
        let content = Paragraph::new(app.text(Text::NoSubmissions))
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, area);
        return;
    }

    let items: Vec<ListItem> = app
        .state
        .submissions
        .iter()
        .enumerate()
        .map(|(idx, submission)| {
            let is_selected = idx == app.state.selected_index;
            let prefix = if is_selected { "▸ " } else { "  " };
            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };

            let when = submission
                .submitted_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string();
            let report = if submission.report_path.is_some() {
                Span::styled(" [report]", Style::default().fg(Color::Green))
            } else {
                Span::styled(" [pending]", Style::default().fg(Color::DarkGray))
            };

            ListItem::new(Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(when, Style::default().fg(Color::Cyan)),
                Span::raw("  "),
                Span::styled(submission.form_name.clone(), style),
                report,
            ]))
        })
        .collect();

    let list = List::new(items).block(block);
    render_scrollable_list(frame, area, list, app.state.selected_index);
}
