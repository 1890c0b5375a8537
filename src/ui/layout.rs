//! Layout components (sidebar, status bar)

use super::components::{render_sidebar_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::i18n::Text;
use crate::platform::{EXPORT_SHORTCUT, SAVE_SHORTCUT};
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Sidebar items as (shortcut key, label)
const SIDEBAR_ITEMS: [(&str, Text); 3] = [
    ("1", Text::Forms),
    ("2", Text::Timesheet),
    ("3", Text::Submissions),
];

const SIDEBAR_WIDTH: u16 = 20;

/// Create the main layout with sidebar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(SIDEBAR_WIDTH), // Sidebar
            Constraint::Min(0),                // Main content
        ])
        .split(area);

    // Reserve bottom line for status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(chunks[1]);

    let sidebar_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Sidebar content
            Constraint::Length(1), // Status bar continuation
        ])
        .split(chunks[0]);

    (sidebar_chunks[0], main_chunks[0])
}

/// Draw the sidebar with boxed buttons
pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                // Top padding (flex)
            Constraint::Length(BUTTON_HEIGHT), // Forms
            Constraint::Length(BUTTON_HEIGHT), // Timesheet
            Constraint::Length(BUTTON_HEIGHT), // Submissions
            Constraint::Min(0),                // Bottom padding (flex)
        ])
        .split(area);

    let selected = app.state.current_view.sidebar_index();
    // Section keys are text while a form is being edited
    let is_enabled = !app.state.current_view.is_form_view();

    for (idx, (key, label)) in SIDEBAR_ITEMS.iter().enumerate() {
        render_sidebar_button(
            frame,
            chunks[idx + 1],
            key,
            app.text(*label),
            idx == selected,
            is_enabled || idx == selected,
        );
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    // Connection status
    let conn_status = if app.state.backend_connected {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Red))
    };
    spans.push(conn_status);

    // View-specific hints
    let hints = get_view_hints(app.state.current_view);
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    spans.push(Span::raw(" | "));
    spans.push(Span::styled(
        app.config.operator(),
        Style::default().fg(Color::Blue),
    ));

    let quit_hint = " ^C:quit ";

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: quit_hint.len() as u16,
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(view: View) -> String {
    match view {
        View::Forms => "j/k:nav  Enter:open  r:refresh  1-3:section  q:quit".to_string(),
        View::FormFill => format!(
            "Tab:next  ↑/↓:question  ←/→ 1-3:answer  {SAVE_SHORTCUT}:submit  Esc:discard"
        ),
        View::Timesheet => {
            format!("Tab:next  {SAVE_SHORTCUT}:save  {EXPORT_SHORTCUT}:export  Esc:back")
        }
        View::Submissions => "j/k:nav  Enter:download report  r:refresh  Esc:back".to_string(),
    }
}
