//! Form template list

use super::render_scrollable_list;
use crate::app::App;
use crate::i18n::Text;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Draw the list of forms available for filling
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let title = format!(" {} ", app.text(Text::Forms));
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if app.state.forms.is_empty() {
        let mut message = app.text(Text::NoForms).to_string();
        if !app.state.backend_connected {
            message.push('\n');
            message.push_str(app.text(Text::Offline));
        }
        message.push_str("\nPress 'r' to reload.");
        let content = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, area);
        return;
    }

    let items: Vec<ListItem> = app
        .state
        .forms
        .iter()
        .enumerate()
        .map(|(idx, form)| {
            let is_selected = idx == app.state.selected_index;
            let prefix = if is_selected { "▸ " } else { "  " };
            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };

            // Filled marker once the icon is in the local cache
            let icon = match &form.icon {
                Some(name) if app.state.cached_icons.contains(name) => {
                    Span::styled("◆ ", Style::default().fg(Color::Yellow))
                }
                Some(_) => Span::styled("◇ ", Style::default().fg(Color::DarkGray)),
                None => Span::raw("  "),
            };

            ListItem::new(Line::from(vec![
                Span::styled(prefix, style),
                icon,
                Span::styled(form.name.clone(), style),
            ]))
        })
        .collect();

    let list = List::new(items).block(block);
    render_scrollable_list(frame, area, list, app.state.selected_index);
}
