//! Checklist form view

use super::field_renderer::{draw_field, draw_text_box};
use crate::app::App;
use crate::i18n::Text;
use crate::state::{AnswerInput, Choice, ChoiceInput, ChoicePart, FormAnswerStore, FormSession};
use crate::ui::components::{render_choice_button, BUTTON_HEIGHT};
use crate::ui::widgets::scroll_start;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const CHOICE_HEIGHT: u16 = 1 + BUTTON_HEIGHT + 3;
const FREE_TEXT_HEIGHT: u16 = 5;
const SIGNATURE_HEIGHT: u16 = 3;
const CHOICE_BUTTON_WIDTH: u16 = 14;

/// Draw the form currently being filled in
pub fn draw_form_fill(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = &app.state.session else {
        frame.render_widget(
            Paragraph::new("No form open").block(Block::default().borders(Borders::ALL)),
            area,
        );
        return;
    };

    let store = session.store();
    let progress = format!(" {}/{} ", store.answered_count(), store.len());
    let block = Block::default()
        .title(format!(" {} ", session.form_name))
        .title_bottom(Line::from(progress).right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let heights = stop_heights(session);
    let start = scroll_start(&heights, session.active_index(), inner.height);
    let bottom = inner.y + inner.height;
    let mut y = inner.y;

    for (idx, height) in heights.iter().enumerate().skip(start) {
        if y >= bottom {
            break;
        }
        let slot = Rect {
            x: inner.x,
            y,
            width: inner.width,
            height: (*height).min(bottom - y),
        };
        match session.inputs().get(idx) {
            Some(AnswerInput::Choice(input)) => draw_choice(frame, slot, app, input, store, idx),
            Some(AnswerInput::FreeText(input)) => draw_field_question(
                frame,
                slot,
                &question_title(store, input.id(), idx),
                input.text(store),
                input.shows_placeholder(store).then(|| app.text(Text::AnswerPlaceholder)),
                input.is_focused(),
            ),
            None => draw_field(frame, slot, &session.signature, session.is_signature_active()),
        }
        y += height;
    }
}

fn stop_heights(session: &FormSession) -> Vec<u16> {
    session
        .inputs()
        .iter()
        .map(|input| match input {
            AnswerInput::Choice(_) => CHOICE_HEIGHT,
            AnswerInput::FreeText(_) => FREE_TEXT_HEIGHT,
        })
        .chain(std::iter::once(SIGNATURE_HEIGHT))
        .collect()
}

/// "3. Ladder inspected *" with the marker only on required questions
fn question_title(store: &FormAnswerStore, id: &str, idx: usize) -> String {
    match store.get(id) {
        Some(q) if q.required => format!("{}. {} *", idx + 1, q.text),
        Some(q) => format!("{}. {}", idx + 1, q.text),
        None => format!("{}. {id}", idx + 1),
    }
}

fn draw_field_question(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    text: &str,
    placeholder: Option<&str>,
    is_focused: bool,
) {
    draw_text_box(frame, area, title, text, placeholder, is_focused, true);
}

fn draw_choice(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    input: &ChoiceInput,
    store: &FormAnswerStore,
    idx: usize,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(BUTTON_HEIGHT),
            Constraint::Length(3),
        ])
        .split(area);

    let title_style = if input.is_focused() {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            question_title(store, input.id(), idx),
            title_style,
        ))),
        rows[0],
    );

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(CHOICE_BUTTON_WIDTH),
            Constraint::Length(CHOICE_BUTTON_WIDTH),
            Constraint::Length(CHOICE_BUTTON_WIDTH),
            Constraint::Min(0),
        ])
        .split(rows[1]);

    let selected = input.selected(store);
    let on_buttons = input.is_focused() && input.part == ChoicePart::Buttons;
    for choice in Choice::ALL {
        render_choice_button(
            frame,
            buttons[choice.index()],
            app.text(choice_label(choice)),
            selected == Some(choice),
            on_buttons && input.cursor == choice,
        );
    }

    let comment = input.comment(store);
    let title = format!(
        "{} {}/{}",
        app.text(Text::Comment),
        comment.chars().count(),
        input.comment_limit()
    );
    draw_text_box(
        frame,
        rows[2],
        &title,
        comment,
        None,
        input.is_focused() && input.part == ChoicePart::Comment,
        false,
    );
}

fn choice_label(choice: Choice) -> Text {
    match choice {
        Choice::Ok => Text::ChoiceOk,
        Choice::NotOk => Text::ChoiceNotOk,
        Choice::Na => Text::ChoiceNa,
    }
}
