//! UI module for rendering the TUI

mod components;
mod form_list;
mod forms;
mod layout;
mod submissions;
mod widgets;

pub use widgets::render_scrollable_list;

use crate::app::App;
use crate::state::View;
use components::render_error_dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Draw the main layout with sidebar
    let (sidebar_area, main_area) = layout::create_layout(area);

    // Draw sidebar
    layout::draw_sidebar(frame, sidebar_area, app);

    // Draw main content based on current view
    match app.state.current_view {
        View::Forms => form_list::draw(frame, main_area, app),
        View::FormFill => forms::draw_form_fill(frame, main_area, app),
        View::Timesheet => forms::draw_timesheet(frame, main_area, app),
        View::Submissions => submissions::draw(frame, main_area, app),
    }

    // Draw status bar
    layout::draw_status_bar(frame, app);

    // Errors are modal and drawn last
    if let Some(error) = app.state.current_error() {
        render_error_dialog(frame, error, app.state.error_count() - 1);
    }
}
