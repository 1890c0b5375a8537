//! Application state definitions

use super::forms::{FormSession, TimesheetForm};
use crate::backend::{FormSummary, SubmissionSummary};
use chrono::NaiveDate;
use std::collections::{HashSet, VecDeque};

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Forms,
    FormFill,
    Timesheet,
    Submissions,
}

impl View {
    /// Views that capture free text and should not be returned to from history
    pub fn is_form_view(&self) -> bool {
        matches!(self, View::FormFill | View::Timesheet)
    }

    /// Sidebar entry highlighted for this view
    pub fn sidebar_index(&self) -> usize {
        match self {
            View::Forms | View::FormFill => 0,
            View::Timesheet => 1,
            View::Submissions => 2,
        }
    }
}

/// Main application state
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_history: Vec<View>,

    // Data
    pub forms: Vec<FormSummary>,
    pub submissions: Vec<SubmissionSummary>,
    /// Icon names already present in the local cache
    pub cached_icons: HashSet<String>,
    /// Icon names with a download still in flight
    pub pending_icons: HashSet<String>,

    // Selection
    pub selected_index: usize,

    // Editing
    pub session: Option<FormSession>,
    pub timesheet: TimesheetForm,

    // UI state
    pub backend_connected: bool,
    errors: VecDeque<String>,
}

impl AppState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            current_view: View::default(),
            view_history: Vec::new(),
            forms: Vec::new(),
            submissions: Vec::new(),
            cached_icons: HashSet::new(),
            pending_icons: HashSet::new(),
            selected_index: 0,
            session: None,
            timesheet: TimesheetForm::new(today),
            backend_connected: false,
            errors: VecDeque::new(),
        }
    }

    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Reset selection
    pub fn reset_selection(&mut self) {
        self.selected_index = 0;
    }

    pub fn selected_form(&self) -> Option<&FormSummary> {
        self.forms.get(self.selected_index)
    }

    pub fn selected_submission(&self) -> Option<&SubmissionSummary> {
        self.submissions.get(self.selected_index)
    }

    /// Queue an error for the modal error dialog
    pub fn push_error(&mut self, message: String) {
        tracing::warn!("{message}");
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Error currently shown in the dialog
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap())
    }

    fn form(id: &str) -> FormSummary {
        FormSummary {
            id: id.to_string(),
            name: id.to_uppercase(),
            icon: None,
        }
    }

    mod selection {
        use super::*;

        #[test]
        fn test_move_down_stops_at_end() {
            let mut s = state();
            s.move_selection_down(2);
            s.move_selection_down(2);
            assert_eq!(s.selected_index, 1);
        }

        #[test]
        fn test_move_down_with_empty_list() {
            let mut s = state();
            s.move_selection_down(0);
            assert_eq!(s.selected_index, 0);
        }

        #[test]
        fn test_move_up_stops_at_zero() {
            let mut s = state();
            s.move_selection_up();
            assert_eq!(s.selected_index, 0);
        }

        #[test]
        fn test_selected_form() {
            let mut s = state();
            s.forms = vec![form("a"), form("b")];
            s.move_selection_down(s.forms.len());
            assert_eq!(s.selected_form().unwrap().id, "b");
            s.reset_selection();
            assert_eq!(s.selected_form().unwrap().id, "a");
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn test_queue_is_fifo() {
            let mut s = state();
            assert!(!s.has_errors());
            s.push_error("first".to_string());
            s.push_error("second".to_string());
            assert_eq!(s.error_count(), 2);
            assert_eq!(s.current_error(), Some("first"));
            s.dismiss_error();
            assert_eq!(s.current_error(), Some("second"));
            s.dismiss_error();
            assert!(!s.has_errors());
        }
    }

    mod views {
        use super::*;

        #[test]
        fn test_form_views() {
            assert!(View::FormFill.is_form_view());
            assert!(View::Timesheet.is_form_view());
            assert!(!View::Forms.is_form_view());
            assert!(!View::Submissions.is_form_view());
        }

        #[test]
        fn test_sidebar_index() {
            assert_eq!(View::FormFill.sidebar_index(), 0);
            assert_eq!(View::Submissions.sidebar_index(), 2);
        }
    }
}
