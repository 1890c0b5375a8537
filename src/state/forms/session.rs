//! Form-filling session
//!
//! The session is the controller for one pass over a form: it owns the
//! answer store, one input view per question and the sign-off field. The
//! focus stops are the questions in order followed by the sign-off field.

use super::field::FormField;
use super::inputs::{AnswerInput, ChoicePart};
use super::question::Choice;
use super::store::FormAnswerStore;
use crate::backend::{FormTemplate, Submission};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Reasons a session cannot be turned into a submission yet
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("{} required question(s) unanswered", .0.len())]
    Unanswered(Vec<String>),
    #[error("a signature is required before submitting")]
    MissingSignature,
}

#[derive(Debug, Clone)]
pub struct FormSession {
    /// Submission id, fixed for the session so a retried submit is idempotent
    pub id: String,
    pub form_id: String,
    pub form_name: String,
    pub operator: String,
    pub started_at: DateTime<Utc>,
    pub signature: FormField,
    store: FormAnswerStore,
    inputs: Vec<AnswerInput>,
    active: usize,
}

impl FormSession {
    pub fn start(
        template: &FormTemplate,
        operator: &str,
        signature_label: &str,
        comment_limit: usize,
        now: DateTime<Utc>,
    ) -> Self {
        let store = FormAnswerStore::initialize(&template.questions);
        // Inputs follow the store so duplicate ids dropped there get no view
        let mut inputs: Vec<AnswerInput> = store
            .iter()
            .filter_map(|fq| template.questions.iter().find(|q| q.id == fq.id))
            .map(|q| AnswerInput::for_question(q, comment_limit))
            .collect();
        if let Some(first) = inputs.first_mut() {
            first.focus();
        }

        tracing::info!(
            "Started session for form '{}' with {} questions",
            template.id,
            inputs.len()
        );

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            form_id: template.id.clone(),
            form_name: template.name.clone(),
            operator: operator.to_string(),
            started_at: now,
            signature: FormField::text_with_value(
                "signed_by",
                signature_label,
                operator.to_string(),
                false,
            ),
            store,
            inputs,
            active: 0,
        }
    }

    pub fn store(&self) -> &FormAnswerStore {
        &self.store
    }

    pub fn inputs(&self) -> &[AnswerInput] {
        &self.inputs
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Number of focus stops: every question plus the sign-off field
    pub fn stop_count(&self) -> usize {
        self.inputs.len() + 1
    }

    pub fn is_signature_active(&self) -> bool {
        self.active == self.inputs.len()
    }

    pub fn active_input(&self) -> Option<&AnswerInput> {
        self.inputs.get(self.active)
    }

    /// Whether typed characters are text rather than shortcuts
    pub fn active_accepts_text(&self) -> bool {
        self.active_input()
            .map_or(self.is_signature_active(), AnswerInput::accepts_text)
    }

    /// Move focus to stop `index`, blurring the previous view
    pub fn focus_index(&mut self, index: usize) {
        let index = index.min(self.inputs.len());
        if let Some(current) = self.inputs.get_mut(self.active) {
            current.blur();
        }
        self.active = index;
        if let Some(next) = self.inputs.get_mut(self.active) {
            next.focus();
        }
    }

    pub fn next_field(&mut self) {
        if let Some(AnswerInput::Choice(c)) = self.inputs.get_mut(self.active) {
            if c.part == ChoicePart::Buttons {
                c.part = ChoicePart::Comment;
                return;
            }
        }
        let next = (self.active + 1) % self.stop_count();
        self.focus_index(next);
    }

    pub fn prev_field(&mut self) {
        if let Some(AnswerInput::Choice(c)) = self.inputs.get_mut(self.active) {
            if c.part == ChoicePart::Comment {
                c.part = ChoicePart::Buttons;
                return;
            }
        }
        let prev = if self.active == 0 {
            self.stop_count() - 1
        } else {
            self.active - 1
        };
        self.focus_index(prev);
        if let Some(AnswerInput::Choice(c)) = self.inputs.get_mut(self.active) {
            c.part = ChoicePart::Comment;
        }
    }

    /// Jump to the next question, skipping the comment part
    pub fn next_question(&mut self) {
        let next = (self.active + 1) % self.stop_count();
        self.focus_index(next);
    }

    pub fn prev_question(&mut self) {
        let prev = if self.active == 0 {
            self.stop_count() - 1
        } else {
            self.active - 1
        };
        self.focus_index(prev);
    }

    /// Select a choice on the active question (no-op on other views)
    pub fn select_choice(&mut self, choice: Choice) -> bool {
        match self.inputs.get_mut(self.active) {
            Some(AnswerInput::Choice(c)) => c.select(choice, &mut self.store),
            _ => false,
        }
    }

    /// Select the highlighted button of the active choice view
    pub fn confirm_choice(&mut self) -> bool {
        match self.inputs.get_mut(self.active) {
            Some(AnswerInput::Choice(c)) if c.part == ChoicePart::Buttons => {
                c.select_cursor(&mut self.store)
            }
            _ => false,
        }
    }

    pub fn move_choice_cursor(&mut self, forward: bool) {
        if let Some(AnswerInput::Choice(c)) = self.inputs.get_mut(self.active) {
            if forward {
                c.cursor_next();
            } else {
                c.cursor_prev();
            }
        }
    }

    /// Route a typed character to whichever text buffer has focus
    pub fn input_char(&mut self, ch: char) -> bool {
        match self.inputs.get_mut(self.active) {
            Some(AnswerInput::Choice(c)) if c.part == ChoicePart::Comment => {
                c.push_comment_char(ch, &mut self.store)
            }
            Some(AnswerInput::Choice(_)) => false,
            Some(AnswerInput::FreeText(t)) => t.push_char(ch, &mut self.store),
            None => {
                self.signature.push_char(ch);
                true
            }
        }
    }

    pub fn backspace(&mut self) -> bool {
        match self.inputs.get_mut(self.active) {
            Some(AnswerInput::Choice(c)) if c.part == ChoicePart::Comment => {
                c.pop_comment_char(&mut self.store)
            }
            Some(AnswerInput::Choice(_)) => false,
            Some(AnswerInput::FreeText(t)) => t.pop_char(&mut self.store),
            None => {
                self.signature.pop_char();
                true
            }
        }
    }

    /// Newlines are only meaningful in free-text answers
    pub fn newline(&mut self) -> bool {
        match self.inputs.get_mut(self.active) {
            Some(AnswerInput::FreeText(t)) => t.push_char('\n', &mut self.store),
            _ => false,
        }
    }

    pub fn missing_answers(&self) -> Vec<String> {
        self.store.validate()
    }

    /// Focus the first unanswered required question; false if none
    pub fn focus_first_missing(&mut self) -> bool {
        let missing = self.missing_answers();
        let Some(first) = missing.first() else {
            return false;
        };
        if let Some(index) = self.inputs.iter().position(|i| i.id() == first) {
            self.focus_index(index);
        }
        true
    }

    /// Freeze the current answers into a submission record
    pub fn build_submission(&self, now: DateTime<Utc>) -> Result<Submission, SessionError> {
        let missing = self.missing_answers();
        if !missing.is_empty() {
            return Err(SessionError::Unanswered(missing));
        }
        let signed_by = self.signature.as_text().trim();
        if signed_by.is_empty() {
            return Err(SessionError::MissingSignature);
        }

        Ok(Submission {
            id: self.id.clone(),
            form_id: self.form_id.clone(),
            form_name: self.form_name.clone(),
            operator: self.operator.clone(),
            signed_by: signed_by.to_string(),
            started_at: self.started_at,
            submitted_at: now,
            answers: self.store.snapshot(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::inputs::DEFAULT_COMMENT_LIMIT;
    use crate::state::forms::question::{Question, QuestionKind};
    use chrono::TimeZone;

    fn template() -> FormTemplate {
        FormTemplate {
            id: "daily-check".to_string(),
            name: "Daily check".to_string(),
            icon: None,
            questions: vec![
                Question::new("q1", "Valve closed", QuestionKind::OkNotOkNa),
                Question::new("q2", "Actions taken", QuestionKind::Input),
            ],
        }
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, hour, 0, 0).unwrap()
    }

    fn session() -> FormSession {
        FormSession::start(&template(), "Sam", "Signed by", DEFAULT_COMMENT_LIMIT, at(8))
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_first_input_focused_on_start() {
            let s = session();
            assert_eq!(s.active_index(), 0);
            assert!(s.inputs()[0].is_focused());
            assert!(!s.inputs()[1].is_focused());
        }

        #[test]
        fn test_next_field_walks_choice_parts_then_questions() {
            let mut s = session();
            s.next_field();
            assert_eq!(s.active_index(), 0);
            assert!(s.active_accepts_text());
            s.next_field();
            assert_eq!(s.active_index(), 1);
            assert!(!s.inputs()[0].is_focused());
            s.next_field();
            assert!(s.is_signature_active());
            s.next_field();
            assert_eq!(s.active_index(), 0);
        }

        #[test]
        fn test_prev_field_wraps_to_signature() {
            let mut s = session();
            s.prev_field();
            assert!(s.is_signature_active());
            s.prev_field();
            assert_eq!(s.active_index(), 1);
            s.prev_field();
            assert_eq!(s.active_index(), 0);
            assert!(s.active_accepts_text(), "lands on the comment part");
        }

        #[test]
        fn test_empty_form_has_only_signature() {
            let empty = FormTemplate {
                questions: vec![],
                ..template()
            };
            let mut s = FormSession::start(&empty, "Sam", "Signed by", DEFAULT_COMMENT_LIMIT, at(8));
            assert!(s.is_signature_active());
            s.next_field();
            assert!(s.is_signature_active());
        }
    }

    mod editing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_shortcut_selection_and_text() {
            let mut s = session();
            assert!(s.select_choice(Choice::NotOk));
            s.next_question();
            for c in "Clear site".chars() {
                s.input_char(c);
            }
            let snapshot = s.store().snapshot();
            assert_eq!(snapshot[0].answer.as_deref(), Some("NOK"));
            assert_eq!(snapshot[1].answer.as_deref(), Some("Clear site"));
        }

        #[test]
        fn test_chars_on_buttons_are_ignored() {
            let mut s = session();
            assert!(!s.input_char('x'));
            assert!(s.store().get("q1").unwrap().comment.is_none());
        }

        #[test]
        fn test_comment_part_receives_chars() {
            let mut s = session();
            s.next_field();
            s.input_char('o');
            s.input_char('k');
            s.backspace();
            assert_eq!(s.store().get("q1").unwrap().comment.as_deref(), Some("o"));
        }

        #[test]
        fn test_cursor_confirm() {
            let mut s = session();
            s.move_choice_cursor(false);
            assert!(s.confirm_choice());
            assert_eq!(s.store().get("q1").unwrap().answer.as_deref(), Some("NA"));
        }

        #[test]
        fn test_signature_editing() {
            let mut s = session();
            s.focus_index(2);
            s.input_char('!');
            assert_eq!(s.signature.as_text(), "Sam!");
            s.backspace();
            s.backspace();
            assert_eq!(s.signature.as_text(), "Sa");
        }

        #[test]
        fn test_newline_only_in_free_text() {
            let mut s = session();
            assert!(!s.newline());
            s.next_question();
            assert!(s.newline());
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_unanswered_blocks_submission() {
            let mut s = session();
            s.select_choice(Choice::Ok);
            let err = s.build_submission(at(9)).unwrap_err();
            assert_eq!(err, SessionError::Unanswered(vec!["q2".to_string()]));
            assert!(s.focus_first_missing());
            assert_eq!(s.active_index(), 1);
        }

        #[test]
        fn test_signature_required() {
            let mut s = session();
            s.select_choice(Choice::Ok);
            s.next_question();
            s.input_char('x');
            s.signature.clear();
            let err = s.build_submission(at(9)).unwrap_err();
            assert_eq!(err, SessionError::MissingSignature);
        }

        #[test]
        fn test_complete_session_builds_submission() {
            let mut s = session();
            s.select_choice(Choice::Ok);
            s.next_question();
            for c in "Clear site".chars() {
                s.input_char(c);
            }
            let sub = s.build_submission(at(9)).unwrap();
            assert_eq!(sub.id, s.id);
            assert_eq!(sub.form_id, "daily-check");
            assert_eq!(sub.signed_by, "Sam");
            assert_eq!(sub.started_at, at(8));
            assert_eq!(sub.submitted_at, at(9));
            assert_eq!(sub.answers, s.store().snapshot());
            assert!(!s.focus_first_missing());
        }
    }
}
