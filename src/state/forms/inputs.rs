//! Answer input views
//!
//! Each view renders one question and writes edits back into the
//! `FormAnswerStore`. Views only remember the question id plus UI state
//! (focus, cursor); the store is passed in explicitly for every read and
//! edit, so there is never a second copy of an answer to drift out of sync.

use super::question::{AnswerField, Choice, Question, QuestionKind};
use super::store::FormAnswerStore;

/// Maximum comment length accepted by the choice view
pub const DEFAULT_COMMENT_LIMIT: usize = 50;

/// Which half of a choice view has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChoicePart {
    #[default]
    Buttons,
    Comment,
}

/// OK / NOK / NA radio group with a short comment line
#[derive(Debug, Clone)]
pub struct ChoiceInput {
    question_id: String,
    pub part: ChoicePart,
    /// Button highlighted for keyboard selection (not necessarily selected)
    pub cursor: Choice,
    comment_limit: usize,
    focused: bool,
}

impl ChoiceInput {
    pub fn new(question_id: &str, comment_limit: usize) -> Self {
        Self {
            question_id: question_id.to_string(),
            part: ChoicePart::Buttons,
            cursor: Choice::Ok,
            comment_limit,
            focused: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.question_id
    }

    pub fn comment_limit(&self) -> usize {
        self.comment_limit
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// The selected choice, read from the store
    pub fn selected(&self, store: &FormAnswerStore) -> Option<Choice> {
        store
            .get(&self.question_id)
            .and_then(|q| q.answer.as_deref())
            .and_then(Choice::from_token)
    }

    pub fn comment<'a>(&self, store: &'a FormAnswerStore) -> &'a str {
        store
            .get(&self.question_id)
            .and_then(|q| q.comment.as_deref())
            .unwrap_or("")
    }

    /// Select `choice`, replacing any previous selection.
    ///
    /// Returns false when the store rejected the write; the view is left as is.
    pub fn select(&mut self, choice: Choice, store: &mut FormAnswerStore) -> bool {
        match store.update(&self.question_id, AnswerField::Answer, choice.token()) {
            Ok(()) => {
                self.cursor = choice;
                true
            }
            Err(e) => {
                tracing::warn!("Choice selection dropped: {e}");
                false
            }
        }
    }

    pub fn select_cursor(&mut self, store: &mut FormAnswerStore) -> bool {
        self.select(self.cursor, store)
    }

    pub fn cursor_next(&mut self) {
        self.cursor = self.cursor.next();
    }

    pub fn cursor_prev(&mut self) {
        self.cursor = self.cursor.prev();
    }

    /// Replace the comment, cut to the comment limit
    pub fn set_comment(&mut self, text: &str, store: &mut FormAnswerStore) -> bool {
        let text: String = text.chars().take(self.comment_limit).collect();
        match store.update(&self.question_id, AnswerField::Comment, &text) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Comment edit dropped: {e}");
                false
            }
        }
    }

    /// Append a character; ignored once the comment is at the limit
    pub fn push_comment_char(&mut self, c: char, store: &mut FormAnswerStore) -> bool {
        let mut text = self.comment(store).to_string();
        if text.chars().count() >= self.comment_limit {
            tracing::debug!(
                "Comment for '{}' is at its {} character limit",
                self.question_id,
                self.comment_limit
            );
            return false;
        }
        text.push(c);
        self.set_comment(&text, store)
    }

    pub fn pop_comment_char(&mut self, store: &mut FormAnswerStore) -> bool {
        let mut text = self.comment(store).to_string();
        if text.pop().is_none() {
            return false;
        }
        self.set_comment(&text, store)
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn blur(&mut self) {
        self.focused = false;
        self.part = ChoicePart::Buttons;
    }
}

/// Multi-line free-text answer
///
/// Empty means an absent or empty answer. The placeholder exists only at
/// render time and is never written to the store.
#[derive(Debug, Clone)]
pub struct FreeTextInput {
    question_id: String,
    focused: bool,
}

impl FreeTextInput {
    pub fn new(question_id: &str) -> Self {
        Self {
            question_id: question_id.to_string(),
            focused: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.question_id
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn text<'a>(&self, store: &'a FormAnswerStore) -> &'a str {
        store
            .get(&self.question_id)
            .and_then(|q| q.answer.as_deref())
            .unwrap_or("")
    }

    /// Whether the renderer should show placeholder text instead of content
    pub fn shows_placeholder(&self, store: &FormAnswerStore) -> bool {
        !self.focused && self.text(store).is_empty()
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Write the whole field content as the answer
    pub fn set_text(&mut self, text: &str, store: &mut FormAnswerStore) -> bool {
        match store.update(&self.question_id, AnswerField::Answer, text) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Text edit dropped: {e}");
                false
            }
        }
    }

    pub fn push_char(&mut self, c: char, store: &mut FormAnswerStore) -> bool {
        let mut text = self.text(store).to_string();
        text.push(c);
        self.set_text(&text, store)
    }

    pub fn pop_char(&mut self, store: &mut FormAnswerStore) -> bool {
        let mut text = self.text(store).to_string();
        if text.pop().is_none() {
            return false;
        }
        self.set_text(&text, store)
    }
}

/// An input view for one question, chosen by the question kind
#[derive(Debug, Clone)]
pub enum AnswerInput {
    Choice(ChoiceInput),
    FreeText(FreeTextInput),
}

impl AnswerInput {
    pub fn for_question(question: &Question, comment_limit: usize) -> Self {
        match question.kind {
            QuestionKind::OkNotOkNa => {
                AnswerInput::Choice(ChoiceInput::new(&question.id, comment_limit))
            }
            QuestionKind::Input => AnswerInput::FreeText(FreeTextInput::new(&question.id)),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            AnswerInput::Choice(c) => c.id(),
            AnswerInput::FreeText(t) => t.id(),
        }
    }

    pub fn focus(&mut self) {
        match self {
            AnswerInput::Choice(c) => c.focus(),
            AnswerInput::FreeText(t) => t.focus(),
        }
    }

    pub fn blur(&mut self) {
        match self {
            AnswerInput::Choice(c) => c.blur(),
            AnswerInput::FreeText(t) => t.blur(),
        }
    }

    pub fn is_focused(&self) -> bool {
        match self {
            AnswerInput::Choice(c) => c.is_focused(),
            AnswerInput::FreeText(t) => t.is_focused(),
        }
    }

    /// True when typed characters go into a text buffer
    pub fn accepts_text(&self) -> bool {
        match self {
            AnswerInput::Choice(c) => c.part == ChoicePart::Comment,
            AnswerInput::FreeText(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::question::Question;

    fn store() -> FormAnswerStore {
        FormAnswerStore::initialize(&[
            Question::new("q1", "Ladder secured", QuestionKind::OkNotOkNa),
            Question::new("q2", "Site notes", QuestionKind::Input),
        ])
    }

    mod choice {
        use super::*;

        #[test]
        fn test_select_writes_token() {
            let mut store = store();
            let mut view = ChoiceInput::new("q1", DEFAULT_COMMENT_LIMIT);
            assert!(view.select(Choice::NotOk, &mut store));
            assert_eq!(store.get("q1").unwrap().answer.as_deref(), Some("NOK"));
            assert_eq!(view.selected(&store), Some(Choice::NotOk));
        }

        #[test]
        fn test_second_selection_replaces_first() {
            let mut store = store();
            let mut view = ChoiceInput::new("q1", DEFAULT_COMMENT_LIMIT);
            view.select(Choice::Ok, &mut store);
            view.select(Choice::Na, &mut store);
            assert_eq!(view.selected(&store), Some(Choice::Na));
            assert_eq!(store.get("q1").unwrap().answer.as_deref(), Some("NA"));
        }

        #[test]
        fn test_selecting_twice_is_idempotent() {
            let mut store = store();
            let mut view = ChoiceInput::new("q1", DEFAULT_COMMENT_LIMIT);
            view.select(Choice::Ok, &mut store);
            let once = store.snapshot();
            view.select(Choice::Ok, &mut store);
            assert_eq!(store.snapshot(), once);
            assert_eq!(view.selected(&store), Some(Choice::Ok));
        }

        #[test]
        fn test_nothing_selected_initially() {
            let store = store();
            let view = ChoiceInput::new("q1", DEFAULT_COMMENT_LIMIT);
            assert_eq!(view.selected(&store), None);
            assert_eq!(view.comment(&store), "");
        }

        #[test]
        fn test_select_cursor_uses_highlighted_button() {
            let mut store = store();
            let mut view = ChoiceInput::new("q1", DEFAULT_COMMENT_LIMIT);
            view.cursor_next();
            view.cursor_next();
            view.select_cursor(&mut store);
            assert_eq!(view.selected(&store), Some(Choice::Na));
            view.cursor_prev();
            assert_eq!(view.cursor, Choice::NotOk);
        }

        #[test]
        fn test_comment_typing_and_backspace() {
            let mut store = store();
            let mut view = ChoiceInput::new("q1", DEFAULT_COMMENT_LIMIT);
            for c in "rust ".chars() {
                view.push_comment_char(c, &mut store);
            }
            view.pop_comment_char(&mut store);
            assert_eq!(store.get("q1").unwrap().comment.as_deref(), Some("rust"));
            assert!(store.get("q1").unwrap().answer.is_none());
        }

        #[test]
        fn test_comment_limit_enforced() {
            let mut store = store();
            let mut view = ChoiceInput::new("q1", 5);
            for c in "abcdefgh".chars() {
                view.push_comment_char(c, &mut store);
            }
            assert_eq!(view.comment(&store), "abcde");
            assert!(!view.push_comment_char('z', &mut store));
        }

        #[test]
        fn test_set_comment_truncates_by_chars() {
            let mut store = store();
            let mut view = ChoiceInput::new("q1", 3);
            view.set_comment("ééééé", &mut store);
            assert_eq!(view.comment(&store), "ééé");
        }

        #[test]
        fn test_pop_on_empty_comment_writes_nothing() {
            let mut store = store();
            let mut view = ChoiceInput::new("q1", DEFAULT_COMMENT_LIMIT);
            assert!(!view.pop_comment_char(&mut store));
            assert!(store.get("q1").unwrap().comment.is_none());
        }

        #[test]
        fn test_unknown_id_leaves_store_and_view_unchanged() {
            let mut store = store();
            let before = store.snapshot();
            let mut view = ChoiceInput::new("gone", DEFAULT_COMMENT_LIMIT);
            assert!(!view.select(Choice::NotOk, &mut store));
            assert!(!view.set_comment("note", &mut store));
            assert_eq!(view.cursor, Choice::Ok);
            assert_eq!(store.snapshot(), before);
        }
    }

    mod free_text {
        use super::*;

        #[test]
        fn test_typing_writes_raw_text() {
            let mut store = store();
            let mut view = FreeTextInput::new("q2");
            view.focus();
            for c in "Clear site".chars() {
                view.push_char(c, &mut store);
            }
            assert_eq!(
                store.get("q2").unwrap().answer.as_deref(),
                Some("Clear site")
            );
        }

        #[test]
        fn test_placeholder_only_when_blurred_and_empty() {
            let mut store = store();
            let mut view = FreeTextInput::new("q2");
            assert!(view.shows_placeholder(&store));
            view.focus();
            assert!(!view.shows_placeholder(&store));
            view.push_char('x', &mut store);
            view.blur();
            assert!(!view.shows_placeholder(&store));
        }

        #[test]
        fn test_first_keystroke_after_placeholder_starts_empty() {
            let mut store = store();
            let mut view = FreeTextInput::new("q2");
            assert!(view.shows_placeholder(&store));
            view.focus();
            view.push_char('a', &mut store);
            assert_eq!(store.get("q2").unwrap().answer.as_deref(), Some("a"));
        }

        #[test]
        fn test_clearing_then_blurring_never_stores_placeholder() {
            let mut store = store();
            let mut view = FreeTextInput::new("q2");
            view.focus();
            view.push_char('a', &mut store);
            view.pop_char(&mut store);
            view.blur();
            assert_eq!(store.get("q2").unwrap().answer.as_deref(), Some(""));
            assert!(view.shows_placeholder(&store));
            assert_eq!(store.validate(), vec!["q1", "q2"]);
        }

        #[test]
        fn test_focus_and_blur_do_not_touch_store() {
            let store = store();
            let before = store.snapshot();
            let mut view = FreeTextInput::new("q2");
            view.focus();
            view.blur();
            assert_eq!(store.snapshot(), before);
        }

        #[test]
        fn test_newline_kept() {
            let mut store = store();
            let mut view = FreeTextInput::new("q2");
            view.set_text("line one", &mut store);
            view.push_char('\n', &mut store);
            assert_eq!(view.text(&store), "line one\n");
        }

        #[test]
        fn test_unknown_id_reports_failure() {
            let mut store = store();
            let before = store.snapshot();
            let mut view = FreeTextInput::new("nope");
            assert!(!view.push_char('a', &mut store));
            assert_eq!(store.snapshot(), before);
        }
    }

    mod answer_input {
        use super::*;

        #[test]
        fn test_variant_follows_kind() {
            let choice = AnswerInput::for_question(
                &Question::new("q1", "t", QuestionKind::OkNotOkNa),
                DEFAULT_COMMENT_LIMIT,
            );
            let text = AnswerInput::for_question(
                &Question::new("q2", "t", QuestionKind::Input),
                DEFAULT_COMMENT_LIMIT,
            );
            assert!(matches!(choice, AnswerInput::Choice(_)));
            assert!(matches!(text, AnswerInput::FreeText(_)));
            assert_eq!(choice.id(), "q1");
            assert_eq!(text.id(), "q2");
        }

        #[test]
        fn test_blur_resets_choice_part() {
            let mut input = AnswerInput::Choice(ChoiceInput::new("q1", DEFAULT_COMMENT_LIMIT));
            input.focus();
            if let AnswerInput::Choice(c) = &mut input {
                c.part = ChoicePart::Comment;
            }
            assert!(input.accepts_text());
            input.blur();
            assert!(!input.is_focused());
            assert!(!input.accepts_text());
        }
    }
}
