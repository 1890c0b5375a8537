//! Form answer store
//!
//! Holds the authoritative list of `FormQuestion` records for one form-filling
//! session. Input views never keep their own copy of an answer: they resolve
//! the record by id here on every read and every edit.

use super::question::{AnswerField, FormQuestion, Question};
use crate::error::StoreError;
use std::collections::HashSet;

/// Ordered question-answer records; order is display order, ids are unique
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormAnswerStore {
    questions: Vec<FormQuestion>,
}

impl FormAnswerStore {
    /// Build one blank `FormQuestion` per template question.
    ///
    /// A repeated id keeps its first occurrence; later ones are dropped with a
    /// warning so id lookups stay unambiguous.
    pub fn initialize(questions: &[Question]) -> Self {
        let mut seen = HashSet::new();
        let questions = questions
            .iter()
            .filter(|q| {
                let fresh = seen.insert(q.id.as_str());
                if !fresh {
                    tracing::warn!("Dropping duplicate question id '{}' from form", q.id);
                }
                fresh
            })
            .map(FormQuestion::from)
            .collect();
        Self { questions }
    }

    /// Set `field` of the question with `id` to `value`.
    pub fn update(&mut self, id: &str, field: AnswerField, value: &str) -> Result<(), StoreError> {
        let question = self
            .questions
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;

        let slot = match field {
            AnswerField::Answer => &mut question.answer,
            AnswerField::Comment => &mut question.comment,
        };
        *slot = Some(value.to_string());
        Ok(())
    }

    /// Current state of every question, in original order
    pub fn snapshot(&self) -> Vec<FormQuestion> {
        self.questions.clone()
    }

    /// Ids of required questions that still lack an answer
    pub fn validate(&self) -> Vec<String> {
        self.questions
            .iter()
            .filter(|q| q.required && q.is_unanswered())
            .map(|q| q.id.clone())
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&FormQuestion> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormQuestion> {
        self.questions.iter()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn answered_count(&self) -> usize {
        self.questions.iter().filter(|q| !q.is_unanswered()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::question::QuestionKind;

    fn sample_questions() -> Vec<Question> {
        vec![
            Question::new("q1", "Ladder secured", QuestionKind::OkNotOkNa),
            Question::new("q2", "Describe site condition", QuestionKind::Input),
            Question::new("q3", "Extinguisher present", QuestionKind::OkNotOkNa),
        ]
    }

    mod initialize {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_empty_sequence_is_legal() {
            let store = FormAnswerStore::initialize(&[]);
            assert!(store.is_empty());
            assert!(store.snapshot().is_empty());
            assert!(store.validate().is_empty());
        }

        #[test]
        fn test_one_record_per_question_in_order() {
            let store = FormAnswerStore::initialize(&sample_questions());
            let ids: Vec<_> = store.iter().map(|q| q.id.as_str()).collect();
            assert_eq!(ids, vec!["q1", "q2", "q3"]);
            assert!(store.iter().all(|q| q.answer.is_none() && q.comment.is_none()));
        }

        #[test]
        fn test_duplicate_ids_keep_first() {
            let mut questions = sample_questions();
            questions.push(Question::new("q1", "Duplicate", QuestionKind::Input));
            let store = FormAnswerStore::initialize(&questions);
            assert_eq!(store.len(), 3);
            assert_eq!(store.get("q1").unwrap().text, "Ladder secured");
        }
    }

    mod update {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_update_answer_changes_only_target() {
            let mut store = FormAnswerStore::initialize(&sample_questions());
            store.update("q3", AnswerField::Answer, "NA").unwrap();
            let before = store.snapshot();

            store.update("q1", AnswerField::Answer, "OK").unwrap();
            let after = store.snapshot();

            assert_eq!(after[0].answer.as_deref(), Some("OK"));
            assert_eq!(after[1], before[1]);
            assert_eq!(after[2], before[2]);
        }

        #[test]
        fn test_update_comment_keeps_raw_text() {
            let mut store = FormAnswerStore::initialize(&sample_questions());
            store
                .update("q1", AnswerField::Comment, "  loose bolt  ")
                .unwrap();
            let q = store.get("q1").unwrap();
            assert_eq!(q.comment.as_deref(), Some("  loose bolt  "));
            assert!(q.answer.is_none());
        }

        #[test]
        fn test_update_unknown_id_is_not_found_and_noop() {
            let mut store = FormAnswerStore::initialize(&sample_questions());
            store.update("q2", AnswerField::Answer, "Dry").unwrap();
            let before = store.snapshot();

            let err = store
                .update("missing", AnswerField::Answer, "OK")
                .unwrap_err();

            assert_eq!(
                err,
                StoreError::NotFound {
                    id: "missing".to_string()
                }
            );
            assert_eq!(store.snapshot(), before);
        }

        #[test]
        fn test_updates_preserve_length_and_order() {
            let mut store = FormAnswerStore::initialize(&sample_questions());
            for (id, value) in [("q2", "a"), ("q1", "NOK"), ("q2", "b"), ("q3", "OK")] {
                store.update(id, AnswerField::Answer, value).unwrap();
            }
            let ids: Vec<_> = store.snapshot().into_iter().map(|q| q.id).collect();
            assert_eq!(ids, vec!["q1", "q2", "q3"]);
        }

        #[test]
        fn test_overwrite_answer() {
            let mut store = FormAnswerStore::initialize(&sample_questions());
            store.update("q1", AnswerField::Answer, "OK").unwrap();
            store.update("q1", AnswerField::Answer, "NOK").unwrap();
            assert_eq!(store.get("q1").unwrap().answer.as_deref(), Some("NOK"));
        }
    }

    mod snapshot {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_scenario_two_questions() {
            let mut store = FormAnswerStore::initialize(&[
                Question::new("q1", "Valve closed", QuestionKind::OkNotOkNa),
                Question::new("q2", "Actions taken", QuestionKind::Input),
            ]);
            store.update("q1", AnswerField::Answer, "OK").unwrap();
            store.update("q2", AnswerField::Answer, "Clear site").unwrap();

            let snapshot: Vec<_> = store
                .snapshot()
                .into_iter()
                .map(|q| (q.id, q.answer, q.comment))
                .collect();

            assert_eq!(
                snapshot,
                vec![
                    ("q1".to_string(), Some("OK".to_string()), None),
                    ("q2".to_string(), Some("Clear site".to_string()), None),
                ]
            );
        }

        #[test]
        fn test_snapshot_is_detached_copy() {
            let mut store = FormAnswerStore::initialize(&sample_questions());
            let snapshot = store.snapshot();
            store.update("q1", AnswerField::Answer, "OK").unwrap();
            assert!(snapshot[0].answer.is_none());
        }
    }

    mod validate {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_all_required_unanswered() {
            let store = FormAnswerStore::initialize(&sample_questions());
            assert_eq!(store.validate(), vec!["q1", "q2", "q3"]);
        }

        #[test]
        fn test_optional_questions_are_skipped() {
            let store = FormAnswerStore::initialize(&[
                Question::new("q1", "Ladder", QuestionKind::OkNotOkNa),
                Question::new("q2", "Notes", QuestionKind::Input).optional(),
            ]);
            assert_eq!(store.validate(), vec!["q1"]);
        }

        #[test]
        fn test_blank_answer_still_missing() {
            let mut store = FormAnswerStore::initialize(&sample_questions());
            store.update("q1", AnswerField::Answer, "OK").unwrap();
            store.update("q2", AnswerField::Answer, "   ").unwrap();
            store.update("q3", AnswerField::Answer, "NA").unwrap();
            assert_eq!(store.validate(), vec!["q2"]);
            assert_eq!(store.answered_count(), 2);
        }

        #[test]
        fn test_comment_alone_does_not_answer() {
            let mut store = FormAnswerStore::initialize(&sample_questions());
            store.update("q1", AnswerField::Comment, "see photo").unwrap();
            assert!(store.validate().contains(&"q1".to_string()));
        }
    }
}
