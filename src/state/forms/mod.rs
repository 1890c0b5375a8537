//! Form domain layer
//!
//! Questions, the per-session answer store, the input views that edit it,
//! and the timesheet entry form.

mod field;
mod inputs;
mod question;
mod session;
mod store;
mod timesheet;

pub use field::FormField;
pub use inputs::{AnswerInput, ChoiceInput, ChoicePart, DEFAULT_COMMENT_LIMIT};
pub use question::{Choice, FormQuestion, Question, QuestionKind};
pub use session::{FormSession, SessionError};
pub use store::FormAnswerStore;
pub use timesheet::TimesheetForm;
