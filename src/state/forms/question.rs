//! Question definitions and the mutable per-session answer record

use serde::{Deserialize, Serialize};

/// Answer shape a question expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionKind {
    /// OK / Not OK / NA checklist item with an optional comment
    OkNotOkNa,
    /// Free-text answer
    Input,
}

/// Immutable question as defined by the form template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

impl Question {
    pub fn new(id: &str, text: &str, kind: QuestionKind) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            kind,
            required: true,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// Working copy of a question plus whatever the operator has entered so far
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormQuestion {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(skip)]
    pub required: bool,
    pub answer: Option<String>,
    pub comment: Option<String>,
}

impl From<&Question> for FormQuestion {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id.clone(),
            text: question.text.clone(),
            kind: question.kind,
            required: question.required,
            answer: None,
            comment: None,
        }
    }
}

impl FormQuestion {
    /// True when the answer is absent or only whitespace
    pub fn is_unanswered(&self) -> bool {
        self.answer.as_deref().map_or(true, |a| a.trim().is_empty())
    }
}

/// Which part of a `FormQuestion` an edit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerField {
    Answer,
    Comment,
}

/// The three mutually exclusive checklist outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Ok,
    NotOk,
    Na,
}

impl Choice {
    pub const ALL: [Choice; 3] = [Choice::Ok, Choice::NotOk, Choice::Na];

    /// Literal token persisted as the answer
    pub fn token(self) -> &'static str {
        match self {
            Choice::Ok => "OK",
            Choice::NotOk => "NOK",
            Choice::Na => "NA",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "OK" => Some(Choice::Ok),
            "NOK" => Some(Choice::NotOk),
            "NA" => Some(Choice::Na),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Choice::Ok => 0,
            Choice::NotOk => 1,
            Choice::Na => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % 3]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + 2) % 3]
    }
}
