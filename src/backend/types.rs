//! Records exchanged with the document database

use crate::state::{FormQuestion, Question};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Form list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Full form definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Completed inspection as written to the database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub form_id: String,
    pub form_name: String,
    pub operator: String,
    pub signed_by: String,
    pub started_at: DateTime<Utc>,
    pub submitted_at: DateTime<Utc>,
    pub answers: Vec<FormQuestion>,
}

/// Past submission as listed by the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionSummary {
    pub id: String,
    pub form_name: String,
    pub submitted_at: DateTime<Utc>,
    /// Blob path of the generated report, once the server has produced it
    #[serde(default)]
    pub report_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetEntry {
    pub id: String,
    pub operator: String,
    pub date: NaiveDate,
    pub hours: f32,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Body returned by create endpoints
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CreatedResponse {
    pub id: String,
}

/// Body returned when the server prepares an export file
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ExportResponse {
    pub path: String,
}
