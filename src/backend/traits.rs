//! Trait abstraction for the backend to enable mocking in tests

use super::types::{FormSummary, FormTemplate, Submission, SubmissionSummary, TimesheetEntry};
use crate::error::BackendError;
use async_trait::async_trait;

/// Largest icon the client will download
pub const MAX_ICON_BYTES: u64 = 1024 * 1024;

/// Document database and blob store operations used by the app
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Backend: Send + Sync {
    /// List the forms available to fill in
    async fn list_forms(&self) -> Result<Vec<FormSummary>, BackendError>;

    /// Fetch one form template with its questions
    async fn fetch_form(&self, form_id: &str) -> Result<FormTemplate, BackendError>;

    /// Store a completed submission, returning the stored id
    async fn submit_form(&self, submission: &Submission) -> Result<String, BackendError>;

    /// List past submissions by an operator
    async fn list_submissions(&self, operator: &str)
        -> Result<Vec<SubmissionSummary>, BackendError>;

    /// Store a timesheet entry, returning the stored id
    async fn submit_timesheet(&self, entry: &TimesheetEntry) -> Result<String, BackendError>;

    /// Ask the server to generate a timesheet export; returns its blob path
    async fn request_timesheet_export(&self, operator: &str) -> Result<String, BackendError>;

    /// Download icon bytes by name, capped at `MAX_ICON_BYTES`
    async fn fetch_icon(&self, name: &str) -> Result<Vec<u8>, BackendError>;

    /// Download any blob by its stored path
    async fn fetch_blob(&self, path: &str) -> Result<Vec<u8>, BackendError>;
}
