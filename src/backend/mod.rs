//! Backend module for the document database and blob store

mod client;
mod traits;
mod types;

pub use client::BackendClient;
pub use traits::Backend;
pub use types::{FormSummary, FormTemplate, Submission, SubmissionSummary, TimesheetEntry};

#[cfg(test)]
pub use traits::MockBackend;
