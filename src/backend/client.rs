//! HTTP client for the document database and blob store
//!
//! Both services speak JSON over HTTP. The database holds form templates,
//! submissions and timesheets; the blob store serves icons and generated
//! report files by path.

use super::traits::{Backend, MAX_ICON_BYTES};
use super::types::{
    CreatedResponse, ExportResponse, FormSummary, FormTemplate, Submission, SubmissionSummary,
    TimesheetEntry,
};
use crate::config::AppConfig;
use crate::error::BackendError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Default database address
const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8080";

/// Default blob store address
const DEFAULT_STORAGE_URL: &str = "http://127.0.0.1:8080/blobs";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the remote database and blob store
pub struct BackendClient {
    http: Client,
    backend_url: String,
    storage_url: String,
    api_key: Option<String>,
}

impl BackendClient {
    /// Create a client from config, letting environment variables override it
    pub fn new(config: &AppConfig) -> Result<Self> {
        let backend_url = resolve_setting(
            std::env::var("FIELDCHECK_BACKEND_URL").ok(),
            config.backend_url.clone(),
            DEFAULT_BACKEND_URL,
        );
        let storage_url = resolve_setting(
            std::env::var("FIELDCHECK_STORAGE_URL").ok(),
            config.storage_url.clone(),
            DEFAULT_STORAGE_URL,
        );
        let api_key = std::env::var("FIELDCHECK_API_KEY")
            .ok()
            .or_else(|| config.api_key.clone())
            .filter(|k| !k.is_empty());

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("fieldcheck-tui/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        tracing::info!("Using database at {backend_url}, blob store at {storage_url}");

        Ok(Self {
            http,
            backend_url,
            storage_url,
            api_key,
        })
    }

    fn db(&self, segments: &[&str]) -> Result<Url, BackendError> {
        endpoint(&self.backend_url, segments)
    }

    fn blob(&self, path: &str) -> Result<Url, BackendError> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        endpoint(&self.storage_url, &segments)
    }

    /// Attach auth, send, and turn non-success statuses into errors
    async fn send(&self, request: RequestBuilder, url: &Url) -> Result<Response, BackendError> {
        let request = match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        };

        let response = request.send().await.map_err(|source| BackendError::Request {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{url} returned {status}");
            return Err(BackendError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, BackendError> {
        let response = self.send(self.http.get(url.clone()), &url).await?;
        decode_json(response, &url).await
    }

    async fn post_json<B, T>(&self, url: Url, body: &B) -> Result<T, BackendError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self.send(self.http.post(url.clone()).json(body), &url).await?;
        decode_json(response, &url).await
    }

    /// Stream a body into memory, giving up as soon as it passes `limit`
    async fn get_bytes(&self, url: Url, limit: Option<u64>) -> Result<Vec<u8>, BackendError> {
        let mut response = self.send(self.http.get(url.clone()), &url).await?;

        if let (Some(limit), Some(size)) = (limit, response.content_length()) {
            check_size(&url, size, limit)?;
        }

        // Content-Length may be absent or wrong, so count while reading
        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|source| BackendError::Request {
                url: url.to_string(),
                source,
            })?
        {
            append_limited(&mut body, &chunk, &url, limit)?;
        }
        Ok(body)
    }
}

#[async_trait]
impl Backend for BackendClient {
    async fn list_forms(&self) -> Result<Vec<FormSummary>, BackendError> {
        self.get_json(self.db(&["forms"])?).await
    }

    async fn fetch_form(&self, form_id: &str) -> Result<FormTemplate, BackendError> {
        self.get_json(self.db(&["forms", form_id])?).await
    }

    async fn submit_form(&self, submission: &Submission) -> Result<String, BackendError> {
        let created: CreatedResponse = self
            .post_json(self.db(&["submissions"])?, submission)
            .await?;
        tracing::info!(
            "Submission {} for form '{}' stored as {}",
            submission.id,
            submission.form_id,
            created.id
        );
        Ok(created.id)
    }

    async fn list_submissions(
        &self,
        operator: &str,
    ) -> Result<Vec<SubmissionSummary>, BackendError> {
        let mut url = self.db(&["submissions"])?;
        url.query_pairs_mut().append_pair("operator", operator);
        self.get_json(url).await
    }

    async fn submit_timesheet(&self, entry: &TimesheetEntry) -> Result<String, BackendError> {
        let created: CreatedResponse = self.post_json(self.db(&["timesheets"])?, entry).await?;
        Ok(created.id)
    }

    async fn request_timesheet_export(&self, operator: &str) -> Result<String, BackendError> {
        let body = serde_json::json!({ "operator": operator });
        let export: ExportResponse = self
            .post_json(self.db(&["timesheets", "export"])?, &body)
            .await?;
        Ok(export.path)
    }

    async fn fetch_icon(&self, name: &str) -> Result<Vec<u8>, BackendError> {
        let url = endpoint(&self.storage_url, &["icons", name])?;
        self.get_bytes(url, Some(MAX_ICON_BYTES))
            .await
            .map_err(|e| match e {
                BackendError::TooLarge { size, limit, .. } => BackendError::TooLarge {
                    name: name.to_string(),
                    size,
                    limit,
                },
                other => other,
            })
    }

    async fn fetch_blob(&self, path: &str) -> Result<Vec<u8>, BackendError> {
        self.get_bytes(self.blob(path)?, None).await
    }
}

/// Environment beats config, config beats the built-in default
fn resolve_setting(env: Option<String>, config: Option<String>, default: &str) -> String {
    env.filter(|v| !v.trim().is_empty())
        .or(config.filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| default.to_string())
}

/// Append percent-encoded path segments to a base URL
fn endpoint(base: &str, segments: &[&str]) -> Result<Url, BackendError> {
    let invalid = |message: String| BackendError::InvalidUrl {
        url: base.to_string(),
        message,
    };
    let mut url = Url::parse(base).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| invalid("cannot be a base".to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn check_size(url: &Url, size: u64, limit: u64) -> Result<(), BackendError> {
    if size > limit {
        return Err(BackendError::TooLarge {
            name: url.to_string(),
            size,
            limit,
        });
    }
    Ok(())
}

fn append_limited(
    body: &mut Vec<u8>,
    chunk: &[u8],
    url: &Url,
    limit: Option<u64>,
) -> Result<(), BackendError> {
    if let Some(limit) = limit {
        check_size(url, (body.len() + chunk.len()) as u64, limit)?;
    }
    body.extend_from_slice(chunk);
    Ok(())
}

async fn decode_json<T: DeserializeOwned>(response: Response, url: &Url) -> Result<T, BackendError> {
    response.json::<T>().await.map_err(|e| BackendError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}
