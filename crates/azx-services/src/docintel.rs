//! Azure Document Intelligence layout analysis
//!
//! The analyze call is asynchronous on the service side: submitting a
//! document returns an `operation-location` URL, which is polled until the
//! operation settles.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use azx_config::DocIntelSettings;

use crate::client::{DEFAULT_TIMEOUT, SUBSCRIPTION_KEY_HEADER, ensure_success, http_client};
use crate::error::{Result, ServiceError};

const SERVICE: &str = "Document Intelligence";

/// Analyze API version the layout model is pinned to.
pub const API_VERSION: &str = "2023-07-31";

const POLL_INTERVAL: Duration = Duration::from_secs(2);
const MAX_POLLS: u32 = 30;

/// Analyze operation state as returned by the operation-location URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeOperation {
    pub status: String,
    #[serde(rename = "analyzeResult", skip_serializing_if = "Option::is_none")]
    pub analyze_result: Option<AnalyzeResult>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(rename = "keyValuePairs", default)]
    pub key_value_pairs: Vec<serde_json::Value>,
    #[serde(default)]
    pub tables: Vec<serde_json::Value>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub content: String,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub lines: Vec<Line>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    #[serde(default)]
    pub content: String,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl Default for AnalyzeResult {
    fn default() -> Self {
        Self {
            content: None,
            paragraphs: Vec::new(),
            pages: Vec::new(),
            key_value_pairs: Vec::new(),
            tables: Vec::new(),
            extra: serde_json::json!({}),
        }
    }
}

impl AnalyzeResult {
    /// Plain text of the document: paragraph contents joined by newlines,
    /// falling back to page lines when the model returned no paragraphs.
    pub fn text_content(&self) -> String {
        if !self.paragraphs.is_empty() {
            let joined = self
                .paragraphs
                .iter()
                .map(|p| p.content.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            return joined.trim().to_string();
        }

        let mut text = String::new();
        for page in &self.pages {
            for line in &page.lines {
                text.push_str(&line.content);
                text.push('\n');
            }
        }
        text.trim().to_string()
    }

    /// Compact payload for summarization prompts: pages, key/value pairs and
    /// tables in full, but only the first five paragraphs.
    pub fn compact_summary(&self) -> serde_json::Value {
        let paragraphs: Vec<&Paragraph> = self.paragraphs.iter().take(5).collect();
        serde_json::json!({
            "pages": self.pages,
            "keyValuePairs": self.key_value_pairs,
            "tables": self.tables,
            "paragraphs": paragraphs,
        })
    }
}

/// Content type by file extension; PDF is the default for anything
/// unrecognized.
pub fn content_type_for(path: &Path) -> &'static str {
    let name = path.to_string_lossy().to_lowercase();
    if name.ends_with(".png") || name.ends_with(".jpg") || name.ends_with(".jpeg") {
        "image/jpeg"
    } else if name.ends_with(".tiff") {
        "image/tiff"
    } else {
        "application/pdf"
    }
}

pub struct DocIntelClient {
    http: reqwest::Client,
    settings: DocIntelSettings,
    poll_interval: Duration,
    max_polls: u32,
}

impl DocIntelClient {
    pub fn new(settings: DocIntelSettings) -> Result<Self> {
        Ok(Self {
            http: http_client()?,
            settings,
            poll_interval: POLL_INTERVAL,
            max_polls: MAX_POLLS,
        })
    }

    /// Override the poll cadence. Tests shrink this to avoid multi-second
    /// sleeps.
    pub fn with_polling(mut self, interval: Duration, max_polls: u32) -> Self {
        self.poll_interval = interval;
        self.max_polls = max_polls;
        self
    }

    fn analyze_url(&self, model: &str) -> String {
        format!(
            "{}/formrecognizer/documentModels/{}:analyze?api-version={}",
            self.settings.endpoint, model, API_VERSION
        )
    }

    /// Submit a document file and poll until analysis settles.
    pub async fn analyze(&self, file: &Path, model: &str) -> Result<AnalyzeOperation> {
        let bytes = tokio::fs::read(file).await?;
        self.analyze_bytes(bytes, content_type_for(file), model).await
    }

    /// Submit raw document bytes and poll until analysis settles.
    pub async fn analyze_bytes(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
        model: &str,
    ) -> Result<AnalyzeOperation> {
        info!(model, content_type, bytes = bytes.len(), "submitting analyze request");
        let response = self
            .http
            .post(self.analyze_url(model))
            .header(SUBSCRIPTION_KEY_HEADER, &self.settings.key)
            .header("Content-Type", content_type)
            .timeout(DEFAULT_TIMEOUT)
            .body(bytes)
            .send()
            .await?;
        let response = ensure_success(SERVICE, response).await?;

        let operation_location = response
            .headers()
            .get("operation-location")
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string())
            .ok_or(ServiceError::MissingOperationLocation { service: SERVICE })?;

        self.poll(&operation_location).await
    }

    async fn poll(&self, operation_location: &str) -> Result<AnalyzeOperation> {
        for attempt in 0..self.max_polls {
            let response = self
                .http
                .get(operation_location)
                .header(SUBSCRIPTION_KEY_HEADER, &self.settings.key)
                .timeout(DEFAULT_TIMEOUT)
                .send()
                .await?;
            let response = ensure_success(SERVICE, response).await?;
            let body = response.text().await?;
            let operation: AnalyzeOperation = serde_json::from_str(&body)?;

            // Status casing differs between API versions
            let status = operation.status.to_lowercase();
            debug!(attempt, status = %status, "analyze poll");
            match status.as_str() {
                "succeeded" => return Ok(operation),
                "failed" => return Err(ServiceError::AnalyzeFailed { body }),
                _ => tokio::time::sleep(self.poll_interval).await,
            }
        }
        Err(ServiceError::PollTimeout {
            attempts: self.max_polls,
        })
    }
}
