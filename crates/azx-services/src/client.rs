//! Shared HTTP plumbing for the Azure service clients

use std::time::Duration;

use crate::error::{Result, ServiceError};

/// Header carrying the subscription key on Cognitive Services calls.
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
/// Header carrying the resource region on Translator calls.
pub const SUBSCRIPTION_REGION_HEADER: &str = "Ocp-Apim-Subscription-Region";

/// Per-request timeout for ordinary calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
/// Per-request timeout for large-prompt chat calls (PII detection,
/// document summaries).
pub const LONG_TIMEOUT: Duration = Duration::from_secs(120);

const USER_AGENT: &str = concat!("azx/", env!("CARGO_PKG_VERSION"));

/// Build the shared reqwest client. Timeouts are set per request, so one
/// client serves both quick and long-running calls.
pub fn http_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder().user_agent(USER_AGENT).build()?)
}

/// Map a non-2xx response to [`ServiceError::Api`], keeping the body text
/// because Azure puts the useful diagnostics there.
pub async fn ensure_success(
    service: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ServiceError::Api {
        service,
        status: status.as_u16(),
        body,
    })
}
