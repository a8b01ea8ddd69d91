//! Azure Translator text translation

use serde::{Deserialize, Serialize};
use tracing::info;

use azx_config::TranslatorSettings;

use crate::client::{
    DEFAULT_TIMEOUT, SUBSCRIPTION_KEY_HEADER, SUBSCRIPTION_REGION_HEADER, ensure_success,
    http_client,
};
use crate::error::Result;

const SERVICE: &str = "Translator";

/// Global Translator endpoint. Calls carry the resource region in a header
/// rather than in the host name.
pub const GLOBAL_ENDPOINT: &str = "https://api.cognitive.microsofttranslator.com";

const API_VERSION: &str = "3.0";

#[derive(Debug, Serialize)]
struct TranslateBody<'a> {
    text: &'a str,
}

/// One element of the Translator response array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_language: Option<DetectedLanguage>,
    #[serde(default)]
    pub translations: Vec<TranslatedText>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedLanguage {
    pub language: String,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatedText {
    pub text: String,
    pub to: String,
}

/// Wording for a detected-language score, as shown to workshop attendees.
pub fn confidence_band(score: f64) -> &'static str {
    if score >= 0.9 {
        "very high"
    } else if score >= 0.7 {
        "high"
    } else if score >= 0.5 {
        "moderate"
    } else if score >= 0.3 {
        "low"
    } else {
        "very low"
    }
}

pub struct TranslatorClient {
    http: reqwest::Client,
    settings: TranslatorSettings,
    endpoint: String,
}

impl TranslatorClient {
    pub fn new(settings: TranslatorSettings) -> Result<Self> {
        Ok(Self {
            http: http_client()?,
            settings,
            endpoint: GLOBAL_ENDPOINT.to_string(),
        })
    }

    /// Use another base URL instead of the global endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Translate `text` into the `to` language, letting the service detect
    /// the source language.
    pub async fn translate(&self, text: &str, to: &str) -> Result<Vec<TranslationItem>> {
        info!(to, chars = text.len(), "sending translate request");
        let response = self
            .http
            .post(format!("{}/translate", self.endpoint))
            .query(&[("api-version", API_VERSION), ("to", to)])
            .header(SUBSCRIPTION_KEY_HEADER, &self.settings.key)
            .header(SUBSCRIPTION_REGION_HEADER, &self.settings.region)
            .timeout(DEFAULT_TIMEOUT)
            .json(&[TranslateBody { text }])
            .send()
            .await?;
        let response = ensure_success(SERVICE, response).await?;
        Ok(response.json().await?)
    }
}
