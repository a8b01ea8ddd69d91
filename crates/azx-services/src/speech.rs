//! Azure Speech-to-Text, short-audio REST endpoint
//!
//! Good for WAV clips up to about a minute. The endpoint host is derived
//! from the configured region.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use azx_config::SpeechSettings;

use crate::client::{DEFAULT_TIMEOUT, SUBSCRIPTION_KEY_HEADER, ensure_success, http_client};
use crate::error::Result;

const SERVICE: &str = "Speech";

/// Recognition language used when the caller does not pick one.
pub const DEFAULT_LANGUAGE: &str = "en-US";

const WAV_CONTENT_TYPE: &str = "audio/wav; codecs=audio/pcm; samplerate=16000";

/// Short-audio recognition outcome. A non-`Success` status is a normal
/// result (silence, noise), not a transport error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecognitionResult {
    pub recognition_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
}

impl RecognitionResult {
    pub fn is_success(&self) -> bool {
        self.recognition_status == "Success"
    }

    /// The transcript, present only when recognition succeeded.
    pub fn transcript(&self) -> Option<&str> {
        if self.is_success() {
            self.display_text.as_deref()
        } else {
            None
        }
    }
}

pub struct SpeechClient {
    http: reqwest::Client,
    settings: SpeechSettings,
    endpoint: String,
}

impl SpeechClient {
    pub fn new(settings: SpeechSettings) -> Result<Self> {
        let endpoint = format!("https://{}.stt.speech.microsoft.com", settings.region);
        Ok(Self {
            http: http_client()?,
            settings,
            endpoint,
        })
    }

    /// Point the client at a different host instead of the regional one.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub async fn transcribe(&self, audio: &Path, language: &str) -> Result<RecognitionResult> {
        let bytes = tokio::fs::read(audio).await?;
        self.transcribe_bytes(bytes, language).await
    }

    pub async fn transcribe_bytes(
        &self,
        bytes: Vec<u8>,
        language: &str,
    ) -> Result<RecognitionResult> {
        let url = format!(
            "{}/speech/recognition/conversation/cognitiveservices/v1?language={}",
            self.endpoint, language
        );
        info!(language, bytes = bytes.len(), "sending short-audio recognition request");
        let response = self
            .http
            .post(url)
            .header(SUBSCRIPTION_KEY_HEADER, &self.settings.key)
            .header("Content-Type", WAV_CONTENT_TYPE)
            .header("Accept", "application/json")
            .timeout(DEFAULT_TIMEOUT)
            .body(bytes)
            .send()
            .await?;
        let response = ensure_success(SERVICE, response).await?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_only_on_success() {
        let result: RecognitionResult = serde_json::from_value(serde_json::json!({
            "RecognitionStatus": "Success",
            "DisplayText": "Hello world.",
            "Offset": 300000,
            "Duration": 11000000
        }))
        .unwrap();
        assert!(result.is_success());
        assert_eq!(result.transcript(), Some("Hello world."));
    }

    #[test]
    fn test_no_match_has_no_transcript() {
        let result: RecognitionResult = serde_json::from_value(serde_json::json!({
            "RecognitionStatus": "NoMatch"
        }))
        .unwrap();
        assert!(!result.is_success());
        assert_eq!(result.transcript(), None);
    }
}
