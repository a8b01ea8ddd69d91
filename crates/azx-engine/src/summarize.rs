//! Analyze-and-summarize pipeline

use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use azx_config::Settings;
use azx_services::{
    AnalyzeOperation, AnalyzeResult, ChatClient, ChatMessage, ChatRequest, ChatResponse,
    DocIntelClient, LONG_TIMEOUT,
};

const SUMMARIZE_PROMPT: &str = "Summarize the following document for a business stakeholder. \
     Include who/what/when/amounts. Be concise:";

const SUMMARIZE_TEMPERATURE: f64 = 0.2;

/// Upper bound on the analysis payload embedded in the prompt, in bytes.
const MAX_PAYLOAD_LEN: usize = 12_000;

/// Raw analysis plus the model's summary of it.
#[derive(Debug, Serialize)]
pub struct SummarizeOutcome {
    pub docintel: AnalyzeOperation,
    pub summary: ChatResponse,
}

pub struct SummarizePipeline {
    docintel: DocIntelClient,
    chat: ChatClient,
    model: String,
}

impl SummarizePipeline {
    pub fn new(settings: &Settings) -> Result<Self> {
        let docintel = DocIntelClient::new(settings.docintel()?)?;
        let chat = ChatClient::new(settings.openai()?)?.with_timeout(LONG_TIMEOUT);
        Ok(Self::from_clients(docintel, chat, settings.docintel_model()))
    }

    pub fn from_clients(docintel: DocIntelClient, chat: ChatClient, model: String) -> Self {
        Self {
            docintel,
            chat,
            model,
        }
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub async fn run(&self, input: &Path) -> Result<SummarizeOutcome> {
        let operation = self.docintel.analyze(input, &self.model).await?;
        let summary = self.summarize(&operation).await?;
        Ok(SummarizeOutcome {
            docintel: operation,
            summary,
        })
    }

    /// Summarize an already-completed analysis. The compact payload keeps
    /// prompts well under the deployment's context limit.
    pub async fn summarize(&self, operation: &AnalyzeOperation) -> Result<ChatResponse> {
        let compact = operation
            .analyze_result
            .as_ref()
            .map(AnalyzeResult::compact_summary)
            .unwrap_or_else(|| AnalyzeResult::default().compact_summary());
        let serialized = serde_json::to_string(&compact)?;
        let payload = truncate_on_char_boundary(&serialized, MAX_PAYLOAD_LEN);
        info!(chars = payload.len(), "prompting for document summary");

        let request = ChatRequest {
            messages: vec![ChatMessage::user(format!(
                "{}\n\n{}",
                SUMMARIZE_PROMPT, payload
            ))],
            temperature: SUMMARIZE_TEMPERATURE,
            max_tokens: None,
        };
        Ok(self.chat.complete(&request).await?)
    }
}

/// Truncate to at most `max` bytes without splitting a character.
fn truncate_on_char_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_input_untouched() {
        assert_eq!(truncate_on_char_boundary("hello", 100), "hello");
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        // 'é' is two bytes; cutting at 5 would split it
        let s = "abcdéf";
        let cut = truncate_on_char_boundary(s, 5);
        assert_eq!(cut, "abcd");
        assert!(s.is_char_boundary(cut.len()));
    }

    #[test]
    fn test_truncate_exact_length() {
        assert_eq!(truncate_on_char_boundary("abcd", 4), "abcd");
    }
}
