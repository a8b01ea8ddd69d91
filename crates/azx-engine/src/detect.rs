//! Model-based PII detection
//!
//! Asks the chat deployment for a JSON array of findings, then repairs the
//! reported spans locally. Model offsets drift on longer documents, so
//! nothing from the reply is trusted until it is re-anchored in the text.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use azx_core::{PiiEntity, PiiKind, Result};
use azx_redact::{PiiDetector, normalize_span};
use azx_services::{ChatClient, ChatMessage, ChatRequest};

const SYSTEM_PROMPT: &str =
    "You are an expert PII detection system. Return only valid JSON arrays.";

const DETECT_TEMPERATURE: f64 = 0.1;
const DETECT_MAX_TOKENS: u32 = 2000;

/// Entity shape the model is asked to emit. Positions are signed because
/// models occasionally produce negative offsets.
#[derive(Debug, Deserialize)]
struct RawEntity {
    text: String,
    pii_type: String,
    confidence: f64,
    start_position: i64,
    end_position: i64,
}

fn detection_prompt(text: &str) -> String {
    format!(
        r#"You are a PII (Personally Identifiable Information) detection expert. Analyze the following text and identify ALL PII entities.

For each PII entity found, provide:
1. The exact text of the PII
2. The type of PII (SSN, EMAIL, PHONE, ADDRESS, CREDIT_CARD, NAME, DATE_OF_BIRTH, DRIVER_LICENSE, PASSPORT, BANK_ACCOUNT, IP_ADDRESS, URL)
3. Confidence level (0.0 to 1.0)
4. Start and end character positions in the text

Return ONLY a JSON array with this format:
[
  {{
    "text": "exact PII text",
    "pii_type": "PII_TYPE",
    "confidence": 0.95,
    "start_position": 123,
    "end_position": 135
  }}
]

Text to analyze:
{}"#,
        text
    )
}

/// Strip a markdown code fence wrapper, when the model added one.
fn strip_code_fences(reply: &str) -> &str {
    if reply.contains("```json") {
        reply
            .split("```json")
            .nth(1)
            .and_then(|rest| rest.split("```").next())
            .unwrap_or(reply)
    } else if reply.contains("```") {
        reply.split("```").nth(1).unwrap_or(reply)
    } else {
        reply
    }
}

/// Parse the model reply into entities anchored in `text`.
///
/// An unparseable reply yields an empty list rather than an error, since
/// the pattern fallback still runs. Individual entries with unknown types,
/// malformed fields or snippets that do not occur in the text are dropped.
fn parse_detection_reply(reply: &str, text: &str) -> Vec<PiiEntity> {
    let payload = strip_code_fences(reply).trim();
    let items: Vec<serde_json::Value> = match serde_json::from_str(payload) {
        Ok(items) => items,
        Err(err) => {
            warn!(error = %err, "model reply was not a JSON array, ignoring it");
            return Vec::new();
        }
    };

    let mut entities = Vec::new();
    for item in items {
        let raw: RawEntity = match serde_json::from_value(item) {
            Ok(raw) => raw,
            Err(err) => {
                debug!(error = %err, "skipping malformed entity");
                continue;
            }
        };
        let Ok(kind) = raw.pii_type.parse::<PiiKind>() else {
            debug!(pii_type = %raw.pii_type, "skipping unknown PII type");
            continue;
        };

        let mut entity = PiiEntity::new(
            raw.text,
            kind,
            raw.confidence,
            raw.start_position.max(0) as usize,
            raw.end_position.max(0) as usize,
        );
        if normalize_span(text, &mut entity) {
            entities.push(entity);
        } else {
            debug!(kind = %kind, "dropping entity whose text is not in the document");
        }
    }
    entities
}

/// Chat-completion-backed detector.
pub struct AiDetector {
    chat: ChatClient,
}

impl AiDetector {
    pub fn new(chat: ChatClient) -> Self {
        Self { chat }
    }
}

#[async_trait]
impl PiiDetector for AiDetector {
    async fn detect(&self, text: &str) -> Result<Vec<PiiEntity>> {
        let request = ChatRequest {
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(detection_prompt(text)),
            ],
            temperature: DETECT_TEMPERATURE,
            max_tokens: Some(DETECT_MAX_TOKENS),
        };
        let response = self
            .chat
            .complete(&request)
            .await
            .map_err(|e| anyhow::anyhow!("PII detection request failed: {}", e))?;
        let content = response
            .first_content()
            .map_err(|e| anyhow::anyhow!("PII detection returned no reply: {}", e))?;

        let entities = parse_detection_reply(content, text);
        debug!(count = entities.len(), "model detection finished");
        Ok(entities)
    }

    fn name(&self) -> &'static str {
        "azure-openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fence() {
        let reply = "```json\n[{\"a\": 1}]\n```";
        assert_eq!(strip_code_fences(reply).trim(), "[{\"a\": 1}]");
    }

    #[test]
    fn test_strip_bare_fence() {
        let reply = "```\n[]\n```";
        assert_eq!(strip_code_fences(reply).trim(), "[]");
    }

    #[test]
    fn test_strip_leaves_plain_reply() {
        assert_eq!(strip_code_fences("[1, 2]"), "[1, 2]");
    }

    #[test]
    fn test_parse_valid_reply() {
        let text = "Contact John at j@d.io";
        let reply = r#"[{"text": "John", "pii_type": "NAME", "confidence": 0.92,
                        "start_position": 8, "end_position": 12}]"#;
        let entities = parse_detection_reply(reply, text);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].kind, PiiKind::Name);
        assert_eq!((entities[0].start, entities[0].end), (8, 12));
    }

    #[test]
    fn test_parse_garbage_reply_is_empty() {
        assert!(parse_detection_reply("I found no PII, great news!", "text").is_empty());
    }

    #[test]
    fn test_parse_skips_unknown_type_keeps_rest() {
        let text = "id 123 mail a@b.io";
        let reply = r#"[
            {"text": "123", "pii_type": "RECEIPT_NUMBER", "confidence": 0.5, "start_position": 3, "end_position": 6},
            {"text": "a@b.io", "pii_type": "EMAIL", "confidence": 0.9, "start_position": 12, "end_position": 18}
        ]"#;
        let entities = parse_detection_reply(reply, text);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].kind, PiiKind::Email);
    }

    #[test]
    fn test_parse_skips_malformed_entry() {
        let text = "mail a@b.io";
        let reply = r#"[
            {"text": "a@b.io", "pii_type": "EMAIL", "confidence": "high",
             "start_position": 5, "end_position": 11},
            {"text": "a@b.io", "pii_type": "EMAIL", "confidence": 0.9,
             "start_position": 5, "end_position": 11}
        ]"#;
        let entities = parse_detection_reply(reply, text);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].confidence, 0.9);
    }

    #[test]
    fn test_parse_relocates_bad_span() {
        let text = "greetings from a@b.io today";
        let reply = r#"[{"text": "a@b.io", "pii_type": "EMAIL", "confidence": 0.9,
                        "start_position": 2, "end_position": 8}]"#;
        let entities = parse_detection_reply(reply, text);
        assert_eq!(entities.len(), 1);
        assert_eq!(&text[entities[0].start..entities[0].end], "a@b.io");
    }

    #[test]
    fn test_parse_clamps_negative_positions() {
        let text = "a@b.io first thing";
        let reply = r#"[{"text": "a@b.io", "pii_type": "EMAIL", "confidence": 0.9,
                        "start_position": -3, "end_position": 6}]"#;
        let entities = parse_detection_reply(reply, text);
        assert_eq!(entities.len(), 1);
        assert_eq!((entities[0].start, entities[0].end), (0, 6));
    }

    #[test]
    fn test_parse_drops_snippet_not_in_text() {
        let reply = r#"[{"text": "Jane", "pii_type": "NAME", "confidence": 0.9,
                        "start_position": 0, "end_position": 4}]"#;
        assert!(parse_detection_reply(reply, "no names here").is_empty());
    }

    #[test]
    fn test_prompt_embeds_text_and_format() {
        let prompt = detection_prompt("SAMPLE DOC");
        assert!(prompt.contains("Text to analyze:\nSAMPLE DOC"));
        assert!(prompt.contains("\"pii_type\": \"PII_TYPE\""));
        assert!(prompt.ends_with("SAMPLE DOC"));
    }
}
