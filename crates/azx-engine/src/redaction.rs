//! Document redaction pipeline
//!
//! Extracts text with Document Intelligence, runs the model-based and
//! pattern detectors over it, merges the findings, and writes a masked copy
//! plus a JSON report that never repeats the redacted text.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use time::OffsetDateTime;
use time::macros::format_description;
use tracing::{info, warn};

use azx_config::Settings;
use azx_core::{PiiEntity, RedactionReport};
use azx_redact::{PatternDetector, PiiDetector, mask, merge_entities};
use azx_services::{ChatClient, DocIntelClient, LONG_TIMEOUT, content_type_for};

use crate::detect::AiDetector;

/// Everything one redaction run produced.
#[derive(Debug)]
pub struct RedactionOutcome {
    pub original_file: PathBuf,
    pub redacted_file: PathBuf,
    pub report_file: PathBuf,
    pub entities: Vec<PiiEntity>,
    pub report: RedactionReport,
    /// blake3 of the original document bytes, for audit trails.
    pub document_hash: String,
    /// Completion time, UTC, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
}

pub struct RedactionPipeline {
    docintel: DocIntelClient,
    ai: Box<dyn PiiDetector>,
    patterns: PatternDetector,
    model: String,
}

impl RedactionPipeline {
    /// Build the pipeline from resolved settings. The chat client gets the
    /// long timeout because detection prompts carry the whole document text.
    pub fn new(settings: &Settings) -> Result<Self> {
        let docintel = DocIntelClient::new(settings.docintel()?)?;
        let chat = ChatClient::new(settings.openai()?)?.with_timeout(LONG_TIMEOUT);
        Ok(Self::from_clients(docintel, chat, settings.docintel_model()))
    }

    pub fn from_clients(docintel: DocIntelClient, chat: ChatClient, model: String) -> Self {
        Self {
            docintel,
            ai: Box::new(AiDetector::new(chat)),
            patterns: PatternDetector::new(),
            model,
        }
    }

    /// Redact `input`, writing the masked text and the report either to the
    /// given paths or to `<stem>_redacted.txt` / `<stem>_pii_report.json`
    /// next to the input.
    pub async fn run(
        &self,
        input: &Path,
        output: Option<&Path>,
        report_path: Option<&Path>,
    ) -> Result<RedactionOutcome> {
        let bytes = tokio::fs::read(input)
            .await
            .with_context(|| format!("Failed to read {}", input.display()))?;
        let document_hash = blake3::hash(&bytes).to_hex().to_string();

        info!(file = %input.display(), model = %self.model, "analyzing document");
        let operation = self
            .docintel
            .analyze_bytes(bytes, content_type_for(input), &self.model)
            .await?;
        let text = match &operation.analyze_result {
            Some(result) => result.text_content(),
            None => String::new(),
        };
        info!(chars = text.len(), "extracted document text");
        if text.is_empty() {
            warn!("document produced no text, nothing to redact");
        }

        let ai_entities = self.ai.detect(&text).await?;
        info!(
            detector = self.ai.name(),
            count = ai_entities.len(),
            "model detection done"
        );
        let pattern_entities = self.patterns.detect(&text).await?;
        let entities = merge_entities(ai_entities, pattern_entities);
        info!(count = entities.len(), "unique PII entities after merge");

        let redacted = mask(&text, &entities);
        let report = RedactionReport::from_entities(&entities);

        let redacted_file = match output {
            Some(path) => path.to_path_buf(),
            None => sibling(input, "_redacted.txt"),
        };
        let report_file = match report_path {
            Some(path) => path.to_path_buf(),
            None => sibling(input, "_pii_report.json"),
        };

        write_text(&redacted_file, &redacted).await?;
        write_text(&report_file, &serde_json::to_string_pretty(&report)?).await?;
        info!(
            redacted = %redacted_file.display(),
            report = %report_file.display(),
            "redaction artifacts written"
        );

        Ok(RedactionOutcome {
            original_file: input.to_path_buf(),
            redacted_file,
            report_file,
            entities,
            report,
            document_hash,
            timestamp: timestamp(),
        })
    }
}

async fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// `<stem><suffix>` next to the input file.
fn sibling(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    input.with_file_name(format!("{}{}", stem, suffix))
}

fn timestamp() -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    OffsetDateTime::now_utc().format(&format).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sibling_paths() {
        assert_eq!(
            sibling(Path::new("/tmp/docs/receipt.pdf"), "_redacted.txt"),
            PathBuf::from("/tmp/docs/receipt_redacted.txt")
        );
        assert_eq!(
            sibling(Path::new("scan.png"), "_pii_report.json"),
            PathBuf::from("scan_pii_report.json")
        );
    }

    #[test]
    fn test_timestamp_shape() {
        let ts = timestamp();
        assert_eq!(ts.len(), 19);
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], " ");
        assert_eq!(&ts[13..14], ":");
    }
}
