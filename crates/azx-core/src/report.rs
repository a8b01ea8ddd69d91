//! Redaction report model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::pii::PiiEntity;

/// Placeholder written into report entries instead of the matched text, so
/// the report itself never leaks what was redacted.
pub const REPORT_MASK: &str = "***REDACTED***";

/// Summary of one redaction run, written as JSON next to the redacted file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionReport {
    pub total_redactions: usize,
    pub average_confidence: f64,
    pub by_type: BTreeMap<String, usize>,
    pub entities: Vec<ReportEntity>,
}

/// One redacted finding. `position` is `"start-end"` in byte offsets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntity {
    pub text: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub confidence: f64,
    pub position: String,
}

impl RedactionReport {
    /// Aggregate detected entities into a report. Counts are keyed by the
    /// kind's display name and the average confidence is rounded to three
    /// decimals.
    pub fn from_entities(entities: &[PiiEntity]) -> Self {
        let mut by_type: BTreeMap<String, usize> = BTreeMap::new();
        for entity in entities {
            *by_type
                .entry(entity.kind.display_name().to_string())
                .or_insert(0) += 1;
        }

        let total_redactions = entities.len();
        let average_confidence = if total_redactions > 0 {
            let sum: f64 = entities.iter().map(|e| e.confidence).sum();
            (sum / total_redactions as f64 * 1000.0).round() / 1000.0
        } else {
            0.0
        };

        let entities = entities
            .iter()
            .map(|entity| ReportEntity {
                text: REPORT_MASK.to_string(),
                entity_type: entity.kind.display_name().to_string(),
                confidence: entity.confidence,
                position: format!("{}-{}", entity.start, entity.end),
            })
            .collect();

        Self {
            total_redactions,
            average_confidence,
            by_type,
            entities,
        }
    }
}
