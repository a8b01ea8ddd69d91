//! Pipelines that combine the Azure clients into workshop workflows
//!
//! - [`RedactionPipeline`]: analyze a document, detect PII with the chat
//!   deployment plus the regex fallback, mask the text and write a report
//! - [`SummarizePipeline`]: analyze a document and summarize it for a
//!   business stakeholder

pub mod detect;
pub mod redaction;
pub mod summarize;

pub use detect::AiDetector;
pub use redaction::{RedactionOutcome, RedactionPipeline};
pub use summarize::{SummarizeOutcome, SummarizePipeline};
