//! Core types for azx
//!
//! This crate contains the shared domain model:
//! - PII kinds and detected entity spans
//! - The redaction report written next to redacted documents
//! - The common error type

pub mod error;
pub mod pii;
pub mod report;

pub use error::{Error, Result};
pub use pii::{PiiEntity, PiiKind};
pub use report::{REPORT_MASK, RedactionReport, ReportEntity};
