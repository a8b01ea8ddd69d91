//! PII detection and masking
//!
//! The redaction flow is detector-agnostic: any [`PiiDetector`] yields
//! [`azx_core::PiiEntity`] spans, the spans from several detectors are
//! merged with near-duplicate suppression, and the surviving spans are
//! spliced out of the text. The built-in [`PatternDetector`] is the regex
//! fallback that backs up the model-based detector.

pub mod detector;
pub mod mask;
pub mod span;

pub use detector::{PATTERN_CONFIDENCE, PatternDetector, PiiDetector};
pub use mask::mask;
pub use span::{merge_entities, normalize_span};
