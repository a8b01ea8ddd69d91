pub mod analyze;
pub mod chat;
pub mod check;
pub mod completions;
pub mod redact;
pub mod transcribe;
pub mod translate;
