//! HTTP clients for the Azure services behind the workshop demos
//!
//! One client per service: chat completions (Azure OpenAI), layout analysis
//! (Document Intelligence), short-audio transcription (Speech) and text
//! translation (Translator). They share the reqwest plumbing and the
//! subscription-key header conventions in [`client`].

pub mod client;
pub mod docintel;
pub mod error;
pub mod openai;
pub mod speech;
pub mod translator;

pub use client::{
    DEFAULT_TIMEOUT, LONG_TIMEOUT, SUBSCRIPTION_KEY_HEADER, SUBSCRIPTION_REGION_HEADER,
};
pub use docintel::{AnalyzeOperation, AnalyzeResult, DocIntelClient, content_type_for};
pub use error::{Result, ServiceError};
pub use openai::{ChatClient, ChatMessage, ChatRequest, ChatResponse};
pub use speech::{RecognitionResult, SpeechClient};
pub use translator::{DetectedLanguage, TranslationItem, TranslatorClient, confidence_band};
