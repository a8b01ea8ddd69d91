//! Configuration loading for azx
//!
//! All configuration comes from dotenv-style files plus the process
//! environment. A value from the env file wins over an inherited
//! environment variable, so a workshop checkout is self-contained.
//! Each Azure service resolves its own typed settings on demand; nothing
//! fails until a command actually needs a credential.

mod envfile;

pub use envfile::EnvFile;

use std::path::Path;

use azx_core::{Error, Result};

/// API version sent to Azure OpenAI when `AZURE_OPENAI_API_VERSION` is unset.
pub const DEFAULT_OPENAI_API_VERSION: &str = "2024-02-15-preview";
/// Document Intelligence model used when `DOCINTEL_MODEL` is unset.
pub const DEFAULT_DOCINTEL_MODEL: &str = "prebuilt-layout";
/// Sample text for the translator demo.
pub const DEFAULT_TRANSLATE_TEXT: &str = "Good morning, welcome to the AI workshop";
/// Target language for the translator demo.
pub const DEFAULT_TRANSLATE_TO: &str = "fr";

/// Required variables per service, used by setup verification.
pub const REQUIRED_VARS: &[(&str, &[&str])] = &[
    (
        "Azure OpenAI",
        &[
            "AZURE_OPENAI_ENDPOINT",
            "AZURE_OPENAI_KEY",
            "AZURE_OPENAI_DEPLOYMENT",
        ],
    ),
    (
        "Document Intelligence",
        &["AZURE_DOCINTEL_ENDPOINT", "AZURE_DOCINTEL_KEY"],
    ),
    ("Speech", &["AZURE_SPEECH_KEY", "AZURE_SPEECH_REGION"]),
    (
        "Translator",
        &["AZURE_TRANSLATOR_KEY", "AZURE_TRANSLATOR_REGION"],
    ),
];

/// Resolved configuration source: one env file layered over the process
/// environment.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    env: EnvFile,
}

#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub endpoint: String,
    pub key: String,
    pub deployment: String,
    pub api_version: String,
}

#[derive(Debug, Clone)]
pub struct DocIntelSettings {
    pub endpoint: String,
    pub key: String,
}

#[derive(Debug, Clone)]
pub struct SpeechSettings {
    pub key: String,
    pub region: String,
}

#[derive(Debug, Clone)]
pub struct TranslatorSettings {
    pub key: String,
    pub region: String,
}

impl Settings {
    /// Settings backed by an explicit env file, or by discovery when `None`.
    pub fn load(env_file: Option<&Path>) -> Self {
        let env = match env_file {
            Some(path) => EnvFile::load(path),
            None => EnvFile::discover(),
        };
        Self { env }
    }

    pub fn from_env_file(env: EnvFile) -> Self {
        Self { env }
    }

    pub fn env_file(&self) -> &EnvFile {
        &self.env
    }

    /// File value first, process environment second.
    pub fn lookup(&self, key: &str) -> Option<String> {
        if let Some(value) = self.env.get(key) {
            return Some(value.to_string());
        }
        std::env::var(key).ok()
    }

    fn require(&self, key: &str) -> Result<String> {
        self.lookup(key)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| Error::MissingConfig(key.to_string()))
    }

    /// Like [`Self::require`], but strips a trailing `/` so URL building can
    /// always append path segments.
    fn require_endpoint(&self, key: &str) -> Result<String> {
        Ok(self.require(key)?.trim_end_matches('/').to_string())
    }

    pub fn openai(&self) -> Result<OpenAiSettings> {
        Ok(OpenAiSettings {
            endpoint: self.require_endpoint("AZURE_OPENAI_ENDPOINT")?,
            key: self.require("AZURE_OPENAI_KEY")?,
            deployment: self.require("AZURE_OPENAI_DEPLOYMENT")?,
            api_version: self
                .lookup("AZURE_OPENAI_API_VERSION")
                .unwrap_or_else(|| DEFAULT_OPENAI_API_VERSION.to_string()),
        })
    }

    pub fn docintel(&self) -> Result<DocIntelSettings> {
        Ok(DocIntelSettings {
            endpoint: self.require_endpoint("AZURE_DOCINTEL_ENDPOINT")?,
            key: self.require("AZURE_DOCINTEL_KEY")?,
        })
    }

    pub fn speech(&self) -> Result<SpeechSettings> {
        Ok(SpeechSettings {
            key: self.require("AZURE_SPEECH_KEY")?,
            region: self.require("AZURE_SPEECH_REGION")?,
        })
    }

    pub fn translator(&self) -> Result<TranslatorSettings> {
        Ok(TranslatorSettings {
            key: self.require("AZURE_TRANSLATOR_KEY")?,
            region: self.require("AZURE_TRANSLATOR_REGION")?,
        })
    }

    // Optional demo inputs with workshop defaults.

    pub fn docintel_model(&self) -> String {
        self.lookup("DOCINTEL_MODEL")
            .unwrap_or_else(|| DEFAULT_DOCINTEL_MODEL.to_string())
    }

    pub fn docintel_file(&self) -> Option<String> {
        self.lookup("DOCINTEL_FILE")
    }

    pub fn speech_audio_path(&self) -> Option<String> {
        self.lookup("SPEECH_AUDIO_PATH")
    }

    pub fn translate_text(&self) -> String {
        self.lookup("TRANSLATE_TEXT")
            .unwrap_or_else(|| DEFAULT_TRANSLATE_TEXT.to_string())
    }

    pub fn translate_to(&self) -> String {
        self.lookup("TRANSLATE_TO")
            .unwrap_or_else(|| DEFAULT_TRANSLATE_TO.to_string())
    }
}

/// A value still carrying a `your-...` template placeholder counts as
/// unconfigured.
pub fn is_placeholder(value: &str) -> bool {
    value.to_lowercase().contains("your-")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(content: &str) -> Settings {
        Settings::from_env_file(EnvFile::parse(content))
    }

    #[test]
    fn test_openai_settings_strip_trailing_slash() {
        let settings = settings(
            "AZURE_OPENAI_ENDPOINT=https://demo.openai.azure.com/\n\
             AZURE_OPENAI_KEY=k1\n\
             AZURE_OPENAI_DEPLOYMENT=gpt-4o\n",
        );
        let openai = settings.openai().unwrap();
        assert_eq!(openai.endpoint, "https://demo.openai.azure.com");
        assert_eq!(openai.deployment, "gpt-4o");
        assert_eq!(openai.api_version, DEFAULT_OPENAI_API_VERSION);
    }

    #[test]
    fn test_openai_api_version_override() {
        let settings = settings(
            "AZURE_OPENAI_ENDPOINT=https://demo.openai.azure.com\n\
             AZURE_OPENAI_KEY=k1\n\
             AZURE_OPENAI_DEPLOYMENT=gpt-4o\n\
             AZURE_OPENAI_API_VERSION=2024-06-01\n",
        );
        assert_eq!(settings.openai().unwrap().api_version, "2024-06-01");
    }

    #[test]
    fn test_missing_variable_names_the_key() {
        let settings = settings("AZURE_DOCINTEL_ENDPOINT=https://di.example.com\n");
        let err = settings.docintel().unwrap_err();
        assert!(err.to_string().contains("AZURE_DOCINTEL_KEY"));
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let settings = settings("AZURE_SPEECH_KEY=\"  \"\nAZURE_SPEECH_REGION=eastus\n");
        assert!(settings.speech().is_err());
    }

    #[test]
    fn test_file_value_wins_over_process_env() {
        // Unique name so parallel tests cannot collide on it
        unsafe { std::env::set_var("AZX_TEST_PRECEDENCE_VAR", "from-process") };
        let settings = settings("AZX_TEST_PRECEDENCE_VAR=from-file\n");
        assert_eq!(
            settings.lookup("AZX_TEST_PRECEDENCE_VAR").as_deref(),
            Some("from-file")
        );
        unsafe { std::env::remove_var("AZX_TEST_PRECEDENCE_VAR") };
    }

    #[test]
    fn test_process_env_fallback() {
        unsafe { std::env::set_var("AZX_TEST_FALLBACK_VAR", "inherited") };
        let settings = settings("UNRELATED=1\n");
        assert_eq!(
            settings.lookup("AZX_TEST_FALLBACK_VAR").as_deref(),
            Some("inherited")
        );
        unsafe { std::env::remove_var("AZX_TEST_FALLBACK_VAR") };
    }

    #[test]
    fn test_demo_defaults() {
        let settings = settings("");
        assert_eq!(settings.docintel_model(), "prebuilt-layout");
        assert_eq!(settings.translate_to(), "fr");
        assert_eq!(
            settings.translate_text(),
            "Good morning, welcome to the AI workshop"
        );
        assert!(settings.docintel_file().is_none());
    }

    #[test]
    fn test_placeholder_detection() {
        assert!(is_placeholder("your-key-here"));
        assert!(is_placeholder("https://YOUR-resource.openai.azure.com"));
        assert!(!is_placeholder("sk-abcdef123456"));
    }
}
