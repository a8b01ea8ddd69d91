//! Dotenv-style key/value files

use std::path::{Path, PathBuf};
use tracing::debug;

/// Locations probed by [`EnvFile::discover`], in order.
const DISCOVERY_PATHS: &[&str] = &["config/.env", ".env"];

/// Ordered `KEY=VALUE` pairs parsed from a dotenv-style file.
#[derive(Debug, Clone, Default)]
pub struct EnvFile {
    entries: Vec<(String, String)>,
    path: Option<PathBuf>,
}

impl EnvFile {
    /// Parse the file at `path`. A missing or unreadable file yields an
    /// empty set, so callers can fall back to the process environment.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        let mut file = Self::parse(&content);
        file.path = Some(path.to_path_buf());
        debug!(path = %path.display(), entries = file.len(), "loaded env file");
        file
    }

    /// Probe `config/.env` then `.env` relative to the working directory;
    /// the first file that exists wins.
    pub fn discover() -> Self {
        for candidate in DISCOVERY_PATHS {
            if Path::new(candidate).exists() {
                return Self::load(candidate);
            }
        }
        Self::default()
    }

    /// Parse dotenv content. Blank lines and `#` comments are skipped, the
    /// split is on the first `=`, and one layer of matching single or double
    /// quotes is stripped from the value. Lines without `=` and entries with
    /// an empty key or value are ignored.
    pub fn parse(content: &str) -> Self {
        let mut entries = Vec::new();
        for raw in content.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = unquote(value.trim());
            if key.is_empty() || value.is_empty() {
                continue;
            }
            entries.push((key.to_string(), value.to_string()));
        }
        Self {
            entries,
            path: None,
        }
    }

    /// Value for `key`. When a key is assigned more than once the last
    /// assignment wins, like repeated exports in a shell.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Path the entries were loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn unquote(value: &str) -> &str {
    let stripped = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')));
    stripped.unwrap_or(value)
}
