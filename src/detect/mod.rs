//! Signal detectors and the classifier
//!
//! One detector per ecosystem. Each consumes the shared [`FileIndex`] and
//! produces an independent [`LanguageCandidate`]; the classifier picks the
//! strongest candidate, so detectors never overwrite each other's results.

mod classifier;
mod golang;
mod html;
mod node;
mod php;
mod python;
mod ruby;
mod swift;

pub use classifier::Classifier;
pub use golang::GoDetector;
pub use html::HtmlDetector;
pub use node::NodeDetector;
pub use php::PhpDetector;
pub use python::PythonDetector;
pub use ruby::RubyDetector;
pub use swift::SwiftDetector;

use crate::findings::Language;
use crate::index::FileIndex;
use std::path::Path;
use thiserror::Error;

/// A manifest file exists but could not be parsed. Never fatal; the caller
/// logs it and proceeds with "signal present, no dependency data".
#[derive(Debug, Error)]
pub enum ManifestParseError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed TOML in {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// One ecosystem's claim on the workspace.
#[derive(Debug, Clone)]
pub struct LanguageCandidate {
    pub language: Language,
    pub framework: String,
    pub entry_point: Option<String>,
    pub confidence: f64,
    pub detected_files: Vec<String>,
    pub dependencies: Vec<String>,
}

impl LanguageCandidate {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            framework: "Unknown".to_string(),
            entry_point: None,
            confidence: 0.0,
            detected_files: Vec::new(),
            dependencies: Vec::new(),
        }
    }
}

/// A single-ecosystem detector over the shared index.
pub trait SignalDetector: Send + Sync {
    /// Detector name for logging.
    fn name(&self) -> &str;

    /// Fallback detectors are only consulted when no primary detector
    /// produced a candidate.
    fn is_fallback(&self) -> bool {
        false
    }

    /// Inspect the index (and, for manifests, the files it points at) and
    /// return this ecosystem's candidate, or `None` when no signal matched.
    fn detect(&self, index: &FileIndex, root: &Path) -> Option<LanguageCandidate>;
}

/// First entry-point convention that resolves against the index, in the
/// order the names are given.
pub(crate) fn find_entry_point(index: &FileIndex, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .find_map(|name| index.first_named(name).map(String::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_entry_point_order_wins_over_sort_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.js"), b"").unwrap();
        fs::write(dir.path().join("server.js"), b"").unwrap();

        let index = FileIndex::build(dir.path()).unwrap();
        let entry = find_entry_point(&index, &["server.js", "index.js", "app.js", "main.js"]);
        assert_eq!(entry.as_deref(), Some("server.js"));
    }

    #[test]
    fn test_find_entry_point_none() {
        let dir = TempDir::new().unwrap();
        let index = FileIndex::build(dir.path()).unwrap();
        assert!(find_entry_point(&index, &["main.go"]).is_none());
    }
}
