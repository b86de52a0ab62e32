//! Go modules detector

use super::{LanguageCandidate, SignalDetector};
use crate::findings::Language;
use crate::index::FileIndex;
use std::path::Path;

pub struct GoDetector;

impl SignalDetector for GoDetector {
    fn name(&self) -> &str {
        "go"
    }

    fn detect(&self, index: &FileIndex, _root: &Path) -> Option<LanguageCandidate> {
        index.first_named("go.mod")?;

        let mut candidate = LanguageCandidate::new(Language::Go);
        candidate.framework = "Go (Modules)".to_string();
        candidate.confidence += 0.6;
        candidate.detected_files.push("go.mod".to_string());

        // main.go may live anywhere, cmd/<name>/main.go being the usual spot
        if let Some(entry) = index.first_named("main.go") {
            candidate.entry_point = Some(entry.to_string());
            candidate.confidence += 0.2;
        }

        Some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_nested_main_entry_point() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("go.mod"), b"module example.com/app\n").unwrap();
        fs::create_dir_all(dir.path().join("cmd/server")).unwrap();
        fs::write(dir.path().join("cmd/server/main.go"), b"package main\n").unwrap();

        let index = FileIndex::build(dir.path()).unwrap();
        let candidate = GoDetector.detect(&index, dir.path()).unwrap();

        assert_eq!(candidate.language, Language::Go);
        assert_eq!(candidate.framework, "Go (Modules)");
        assert_eq!(candidate.entry_point.as_deref(), Some("cmd/server/main.go"));
        assert!((candidate.confidence - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_go_files_without_module_are_ignored() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("main.go"), b"package main\n").unwrap();

        let index = FileIndex::build(dir.path()).unwrap();
        assert!(GoDetector.detect(&index, dir.path()).is_none());
    }
}
