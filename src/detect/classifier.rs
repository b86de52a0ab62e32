//! Workspace classifier
//!
//! Builds the index, runs every detector, and selects the winning
//! candidate. Detectors accumulate independent candidates; the highest
//! confidence wins, ties broken by the fixed priority order (Node → Python
//! → Go → PHP → Ruby → Swift → HTML). The HTML fallback is considered only
//! when no primary detector matched.

use super::{
    GoDetector, HtmlDetector, LanguageCandidate, NodeDetector, PhpDetector, PythonDetector,
    RubyDetector, SignalDetector, SwiftDetector,
};
use crate::findings::{Architecture, Findings};
use crate::index::{FileIndex, IndexError};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

const PYTHON_MANIFESTS: &[&str] = &[
    "requirements.txt",
    "pyproject.toml",
    "setup.py",
    "Pipfile",
    "poetry.lock",
    "manage.py",
];

pub struct Classifier {
    detectors: Vec<Box<dyn SignalDetector>>,
}

impl Classifier {
    /// All detectors in priority order.
    pub fn with_defaults() -> Self {
        Self {
            detectors: vec![
                Box::new(NodeDetector),
                Box::new(PythonDetector),
                Box::new(GoDetector),
                Box::new(PhpDetector),
                Box::new(RubyDetector),
                Box::new(SwiftDetector),
                Box::new(HtmlDetector),
            ],
        }
    }

    /// Classify the workspace at `root`. Only an unreadable root fails;
    /// every other anomaly degrades to fewer fields or lower confidence.
    pub fn classify(&self, root: &Path) -> Result<Findings, IndexError> {
        let start = Instant::now();
        let index = FileIndex::build(root)?;

        let mut primary: Vec<LanguageCandidate> = Vec::new();
        let mut fallback: Vec<LanguageCandidate> = Vec::new();

        for detector in &self.detectors {
            if let Some(candidate) = detector.detect(&index, root) {
                debug!(
                    detector = detector.name(),
                    language = %candidate.language,
                    framework = %candidate.framework,
                    confidence = candidate.confidence,
                    "Detector produced a candidate"
                );
                if detector.is_fallback() {
                    fallback.push(candidate);
                } else {
                    primary.push(candidate);
                }
            }
        }

        let pool = if primary.is_empty() { &fallback } else { &primary };
        let winner = select_candidate(pool);

        let mut findings = Findings::new(index);
        for candidate in primary.iter().chain(fallback.iter()) {
            for file in &candidate.detected_files {
                if !findings.detected_files.contains(file) {
                    findings.detected_files.push(file.clone());
                }
            }
        }
        if let Some(winner) = winner {
            findings.language = winner.language;
            findings.framework = winner.framework.clone();
            findings.entry_point = winner.entry_point.clone();
            findings.confidence = winner.confidence;
            findings.dependencies = winner.dependencies.clone();
        }

        self.apply_post_passes(&mut findings);

        info!(
            root = %root.display(),
            language = %findings.language,
            framework = %findings.framework,
            confidence = findings.confidence,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Classification complete"
        );

        Ok(findings)
    }

    fn apply_post_passes(&self, findings: &mut Findings) {
        let has_node = findings.file_index.has_named("package.json");
        let has_python = PYTHON_MANIFESTS
            .iter()
            .any(|m| findings.file_index.has_named(m));
        if has_node && has_python {
            findings.architecture = Architecture::Monorepo;
        }

        if findings.file_index.contains("Dockerfile") {
            if !findings.detected_files.iter().any(|f| f == "Dockerfile") {
                findings.detected_files.push("Dockerfile".to_string());
            }
            if findings.framework == "Unknown" {
                findings.framework = "Existing Container".to_string();
                findings.confidence = findings.confidence.max(0.5);
            }
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Highest confidence wins; on a tie the earlier candidate (priority order)
/// is kept.
fn select_candidate(pool: &[LanguageCandidate]) -> Option<&LanguageCandidate> {
    let mut best: Option<&LanguageCandidate> = None;
    for candidate in pool {
        match best {
            Some(current) if candidate.confidence > current.confidence => {
                best = Some(candidate);
            }
            None => best = Some(candidate),
            _ => {}
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::findings::Language;
    use std::fs;
    use tempfile::TempDir;

    fn classify(dir: &TempDir) -> Findings {
        Classifier::with_defaults().classify(dir.path()).unwrap()
    }

    #[test]
    fn test_empty_workspace_is_unknown() {
        let dir = TempDir::new().unwrap();
        let findings = classify(&dir);
        assert_eq!(findings.language, Language::Unknown);
        assert_eq!(findings.framework, "Unknown");
        assert_eq!(findings.confidence, 0.0);
        assert!(findings.detected_files.is_empty());
    }

    #[test]
    fn test_unreadable_root_is_fatal() {
        let result = Classifier::with_defaults().classify(Path::new("/nonexistent/workspace"));
        assert!(result.is_err());
    }

    #[test]
    fn test_strongest_candidate_wins_over_weaker_signal() {
        // A full Node project (0.9) next to a loose PHP file (0.6)
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("package.json"),
            br#"{"dependencies": {"express": "^4.18.0"}}"#,
        )
        .unwrap();
        fs::write(dir.path().join("index.js"), b"").unwrap();
        fs::write(dir.path().join("legacy.php"), b"<?php").unwrap();

        let findings = classify(&dir);
        assert_eq!(findings.language, Language::JavaScript);
        assert_eq!(findings.framework, "Express");
        // The losing ecosystem's signal is still on record
        assert!(findings.detected_files.iter().any(|f| f == "legacy.php"));
    }

    #[test]
    fn test_priority_order_breaks_ties() {
        // Bare composer.json and bare Gemfile both score 0.6; PHP comes
        // first in the priority order
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("composer.json"), b"{}").unwrap();
        fs::write(dir.path().join("Gemfile"), b"").unwrap();

        let findings = classify(&dir);
        assert_eq!(findings.language, Language::Php);
    }

    #[test]
    fn test_html_fallback_only_without_primary() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), b"<html></html>").unwrap();

        let findings = classify(&dir);
        assert_eq!(findings.language, Language::Html);
        assert_eq!(findings.framework, "Static Website");
        assert_eq!(findings.entry_point.as_deref(), Some("index.html"));

        fs::write(dir.path().join("go.mod"), b"module x\n").unwrap();
        let findings = classify(&dir);
        assert_eq!(findings.language, Language::Go);
    }

    #[test]
    fn test_monorepo_post_pass() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), b"{}").unwrap();
        fs::write(dir.path().join("requirements.txt"), b"fastapi\n").unwrap();

        let findings = classify(&dir);
        assert_eq!(findings.architecture, Architecture::Monorepo);
    }

    #[test]
    fn test_existing_dockerfile_fallback_framework() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Dockerfile"), b"FROM scratch\n").unwrap();

        let findings = classify(&dir);
        assert_eq!(findings.language, Language::Unknown);
        assert_eq!(findings.framework, "Existing Container");
        assert!(findings.confidence >= 0.5);
        assert!(findings.detected_files.iter().any(|f| f == "Dockerfile"));
    }

    #[test]
    fn test_existing_dockerfile_does_not_override_detected_framework() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Dockerfile"), b"FROM node:20\n").unwrap();
        fs::write(
            dir.path().join("package.json"),
            br#"{"dependencies": {"react": "^18.0.0"}}"#,
        )
        .unwrap();

        let findings = classify(&dir);
        assert_eq!(findings.framework, "React");
        assert!(findings.detected_files.iter().any(|f| f == "Dockerfile"));
    }

    #[test]
    fn test_classification_is_idempotent() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("requirements.txt"), b"django\n").unwrap();
        fs::write(dir.path().join("manage.py"), b"").unwrap();

        let first = classify(&dir).to_report();
        let second = classify(&dir).to_report();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_entry_point_is_indexed_path() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("go.mod"), b"module x\n").unwrap();
        fs::create_dir_all(dir.path().join("cmd/server")).unwrap();
        fs::write(dir.path().join("cmd/server/main.go"), b"package main\n").unwrap();

        let findings = classify(&dir);
        let entry = findings.entry_point.as_deref().unwrap();
        assert_eq!(entry, "cmd/server/main.go");
        assert!(findings.file_index.contains(entry));
    }
}
