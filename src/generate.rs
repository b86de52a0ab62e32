//! Deployment artifact generation
//!
//! Write-once semantics: an existing Dockerfile or .dockerignore is never
//! touched, and a failure on one artifact never blocks the other. The
//! outcome reports per-artifact booleans instead of errors, per the
//! degrade-gracefully policy.

use crate::findings::Findings;
use crate::templates::TemplateRegistry;
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

/// Per-artifact write outcome of one generation call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenerationOutcome {
    pub dockerfile_written: bool,
    pub dockerignore_written: bool,
}

/// Render and write `Dockerfile` and `.dockerignore` into `root`.
pub fn generate_deployment_files(
    root: &Path,
    findings: &Findings,
    registry: &TemplateRegistry,
) -> GenerationOutcome {
    let mut outcome = GenerationOutcome::default();

    let dockerfile_path = root.join("Dockerfile");
    if dockerfile_path.exists() {
        info!("Dockerfile already exists. Skipping generation.");
    } else {
        match registry.render_dockerfile(findings) {
            Some(content) => {
                outcome.dockerfile_written = write_artifact(&dockerfile_path, &content);
            }
            None => {
                warn!(
                    language = %findings.language,
                    "No Dockerfile strategy for detected language, skipping"
                );
            }
        }
    }

    let ignore_path = root.join(".dockerignore");
    if ignore_path.exists() {
        info!(".dockerignore already exists. Skipping generation.");
    } else {
        let content = registry.render_dockerignore(findings);
        outcome.dockerignore_written = write_artifact(&ignore_path, &content);
    }

    outcome
}

fn write_artifact(path: &Path, content: &str) -> bool {
    match std::fs::write(path, content) {
        Ok(()) => {
            info!(path = %path.display(), "Generated deployment artifact");
            true
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Failed to write deployment artifact");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::findings::Language;
    use crate::index::FileIndex;
    use std::fs;
    use tempfile::TempDir;

    fn findings_for(language: Language, framework: &str) -> Findings {
        let mut findings = Findings::new(FileIndex::default());
        findings.language = language;
        findings.framework = framework.to_string();
        findings.detected_files = vec!["requirements.txt".to_string()];
        findings
    }

    #[test]
    fn test_generates_both_artifacts() {
        let dir = TempDir::new().unwrap();
        let findings = findings_for(Language::Python, "FastAPI");
        let registry = TemplateRegistry::with_defaults();

        let outcome = generate_deployment_files(dir.path(), &findings, &registry);
        assert!(outcome.dockerfile_written);
        assert!(outcome.dockerignore_written);
        assert!(dir.path().join("Dockerfile").exists());
        assert!(dir.path().join(".dockerignore").exists());
    }

    #[test]
    fn test_existing_dockerfile_untouched_byte_for_byte() {
        let dir = TempDir::new().unwrap();
        let original = b"FROM my/custom:image\n";
        fs::write(dir.path().join("Dockerfile"), original).unwrap();

        let findings = findings_for(Language::Python, "Flask");
        let registry = TemplateRegistry::with_defaults();
        let outcome = generate_deployment_files(dir.path(), &findings, &registry);

        assert!(!outcome.dockerfile_written);
        assert!(outcome.dockerignore_written);
        assert_eq!(fs::read(dir.path().join("Dockerfile")).unwrap(), original);
    }

    #[test]
    fn test_template_miss_skips_dockerfile_only() {
        let dir = TempDir::new().unwrap();
        let findings = findings_for(Language::Go, "Go (Modules)");
        let registry = TemplateRegistry::with_defaults();

        let outcome = generate_deployment_files(dir.path(), &findings, &registry);
        assert!(!outcome.dockerfile_written);
        assert!(outcome.dockerignore_written);
        assert!(!dir.path().join("Dockerfile").exists());
    }

    #[test]
    fn test_unknown_language_still_gets_ignore_file() {
        let dir = TempDir::new().unwrap();
        let findings = Findings::new(FileIndex::default());
        let registry = TemplateRegistry::with_defaults();

        let outcome = generate_deployment_files(dir.path(), &findings, &registry);
        assert!(!outcome.dockerfile_written);
        assert!(outcome.dockerignore_written);
        let content = fs::read_to_string(dir.path().join(".dockerignore")).unwrap();
        assert!(content.contains(".git"));
    }
}
