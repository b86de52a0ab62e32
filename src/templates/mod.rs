//! Dockerfile rendering strategies
//!
//! One strategy per supported language, dispatched through a registry keyed
//! by the detected [`Language`]. A strategy renders both the Dockerfile and
//! the ignore list; languages without a strategy fall back to the default
//! ignore list and produce no Dockerfile at all.

mod node;
mod python;

pub use node::NodeTemplate;
pub use python::PythonTemplate;

use crate::findings::{Findings, Language};

/// Language-specific rendering of deployment artifacts.
pub trait DockerTemplate: Send + Sync {
    fn render_dockerfile(&self, findings: &Findings) -> String;

    fn render_dockerignore(&self, _findings: &Findings) -> String {
        default_dockerignore()
    }
}

/// Patterns that apply to any ecosystem: git metadata, dependency caches,
/// environment files, compiled bytecode, build output.
pub fn default_dockerignore() -> String {
    [
        ".git",
        "__pycache__",
        "node_modules",
        ".env",
        "*.pyc",
        ".pytest_cache",
        "dist",
        "build",
    ]
    .join("\n")
        + "\n"
}

/// Maps a detected language to its rendering strategy.
pub struct TemplateRegistry {
    templates: Vec<(Language, Box<dyn DockerTemplate>)>,
}

impl TemplateRegistry {
    pub fn with_defaults() -> Self {
        Self {
            templates: vec![
                (Language::Python, Box::new(PythonTemplate)),
                (Language::JavaScript, Box::new(NodeTemplate)),
            ],
        }
    }

    pub fn get(&self, language: Language) -> Option<&dyn DockerTemplate> {
        self.templates
            .iter()
            .find(|(lang, _)| *lang == language)
            .map(|(_, template)| template.as_ref())
    }

    /// `None` means no strategy exists for the findings' language; the
    /// caller must skip the Dockerfile rather than write empty content.
    pub fn render_dockerfile(&self, findings: &Findings) -> Option<String> {
        self.get(findings.language)
            .map(|template| template.render_dockerfile(findings))
    }

    /// Ignore list always renders; the default set covers unmatched
    /// languages.
    pub fn render_dockerignore(&self, findings: &Findings) -> String {
        match self.get(findings.language) {
            Some(template) => template.render_dockerignore(findings),
            None => default_dockerignore(),
        }
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Convert an entry-point path to Python module-path dot notation,
/// `app/main.py` becoming `app.main`.
pub(crate) fn module_path(entry_point: &str) -> String {
    let stripped = entry_point
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(entry_point);
    stripped.replace('/', ".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::FileIndex;

    fn findings_for(language: Language) -> Findings {
        let mut findings = Findings::new(FileIndex::default());
        findings.language = language;
        findings
    }

    #[test]
    fn test_registry_has_python_and_node() {
        let registry = TemplateRegistry::with_defaults();
        assert!(registry.get(Language::Python).is_some());
        assert!(registry.get(Language::JavaScript).is_some());
        assert!(registry.get(Language::Go).is_none());
    }

    #[test]
    fn test_no_strategy_means_no_dockerfile() {
        let registry = TemplateRegistry::with_defaults();
        let findings = findings_for(Language::Go);
        assert!(registry.render_dockerfile(&findings).is_none());
    }

    #[test]
    fn test_unmatched_language_gets_default_ignore_list() {
        let registry = TemplateRegistry::with_defaults();
        let content = registry.render_dockerignore(&findings_for(Language::Swift));
        assert!(content.contains(".git"));
        assert!(content.contains("node_modules"));
        assert!(content.contains("*.pyc"));
        assert!(content.ends_with('\n'));
    }

    #[test]
    fn test_module_path_conversion() {
        assert_eq!(module_path("main.py"), "main");
        assert_eq!(module_path("app/main.py"), "app.main");
        assert_eq!(module_path("backend/app/asgi.py"), "backend.app.asgi");
    }
}
