//! Python detector (pip, poetry, pipenv, Django's manage.py)

use super::{find_entry_point, LanguageCandidate, ManifestParseError, SignalDetector};
use crate::findings::Language;
use crate::index::FileIndex;
use regex::Regex;
use std::path::Path;
use tracing::warn;

const MANIFEST_SIGNALS: &[&str] = &[
    "requirements.txt",
    "pyproject.toml",
    "setup.py",
    "Pipfile",
    "poetry.lock",
    "manage.py",
];

const ENTRY_CANDIDATES: &[&str] = &["app.py", "main.py", "wsgi.py", "asgi.py", "manage.py"];

pub struct PythonDetector;

impl SignalDetector for PythonDetector {
    fn name(&self) -> &str {
        "python"
    }

    fn detect(&self, index: &FileIndex, root: &Path) -> Option<LanguageCandidate> {
        let present: Vec<&str> = MANIFEST_SIGNALS
            .iter()
            .copied()
            .filter(|signal| index.has_named(signal))
            .collect();
        if present.is_empty() {
            return None;
        }

        let mut candidate = LanguageCandidate::new(Language::Python);
        candidate.confidence += 0.4;
        candidate
            .detected_files
            .extend(present.iter().map(|s| s.to_string()));

        if let Some(entry) = find_entry_point(index, ENTRY_CANDIDATES) {
            candidate.entry_point = Some(entry);
            candidate.confidence += 0.2;
        }

        let (framework, named_match) = infer_framework(index, root, &present);
        candidate.framework = framework;
        if named_match {
            candidate.confidence += 0.3;
        }

        candidate.dependencies = parse_dependencies(index, root);

        Some(candidate)
    }
}

/// Framework inference: `manage.py` wins, then a substring scan of
/// `requirements.txt`, then poetry markers, then generic. The bool reports
/// whether a named framework matched (Django/FastAPI/Flask).
fn infer_framework(index: &FileIndex, root: &Path, present: &[&str]) -> (String, bool) {
    if present.contains(&"manage.py") {
        return ("Django".to_string(), true);
    }

    if let Some(req) = index.shallowest_named("requirements.txt") {
        if let Ok(content) = std::fs::read_to_string(root.join(req)) {
            let lowered = content.to_lowercase();
            if lowered.contains("fastapi") {
                return ("FastAPI".to_string(), true);
            }
            if lowered.contains("django") {
                return ("Django".to_string(), true);
            }
            if lowered.contains("flask") {
                return ("Flask".to_string(), true);
            }
        }
    }

    if present.contains(&"poetry.lock") || present.contains(&"pyproject.toml") {
        return ("Python (Poetry/Modern)".to_string(), false);
    }
    ("Python (Generic)".to_string(), false)
}

/// Dependency names from `requirements.txt`, falling back to
/// `pyproject.toml`. Parse failures degrade to an empty list.
fn parse_dependencies(index: &FileIndex, root: &Path) -> Vec<String> {
    if let Some(req) = index.shallowest_named("requirements.txt") {
        match std::fs::read_to_string(root.join(req)) {
            Ok(content) => return parse_requirements(&content),
            Err(err) => warn!(path = req, error = %err, "Failed to read requirements.txt"),
        }
    }

    if let Some(manifest) = index.shallowest_named("pyproject.toml") {
        match parse_pyproject(root, manifest) {
            Ok(deps) => return deps,
            Err(err) => {
                warn!(error = %err, "Skipping dependency data for unparseable pyproject.toml")
            }
        }
    }

    Vec::new()
}

fn parse_requirements(content: &str) -> Vec<String> {
    let dep_re = match Regex::new(r"^([a-zA-Z0-9_.-]+)") {
        Ok(re) => re,
        Err(_) => return Vec::new(),
    };

    let mut deps = Vec::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('-') {
            continue;
        }
        if let Some(caps) = dep_re.captures(trimmed) {
            let name = caps[1].to_string();
            if !deps.contains(&name) {
                deps.push(name);
            }
        }
    }
    deps
}

fn parse_pyproject(root: &Path, manifest: &str) -> Result<Vec<String>, ManifestParseError> {
    let content =
        std::fs::read_to_string(root.join(manifest)).map_err(|source| ManifestParseError::Read {
            path: manifest.to_string(),
            source,
        })?;
    let parsed: toml::Value =
        toml::from_str(&content).map_err(|source| ManifestParseError::Toml {
            path: manifest.to_string(),
            source,
        })?;

    let mut deps = Vec::new();

    // PEP 621: [project] dependencies = ["flask>=2.0", ...]
    if let Some(list) = parsed
        .get("project")
        .and_then(|p| p.get("dependencies"))
        .and_then(|d| d.as_array())
    {
        let name_re = Regex::new(r"^([a-zA-Z0-9_.-]+)").ok();
        for spec in list.iter().filter_map(|v| v.as_str()) {
            if let Some(caps) = name_re.as_ref().and_then(|re| re.captures(spec.trim())) {
                let name = caps[1].to_string();
                if !deps.contains(&name) {
                    deps.push(name);
                }
            }
        }
    }

    // [tool.poetry.dependencies], skipping the python version pin
    if let Some(table) = parsed
        .get("tool")
        .and_then(|t| t.get("poetry"))
        .and_then(|p| p.get("dependencies"))
        .and_then(|d| d.as_table())
    {
        for name in table.keys() {
            if name != "python" && !deps.contains(name) {
                deps.push(name.clone());
            }
        }
    }

    Ok(deps)
}
