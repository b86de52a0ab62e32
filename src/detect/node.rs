//! Node.js / frontend-tooling detector

use super::{find_entry_point, LanguageCandidate, ManifestParseError, SignalDetector};
use crate::findings::Language;
use crate::index::FileIndex;
use serde_json::Value;
use std::path::Path;
use tracing::warn;

const ENTRY_CANDIDATES: &[&str] = &["server.js", "index.js", "app.js", "main.js"];

/// Framework inference by dependency key, checked in priority order.
const FRAMEWORK_KEYS: &[(&str, &str)] = &[
    ("next", "Next.js"),
    ("react", "React"),
    ("vue", "Vue"),
    ("express", "Express"),
    ("nest", "NestJS"),
];

pub struct NodeDetector;

impl SignalDetector for NodeDetector {
    fn name(&self) -> &str {
        "node"
    }

    fn detect(&self, index: &FileIndex, root: &Path) -> Option<LanguageCandidate> {
        let manifest = index.shallowest_named("package.json")?;

        let mut candidate = LanguageCandidate::new(Language::JavaScript);
        candidate.framework = "Node.js (Generic)".to_string();
        candidate.confidence += 0.4;
        candidate.detected_files.push("package.json".to_string());

        if let Some(entry) = find_entry_point(index, ENTRY_CANDIDATES) {
            candidate.entry_point = Some(entry);
            candidate.confidence += 0.2;
        }

        match parse_package_json(root, manifest) {
            Ok(deps) => {
                if let Some((_, framework)) = FRAMEWORK_KEYS
                    .iter()
                    .find(|(key, _)| deps.iter().any(|d| d == key))
                {
                    candidate.framework = framework.to_string();
                    candidate.confidence += 0.3;
                }
                candidate.dependencies = deps;
            }
            Err(err) => {
                warn!(error = %err, "Skipping dependency data for unparseable package.json");
            }
        }

        Some(candidate)
    }
}

/// Merge `dependencies` then `devDependencies` key names; prod keys are kept
/// over dev keys on conflict.
fn parse_package_json(root: &Path, manifest: &str) -> Result<Vec<String>, ManifestParseError> {
    let path = root.join(manifest);
    let content = std::fs::read_to_string(&path).map_err(|source| ManifestParseError::Read {
        path: manifest.to_string(),
        source,
    })?;
    let parsed: Value =
        serde_json::from_str(&content).map_err(|source| ManifestParseError::Json {
            path: manifest.to_string(),
            source,
        })?;

    let mut deps = Vec::new();
    for section in ["dependencies", "devDependencies"] {
        if let Some(map) = parsed.get(section).and_then(Value::as_object) {
            for key in map.keys() {
                if !deps.iter().any(|d| d == key) {
                    deps.push(key.clone());
                }
            }
        }
    }
    Ok(deps)
}
