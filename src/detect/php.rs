//! PHP detector (Composer projects and plain .php trees)

use super::{find_entry_point, LanguageCandidate, SignalDetector};
use crate::findings::Language;
use crate::index::FileIndex;
use std::path::Path;

const ENTRY_CANDIDATES: &[&str] = &["index.php", "server.php", "app.php"];

pub struct PhpDetector;

impl SignalDetector for PhpDetector {
    fn name(&self) -> &str {
        "php"
    }

    fn detect(&self, index: &FileIndex, _root: &Path) -> Option<LanguageCandidate> {
        let manifest = index.first_named("composer.json");
        let loose_file = index.with_extension(".php").first();
        if manifest.is_none() && loose_file.is_none() {
            return None;
        }

        let mut candidate = LanguageCandidate::new(Language::Php);
        candidate.confidence = 0.6;

        if manifest.is_some() {
            candidate.framework = "Composer".to_string();
            candidate.detected_files.push("composer.json".to_string());
        } else if let Some(loose) = loose_file {
            candidate.detected_files.push(loose.clone());
        }

        if let Some(entry) = find_entry_point(index, ENTRY_CANDIDATES) {
            candidate.entry_point = Some(entry);
            candidate.confidence += 0.2;
        }

        Some(candidate)
    }
}
