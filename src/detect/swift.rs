//! Swift detector (SwiftPM packages and plain .swift trees)

use super::{LanguageCandidate, SignalDetector};
use crate::findings::Language;
use crate::index::FileIndex;
use std::path::Path;

pub struct SwiftDetector;

impl SignalDetector for SwiftDetector {
    fn name(&self) -> &str {
        "swift"
    }

    fn detect(&self, index: &FileIndex, _root: &Path) -> Option<LanguageCandidate> {
        let has_manifest = index.has_named("Package.swift");
        let loose_file = index.with_extension(".swift").first();
        if !has_manifest && loose_file.is_none() {
            return None;
        }

        let mut candidate = LanguageCandidate::new(Language::Swift);
        candidate.confidence = 0.6;

        if has_manifest {
            candidate.framework = "Swift (Server-side)".to_string();
            candidate.detected_files.push("Package.swift".to_string());
        } else if let Some(loose) = loose_file {
            candidate.detected_files.push(loose.clone());
        }

        Some(candidate)
    }
}
