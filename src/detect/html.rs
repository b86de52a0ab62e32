//! Static-site fallback detector
//!
//! Only consulted when every primary detector came up empty.

use super::{LanguageCandidate, SignalDetector};
use crate::findings::Language;
use crate::index::FileIndex;
use std::path::Path;

pub struct HtmlDetector;

impl SignalDetector for HtmlDetector {
    fn name(&self) -> &str {
        "html"
    }

    fn is_fallback(&self) -> bool {
        true
    }

    fn detect(&self, index: &FileIndex, _root: &Path) -> Option<LanguageCandidate> {
        let first_html = index.with_extension(".html").first()?;

        let mut candidate = LanguageCandidate::new(Language::Html);
        candidate.framework = "Static Website".to_string();
        candidate.confidence = 0.5;
        candidate.detected_files.push(first_html.clone());

        if let Some(entry) = index.first_named("index.html") {
            candidate.entry_point = Some(entry.to_string());
            candidate.confidence += 0.2;
        }

        Some(candidate)
    }
}
