//! Ruby detector (Bundler projects and plain .rb trees)

use super::{LanguageCandidate, SignalDetector};
use crate::findings::Language;
use crate::index::FileIndex;
use std::path::Path;

pub struct RubyDetector;

impl SignalDetector for RubyDetector {
    fn name(&self) -> &str {
        "ruby"
    }

    fn detect(&self, index: &FileIndex, _root: &Path) -> Option<LanguageCandidate> {
        let has_gemfile = index.has_named("Gemfile");
        let loose_file = index.with_extension(".rb").first();
        if !has_gemfile && loose_file.is_none() {
            return None;
        }

        let mut candidate = LanguageCandidate::new(Language::Ruby);
        candidate.confidence = 0.6;

        if has_gemfile {
            candidate.framework = "Bundler".to_string();
            candidate.detected_files.push("Gemfile".to_string());
        } else if let Some(loose) = loose_file {
            candidate.detected_files.push(loose.clone());
        }

        if let Some(entry) = index.first_named("config.ru") {
            candidate.entry_point = Some(entry.to_string());
        }

        Some(candidate)
    }
}
