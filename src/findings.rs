//! Classification findings
//!
//! [`Findings`] is the structured result of classifying a workspace. The
//! confidence score is a raw accumulator (independent signals may push it
//! past 1.0); it is only clamped at the serialization boundary, in
//! [`Findings::to_report`], so internal ordering between candidates is
//! preserved.

use crate::index::FileIndex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of ecosystem labels the classifier can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "JavaScript/TypeScript")]
    JavaScript,
    Python,
    Go,
    #[serde(rename = "PHP")]
    Php,
    Ruby,
    Swift,
    #[serde(rename = "HTML/Static")]
    Html,
    Unknown,
}

impl Language {
    pub fn label(&self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript/TypeScript",
            Language::Python => "Python",
            Language::Go => "Go",
            Language::Php => "PHP",
            Language::Ruby => "Ruby",
            Language::Swift => "Swift",
            Language::Html => "HTML/Static",
            Language::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::Unknown
    }
}

/// Workspace shape: a single project or several stacks side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Architecture {
    #[default]
    Standard,
    Monorepo,
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Architecture::Standard => f.write_str("Standard"),
            Architecture::Monorepo => f.write_str("Monorepo"),
        }
    }
}

/// Result of classifying one workspace. Owns the index it was derived from.
#[derive(Debug, Clone, Default)]
pub struct Findings {
    pub language: Language,
    pub framework: String,
    pub entry_point: Option<String>,
    pub architecture: Architecture,
    /// Raw accumulated score; may exceed 1.0.
    pub confidence: f64,
    /// Signal filenames that contributed, in detector priority order.
    pub detected_files: Vec<String>,
    /// Declared dependency names for ecosystems with parseable manifests.
    pub dependencies: Vec<String>,
    /// Name of the refinement provider that last patched these findings.
    pub refined_by: Option<String>,
    pub file_index: FileIndex,
}

impl Findings {
    pub fn new(file_index: FileIndex) -> Self {
        Self {
            framework: "Unknown".to_string(),
            file_index,
            ..Default::default()
        }
    }

    /// Flat, serializable view with confidence clamped to [0, 1].
    pub fn to_report(&self) -> FindingsReport {
        FindingsReport {
            language: self.language.label().to_string(),
            framework: self.framework.clone(),
            entry_point: self.entry_point.clone(),
            architecture: self.architecture.to_string(),
            confidence: self.confidence.clamp(0.0, 1.0),
            detected_files: self.detected_files.clone(),
            dependencies: self.dependencies.clone(),
            refined_by: self.refined_by.clone(),
        }
    }

    /// Merge a refinement patch; patch fields take precedence.
    pub fn apply_patch(&mut self, patch: FindingsPatch) {
        if let Some(language) = patch.language {
            self.language = language;
        }
        if let Some(framework) = patch.framework {
            self.framework = framework;
        }
        if let Some(entry_point) = patch.entry_point {
            self.entry_point = Some(entry_point);
        }
        if let Some(confidence) = patch.confidence {
            self.confidence = confidence;
        }
    }
}

/// Transport form of [`Findings`], safe to hand to a UI or log sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindingsReport {
    pub language: String,
    pub framework: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<String>,
    pub architecture: String,
    pub confidence: f64,
    pub detected_files: Vec<String>,
    pub dependencies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refined_by: Option<String>,
}

/// Partial override produced by an external refinement provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FindingsPatch {
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub framework: Option<String>,
    #[serde(default)]
    pub entry_point: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl FindingsPatch {
    pub fn is_empty(&self) -> bool {
        self.language.is_none()
            && self.framework.is_none()
            && self.entry_point.is_none()
            && self.confidence.is_none()
    }
}
