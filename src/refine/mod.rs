//! External findings refinement
//!
//! An optional best-effort step: providers are tried in priority order and
//! the first usable patch is merged over the classifier's findings. A
//! provider that errors, times out, or returns junk never blocks the chain;
//! the unrefined findings remain valid output.

mod gemini;
mod mock;
mod openrouter;

pub use gemini::GeminiProvider;
pub use mock::MockProvider;
pub use openrouter::OpenRouterProvider;

use crate::config::DockgenConfig;
use crate::findings::{Findings, FindingsPatch};
use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

/// Provider-side failure. Always non-fatal to the caller.
#[derive(Debug, Error)]
pub enum RefinementError {
    #[error("refinement request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider response carried no content")]
    EmptyResponse,

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

/// A single external capability that may re-score or override findings.
///
/// Implementations return `Ok(None)` when they cannot help (unconfigured,
/// model declined), so the caller's fallback chain proceeds.
#[async_trait]
pub trait RefinementProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn refine(&self, findings: &Findings) -> Result<Option<FindingsPatch>, RefinementError>;
}

/// Fallback chain over configured providers.
pub struct RefinementService {
    providers: Vec<Box<dyn RefinementProvider>>,
}

impl RefinementService {
    pub fn new(providers: Vec<Box<dyn RefinementProvider>>) -> Self {
        Self { providers }
    }

    /// OpenRouter first when configured, then Gemini.
    pub fn from_config(config: &DockgenConfig) -> Self {
        let mut providers: Vec<Box<dyn RefinementProvider>> = Vec::new();
        if let Some(key) = &config.openrouter_api_key {
            providers.push(Box::new(OpenRouterProvider::new(
                key.clone(),
                config.http_timeout,
            )));
        }
        if let Some(key) = &config.google_api_key {
            providers.push(Box::new(GeminiProvider::new(
                key.clone(),
                config.http_timeout,
            )));
        }
        if providers.is_empty() {
            warn!("No refinement providers configured. Refinement will be disabled.");
        }
        Self::new(providers)
    }

    pub fn is_enabled(&self) -> bool {
        !self.providers.is_empty()
    }

    /// Try providers in order; merge the first usable patch. Returns true
    /// when the findings were refined.
    pub async fn refine(&self, findings: &mut Findings) -> bool {
        for provider in &self.providers {
            info!(provider = provider.name(), "Attempting findings refinement");
            match provider.refine(findings).await {
                Ok(Some(patch)) if !patch.is_empty() => {
                    info!(provider = provider.name(), "Refinement successful");
                    findings.apply_patch(patch);
                    findings.refined_by = Some(provider.name().to_string());
                    return true;
                }
                Ok(_) => {
                    warn!(provider = provider.name(), "Provider returned no refinement");
                }
                Err(err) => {
                    warn!(provider = provider.name(), error = %err, "Provider failed");
                }
            }
        }
        false
    }
}

/// Shared prompt: the file listing plus the current classification, asking
/// for a strict-JSON patch.
pub(crate) fn build_prompt(findings: &Findings) -> String {
    let file_list: Vec<&str> = findings
        .file_index
        .files()
        .iter()
        .take(100)
        .map(String::as_str)
        .collect();

    format!(
        "Analyze the following project file structure and suggest the main \
         programming language, framework, and the best entry point for a \
         Docker container.\n\n\
         Files:\n{}\n\n\
         Current Findings:\n\
         Language: {}\n\
         Framework: {}\n\n\
         Allowed language values: \"JavaScript/TypeScript\", \"Python\", \
         \"Go\", \"PHP\", \"Ruby\", \"Swift\", \"HTML/Static\", \"Unknown\".\n\n\
         Respond ONLY in JSON format like:\n\
         {{\n    \"language\": \"...\",\n    \"framework\": \"...\",\n    \
         \"entry_point\": \"...\",\n    \"confidence\": 0.9\n}}",
        file_list.join(", "),
        findings.language,
        findings.framework,
    )
}

/// Models love wrapping JSON in markdown fences; strip them before parsing.
pub(crate) fn parse_patch(text: &str) -> Result<FindingsPatch, RefinementError> {
    let mut body = text.trim();
    if let Some(fenced) = body.split("```json").nth(1) {
        body = fenced.split("```").next().unwrap_or(fenced).trim();
    } else if let Some(fenced) = body.split("```").nth(1) {
        body = fenced.trim();
    }
    serde_json::from_str(body).map_err(|err| RefinementError::MalformedResponse(err.to_string()))
}
