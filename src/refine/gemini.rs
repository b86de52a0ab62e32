//! Google Gemini refinement provider (generateContent wire format)

use super::{build_prompt, parse_patch, RefinementError, RefinementProvider};
use crate::findings::{Findings, FindingsPatch};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

pub struct GeminiProvider {
    api_key: String,
    model: String,
    http_client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiProvider {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            http_client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[async_trait]
impl RefinementProvider for GeminiProvider {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn refine(&self, findings: &Findings) -> Result<Option<FindingsPatch>, RefinementError> {
        let url = format!("{}/{}:generateContent", self.base_url, self.model);
        let body = json!({
            "contents": [{"parts": [{"text": build_prompt(findings)}]}],
        });

        let response: GenerateResponse = self
            .http_client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let content = response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .and_then(|p| p.text.as_deref())
            .ok_or(RefinementError::EmptyResponse)?;

        parse_patch(content).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_response_shape() {
        let raw = r#"{"candidates": [{"content": {"parts": [{"text": "```json\n{\"language\": \"Go\"}\n```"}]}}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        let text = parsed.candidates[0].content.parts[0].text.as_deref().unwrap();
        let patch = parse_patch(text).unwrap();
        assert_eq!(
            patch.language,
            Some(crate::findings::Language::Go)
        );
    }

    #[test]
    fn test_provider_name() {
        let provider = GeminiProvider::new("key".to_string(), Duration::from_secs(5));
        assert_eq!(provider.name(), "Gemini");
    }
}
