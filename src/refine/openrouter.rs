//! OpenRouter refinement provider (OpenAI chat-completions wire format)

use super::{build_prompt, parse_patch, RefinementError, RefinementProvider};
use crate::findings::{Findings, FindingsPatch};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";
const DEFAULT_MODEL: &str = "google/gemini-2.0-flash-001";

pub struct OpenRouterProvider {
    api_key: String,
    model: String,
    http_client: Client,
    endpoint: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: Option<String>,
}

impl OpenRouterProvider {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            http_client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            endpoint: ENDPOINT.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[async_trait]
impl RefinementProvider for OpenRouterProvider {
    fn name(&self) -> &str {
        "OpenRouter"
    }

    async fn refine(&self, findings: &Findings) -> Result<Option<FindingsPatch>, RefinementError> {
        let body = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": build_prompt(findings)}],
        });

        let response: ChatResponse = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .ok_or(RefinementError::EmptyResponse)?;

        parse_patch(content).map(Some)
    }
}
