//! OpenAI chat-completions summarizer.

use super::TextSummarizer;
use crate::settings::LlmConfig;
use crate::utils::config::{DEFAULT_LLM_TIMEOUT, OPENAI_CHAT_COMPLETIONS_URL};
use crate::utils::error::SummaryError;
use log::{debug, info};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

/// Chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Chat-completions request body
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Summarizer backed by the OpenAI chat-completions API
pub struct OpenAiSummarizer {
    client: Client,
    endpoint: String,
    config: LlmConfig,
}

impl OpenAiSummarizer {
    /// Create a new summarizer
    pub fn new(config: LlmConfig) -> Result<Self, SummaryError> {
        let client = Client::builder()
            .timeout(DEFAULT_LLM_TIMEOUT)
            .build()
            .map_err(SummaryError::RequestFailed)?;

        Ok(Self {
            client,
            endpoint: OPENAI_CHAT_COMPLETIONS_URL.to_string(),
            config,
        })
    }

    /// Point at a compatible endpoint (proxy, Azure OpenAI, ...)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// Build the request: the configured prompt as system message, the cost
/// dump as user message
pub fn build_chat_request(config: &LlmConfig, text: &str) -> ChatRequest {
    ChatRequest {
        model: config.model.clone(),
        messages: vec![
            ChatMessage {
                role: "system".to_string(),
                content: config.prompt.clone(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: text.to_string(),
            },
        ],
        max_tokens: config.max_tokens,
    }
}

/// Extract the first choice's content from a response body
fn extract_content(body: &str) -> Result<String, SummaryError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| SummaryError::InvalidResponse(format!("failed to decode body: {}", e)))?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| SummaryError::InvalidResponse("no choices in response body".to_string()))?;

    let message = choice
        .message
        .ok_or_else(|| SummaryError::InvalidResponse("no message in first choice".to_string()))?;

    message
        .content
        .ok_or_else(|| SummaryError::InvalidResponse("no content in message".to_string()))
}

impl TextSummarizer for OpenAiSummarizer {
    fn summarize(&self, text: &str) -> Result<String, SummaryError> {
        info!("Analyzing with {}...", self.config.model);

        let request = build_chat_request(&self.config, text);
        debug!(
            "LLM request: model {}, max_tokens {}, {} bytes of input",
            request.model,
            request.max_tokens,
            text.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(SummaryError::Api {
                status: status.as_u16(),
                body,
            });
        }

        extract_content(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn llm_config() -> LlmConfig {
        LlmConfig {
            api_key: "sk-test".to_string(),
            model: "gpt-4o".to_string(),
            max_tokens: 300,
            prompt: "You are a FinOps analyst".to_string(),
        }
    }

    #[test]
    fn test_build_chat_request() {
        let request = build_chat_request(&llm_config(), "all [1.00] a");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], "gpt-4o");
        assert_eq!(value["max_tokens"], 300);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][0]["content"], "You are a FinOps analyst");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["messages"][1]["content"], "all [1.00] a");
    }

    #[test]
    fn test_extract_content() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"EC2 dominates."}}]}"#;
        assert_eq!(extract_content(body).unwrap(), "EC2 dominates.");
    }

    #[test]
    fn test_extract_content_without_choices() {
        assert!(matches!(
            extract_content(r#"{"choices":[]}"#),
            Err(SummaryError::InvalidResponse(_))
        ));
        assert!(extract_content(r#"{"choices":[{"message":{}}]}"#).is_err());
        assert!(extract_content("not json").is_err());
    }
}
