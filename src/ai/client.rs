use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AzureConfig;
use crate::constants::{API_KEY_HEADER, COMPLETION_TEMPERATURE, SYSTEM_MESSAGE};

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("invalid completion endpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("completion service returned {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("malformed completion response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("completion response contained no choices")]
    NoChoices,
    #[error("first completion choice has no text content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Chat-completion client for an Azure OpenAI deployment
pub struct CompletionClient<'a> {
    http: Client,
    config: &'a AzureConfig,
}

impl<'a> CompletionClient<'a> {
    pub fn new(http: Client, config: &'a AzureConfig) -> Self {
        Self { http, config }
    }

    /// URL of the deployment's chat completions operation
    pub fn completions_url(&self) -> Result<Url, CompletionError> {
        let base = self.config.endpoint.trim_end_matches('/');
        let raw = format!(
            "{}/openai/deployments/{}/chat/completions",
            base, self.config.deployment
        );
        let mut url = Url::parse(&raw).map_err(|e| CompletionError::InvalidEndpoint {
            endpoint: self.config.endpoint.clone(),
            reason: e.to_string(),
        })?;
        url.query_pairs_mut()
            .append_pair("api-version", &self.config.api_version);
        Ok(url)
    }

    /// Send `prompt` as the user message and return the first choice's text
    pub async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let url = self.completions_url()?;
        let request = ChatRequest {
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_MESSAGE,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: COMPLETION_TEMPERATURE,
        };

        tracing::debug!(url = %url, prompt_bytes = prompt.len(), "sending completion request");
        let response = self
            .http
            .post(url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(CompletionError::Status {
                status,
                message: error_message(&body),
            });
        }

        let content = parse_completion(&body)?;
        tracing::debug!(completion_bytes = content.len(), "completion received");
        Ok(content)
    }
}

/// Extract the first choice's text from a chat-completion response body
fn parse_completion(body: &str) -> Result<String, CompletionError> {
    let response: ChatResponse = serde_json::from_str(body)?;
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(CompletionError::NoChoices)?;
    choice.message.content.ok_or(CompletionError::EmptyContent)
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(endpoint: &str) -> AzureConfig {
        AzureConfig {
            endpoint: endpoint.to_string(),
            api_key: "secret".to_string(),
            api_version: "2024-12-01-preview".to_string(),
            deployment: "gpt-4o".to_string(),
        }
    }

    #[test]
    fn test_completions_url() {
        let config = config("https://acme.openai.azure.com/");
        let client = CompletionClient::new(Client::new(), &config);
        assert_eq!(
            client.completions_url().unwrap().as_str(),
            "https://acme.openai.azure.com/openai/deployments/gpt-4o/chat/completions?api-version=2024-12-01-preview"
        );
    }

    #[test]
    fn test_completions_url_rejects_bad_endpoint() {
        let config = config("not a url");
        let client = CompletionClient::new(Client::new(), &config);
        assert!(matches!(
            client.completions_url(),
            Err(CompletionError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn test_request_body_shape() {
        let request = ChatRequest {
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_MESSAGE,
                },
                ChatMessage {
                    role: "user",
                    content: "prompt",
                },
            ],
            temperature: COMPLETION_TEMPERATURE,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][0]["content"], SYSTEM_MESSAGE);
        assert_eq!(value["messages"][1]["content"], "prompt");
        assert!((value["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_parse_completion_first_choice() {
        let body = json!({
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "=== HEADERS ===\nX-A"}},
                {"index": 1, "message": {"role": "assistant", "content": "ignored"}}
            ]
        })
        .to_string();
        assert_eq!(parse_completion(&body).unwrap(), "=== HEADERS ===\nX-A");
    }

    #[test]
    fn test_parse_completion_without_choices() {
        let body = json!({"choices": []}).to_string();
        assert!(matches!(
            parse_completion(&body),
            Err(CompletionError::NoChoices)
        ));
    }

    #[test]
    fn test_parse_completion_null_content() {
        let body = json!({"choices": [{"message": {"role": "assistant", "content": null}}]}).to_string();
        assert!(matches!(
            parse_completion(&body),
            Err(CompletionError::EmptyContent)
        ));
    }

    #[test]
    fn test_parse_completion_malformed() {
        assert!(matches!(
            parse_completion("<html>bad gateway</html>"),
            Err(CompletionError::Malformed(_))
        ));
    }

    #[test]
    fn test_error_message_from_envelope() {
        let body = json!({"error": {"code": "401", "message": "Access denied due to invalid subscription key."}}).to_string();
        assert_eq!(
            error_message(&body),
            "Access denied due to invalid subscription key."
        );
        assert_eq!(error_message("  upstream timeout \n"), "upstream timeout");
    }
}
