//! OpenAI-compatible chat completions adapter
//!
//! Serves every provider that speaks the OpenAI wire format: GPT itself,
//! plus Grok, DeepSeek and Maritaca behind their own base URLs.

use async_trait::async_trait;
use gabarito_application::{ChatClient, ChatRequest, ClientError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Client for an OpenAI-compatible chat completions endpoint
pub struct OpenAiCompatClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiCompatClient {
    pub fn new(http: reqwest::Client, api_key: String, base_url: String) -> Self {
        Self {
            http,
            api_key,
            base_url,
        }
    }
}

#[derive(Serialize)]
struct CompletionsBody<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct CompletionsResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

#[async_trait]
impl ChatClient for OpenAiCompatClient {
    async fn send(&self, request: &ChatRequest) -> Result<String, ClientError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(WireMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(WireMessage {
            role: "user",
            content: &request.user,
        });

        let body = CompletionsBody {
            model: &request.model,
            max_tokens: request.max_tokens,
            messages,
        };

        debug!("POST /chat/completions model={}", request.model);

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let (code, message) = match serde_json::from_str::<ErrorBody>(&text) {
                Ok(parsed) => (parsed.error.code.or(parsed.error.kind), parsed.error.message),
                Err(_) => (None, text),
            };
            return Err(ClientError::Api {
                status: status.as_u16(),
                code,
                message,
            });
        }

        let parsed: CompletionsResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Malformed(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ClientError::Malformed("no choices in reply".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_message_comes_first() {
        let body = CompletionsBody {
            model: "gpt-4o",
            max_tokens: 50,
            messages: vec![
                WireMessage {
                    role: "system",
                    content: "instruções",
                },
                WireMessage {
                    role: "user",
                    content: "pergunta",
                },
            ],
        };
        let json = serde_json::to_string(&body).unwrap();
        let system_pos = json.find("system").unwrap();
        let user_pos = json.find("user").unwrap();
        assert!(system_pos < user_pos);
    }

    #[test]
    fn test_error_code_falls_back_to_type() {
        let raw = r#"{"error":{"message":"quota exceeded","type":"insufficient_quota"}}"#;
        let parsed: ErrorBody = serde_json::from_str(raw).unwrap();
        let code = parsed.error.code.or(parsed.error.kind);
        assert_eq!(code.as_deref(), Some("insufficient_quota"));
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"FALSO"}}]}"#;
        let parsed: CompletionsResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("FALSO")
        );
    }
}
