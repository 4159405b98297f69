//! Groq chat completions provider.
//!
//! Groq exposes an OpenAI-compatible `/chat/completions` endpoint. One call
//! per completion, no retry.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{AnalysisError, CompletionProvider};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "mistral-large-latest";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatTurn<'a>; 2],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatTurn<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Completion provider backed by the Groq API.
#[derive(Debug, Clone)]
pub struct GroqProvider {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GroqProvider {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            api_key,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionProvider for GroqProvider {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> Result<String, AnalysisError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                AnalysisError::Config("GROQ_API_KEY environment variable is not set".to_string())
            })?;

        let resp = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&ChatRequest {
                model: &self.model,
                messages: [
                    ChatTurn {
                        role: "system",
                        content: system,
                    },
                    ChatTurn {
                        role: "user",
                        content: user,
                    },
                ],
                temperature,
            })
            .send()
            .await
            .map_err(|e| AnalysisError::Provider(format!("Groq request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(AnalysisError::Provider(format!(
                "Groq completion failed: {status} {body}"
            )));
        }

        let data: ChatResponse = resp
            .json()
            .await
            .map_err(|e| AnalysisError::Provider(format!("Groq response parse error: {e}")))?;

        data.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AnalysisError::Provider("Groq returned no completion".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_api_key_is_config_error() {
        let provider = GroqProvider::new(Client::new(), DEFAULT_BASE_URL, DEFAULT_MODEL, None);
        let err = provider.complete("sys", "user", 0.1).await.unwrap_err();
        match err {
            AnalysisError::Config(msg) => assert!(msg.contains("GROQ_API_KEY")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let provider = GroqProvider::new(Client::new(), "http://localhost:9000/v1/", "m", None);
        assert_eq!(provider.endpoint(), "http://localhost:9000/v1/chat/completions");
    }

    #[test]
    fn request_body_has_openai_shape() {
        let body = ChatRequest {
            model: DEFAULT_MODEL,
            messages: [
                ChatTurn {
                    role: "system",
                    content: "s",
                },
                ChatTurn {
                    role: "user",
                    content: "u",
                },
            ],
            temperature: 0.5,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], DEFAULT_MODEL);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "u");
        assert_eq!(json["temperature"], 0.5);
    }
}
