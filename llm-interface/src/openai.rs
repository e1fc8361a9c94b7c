use crate::{ChatResponse, LlmProvider, PromptRequest};
use psyche_core::{ConfigError, CoreError, LlmError};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info};

const PROVIDER: &str = "openai";

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Client for any OpenAI-compatible `/chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    completions_url: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self, CoreError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            ConfigError::InvalidValue {
                field: "http_timeout_secs".to_string(),
                value: e.to_string(),
            }
        })?;

        Ok(Self {
            client,
            api_key,
            completions_url: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        })
    }

    pub fn completions_url(&self) -> &str {
        &self.completions_url
    }

    fn map_status(status: StatusCode, body: String) -> LlmError {
        match status {
            StatusCode::UNAUTHORIZED => LlmError::InvalidApiKey {
                provider: PROVIDER.to_string(),
            },
            StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded {
                provider: PROVIDER.to_string(),
            },
            _ => {
                let message = serde_json::from_str::<ErrorEnvelope>(&body)
                    .map(|envelope| envelope.error.message)
                    .unwrap_or(body);
                LlmError::ApiError {
                    provider: PROVIDER.to_string(),
                    status_code: status.as_u16(),
                    message,
                }
            }
        }
    }
}

impl LlmProvider for OpenAiProvider {
    async fn chat(&self, request: &PromptRequest) -> Result<ChatResponse, LlmError> {
        debug!(
            model = %request.model,
            temperature = request.temperature,
            messages = request.messages.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(&self.completions_url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!("Network error calling {}: {}", PROVIDER, e);
                if e.is_timeout() {
                    LlmError::RequestTimeout {
                        provider: PROVIDER.to_string(),
                    }
                } else {
                    LlmError::Transport {
                        provider: PROVIDER.to_string(),
                        reason: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, %body, "Chat completion API error");
            return Err(Self::map_status(status, body));
        }

        let completion = response.json::<ChatResponse>().await.map_err(|e| {
            error!("Failed to parse chat completion: {}", e);
            LlmError::InvalidResponseFormat {
                provider: PROVIDER.to_string(),
                details: e.to_string(),
            }
        })?;

        info!(
            "Received {} choice(s) from {}",
            completion.choices.len(),
            PROVIDER
        );
        Ok(completion)
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChatMessage;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> PromptRequest {
        PromptRequest {
            model: "gpt-4o".to_string(),
            temperature: 0.5,
            messages: vec![
                ChatMessage::system("list interests"),
                ChatMessage::user("[r/rust] hello\n"),
            ],
        }
    }

    fn provider(server: &MockServer) -> OpenAiProvider {
        OpenAiProvider::new("sk-test".to_string(), &server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_completions_url_joins_base() {
        let provider = OpenAiProvider::new(
            "sk-test".to_string(),
            "https://api.openai.com/v1/",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            provider.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(provider.name(), "openai");
    }

    #[tokio::test]
    async fn test_successful_chat() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-4o",
                "messages": [
                    {"role": "system", "content": "list interests"},
                    {"role": "user", "content": "[r/rust] hello\n"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-1",
                "choices": [
                    {"index": 0, "message": {"role": "assistant", "content": "rust,systems"}},
                    {"index": 1, "message": {"role": "assistant", "content": "ignored"}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = provider(&server).chat(&request()).await.unwrap();
        assert_eq!(response.choices.len(), 2);
        assert_eq!(response.first_content().unwrap(), "rust,systems");
    }

    #[tokio::test]
    async fn test_empty_choices_is_not_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let response = provider(&server).chat(&request()).await.unwrap();
        assert_eq!(response.first_content(), Err(LlmError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let result = provider(&server).chat(&request()).await;
        assert!(matches!(result, Err(LlmError::InvalidApiKey { .. })));
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let result = provider(&server).chat(&request()).await;
        assert!(matches!(result, Err(LlmError::RateLimitExceeded { .. })));
    }

    #[tokio::test]
    async fn test_api_error_message_is_extracted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {"message": "model does not exist", "type": "invalid_request_error"}
            })))
            .mount(&server)
            .await;

        let result = provider(&server).chat(&request()).await;
        assert_eq!(
            result,
            Err(LlmError::ApiError {
                provider: "openai".to_string(),
                status_code: 400,
                message: "model does not exist".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = provider(&server).chat(&request()).await;
        assert!(matches!(
            result,
            Err(LlmError::InvalidResponseFormat { .. })
        ));
    }
}
