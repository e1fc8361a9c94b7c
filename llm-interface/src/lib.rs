pub mod openai;

pub use openai::OpenAiProvider;

use psyche_core::LlmError;
use serde::{Deserialize, Serialize};
use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A chat completion request. Serializes to the OpenAI wire shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptRequest {
    pub model: String,
    pub temperature: f32,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatChoice {
    pub message: CompletionMessage,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CompletionMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Builds a response with one choice per entry, in order.
    pub fn from_contents<I, S>(contents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            choices: contents
                .into_iter()
                .map(|content| ChatChoice {
                    message: CompletionMessage {
                        content: Some(content.into()),
                    },
                })
                .collect(),
        }
    }

    /// Text of the first candidate completion. A choice without content
    /// reads as empty text.
    pub fn first_content(&self) -> Result<&str, LlmError> {
        self.choices
            .first()
            .map(|choice| choice.message.content.as_deref().unwrap_or_default())
            .ok_or(LlmError::EmptyResponse)
    }
}

pub trait LlmProvider: Send + Sync {
    fn chat(
        &self,
        request: &PromptRequest,
    ) -> impl Future<Output = Result<ChatResponse, LlmError>> + Send;

    fn name(&self) -> &str;
}
