//! OpenAI-compatible wire types.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use storyloom_error::{BuilderError, BuilderErrorKind};

/// Chat message role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// System instruction
    System,
    /// User message
    User,
    /// Assistant message
    Assistant,
}

/// A message in a chat completion request or response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ChatMessage {
    /// Message role
    role: ChatRole,
    /// Message text; providers send `null` for tool-only answers
    #[serde(default)]
    content: Option<String>,
}

impl ChatMessage {
    /// Creates a message with text content.
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: Some(content.into()),
        }
    }
}

/// Chat completion request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ChatRequest {
    /// Model identifier
    model: String,
    /// Conversation, system message first
    messages: Vec<ChatMessage>,
    /// Maximum tokens to generate
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    /// Sampling temperature
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

impl ChatRequest {
    /// Creates a new builder for `ChatRequest`.
    pub fn builder() -> ChatRequestBuilder {
        ChatRequestBuilder::default()
    }
}

/// One completion alternative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ChatChoice {
    /// Position among the alternatives
    #[serde(default)]
    index: u32,
    /// Generated message
    message: ChatMessage,
    /// Why generation stopped
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct TokenUsage {
    /// Prompt tokens consumed
    #[serde(default)]
    prompt_tokens: u64,
    /// Completion tokens generated
    #[serde(default)]
    completion_tokens: u64,
    /// Sum of both
    #[serde(default)]
    total_tokens: u64,
}

/// Chat completion response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ChatResponse {
    /// Response identifier
    #[serde(default)]
    id: String,
    /// Completion alternatives
    #[serde(default)]
    choices: Vec<ChatChoice>,
    /// Token usage, when reported
    #[serde(default)]
    usage: Option<TokenUsage>,
}

/// Image generation request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ImageGenerationRequest {
    /// Model identifier
    model: String,
    /// Image description
    prompt: String,
    /// Number of images
    #[builder(default = "1")]
    n: u32,
    /// Requested size, e.g. `1024x1024`
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<String>,
}

impl ImageGenerationRequest {
    /// Creates a new builder for `ImageGenerationRequest`.
    pub fn builder() -> ImageGenerationRequestBuilder {
        ImageGenerationRequestBuilder::default()
    }
}

impl From<ChatRequestBuilderError> for BuilderError {
    #[track_caller]
    fn from(err: ChatRequestBuilderError) -> Self {
        match err {
            ChatRequestBuilderError::UninitializedField(field) => {
                BuilderError::new(BuilderErrorKind::MissingField {
                    target: "ChatRequest",
                    field: field.to_string(),
                })
            }
            ChatRequestBuilderError::ValidationError(reason) => {
                BuilderError::new(BuilderErrorKind::Invalid {
                    target: "ChatRequest",
                    reason,
                })
            }
        }
    }
}

impl From<ImageGenerationRequestBuilderError> for BuilderError {
    #[track_caller]
    fn from(err: ImageGenerationRequestBuilderError) -> Self {
        match err {
            ImageGenerationRequestBuilderError::UninitializedField(field) => {
                BuilderError::new(BuilderErrorKind::MissingField {
                    target: "ImageGenerationRequest",
                    field: field.to_string(),
                })
            }
            ImageGenerationRequestBuilderError::ValidationError(reason) => {
                BuilderError::new(BuilderErrorKind::Invalid {
                    target: "ImageGenerationRequest",
                    reason,
                })
            }
        }
    }
}

/// One generated image, as a URL or inline base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ImageData {
    /// Hosted image location
    #[serde(default)]
    url: Option<String>,
    /// Inline PNG data
    #[serde(default)]
    b64_json: Option<String>,
}

/// Image generation response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ImageGenerationResponse {
    /// Generated images
    #[serde(default)]
    data: Vec<ImageData>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_model_is_missing_field() {
        let err = BuilderError::from(
            ChatRequest::builder()
                .messages(vec![ChatMessage::new(ChatRole::User, "hi")])
                .build()
                .unwrap_err(),
        );
        assert_eq!(
            err.kind(),
            &BuilderErrorKind::MissingField {
                target: "ChatRequest",
                field: "model".to_string(),
            }
        );
    }

    #[test]
    fn test_image_request_defaults_to_one_image() {
        let request = ImageGenerationRequest::builder()
            .model("dall-e-3")
            .prompt("a kite")
            .build()
            .unwrap();
        assert_eq!(*request.n(), 1);

        let err = BuilderError::from(
            ImageGenerationRequest::builder()
                .model("dall-e-3")
                .build()
                .unwrap_err(),
        );
        assert!(err.to_string().contains("`prompt`"));
    }
}
