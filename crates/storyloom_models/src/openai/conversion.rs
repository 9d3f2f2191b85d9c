//! Conversions between Storyloom requests and OpenAI-compatible wire types.

use super::dto::{
    ChatMessage, ChatRequest, ChatResponse, ChatRole, ImageGenerationRequest,
    ImageGenerationResponse,
};
use storyloom_core::{ImageRequest, TextRequest};
use storyloom_error::{BuilderError, StoryloomResult};

/// Converts a Storyloom text request to a chat completion request.
///
/// # Errors
///
/// Returns an error if the request cannot be assembled.
pub fn to_chat_request(request: &TextRequest) -> StoryloomResult<ChatRequest> {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = request.system().as_deref().filter(|s| !s.trim().is_empty()) {
        messages.push(ChatMessage::new(ChatRole::System, system));
    }
    messages.push(ChatMessage::new(ChatRole::User, request.prompt().as_str()));

    let mut builder = ChatRequest::builder();
    builder
        .model(request.model().as_str())
        .messages(messages)
        .max_tokens(*request.max_tokens())
        .temperature(*request.temperature());

    Ok(builder.build().map_err(BuilderError::from)?)
}

/// Text of the first choice, `None` when absent or blank.
pub fn from_chat_response(response: &ChatResponse) -> Option<String> {
    response
        .choices()
        .first()
        .and_then(|choice| choice.message().content().clone())
        .filter(|text| !text.trim().is_empty())
}

/// Converts a Storyloom image request to an image generation request.
///
/// # Errors
///
/// Returns an error if the request cannot be assembled.
pub fn to_image_request(request: &ImageRequest) -> StoryloomResult<ImageGenerationRequest> {
    let mut builder = ImageGenerationRequest::builder();
    builder
        .model(request.model().as_str())
        .prompt(request.prompt().as_str())
        .size(request.size().clone());

    Ok(builder.build().map_err(BuilderError::from)?)
}

/// Reference to the first image: its URL, or a `data:` URI for inline data.
pub fn from_image_response(response: &ImageGenerationResponse) -> Option<String> {
    let image = response.data().first()?;
    if let Some(url) = image.url().as_deref().filter(|url| !url.trim().is_empty()) {
        return Some(url.to_string());
    }
    image
        .b64_json()
        .as_deref()
        .filter(|data| !data.trim().is_empty())
        .map(|data| format!("data:image/png;base64,{}", data))
}
