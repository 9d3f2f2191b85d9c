//! OpenAI-compatible provider.

mod client;
mod conversion;
mod dto;

pub use client::OpenAiCompatibleClient;
pub use conversion::{from_chat_response, from_image_response, to_chat_request, to_image_request};
pub use dto::{
    ChatChoice, ChatMessage, ChatRequest, ChatRequestBuilder, ChatResponse, ChatRole, ImageData,
    ImageGenerationRequest, ImageGenerationRequestBuilder, ImageGenerationResponse, TokenUsage,
};
