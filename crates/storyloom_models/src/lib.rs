//! Model provider clients for Storyloom.
//!
//! This crate implements the generation traits of `storyloom_interface`
//! against HTTP model providers.
//!
//! # Available Providers
//!
//! - **OpenAI-compatible** - chat completions for text, image generations
//!   for covers. Works with any endpoint speaking the OpenAI wire format.
//!
//! # Example
//!
//! ```no_run
//! use storyloom_core::TextRequest;
//! use storyloom_interface::TextGenerator;
//! use storyloom_models::OpenAiCompatibleClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAiCompatibleClient::from_env("OPENAI_API_KEY", "https://api.openai.com/v1")?;
//! let request = TextRequest::builder()
//!     .model("gpt-4o-mini")
//!     .prompt("Write a one line story")
//!     .build()?;
//! let text = client.generate_text(&request).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod metrics;
mod openai;

pub use metrics::{GenerationMetrics, classify_error};
pub use openai::{
    ChatChoice, ChatMessage, ChatRequest, ChatRequestBuilder, ChatResponse, ChatRole, ImageData,
    ImageGenerationRequest, ImageGenerationRequestBuilder, ImageGenerationResponse,
    OpenAiCompatibleClient, TokenUsage, from_chat_response, from_image_response,
    to_chat_request, to_image_request,
};
