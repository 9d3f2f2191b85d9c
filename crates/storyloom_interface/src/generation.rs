//! Traits for text and image generation backends.

use async_trait::async_trait;
use storyloom_core::{ImageRequest, TextRequest};
use storyloom_error::StoryloomResult;

/// Backend that turns a prompt into generated text.
///
/// `Ok(None)` means the provider answered without content. `Err` is a fault
/// (transport, authentication, malformed response).
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a single-turn request.
    async fn generate_text(&self, req: &TextRequest) -> StoryloomResult<Option<String>>;

    /// Provider name (e.g., "openai", "mock").
    fn provider_name(&self) -> &'static str;
}

/// Backend that turns a prompt into an image reference.
///
/// The reference is whatever the presentation layer can display: a URL or
/// a `data:` URI.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate an image and return its reference.
    async fn generate_image(&self, req: &ImageRequest) -> StoryloomResult<Option<String>>;

    /// Provider name (e.g., "openai", "mock").
    fn provider_name(&self) -> &'static str;
}
