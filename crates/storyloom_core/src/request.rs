//! Request types handed to generation clients.

use serde::{Deserialize, Serialize};

/// A single-turn text generation request.
///
/// # Examples
///
/// ```
/// use storyloom_core::TextRequest;
///
/// let request = TextRequest::builder()
///     .model("gpt-4o-mini")
///     .prompt("Write an outline")
///     .max_tokens(512u32)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.model(), "gpt-4o-mini");
/// assert!(request.system().is_none());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct TextRequest {
    /// Model identifier
    model: String,
    /// Optional system instruction
    #[builder(default, setter(strip_option))]
    system: Option<String>,
    /// User prompt
    prompt: String,
    /// Maximum tokens to generate
    #[builder(default, setter(strip_option))]
    max_tokens: Option<u32>,
    /// Sampling temperature
    #[builder(default, setter(strip_option))]
    temperature: Option<f32>,
}

impl TextRequest {
    /// Creates a new request builder.
    pub fn builder() -> TextRequestBuilder {
        TextRequestBuilder::default()
    }
}

/// An image generation request.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct ImageRequest {
    /// Model identifier
    model: String,
    /// Image prompt
    prompt: String,
    /// Provider-specific size, e.g. `1024x1024`
    #[builder(default, setter(strip_option))]
    size: Option<String>,
}

impl ImageRequest {
    /// Creates a new request builder.
    pub fn builder() -> ImageRequestBuilder {
        ImageRequestBuilder::default()
    }
}
