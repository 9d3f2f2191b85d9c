//! Prompt rendering plus the generation client call for each stage.
//!
//! `StoryWriter` collapses the two failure shapes of a client (an `Err` and
//! an empty answer) into `None`, logging which one happened. Callers only
//! decide what an absent result means for their stage.

use crate::brief::build_scene_prompt;
use crate::locale::{default_catalog, render_template};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storyloom_core::{ImageRequest, SceneStub, Story, TextRequest};
use storyloom_error::{BuilderError, BuilderErrorKind, StoryloomResult};
use storyloom_interface::{ImageGenerator, TextGenerator, Translator};
use tracing::{debug, error, instrument, warn};

/// Fallback models and sampling settings used when a story carries none.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[setters(prefix = "with_", into)]
#[serde(default)]
pub struct GenerationDefaults {
    /// Text model used when the story has none
    text_model: String,
    /// Image model used when the story has none
    image_model: String,
    /// Token limit for text requests
    #[setters(strip_option)]
    max_tokens: Option<u32>,
    /// Sampling temperature for text requests
    #[setters(strip_option)]
    temperature: Option<f32>,
    /// Requested cover size
    #[setters(strip_option)]
    image_size: Option<String>,
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            text_model: "gpt-4o-mini".to_string(),
            image_model: "dall-e-3".to_string(),
            max_tokens: Some(2048),
            temperature: Some(0.8),
            image_size: Some("1024x1024".to_string()),
        }
    }
}

/// Renders stage prompts and calls the generation clients.
#[derive(Clone)]
pub struct StoryWriter {
    text: Arc<dyn TextGenerator>,
    image: Arc<dyn ImageGenerator>,
    translator: Arc<dyn Translator>,
    defaults: GenerationDefaults,
}

impl std::fmt::Debug for StoryWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryWriter")
            .field("text", &self.text.provider_name())
            .field("image", &self.image.provider_name())
            .field("defaults", &self.defaults)
            .finish()
    }
}

impl StoryWriter {
    /// Writer over the given clients with the bundled catalog and default settings.
    pub fn new(text: Arc<dyn TextGenerator>, image: Arc<dyn ImageGenerator>) -> Self {
        Self {
            text,
            image,
            translator: Arc::new(default_catalog()),
            defaults: GenerationDefaults::default(),
        }
    }

    /// Replace the translator prompts are looked up in.
    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    /// Replace the fallback settings.
    pub fn with_defaults(mut self, defaults: GenerationDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Fallback settings in use.
    pub fn defaults(&self) -> &GenerationDefaults {
        &self.defaults
    }

    /// The story's text model, or the default.
    pub fn text_model_for(&self, story: &Story) -> String {
        story
            .chosen_text_model()
            .unwrap_or(self.defaults.text_model.as_str())
            .to_string()
    }

    /// The story's image model, or the default.
    pub fn image_model_for(&self, story: &Story) -> String {
        story
            .chosen_image_model()
            .unwrap_or(self.defaults.image_model.as_str())
            .to_string()
    }

    /// Generate the outline for `story`.
    #[instrument(skip(self, story), fields(story_id = %story.id))]
    pub async fn brief(&self, story: &Story) -> Option<String> {
        let premise = story
            .premise
            .as_deref()
            .filter(|premise| !premise.trim().is_empty())
            .unwrap_or(story.title.as_str());
        let prompt = self.render(
            "prompts.brief",
            &[("title", story.title.as_str()), ("premise", premise)],
        )?;
        self.text(&self.text_model_for(story), prompt).await
    }

    /// Generate the body of the scene at `ordinal`.
    #[instrument(skip(self, stubs), fields(total = stubs.len()))]
    pub async fn scene_content(
        &self,
        stubs: &[SceneStub],
        ordinal: usize,
        model: &str,
    ) -> Option<String> {
        let prompt = build_scene_prompt(stubs, ordinal, self.translator.as_ref())
            .map_err(|e| error!(error = %e, "Failed to build scene prompt"))
            .ok()?;
        self.text(model, prompt).await
    }

    /// Summarize a scene body.
    #[instrument(skip(self, content), fields(content_length = content.len()))]
    pub async fn scene_summary(&self, content: &str, model: &str) -> Option<String> {
        let prompt = self.render("prompts.summary", &[("content", content)])?;
        self.text(model, prompt).await
    }

    /// Ask for the meta payload given the joined scene summaries. Returns
    /// the raw model output; extraction is up to the caller.
    #[instrument(skip(self, story, context), fields(story_id = %story.id))]
    pub async fn meta(&self, story: &Story, context: &str, model: &str) -> Option<String> {
        let prompt = self.render(
            "prompts.meta",
            &[("title", story.title.as_str()), ("context", context)],
        )?;
        self.text(model, prompt).await
    }

    /// Generate a cover image from its English caption.
    #[instrument(skip(self, caption))]
    pub async fn cover(&self, caption: &str, model: &str) -> Option<String> {
        let prompt = self.render("prompts.cover", &[("cover_text", caption)])?;

        let mut builder = ImageRequest::builder();
        builder.model(model).prompt(prompt);
        if let Some(size) = &self.defaults.image_size {
            builder.size(size.clone());
        }
        let request = builder
            .build()
            .map_err(|e| {
                let err = rejected("ImageRequest", e);
                error!(error = %err, "Failed to build image request")
            })
            .ok()?;

        let result = self.image.generate_image(&request).await;
        non_empty(self.image.provider_name(), model, result)
    }

    fn render(&self, key: &str, vars: &[(&str, &str)]) -> Option<String> {
        render_template(&self.translator.translate(key), vars)
            .map_err(|e| error!(key, error = %e, "Failed to render prompt"))
            .ok()
    }

    async fn text(&self, model: &str, prompt: String) -> Option<String> {
        let mut builder = TextRequest::builder();
        builder
            .model(model)
            .system(self.translator.translate("prompts.system"))
            .prompt(prompt);
        if let Some(max_tokens) = self.defaults.max_tokens {
            builder.max_tokens(max_tokens);
        }
        if let Some(temperature) = self.defaults.temperature {
            builder.temperature(temperature);
        }
        let request = builder
            .build()
            .map_err(|e| {
                let err = rejected("TextRequest", e);
                error!(error = %err, "Failed to build text request")
            })
            .ok()?;

        let result = self.text.generate_text(&request).await;
        non_empty(self.text.provider_name(), model, result)
    }
}

#[track_caller]
fn rejected(target: &'static str, reason: impl std::fmt::Display) -> BuilderError {
    BuilderError::new(BuilderErrorKind::Invalid {
        target,
        reason: reason.to_string(),
    })
}

fn non_empty(
    provider: &str,
    model: &str,
    result: StoryloomResult<Option<String>>,
) -> Option<String> {
    match result {
        Ok(Some(text)) if !text.trim().is_empty() => {
            debug!(provider, model, length = text.len(), "Generation returned content");
            Some(text.trim().to_string())
        }
        Ok(_) => {
            warn!(provider, model, "Generation returned no content");
            None
        }
        Err(e) => {
            error!(provider, model, error = %e, "Generation failed");
            None
        }
    }
}
