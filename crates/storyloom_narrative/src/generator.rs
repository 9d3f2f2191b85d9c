//! The generation orchestrator.
//!
//! `StoryGenerator` runs the stages of a story in order: brief, scenes,
//! meta, cover. Each stage persists its result through the stores before
//! returning, so dropping a run part way leaves every completed unit saved.
//! Stories in simple mode chain from one stage into the next according to
//! the transition table in [`crate::transition`].

use crate::brief::format_brief;
use crate::meta::{StoryMeta, extract_story_meta};
use crate::status::{GenerationStatus, StatusBoard};
use crate::transition::next_step;
use crate::writer::{GenerationDefaults, StoryWriter};
use std::future::Future;
use std::sync::Arc;
use storyloom_core::{
    GenerationStep, Scene, ScenePatch, Story, StoryId, StoryPatch, progress_step,
};
use storyloom_error::{StoryloomError, StoryloomResult};
use storyloom_interface::{
    GenerationListener, ImageGenerator, NoopListener, PaymentGate, PaymentOutcome, SceneStore,
    StoryStore, TextGenerator, Translator,
};

/// How the last stage of a call ended.
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome {
    /// The stage persisted its result; carries the stored story.
    Completed(Story),
    /// The stage's precondition was not met and nothing ran.
    Skipped(GenerationStep),
    /// The generation call failed or returned nothing; no mutation beyond
    /// what the stage persists up front.
    NoContent(GenerationStep),
    /// The payment gate did not confirm a payment.
    PaymentDeclined,
}

impl StageOutcome {
    /// The stored story when the stage completed.
    pub fn story(&self) -> Option<&Story> {
        match self {
            Self::Completed(story) => Some(story),
            _ => None,
        }
    }
}

/// Drives a story through the generation pipeline.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use storyloom_narrative::{InMemoryStoryStore, StoryGenerator};
///
/// let store = Arc::new(InMemoryStoryStore::new());
/// let generator = StoryGenerator::new(client.clone(), client, store.clone(), store, gate)
///     .with_listener(Arc::new(my_listener));
///
/// let outcome = generator.start(story).await?;
/// ```
pub struct StoryGenerator {
    writer: StoryWriter,
    stories: Arc<dyn StoryStore>,
    scenes: Arc<dyn SceneStore>,
    payment: Arc<dyn PaymentGate>,
    translator: Arc<dyn Translator>,
    listener: Arc<dyn GenerationListener>,
    board: StatusBoard,
}

impl std::fmt::Debug for StoryGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryGenerator")
            .field("writer", &self.writer)
            .field("board", &self.board)
            .finish_non_exhaustive()
    }
}

impl StoryGenerator {
    /// Create a generator with the bundled catalog, default settings and no listener.
    pub fn new(
        text: Arc<dyn TextGenerator>,
        image: Arc<dyn ImageGenerator>,
        stories: Arc<dyn StoryStore>,
        scenes: Arc<dyn SceneStore>,
        payment: Arc<dyn PaymentGate>,
    ) -> Self {
        let translator: Arc<dyn Translator> = Arc::new(crate::locale::default_catalog());
        Self {
            writer: StoryWriter::new(text, image).with_translator(translator.clone()),
            stories,
            scenes,
            payment,
            translator,
            listener: Arc::new(NoopListener),
            board: StatusBoard::new(),
        }
    }

    /// Use `translator` for prompts and notifications.
    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.writer = self.writer.with_translator(translator.clone());
        self.translator = translator;
        self
    }

    /// Send UI-facing events to `listener`.
    pub fn with_listener(mut self, listener: Arc<dyn GenerationListener>) -> Self {
        self.listener = listener;
        self
    }

    /// Replace the fallback models and sampling settings.
    pub fn with_defaults(mut self, defaults: GenerationDefaults) -> Self {
        self.writer = self.writer.with_defaults(defaults);
        self
    }

    /// Begin generation, asking for payment first when the story has none.
    ///
    /// # Errors
    ///
    /// Returns an error if a store operation fails.
    #[tracing::instrument(skip(self, story), fields(story_id = %story.id, paid = story.is_paid()))]
    pub async fn start(&self, story: Story) -> StoryloomResult<StageOutcome> {
        if story.is_paid() {
            return self.generate_brief(story).await;
        }

        let id = story.id;
        self.set_payment_pending(id, true).await;

        match self.payment.request_payment(&story).await {
            Ok(PaymentOutcome::Confirmed(confirmed)) if confirmed.is_paid() => {
                tracing::info!("Payment confirmed");
                self.generate_brief(confirmed).await
            }
            Ok(PaymentOutcome::Confirmed(_)) => {
                tracing::warn!("Payment gate confirmed without a transaction reference");
                self.set_payment_pending(id, false).await;
                self.listener.notify_error(
                    &self.translator.translate("notifications.payment_unconfirmed"),
                    None,
                );
                Ok(StageOutcome::PaymentDeclined)
            }
            Ok(PaymentOutcome::Failed(message)) => {
                tracing::warn!(message = %message, "Payment failed");
                self.set_payment_pending(id, false).await;
                self.listener.notify_error(&message, None);
                Ok(StageOutcome::PaymentDeclined)
            }
            Ok(PaymentOutcome::Cancelled) => {
                tracing::info!("Payment cancelled");
                self.set_payment_pending(id, false).await;
                Ok(StageOutcome::PaymentDeclined)
            }
            Err(e) => {
                tracing::error!(error = %e, "Payment gate failed");
                self.set_payment_pending(id, false).await;
                let description = e.to_string();
                self.listener.notify_error(
                    &self.translator.translate("notifications.payment_failed"),
                    Some(&description),
                );
                Ok(StageOutcome::PaymentDeclined)
            }
        }
    }

    /// Generate the brief, chaining onward in simple mode.
    ///
    /// # Errors
    ///
    /// Returns an error if a store operation fails.
    pub async fn generate_brief(&self, story: Story) -> StoryloomResult<StageOutcome> {
        let outcome = self.brief_stage(story).await?;
        self.drive(GenerationStep::Brief, outcome).await
    }

    /// Generate one scene per brief stub, chaining onward in simple mode.
    ///
    /// # Errors
    ///
    /// Returns an error if a store operation fails.
    pub async fn generate_scenes(&self, story: Story) -> StoryloomResult<StageOutcome> {
        let outcome = self.scenes_stage(story).await?;
        self.drive(GenerationStep::Scenes, outcome).await
    }

    /// Generate titles, description, summaries and cover captions from
    /// `scenes`, chaining onward in simple mode.
    ///
    /// # Errors
    ///
    /// Returns an error if a store operation fails.
    pub async fn generate_meta(
        &self,
        story: Story,
        scenes: Vec<Scene>,
    ) -> StoryloomResult<StageOutcome> {
        let outcome = self.meta_stage(story, scenes).await?;
        self.drive(GenerationStep::Meta, outcome).await
    }

    /// Generate the cover image.
    ///
    /// # Errors
    ///
    /// Returns an error if a store operation fails.
    pub async fn generate_cover(&self, story: Story) -> StoryloomResult<StageOutcome> {
        let outcome = self.cover_stage(story).await?;
        self.drive(GenerationStep::Cover, outcome).await
    }

    /// Rename the story.
    ///
    /// # Errors
    ///
    /// Returns an error if the story is not stored.
    #[tracing::instrument(skip(self, story, title), fields(story_id = %story.id))]
    pub async fn change_title(
        &self,
        story: &Story,
        title: impl Into<String>,
    ) -> StoryloomResult<Story> {
        let updated = self
            .stories
            .update_story(story.id, StoryPatch::default().with_title(title))
            .await?;
        tracing::debug!(title = %updated.title, "Title changed");
        Ok(updated)
    }

    /// Current step, busy stages and payment state of `story_id`.
    pub async fn status(&self, story_id: StoryId) -> GenerationStatus {
        self.board.get(story_id).await
    }

    /// The story's scenes in `scene_ids` order.
    ///
    /// # Errors
    ///
    /// Returns an error if the scene store fails.
    pub async fn scenes_for(&self, story: &Story) -> StoryloomResult<Vec<Scene>> {
        self.scenes.get_scenes_by_ids(&story.scene_ids).await
    }

    /// Progress number (1 to 5) of the stored story, 0 when it is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the story store fails.
    pub async fn progress(&self, story_id: StoryId) -> StoryloomResult<u8> {
        let story = self.stories.get_story_by_id(story_id).await?;
        Ok(progress_step(story.as_ref()))
    }

    /// Follow the transition table from `step` while stages complete.
    async fn drive(
        &self,
        mut step: GenerationStep,
        mut outcome: StageOutcome,
    ) -> StoryloomResult<StageOutcome> {
        loop {
            let StageOutcome::Completed(story) = &outcome else {
                return Ok(outcome);
            };
            let Some(next) = next_step(story, step) else {
                return Ok(outcome);
            };
            tracing::debug!(story_id = %story.id, from = %step, to = %next, "Chaining stage");

            let story = story.clone();
            outcome = match next {
                GenerationStep::Brief => self.brief_stage(story).await?,
                GenerationStep::Scenes => self.scenes_stage(story).await?,
                GenerationStep::Meta => {
                    let scenes = self.scenes_for(&story).await?;
                    self.meta_stage(story, scenes).await?
                }
                GenerationStep::Cover => self.cover_stage(story).await?,
            };
            step = next;
        }
    }

    #[tracing::instrument(skip(self, story), fields(story_id = %story.id))]
    async fn brief_stage(&self, story: Story) -> StoryloomResult<StageOutcome> {
        let id = story.id;
        self.set_step(id, GenerationStep::Brief).await;
        self.set_payment_pending(id, false).await;

        self.with_busy(id, GenerationStep::Brief, async {
            let Some(brief) = self.writer.brief(&story).await else {
                tracing::warn!("Brief generation produced nothing");
                return Ok(StageOutcome::NoContent(GenerationStep::Brief));
            };

            let briefed = story.with_brief(brief);
            let stored = self
                .stories
                .update_story(id, StoryPatch::replace(&briefed))
                .await?;
            tracing::info!(
                brief_length = stored.brief.as_deref().map_or(0, str::len),
                "Brief generated"
            );
            Ok::<_, StoryloomError>(StageOutcome::Completed(stored))
        })
        .await
    }

    #[tracing::instrument(skip(self, story), fields(story_id = %story.id))]
    async fn scenes_stage(&self, story: Story) -> StoryloomResult<StageOutcome> {
        let id = story.id;
        self.set_step(id, GenerationStep::Scenes).await;

        let Some(brief) = story.brief_text() else {
            tracing::debug!("No brief, skipping scenes");
            return Ok(StageOutcome::Skipped(GenerationStep::Scenes));
        };
        let stubs = format_brief(brief);
        let model = self.writer.text_model_for(&story);
        tracing::debug!(stubs = stubs.len(), model = %model, "Formatted brief");

        self.with_busy(id, GenerationStep::Scenes, async {
            let mut current = story.clone();
            for stub in &stubs {
                let Some(content) = self.writer.scene_content(&stubs, stub.ordinal, &model).await
                else {
                    tracing::warn!(ordinal = stub.ordinal, "Scene produced nothing, skipping");
                    continue;
                };

                let scene = Scene::new(stub.title.as_str(), content);
                self.scenes.create_scene(&scene).await?;

                let mut scene_ids = current.scene_ids.clone();
                scene_ids.push(scene.id);
                current = self
                    .stories
                    .update_story(id, StoryPatch::default().with_scene_ids(scene_ids))
                    .await?;
                tracing::info!(ordinal = stub.ordinal, scene_id = %scene.id, "Scene generated");

                match self.writer.scene_summary(&scene.content, &model).await {
                    Some(summary) => {
                        self.scenes
                            .update_scene(scene.id, ScenePatch::default().with_summary(Some(summary)))
                            .await?;
                    }
                    None => {
                        tracing::warn!(scene_id = %scene.id, "Scene summary produced nothing");
                    }
                }
            }

            tracing::info!(scenes = current.scene_ids.len(), "Scenes stage finished");
            Ok::<_, StoryloomError>(StageOutcome::Completed(current))
        })
        .await
    }

    #[tracing::instrument(skip(self, story, scenes), fields(story_id = %story.id, scenes = scenes.len()))]
    async fn meta_stage(&self, story: Story, scenes: Vec<Scene>) -> StoryloomResult<StageOutcome> {
        if scenes.is_empty() {
            tracing::debug!("No scenes, skipping meta");
            return Ok(StageOutcome::Skipped(GenerationStep::Meta));
        }

        let id = story.id;
        self.set_step(id, GenerationStep::Meta).await;

        self.with_busy(id, GenerationStep::Meta, async {
            let context = summary_context(&story, scenes);
            let model = self.writer.text_model_for(&story);

            let Some(raw) = self.writer.meta(&story, &context, &model).await else {
                tracing::warn!("Meta generation produced nothing");
                return Ok(StageOutcome::NoContent(GenerationStep::Meta));
            };
            let meta = extract_story_meta(&raw).unwrap_or_else(|| {
                tracing::warn!(
                    response_length = raw.len(),
                    "Meta response had no JSON object, falling back field by field"
                );
                StoryMeta::default()
            });

            let merged = meta.merge_into(&story);
            let stored = self
                .stories
                .update_story(id, StoryPatch::replace(&merged))
                .await?;
            self.listener.scroll_to_top(id);
            tracing::info!(title = %stored.title, "Meta generated");
            Ok::<_, StoryloomError>(StageOutcome::Completed(stored))
        })
        .await
    }

    #[tracing::instrument(skip(self, story), fields(story_id = %story.id))]
    async fn cover_stage(&self, story: Story) -> StoryloomResult<StageOutcome> {
        let Some(caption) = story.cover_caption_en().map(str::to_string) else {
            tracing::debug!("No English cover caption, skipping cover");
            return Ok(StageOutcome::Skipped(GenerationStep::Cover));
        };

        let id = story.id;
        self.set_step(id, GenerationStep::Cover).await;

        self.with_busy(id, GenerationStep::Cover, async {
            let model = self.writer.image_model_for(&story);
            self.stories
                .update_story(
                    id,
                    StoryPatch::default()
                        .with_cover(None::<String>)
                        .with_image_model(Some(model.clone())),
                )
                .await?;

            match self.writer.cover(&caption, &model).await {
                Some(reference) => {
                    let stored = self
                        .stories
                        .update_story(
                            id,
                            StoryPatch::default()
                                .with_cover(Some(reference))
                                .with_image_model(Some(model)),
                        )
                        .await?;
                    tracing::info!("Cover generated");
                    Ok::<_, StoryloomError>(StageOutcome::Completed(stored))
                }
                None => {
                    tracing::error!(model = %model, "Cover generation failed");
                    self.listener.notify_error(
                        &self.translator.translate("notifications.cover_failed"),
                        None,
                    );
                    Ok(StageOutcome::NoContent(GenerationStep::Cover))
                }
            }
        })
        .await
    }

    async fn set_step(&self, id: StoryId, step: GenerationStep) {
        self.board.set_step(id, step).await;
        self.listener.step_changed(id, step);
    }

    async fn set_payment_pending(&self, id: StoryId, pending: bool) {
        self.board.set_payment_pending(id, pending).await;
        self.listener.payment_pending(id, pending);
    }

    /// Run `work` with the busy flag of `step` on, clearing it however `work` ends.
    async fn with_busy<T>(
        &self,
        id: StoryId,
        step: GenerationStep,
        work: impl Future<Output = StoryloomResult<T>>,
    ) -> StoryloomResult<T> {
        self.board.set_busy(id, step, true).await;
        self.listener.busy_changed(id, step, true);

        let result = work.await;

        self.board.set_busy(id, step, false).await;
        self.listener.busy_changed(id, step, false);
        result
    }
}

/// Scene summaries joined by newlines in `scene_ids` order. Scenes the story
/// does not list go last; a scene without a summary contributes an empty line.
fn summary_context(story: &Story, mut scenes: Vec<Scene>) -> String {
    scenes.sort_by_key(|scene| {
        story
            .scene_ids
            .iter()
            .position(|id| *id == scene.id)
            .unwrap_or(usize::MAX)
    });
    scenes
        .iter()
        .map(|scene| scene.summary.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_context_follows_scene_ids() {
        let mut first = Scene::new("One", "a");
        first.summary = Some("first".to_string());
        let second = Scene::new("Two", "b");
        let mut stray = Scene::new("Stray", "c");
        stray.summary = Some("stray".to_string());

        let story = Story::new("Order").with_scene_ids(vec![first.id, second.id]);
        let context = summary_context(&story, vec![stray, second, first]);

        assert_eq!(context, "first\n\nstray");
    }
}
