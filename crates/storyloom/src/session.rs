//! One end-to-end run over a fresh story, as the CLI performs it.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storyloom_core::{GenerationStep, Scene, Story, StoryId, progress_step};
use storyloom_error::{StorageError, StorageErrorKind, StoryloomResult};
use storyloom_interface::StoryStore;
use storyloom_narrative::{StageOutcome, StoryGenerator};
use tracing::{info, instrument, warn};

/// What to generate.
#[derive(Debug, Clone, Default, PartialEq, derive_getters::Getters)]
pub struct RunOptions {
    /// Story title
    title: String,
    /// Idea the brief is generated from
    premise: Option<String>,
    /// Text model stored on the story
    text_model: Option<String>,
    /// Image model stored on the story
    image_model: Option<String>,
    /// Run each stage explicitly instead of chaining
    step_by_step: bool,
}

impl RunOptions {
    /// Options for a story titled `title`, chaining every stage.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the premise.
    pub fn with_premise(mut self, premise: Option<String>) -> Self {
        self.premise = premise;
        self
    }

    /// Set the text model.
    pub fn with_text_model(mut self, model: Option<String>) -> Self {
        self.text_model = model;
        self
    }

    /// Set the image model.
    pub fn with_image_model(mut self, model: Option<String>) -> Self {
        self.image_model = model;
        self
    }

    /// Run stages one call at a time.
    pub fn with_step_by_step(mut self, step_by_step: bool) -> Self {
        self.step_by_step = step_by_step;
        self
    }

    /// A new story carrying these options.
    pub fn story(&self) -> Story {
        let mut story = Story::new(self.title.clone()).with_is_simple(!self.step_by_step);
        story.premise = self.premise.clone();
        story.text_model = self.text_model.clone();
        story.image_model = self.image_model.clone();
        story
    }
}

/// Final state of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct StoryReport {
    /// Stored story
    story: Story,
    /// Its scenes in order
    scenes: Vec<Scene>,
    /// Progress number (1 to 5)
    progress: u8,
    /// Whether the payment gate declined
    payment_declined: bool,
}

/// Store a fresh story built from `options` and run the pipeline on it.
///
/// In simple mode one `start` call chains every stage. Step by step, each
/// stage is invoked on the latest stored story; a stage whose precondition
/// is missing is a no-op.
///
/// # Errors
///
/// Returns an error if a store operation fails.
#[instrument(skip_all, fields(title = %options.title, step_by_step = options.step_by_step))]
pub async fn run_story(
    generator: &StoryGenerator,
    stories: Arc<dyn StoryStore>,
    options: &RunOptions,
) -> StoryloomResult<StoryReport> {
    let story = options.story();
    let id = story.id;
    stories.insert_story(&story).await?;

    let outcome = generator.start(story).await?;
    let payment_declined = outcome == StageOutcome::PaymentDeclined;

    if payment_declined {
        warn!("Payment declined, nothing generated");
    } else if options.step_by_step {
        for step in [GenerationStep::Scenes, GenerationStep::Meta, GenerationStep::Cover] {
            let latest = reload(stories.as_ref(), id).await?;
            let outcome = match step {
                GenerationStep::Scenes => generator.generate_scenes(latest).await?,
                GenerationStep::Meta => {
                    let scenes = generator.scenes_for(&latest).await?;
                    generator.generate_meta(latest, scenes).await?
                }
                _ => generator.generate_cover(latest).await?,
            };
            info!(step = %step, outcome = %outcome_name(&outcome), "Stage finished");
        }
    }

    let story = reload(stories.as_ref(), id).await?;
    let scenes = generator.scenes_for(&story).await?;
    let progress = progress_step(Some(&story));
    info!(progress, scenes = scenes.len(), "Run finished");

    Ok(StoryReport {
        story,
        scenes,
        progress,
        payment_declined,
    })
}

async fn reload(stories: &dyn StoryStore, id: StoryId) -> StoryloomResult<Story> {
    stories
        .get_story_by_id(id)
        .await?
        .ok_or_else(|| StorageError::new(StorageErrorKind::StoryNotFound(id.to_string())).into())
}

fn outcome_name(outcome: &StageOutcome) -> &'static str {
    match outcome {
        StageOutcome::Completed(_) => "completed",
        StageOutcome::Skipped(_) => "skipped",
        StageOutcome::NoContent(_) => "no content",
        StageOutcome::PaymentDeclined => "payment declined",
    }
}
