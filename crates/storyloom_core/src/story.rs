//! Story records and partial updates.

use crate::SceneId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a story.
pub type StoryId = Uuid;

/// A story moving through the generation pipeline.
///
/// Stories are created by the caller and then filled in stage by stage.
/// `scene_ids` only ever grows; scenes are appended in stub order.
///
/// # Examples
///
/// ```
/// use storyloom_core::Story;
///
/// let story = Story::new("The Lantern Keeper")
///     .with_premise("A lighthouse keeper befriends a storm")
///     .with_is_simple(true);
///
/// assert_eq!(story.title, "The Lantern Keeper");
/// assert!(story.brief.is_none());
/// assert!(story.scene_ids.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_setters::Setters)]
#[setters(prefix = "with_", into, strip_option)]
pub struct Story {
    /// Unique story identifier
    pub id: StoryId,
    /// Display title
    pub title: String,
    /// User-supplied idea the brief is generated from
    #[serde(default)]
    pub premise: Option<String>,
    /// Generated outline the scenes are derived from
    #[serde(default)]
    pub brief: Option<String>,
    /// Ordered scene identifiers
    #[serde(default)]
    pub scene_ids: Vec<SceneId>,
    /// Title candidates proposed during meta generation
    #[serde(default)]
    pub names: Vec<String>,
    /// Short description for listings
    #[serde(default)]
    pub description: Option<String>,
    /// Story summary in the story language
    #[serde(default)]
    pub summary: Option<String>,
    /// Story summary in English
    #[serde(default)]
    pub summary_en: Option<String>,
    /// Cover image reference (URL or data URI)
    #[serde(default)]
    pub cover: Option<String>,
    /// Cover caption in the story language
    #[serde(default)]
    pub cover_text: Option<String>,
    /// Cover caption in English, used as the image prompt
    #[serde(default)]
    pub cover_text_en: Option<String>,
    /// Chosen text model
    #[serde(default)]
    pub text_model: Option<String>,
    /// Chosen image model
    #[serde(default)]
    pub image_model: Option<String>,
    /// Reference of the confirmed payment
    #[serde(default)]
    pub payment_transaction: Option<String>,
    /// Chain every stage automatically
    #[serde(default)]
    pub is_simple: bool,
}

impl Story {
    /// Create an empty story with a fresh id.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            premise: None,
            brief: None,
            scene_ids: Vec::new(),
            names: Vec::new(),
            description: None,
            summary: None,
            summary_en: None,
            cover: None,
            cover_text: None,
            cover_text_en: None,
            text_model: None,
            image_model: None,
            payment_transaction: None,
            is_simple: false,
        }
    }

    /// Brief text, if present and not blank.
    pub fn brief_text(&self) -> Option<&str> {
        present(&self.brief)
    }

    /// Summary text, if present and not blank.
    pub fn summary_text(&self) -> Option<&str> {
        present(&self.summary)
    }

    /// Cover reference, if present and not blank.
    pub fn cover_ref(&self) -> Option<&str> {
        present(&self.cover)
    }

    /// English cover caption, if present and not blank.
    pub fn cover_caption_en(&self) -> Option<&str> {
        present(&self.cover_text_en)
    }

    /// Chosen text model, if present and not blank.
    pub fn chosen_text_model(&self) -> Option<&str> {
        present(&self.text_model)
    }

    /// Chosen image model, if present and not blank.
    pub fn chosen_image_model(&self) -> Option<&str> {
        present(&self.image_model)
    }

    /// Whether a payment has been confirmed for this story.
    pub fn is_paid(&self) -> bool {
        present(&self.payment_transaction).is_some()
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

/// A partial story update.
///
/// Unset fields are left alone. Nullable fields take an `Option` so a patch
/// can clear them.
///
/// # Examples
///
/// ```
/// use storyloom_core::{Story, StoryPatch};
///
/// let mut story = Story::new("Draft").with_cover("https://img/1.png");
/// StoryPatch::default()
///     .with_cover(None::<String>)
///     .with_image_model(Some("dall-e-3".to_string()))
///     .apply(&mut story);
///
/// assert!(story.cover.is_none());
/// assert_eq!(story.image_model.as_deref(), Some("dall-e-3"));
/// assert_eq!(story.title, "Draft");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_setters::Setters)]
#[setters(prefix = "with_", into, strip_option)]
pub struct StoryPatch {
    /// New title
    pub title: Option<String>,
    /// New premise
    pub premise: Option<Option<String>>,
    /// New brief
    pub brief: Option<Option<String>>,
    /// New scene id list
    pub scene_ids: Option<Vec<SceneId>>,
    /// New title candidates
    pub names: Option<Vec<String>>,
    /// New description
    pub description: Option<Option<String>>,
    /// New summary
    pub summary: Option<Option<String>>,
    /// New English summary
    pub summary_en: Option<Option<String>>,
    /// New cover reference
    pub cover: Option<Option<String>>,
    /// New cover caption
    pub cover_text: Option<Option<String>>,
    /// New English cover caption
    pub cover_text_en: Option<Option<String>>,
    /// New text model
    pub text_model: Option<Option<String>>,
    /// New image model
    pub image_model: Option<Option<String>>,
    /// New payment reference
    pub payment_transaction: Option<Option<String>>,
    /// New simple flag
    pub is_simple: Option<bool>,
}

impl StoryPatch {
    /// A patch that overwrites every field with the values of `story`.
    pub fn replace(story: &Story) -> Self {
        Self {
            title: Some(story.title.clone()),
            premise: Some(story.premise.clone()),
            brief: Some(story.brief.clone()),
            scene_ids: Some(story.scene_ids.clone()),
            names: Some(story.names.clone()),
            description: Some(story.description.clone()),
            summary: Some(story.summary.clone()),
            summary_en: Some(story.summary_en.clone()),
            cover: Some(story.cover.clone()),
            cover_text: Some(story.cover_text.clone()),
            cover_text_en: Some(story.cover_text_en.clone()),
            text_model: Some(story.text_model.clone()),
            image_model: Some(story.image_model.clone()),
            payment_transaction: Some(story.payment_transaction.clone()),
            is_simple: Some(story.is_simple),
        }
    }

    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the set fields onto `story`.
    pub fn apply(self, story: &mut Story) {
        if let Some(title) = self.title {
            story.title = title;
        }
        if let Some(premise) = self.premise {
            story.premise = premise;
        }
        if let Some(brief) = self.brief {
            story.brief = brief;
        }
        if let Some(scene_ids) = self.scene_ids {
            story.scene_ids = scene_ids;
        }
        if let Some(names) = self.names {
            story.names = names;
        }
        if let Some(description) = self.description {
            story.description = description;
        }
        if let Some(summary) = self.summary {
            story.summary = summary;
        }
        if let Some(summary_en) = self.summary_en {
            story.summary_en = summary_en;
        }
        if let Some(cover) = self.cover {
            story.cover = cover;
        }
        if let Some(cover_text) = self.cover_text {
            story.cover_text = cover_text;
        }
        if let Some(cover_text_en) = self.cover_text_en {
            story.cover_text_en = cover_text_en;
        }
        if let Some(text_model) = self.text_model {
            story.text_model = text_model;
        }
        if let Some(image_model) = self.image_model {
            story.image_model = image_model;
        }
        if let Some(payment_transaction) = self.payment_transaction {
            story.payment_transaction = payment_transaction;
        }
        if let Some(is_simple) = self.is_simple {
            story.is_simple = is_simple;
        }
    }
}
