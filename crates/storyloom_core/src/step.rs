//! Pipeline steps and the derived progress stage.

use crate::Story;
use serde::{Deserialize, Serialize};

/// A unit of the generation pipeline, in execution order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum GenerationStep {
    /// Generate the outline
    Brief,
    /// Generate one scene per outline entry
    Scenes,
    /// Generate titles, description, summary and cover captions
    Meta,
    /// Generate the cover image
    Cover,
}

/// How far a story has progressed, derived from the fields it carries.
///
/// # Examples
///
/// ```
/// use storyloom_core::{ProgressStage, Story};
///
/// let story = Story::new("Only a brief").with_brief("1. Start");
/// assert_eq!(ProgressStage::of(&story), ProgressStage::Briefed);
/// assert_eq!(ProgressStage::of(&story).number(), 2);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
)]
pub enum ProgressStage {
    /// Nothing generated yet
    Created,
    /// Brief present
    Briefed,
    /// At least one scene present
    Scened,
    /// Summary present
    Summarized,
    /// Cover present
    Illustrated,
}

impl ProgressStage {
    /// Derive the stage, checking the latest stage's field first.
    pub fn of(story: &Story) -> Self {
        if story.cover_ref().is_some() {
            Self::Illustrated
        } else if story.summary_text().is_some() {
            Self::Summarized
        } else if !story.scene_ids.is_empty() {
            Self::Scened
        } else if story.brief_text().is_some() {
            Self::Briefed
        } else {
            Self::Created
        }
    }

    /// Step number shown by progress indicators (1 through 5).
    pub fn number(self) -> u8 {
        match self {
            Self::Created => 1,
            Self::Briefed => 2,
            Self::Scened => 3,
            Self::Summarized => 4,
            Self::Illustrated => 5,
        }
    }
}

/// Progress step for an optional story; 0 when there is no story.
pub fn progress_step(story: Option<&Story>) -> u8 {
    story.map(|s| ProgressStage::of(s).number()).unwrap_or(0)
}
