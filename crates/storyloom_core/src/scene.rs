//! Scene records, partial updates and brief stubs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a scene.
pub type SceneId = Uuid;

/// One generated story segment.
///
/// The id is assigned when the scene is created, before a summary exists.
/// A scene whose summary call failed keeps `summary == None` for good.
///
/// # Examples
///
/// ```
/// use storyloom_core::Scene;
///
/// let a = Scene::new("Arrival", "The ship docked at dawn.");
/// let b = Scene::new("Arrival", "The ship docked at dawn.");
/// assert_ne!(a.id, b.id);
/// assert!(a.summary.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Unique scene identifier
    pub id: SceneId,
    /// Title taken from the brief stub
    pub title: String,
    /// Generated body text
    pub content: String,
    /// Generated summary of `content`
    #[serde(default)]
    pub summary: Option<String>,
}

impl Scene {
    /// Create a scene with a fresh id and no summary.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            summary: None,
        }
    }
}

/// A partial scene update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_setters::Setters)]
#[setters(prefix = "with_", into, strip_option)]
pub struct ScenePatch {
    /// New title
    pub title: Option<String>,
    /// New content
    pub content: Option<String>,
    /// New summary
    pub summary: Option<Option<String>>,
}

impl ScenePatch {
    /// Apply the set fields onto `scene`.
    pub fn apply(self, scene: &mut Scene) {
        if let Some(title) = self.title {
            scene.title = title;
        }
        if let Some(content) = self.content {
            scene.content = content;
        }
        if let Some(summary) = self.summary {
            scene.summary = summary;
        }
    }
}

/// One ordered entry of a formatted brief.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneStub {
    /// 1-based position in the brief
    pub ordinal: usize,
    /// Scene title derived from the brief
    pub title: String,
    /// Full stub text, heading line included
    pub text: String,
}
