//! Persistence traits for stories and scenes.

use async_trait::async_trait;
use storyloom_core::{Scene, SceneId, ScenePatch, Story, StoryId, StoryPatch};
use storyloom_error::StoryloomResult;

/// Keyed story persistence.
///
/// Updates for different ids are independent; an implementation must not
/// require callers to serialize work across stories.
#[async_trait]
pub trait StoryStore: Send + Sync {
    /// Store a new story. Fails if the id is already taken.
    async fn insert_story(&self, story: &Story) -> StoryloomResult<()>;

    /// Fetch a story, `None` when unknown.
    async fn get_story_by_id(&self, id: StoryId) -> StoryloomResult<Option<Story>>;

    /// Apply a partial update and return the stored result.
    ///
    /// Fails if the story does not exist.
    async fn update_story(&self, id: StoryId, patch: StoryPatch) -> StoryloomResult<Story>;

    /// All stored stories.
    async fn list_stories(&self) -> StoryloomResult<Vec<Story>>;
}

/// Keyed scene persistence.
#[async_trait]
pub trait SceneStore: Send + Sync {
    /// Store a new scene. Fails if the id is already taken.
    async fn create_scene(&self, scene: &Scene) -> StoryloomResult<()>;

    /// Apply a partial update and return the stored result.
    async fn update_scene(&self, id: SceneId, patch: ScenePatch) -> StoryloomResult<Scene>;

    /// Fetch scenes in the order of `ids`, skipping unknown ids.
    async fn get_scenes_by_ids(&self, ids: &[SceneId]) -> StoryloomResult<Vec<Scene>>;
}
