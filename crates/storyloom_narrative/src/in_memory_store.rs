//! In-memory implementation of the story and scene stores.
//!
//! Backs the CLI and the tests. All data is lost when the store is dropped.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use storyloom_core::{Scene, SceneId, ScenePatch, Story, StoryId, StoryPatch};
use storyloom_error::{StorageError, StorageErrorKind, StoryloomResult};
use storyloom_interface::{SceneStore, StoryStore};
use tokio::sync::RwLock;
use tracing::trace;

/// HashMap-backed store for stories and scenes.
///
/// Cloning shares the underlying maps.
///
/// # Example
/// ```
/// use storyloom_core::Story;
/// use storyloom_interface::StoryStore;
/// use storyloom_narrative::InMemoryStoryStore;
///
/// # #[tokio::main]
/// # async fn main() {
/// let store = InMemoryStoryStore::new();
/// let story = Story::new("Harbor Lights");
/// store.insert_story(&story).await.unwrap();
/// assert_eq!(store.get_story_by_id(story.id).await.unwrap(), Some(story));
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStoryStore {
    stories: Arc<RwLock<HashMap<StoryId, Story>>>,
    scenes: Arc<RwLock<HashMap<SceneId, Scene>>>,
}

impl InMemoryStoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored scenes.
    pub async fn scene_count(&self) -> usize {
        self.scenes.read().await.len()
    }
}

#[async_trait]
impl StoryStore for InMemoryStoryStore {
    async fn insert_story(&self, story: &Story) -> StoryloomResult<()> {
        let mut stories = self.stories.write().await;
        if stories.contains_key(&story.id) {
            return Err(StorageError::new(StorageErrorKind::Duplicate(story.id.to_string())).into());
        }
        stories.insert(story.id, story.clone());
        trace!(story_id = %story.id, "Inserted story");
        Ok(())
    }

    async fn get_story_by_id(&self, id: StoryId) -> StoryloomResult<Option<Story>> {
        Ok(self.stories.read().await.get(&id).cloned())
    }

    async fn update_story(&self, id: StoryId, patch: StoryPatch) -> StoryloomResult<Story> {
        let mut stories = self.stories.write().await;
        let story = stories
            .get_mut(&id)
            .ok_or_else(|| StorageError::new(StorageErrorKind::StoryNotFound(id.to_string())))?;
        patch.apply(story);
        trace!(story_id = %id, "Updated story");
        Ok(story.clone())
    }

    async fn list_stories(&self) -> StoryloomResult<Vec<Story>> {
        Ok(self.stories.read().await.values().cloned().collect())
    }
}

#[async_trait]
impl SceneStore for InMemoryStoryStore {
    async fn create_scene(&self, scene: &Scene) -> StoryloomResult<()> {
        let mut scenes = self.scenes.write().await;
        if scenes.contains_key(&scene.id) {
            return Err(StorageError::new(StorageErrorKind::Duplicate(scene.id.to_string())).into());
        }
        scenes.insert(scene.id, scene.clone());
        trace!(scene_id = %scene.id, "Created scene");
        Ok(())
    }

    async fn update_scene(&self, id: SceneId, patch: ScenePatch) -> StoryloomResult<Scene> {
        let mut scenes = self.scenes.write().await;
        let scene = scenes
            .get_mut(&id)
            .ok_or_else(|| StorageError::new(StorageErrorKind::SceneNotFound(id.to_string())))?;
        patch.apply(scene);
        Ok(scene.clone())
    }

    async fn get_scenes_by_ids(&self, ids: &[SceneId]) -> StoryloomResult<Vec<Scene>> {
        let scenes = self.scenes.read().await;
        Ok(ids.iter().filter_map(|id| scenes.get(id).cloned()).collect())
    }
}
