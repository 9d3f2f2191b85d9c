//! Per-story generation status: current step, busy stages, pending payment.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use storyloom_core::{GenerationStep, StoryId};
use tokio::sync::RwLock;

/// Snapshot of what the pipeline is doing for one story.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct GenerationStatus {
    /// Last stage started. Never rolled back on failure.
    current_step: Option<GenerationStep>,
    /// Stages whose loading indicator is on
    busy: BTreeSet<GenerationStep>,
    /// Waiting on the payment gate
    payment_pending: bool,
}

impl GenerationStatus {
    /// Whether `step` is currently running.
    pub fn is_busy(&self, step: GenerationStep) -> bool {
        self.busy.contains(&step)
    }
}

/// Status of every story the generator has touched.
#[derive(Debug, Clone, Default)]
pub struct StatusBoard {
    entries: Arc<RwLock<HashMap<StoryId, GenerationStatus>>>,
}

impl StatusBoard {
    /// Empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Status of `story_id`; stories never seen report the default status.
    pub async fn get(&self, story_id: StoryId) -> GenerationStatus {
        self.entries
            .read()
            .await
            .get(&story_id)
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) async fn set_step(&self, story_id: StoryId, step: GenerationStep) {
        self.entries
            .write()
            .await
            .entry(story_id)
            .or_default()
            .current_step = Some(step);
    }

    pub(crate) async fn set_busy(&self, story_id: StoryId, step: GenerationStep, busy: bool) {
        let mut entries = self.entries.write().await;
        let status = entries.entry(story_id).or_default();
        if busy {
            status.busy.insert(step);
        } else {
            status.busy.remove(&step);
        }
    }

    pub(crate) async fn set_payment_pending(&self, story_id: StoryId, pending: bool) {
        self.entries
            .write()
            .await
            .entry(story_id)
            .or_default()
            .payment_pending = pending;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_stories_are_tracked_independently() {
        let board = StatusBoard::new();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        board.set_step(first, GenerationStep::Meta).await;
        board.set_busy(first, GenerationStep::Meta, true).await;
        board.set_payment_pending(second, true).await;

        let a = board.get(first).await;
        assert_eq!(a.current_step(), &Some(GenerationStep::Meta));
        assert!(a.is_busy(GenerationStep::Meta));
        assert!(!a.payment_pending());

        let b = board.get(second).await;
        assert!(b.current_step().is_none());
        assert!(*b.payment_pending());
    }

    #[tokio::test]
    async fn test_busy_flag_clears() {
        let board = StatusBoard::new();
        let id = Uuid::new_v4();
        board.set_busy(id, GenerationStep::Cover, true).await;
        board.set_busy(id, GenerationStep::Cover, false).await;
        assert!(board.get(id).await.busy().is_empty());
    }
}
