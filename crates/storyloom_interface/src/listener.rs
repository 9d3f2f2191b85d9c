//! Observer for the side effects a generation run has on the presentation layer.

use storyloom_core::{GenerationStep, StoryId};

/// Receives the UI-facing events of a generation run.
///
/// Every method has a no-op default so implementors pick what they render.
pub trait GenerationListener: Send + Sync {
    /// A stage started for `story_id`. Not rolled back on failure.
    fn step_changed(&self, _story_id: StoryId, _step: GenerationStep) {}

    /// A stage's loading indicator turned on or off.
    fn busy_changed(&self, _story_id: StoryId, _step: GenerationStep, _busy: bool) {}

    /// The story is waiting on the payment gate, or stopped waiting.
    fn payment_pending(&self, _story_id: StoryId, _pending: bool) {}

    /// A user-visible error notification.
    fn notify_error(&self, _message: &str, _description: Option<&str>) {}

    /// The viewport should return to the top of the story.
    fn scroll_to_top(&self, _story_id: StoryId) {}
}

/// Listener that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl GenerationListener for NoopListener {}
