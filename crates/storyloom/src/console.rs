//! Listener that reports pipeline events on the terminal.

use std::sync::Arc;
use storyloom_core::{GenerationStep, StoryId};
use storyloom_interface::{GenerationListener, Translator};
use tracing::info;

/// Prints progress lines and notifications to stderr.
#[derive(Clone)]
pub struct ConsoleListener {
    translator: Arc<dyn Translator>,
}

impl std::fmt::Debug for ConsoleListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleListener").finish_non_exhaustive()
    }
}

impl ConsoleListener {
    /// Listener looking labels up in `translator`.
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self { translator }
    }
}

impl GenerationListener for ConsoleListener {
    fn step_changed(&self, story_id: StoryId, step: GenerationStep) {
        info!(story_id = %story_id, step = %step, "Step started");
    }

    fn busy_changed(&self, _story_id: StoryId, step: GenerationStep, busy: bool) {
        if busy && step == GenerationStep::Scenes {
            eprintln!("{}", self.translator.translate("labels.generating_scene"));
        }
    }

    fn payment_pending(&self, story_id: StoryId, pending: bool) {
        info!(story_id = %story_id, pending, "Payment pending changed");
    }

    fn notify_error(&self, message: &str, description: Option<&str>) {
        match description {
            Some(description) => eprintln!("error: {} ({})", message, description),
            None => eprintln!("error: {}", message),
        }
    }
}
