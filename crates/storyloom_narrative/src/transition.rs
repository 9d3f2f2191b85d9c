//! Which stage follows a completed one.

use storyloom_core::{GenerationStep, Story};

/// Condition a story must meet for a transition to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionGuard {
    /// The story runs in simple mode
    Simple,
    /// The story runs in simple mode and has chosen a text model
    SimpleWithTextModel,
}

impl TransitionGuard {
    fn allows(self, is_simple: bool, has_text_model: bool) -> bool {
        match self {
            Self::Simple => is_simple,
            Self::SimpleWithTextModel => is_simple && has_text_model,
        }
    }
}

/// One edge of the stage graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTransition {
    /// Stage that just completed
    pub from: GenerationStep,
    /// Stage to run next
    pub to: GenerationStep,
    /// Condition for chaining
    pub guard: TransitionGuard,
}

/// Every automatic transition. Cover has no outgoing edge.
pub const TRANSITIONS: [StageTransition; 3] = [
    StageTransition {
        from: GenerationStep::Brief,
        to: GenerationStep::Scenes,
        guard: TransitionGuard::Simple,
    },
    StageTransition {
        from: GenerationStep::Scenes,
        to: GenerationStep::Meta,
        guard: TransitionGuard::SimpleWithTextModel,
    },
    StageTransition {
        from: GenerationStep::Meta,
        to: GenerationStep::Cover,
        guard: TransitionGuard::Simple,
    },
];

impl StageTransition {
    /// The stage to chain into after `step`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyloom_core::GenerationStep;
    /// use storyloom_narrative::StageTransition;
    ///
    /// assert_eq!(
    ///     StageTransition::next(GenerationStep::Brief, true, false),
    ///     Some(GenerationStep::Scenes)
    /// );
    /// assert_eq!(StageTransition::next(GenerationStep::Scenes, true, false), None);
    /// assert_eq!(StageTransition::next(GenerationStep::Cover, true, true), None);
    /// ```
    pub fn next(
        step: GenerationStep,
        is_simple: bool,
        has_text_model: bool,
    ) -> Option<GenerationStep> {
        TRANSITIONS
            .iter()
            .find(|transition| transition.from == step)
            .filter(|transition| transition.guard.allows(is_simple, has_text_model))
            .map(|transition| transition.to)
    }
}

/// The stage to chain into after `step` completed for `story`.
pub fn next_step(story: &Story, step: GenerationStep) -> Option<GenerationStep> {
    StageTransition::next(step, story.is_simple, story.chosen_text_model().is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_nothing_chains_outside_simple_mode() {
        for step in GenerationStep::iter() {
            assert_eq!(StageTransition::next(step, false, true), None);
        }
    }

    #[test]
    fn test_full_chain_in_simple_mode_with_text_model() {
        let story = Story::new("Chain")
            .with_is_simple(true)
            .with_text_model("gpt-4o-mini");

        let mut visited = vec![GenerationStep::Brief];
        let mut step = GenerationStep::Brief;
        while let Some(next) = next_step(&story, step) {
            visited.push(next);
            step = next;
        }
        assert_eq!(visited, GenerationStep::iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_blank_text_model_stops_after_scenes() {
        let story = Story::new("Blank").with_is_simple(true).with_text_model(" ");
        assert_eq!(next_step(&story, GenerationStep::Scenes), None);
        assert_eq!(
            next_step(&story, GenerationStep::Meta),
            Some(GenerationStep::Cover)
        );
    }
}
