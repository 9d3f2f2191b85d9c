//! Trait definitions for the Storyloom story generation pipeline.
//!
//! This crate holds the seams between the generation orchestrator and the
//! collaborators it drives: generation clients, stores, the payment gate,
//! the localization lookup and the UI-facing listener.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod generation;
mod listener;
mod locale;
mod payment;
mod store;

pub use generation::{ImageGenerator, TextGenerator};
pub use listener::{GenerationListener, NoopListener};
pub use locale::Translator;
pub use payment::{PaymentGate, PaymentOutcome};
pub use store::{SceneStore, StoryStore};
