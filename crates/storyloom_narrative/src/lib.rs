//! Story generation pipeline for Storyloom.
//!
//! This crate turns a story idea into an illustrated short story through a
//! fixed sequence of model calls: brief, scenes, meta, cover.
//!
//! # Features
//!
//! - **Orchestration**: [`StoryGenerator`] runs each stage, persists its
//!   result and chains stages for stories in simple mode
//! - **Brief formatting**: split a generated outline into scene stubs
//! - **Payload extraction**: tolerant JSON extraction from model output
//! - **Localization**: TOML message catalogs with `{{placeholder}}` templates
//! - **In-memory stores**: run the pipeline without a database
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use storyloom_core::Story;
//! use storyloom_narrative::{InMemoryStoryStore, StoryGenerator};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(InMemoryStoryStore::new());
//! let story = Story::new("The Lantern Keeper").with_is_simple(true);
//! store.insert_story(&story).await?;
//!
//! let generator = StoryGenerator::new(client.clone(), client, store.clone(), store, gate);
//! let outcome = generator.start(story).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod brief;
mod extraction;
mod generator;
mod in_memory_store;
mod locale;
mod meta;
mod status;
mod transition;
mod writer;

pub use brief::{build_scene_prompt, format_brief};
pub use extraction::extract_object;
pub use generator::{StageOutcome, StoryGenerator};
pub use in_memory_store::InMemoryStoryStore;
pub use locale::{LocaleCatalog, render_template};
pub use meta::{StoryMeta, extract_story_meta};
pub use status::{GenerationStatus, StatusBoard};
pub use transition::{StageTransition, TRANSITIONS, TransitionGuard, next_step};
pub use writer::{GenerationDefaults, StoryWriter};
