//! Core data types for the Storyloom story generation pipeline.
//!
//! This crate provides the story and scene records the pipeline mutates,
//! the patches stores apply, the pipeline steps, and the request types
//! passed to generation clients.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod request;
mod scene;
mod step;
mod story;

pub use request::{ImageRequest, ImageRequestBuilder, TextRequest, TextRequestBuilder};
pub use scene::{Scene, SceneId, ScenePatch, SceneStub};
pub use step::{GenerationStep, ProgressStage, progress_step};
pub use story::{Story, StoryId, StoryPatch};
