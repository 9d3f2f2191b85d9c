//! Storyloom - staged story generation
//!
//! Storyloom turns a title and an idea into an illustrated story in four
//! stages: a brief (outline), one scene per outline entry, meta data
//! (title candidates, description, summaries, cover captions) and a cover
//! image. Every stage persists its result before the next one starts.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use storyloom::{
//!     ConsoleListener, InMemoryStoryStore, PrepaidGate, RunOptions, StoryGenerator,
//!     StoryloomConfig, run_story,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StoryloomConfig::load()?;
//!     let client = Arc::new(config.client()?);
//!     let catalog = Arc::new(config.catalog()?);
//!     let store = Arc::new(InMemoryStoryStore::new());
//!
//!     let generator = StoryGenerator::new(
//!         client.clone(),
//!         client,
//!         store.clone(),
//!         store.clone(),
//!         Arc::new(PrepaidGate::new(Some("txn-1".to_string()))),
//!     )
//!     .with_translator(catalog.clone())
//!     .with_listener(Arc::new(ConsoleListener::new(catalog)))
//!     .with_defaults(config.generation().clone());
//!
//!     let options = RunOptions::new("The Lantern Keeper")
//!         .with_premise(Some("A lighthouse keeper befriends a storm".to_string()));
//!     let report = run_story(&generator, store, &options).await?;
//!     println!("{}", report.story().title);
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `observability` - OpenTelemetry span export to stdout
//! - `api` - Enable tests that call a live provider
//!
//! # Architecture
//!
//! - `storyloom_error` - Error types
//! - `storyloom_core` - Stories, scenes, patches, steps, requests
//! - `storyloom_interface` - Generator, store, payment, locale and listener traits
//! - `storyloom_models` - OpenAI-compatible client
//! - `storyloom_narrative` - Prompts, extraction and the orchestrator
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod console;
mod observability;
mod prepaid;
mod session;

pub use config::{LocaleConfig, ProviderConfig, StoryloomConfig};
pub use console::ConsoleListener;
pub use observability::{ObservabilityConfig, init_observability};
pub use prepaid::PrepaidGate;
pub use session::{RunOptions, StoryReport, run_story};

pub use storyloom_core::*;
pub use storyloom_error::*;
pub use storyloom_interface::*;
pub use storyloom_models::OpenAiCompatibleClient;
pub use storyloom_narrative::*;
