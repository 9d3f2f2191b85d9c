//! `storyloom run`.

use super::RunArgs;
use std::sync::Arc;
use storyloom::{
    ConsoleListener, InMemoryStoryStore, PrepaidGate, RunOptions, StoryGenerator,
    StoryloomConfig, Translator, run_story,
};
use tracing::info;

/// Generate a story as described by `args` and emit it as JSON.
#[tracing::instrument(skip(args), fields(title = %args.title))]
pub async fn run_pipeline(args: &RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => StoryloomConfig::from_file(path)?,
        None => StoryloomConfig::load()?,
    };
    let client = Arc::new(config.client()?);
    let catalog: Arc<dyn Translator> = Arc::new(config.catalog()?);
    let store = Arc::new(InMemoryStoryStore::new());

    let gate = PrepaidGate::new(args.transaction.clone())
        .with_failure_message(catalog.translate("notifications.payment_failed"));

    let generator = StoryGenerator::new(
        client.clone(),
        client,
        store.clone(),
        store.clone(),
        Arc::new(gate),
    )
    .with_translator(catalog.clone())
    .with_listener(Arc::new(ConsoleListener::new(catalog)))
    .with_defaults(config.generation().clone());

    let options = RunOptions::new(args.title.clone())
        .with_premise(args.premise.clone())
        .with_text_model(args.text_model.clone())
        .with_image_model(args.image_model.clone())
        .with_step_by_step(args.step_by_step);

    let report = run_story(&generator, store, &options).await?;
    let json = serde_json::to_string_pretty(&report)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, json)?;
            info!(path = %path.display(), "Story written");
        }
        None => println!("{}", json),
    }
    Ok(())
}
