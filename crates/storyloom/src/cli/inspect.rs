//! `storyloom brief` and `storyloom progress`.

use std::path::Path;
use storyloom::{ProgressStage, Story, format_brief};

/// Print the stubs a brief file splits into.
pub fn print_stubs(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let brief = std::fs::read_to_string(path)?;
    let stubs = format_brief(&brief);
    tracing::debug!(stubs = stubs.len(), "Brief formatted");

    for stub in &stubs {
        println!("{}. {}", stub.ordinal, stub.title);
        println!("   {}", stub.text);
    }
    Ok(())
}

/// Print the progress stage of a story JSON file.
///
/// Accepts either a bare story or the report written by `storyloom run`.
pub fn print_progress(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&text)?;
    let story: Story = match value.get("story") {
        Some(inner) => serde_json::from_value(inner.clone())?,
        None => serde_json::from_value(value)?,
    };

    let stage = ProgressStage::of(&story);
    println!("{} {} ({})", stage.number(), stage, story.title);
    Ok(())
}
