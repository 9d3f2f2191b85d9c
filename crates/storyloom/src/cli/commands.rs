//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Storyloom - staged story generation from a title and an idea
#[derive(Parser, Debug)]
#[command(name = "storyloom")]
#[command(about = "Generate illustrated stories: brief, scenes, meta and cover", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a new story and print it as JSON
    Run(RunArgs),

    /// Split a brief file into scene stubs
    Brief {
        /// Path to a text file holding the brief
        #[arg(long)]
        file: PathBuf,
    },

    /// Show the progress stage of a story JSON file
    Progress {
        /// Path to a story JSON file
        #[arg(long)]
        file: PathBuf,
    },
}

/// Arguments of `storyloom run`
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Story title
    #[arg(long)]
    pub title: String,

    /// Idea the brief is generated from
    #[arg(long)]
    pub premise: Option<String>,

    /// Payment transaction reference
    #[arg(long)]
    pub transaction: Option<String>,

    /// Text model stored on the story
    #[arg(long)]
    pub text_model: Option<String>,

    /// Image model stored on the story
    #[arg(long)]
    pub image_model: Option<String>,

    /// Run each stage explicitly instead of chaining
    #[arg(long)]
    pub step_by_step: bool,

    /// Write the result here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Configuration file laid over the bundled defaults
    #[arg(long)]
    pub config: Option<PathBuf>,
}
