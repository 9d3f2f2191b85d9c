//! Storyloom CLI binary.
//!
//! - Generate a story end to end from a title and an idea
//! - Preview how a brief splits into scene stubs
//! - Report the progress stage of a saved story

use clap::Parser;
use storyloom::{ObservabilityConfig, init_observability};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, print_progress, print_stubs, run_pipeline};

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_observability(
        ObservabilityConfig::new("storyloom")
            .with_verbose(cli.verbose)
            .with_json_logs(cli.json_logs),
    )?;

    match cli.command {
        Commands::Run(args) => {
            run_pipeline(&args).await?;
        }

        Commands::Brief { file } => {
            print_stubs(&file)?;
        }

        Commands::Progress { file } => {
            print_progress(&file)?;
        }
    }

    Ok(())
}
