//! Gherkin Genie: UI screenshot to test automation
//!
//! One command, one required flag: the screenshot to analyze. The missing-
//! file check is a hard stop before any pipeline construction; everything
//! after that is the four-stage pipeline's business.

use anyhow::Context as _;
use clap::Parser;
use genie_core::{Pipeline, PipelineConfig, TracingTrace};
use genie_model::GeminiClient;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Gherkin Genie: UI to Test Automation
#[derive(Debug, Parser)]
#[command(name = "genie", version, about)]
struct Cli {
    /// Path to the UI screenshot
    #[arg(long)]
    image: PathBuf,

    /// Directory the feature file is saved into
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Override the model used by the review stage
    #[arg(long)]
    review_model: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if !cli.image.exists() {
        eprintln!("Error: Image file '{}' not found.", cli.image.display());
        process::exit(1);
    }

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let api_key = std::env::var("GEMINI_API_KEY")
        .context("GEMINI_API_KEY is not set (put it in the environment or a .env file)")?;

    let mut config = PipelineConfig::new().with_output_dir(cli.output_dir.clone());
    if let Some(model) = cli.review_model {
        config = config.with_review_model(model);
    }

    let client = Arc::new(GeminiClient::new(api_key));
    let pipeline = Pipeline::new(config, client, Arc::new(TracingTrace));

    println!("Starting Gherkin Genie Pipeline...");
    let report = pipeline.run(&cli.image).await?;

    if report.saved {
        println!(
            "Pipeline Complete! Output generated in '{}' as '{}'.",
            cli.output_dir.display(),
            report.feature_filename
        );
    } else {
        println!("Pipeline Complete! The reviewer chose not to save an artifact.");
    }
    if !report.review_summary.is_empty() {
        println!("\nReviewer summary:\n{}", report.review_summary);
    }
    Ok(())
}
