pub mod analyzer;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod diagnostics;
pub mod encoding;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod segmenter;
pub mod tools;
pub mod vectorizer;
pub mod vocabulary;

use anyhow::{Context, Result};
use cli::Cli;
use config::PipelineConfig;

pub use error::PipelineError;

pub fn run(cli: Cli) -> Result<()> {
    let config = PipelineConfig::from_cli(&cli).context("invalid arguments")?;
    pipeline::run(&config).with_context(|| {
        format!(
            "failed to intersect nouns and vocabulary for {}",
            config.input_directory.display()
        )
    })?;
    Ok(())
}
