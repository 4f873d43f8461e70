//! octoai binary entry point

use std::path::Path;

use color_eyre::Result;
use octoai_llm::{
    cli::{Cli, Commands},
    config::{AdapterConfig, AdapterSettings},
    services::{octoai::OctoAiAdapter, Llm},
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Install error handler
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("octoai_llm=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let path = cli.config_path();
    let overrides = cli.settings();

    match cli.command {
        Commands::Generate { prompt, stop, .. } => {
            let adapter = build_adapter(&path, overrides)?;
            let stop = (!stop.is_empty()).then_some(stop.as_slice());
            let text = adapter.generate(&prompt, stop)?;
            println!("{text}");
        }
        Commands::Identify => {
            let adapter = build_adapter(&path, overrides)?;
            println!("{}", serde_json::to_string_pretty(&adapter.identify())?);
        }
        Commands::Version => {
            println!("octoai version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// CLI flags override the settings file; the environment fills any gaps
fn build_adapter(path: &Path, overrides: AdapterSettings) -> Result<OctoAiAdapter> {
    // A missing .env file is fine
    dotenv::dotenv().ok();

    let settings = AdapterSettings::load_from_path(path)?.merge(overrides);
    tracing::debug!(config = %path.display(), "resolved settings");

    Ok(OctoAiAdapter::new(AdapterConfig::from_settings(settings)?)?)
}
