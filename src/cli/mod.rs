//! CLI argument parsing and command routing

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value};

use crate::config::AdapterSettings;

/// octoai: run prompts against an OctoAI Cloud inference endpoint
#[derive(Debug, Parser)]
#[command(name = "octoai")]
#[command(about = "Run prompts against an OctoAI Cloud inference endpoint", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub endpoint: EndpointArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Endpoint settings given on the command line; these override the settings file
#[derive(Debug, Default, Args)]
pub struct EndpointArgs {
    /// Inference endpoint URL (falls back to `ENDPOINT_URL`)
    #[arg(long, global = true)]
    pub endpoint_url: Option<String>,

    /// API token (falls back to `OCTOAI_API_TOKEN`)
    #[arg(long, global = true)]
    pub api_token: Option<String>,

    /// Task metadata recorded with the model
    #[arg(long, global = true)]
    pub task: Option<String>,

    /// Request timeout in seconds (default: no timeout)
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate text for a prompt
    Generate {
        /// The prompt to send
        prompt: String,

        /// Stop marker; output is cut before the first one found (repeatable)
        #[arg(long = "stop")]
        stop: Vec<String>,

        /// Model parameter as KEY=VALUE, VALUE parsed as JSON when possible (repeatable)
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, Value)>,
    },

    /// Print the identifying parameters of the configured model
    Identify,

    /// Show version information
    Version,
}

impl Cli {
    /// Parse CLI arguments from environment
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Settings contributed by command-line flags
    #[must_use]
    pub fn settings(&self) -> AdapterSettings {
        let model_kwargs = match &self.command {
            Commands::Generate { params, .. } if !params.is_empty() => {
                Some(params.iter().cloned().collect::<Map<String, Value>>())
            }
            _ => None,
        };

        AdapterSettings {
            endpoint_url: self.endpoint.endpoint_url.clone(),
            api_token: self.endpoint.api_token.clone(),
            task: self.endpoint.task.clone(),
            model_kwargs,
            timeout_secs: self.endpoint.timeout_secs,
        }
    }

    /// Settings file path to read
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(AdapterSettings::default_path)
    }
}

/// Parse `KEY=VALUE`; VALUE is JSON if it parses, otherwise a plain string
fn parse_param(raw: &str) -> anyhow::Result<(String, Value)> {
    let (key, value) = raw
        .split_once('=')
        .with_context(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    if key.is_empty() {
        bail!("empty parameter name in `{raw}`");
    }
    let value =
        serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_param() {
        assert_eq!(
            parse_param("max_new_tokens=128").unwrap(),
            ("max_new_tokens".to_string(), json!(128))
        );
        assert_eq!(
            parse_param("stop_style=plain").unwrap(),
            ("stop_style".to_string(), json!("plain"))
        );
        assert_eq!(
            parse_param("expr=a=b").unwrap(),
            ("expr".to_string(), json!("a=b"))
        );
        assert!(parse_param("novalue").is_err());
        assert!(parse_param("=1").is_err());
    }

    #[test]
    fn test_generate_settings() {
        let cli = Cli::try_parse_from([
            "octoai",
            "--endpoint-url",
            "https://x",
            "generate",
            "hi",
            "--stop",
            "\n",
            "--param",
            "temperature=0.5",
        ])
        .unwrap();

        let settings = cli.settings();
        assert_eq!(settings.endpoint_url.as_deref(), Some("https://x"));
        assert_eq!(settings.api_token, None);
        assert_eq!(settings.model_kwargs.unwrap()["temperature"], json!(0.5));

        match cli.command {
            Commands::Generate { prompt, stop, .. } => {
                assert_eq!(prompt, "hi");
                assert_eq!(stop, vec!["\n".to_string()]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_identify_has_no_kwargs() {
        let cli = Cli::try_parse_from(["octoai", "identify", "--timeout-secs", "3"]).unwrap();
        let settings = cli.settings();
        assert_eq!(settings.model_kwargs, None);
        assert_eq!(settings.timeout_secs, Some(3));
    }
}
