use crate::config::toml_config::TomlConfig;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_file_extensions, validate_path, Validate};
use clap::Parser;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Parser)]
#[command(name = "channel-insights")]
#[command(about = "Multi-service content analysis for YouTube channels")]
pub struct CliConfig {
    /// JSON file holding an array of videos
    #[arg(long)]
    pub input: String,

    /// JSON file holding channel-level statistics
    #[arg(long)]
    pub channel_stats: Option<String>,

    /// Service ids to run, e.g. 1,7,10
    #[arg(long, value_delimiter = ',')]
    pub services: Vec<String>,

    /// Path to TOML configuration file
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Provider API key (defaults to $GEMINI_API_KEY)")]
    pub api_key: Option<String>,

    #[arg(long, help = "Override provider model")]
    pub model: Option<String>,

    /// Write the result here instead of stdout
    #[arg(long)]
    pub output: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    /// Loads the TOML file (if any) and applies command-line overrides.
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(key) = &self.api_key {
            config.provider.api_key = Some(key.clone());
        } else if config.api_key().is_none() {
            config.provider.api_key = std::env::var(API_KEY_ENV).ok();
        }

        if let Some(model) = &self.model {
            config.provider.model = Some(model.clone());
        }

        Ok(config)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;

        let mut json_files = vec![self.input.clone()];
        if let Some(stats) = &self.channel_stats {
            validate_path("channel_stats", stats)?;
            json_files.push(stats.clone());
        }
        validate_file_extensions("input", &json_files, &["json"])?;

        if let Some(config) = &self.config {
            validate_path("config", config)?;
            validate_file_extensions("config", std::slice::from_ref(config), &["toml"])?;
        }

        if let Some(output) = &self.output {
            validate_path("output", output)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_services_list() {
        let cli = CliConfig::parse_from([
            "channel-insights",
            "--input",
            "videos.json",
            "--services",
            "1,7,10",
        ]);

        assert_eq!(cli.services, vec!["1", "7", "10"]);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_json_input() {
        let cli = CliConfig::parse_from(["channel-insights", "--input", "videos.csv"]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_cli_overrides_config_values() {
        let cli = CliConfig::parse_from([
            "channel-insights",
            "--input",
            "videos.json",
            "--api-key",
            "cli-key",
            "--model",
            "gemini-2.5-pro",
        ]);

        let config = cli.resolve().unwrap();
        assert_eq!(config.api_key(), Some("cli-key"));
        assert_eq!(config.model(), "gemini-2.5-pro");
    }
}
