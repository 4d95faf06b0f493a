use crate::adapters::gemini::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_SYSTEM_INSTRUCTION, DEFAULT_TEMPERATURE,
    DEFAULT_TIMEOUT_SECONDS,
};
use crate::core::prompt::PromptOptions;
use crate::core::ConfigProvider;
use crate::utils::error::{InsightError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub provider: ProviderConfig,
    pub prompt: PromptConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub timeout_seconds: Option<u64>,
    pub system_instruction: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptConfig {
    pub max_videos: Option<usize>,
    pub description_chars: Option<usize>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(InsightError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| InsightError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GEMINI_API_KEY})；未設定的變數保留原字串
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| InsightError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("provider.base_url", self.api_base_url())?;
        validate_non_empty_string("provider.model", self.model())?;
        validate_range("provider.temperature", self.temperature(), 0.0, 2.0)?;
        validate_positive_number("provider.timeout_seconds", self.timeout_seconds() as usize, 1)?;
        validate_positive_number("prompt.max_videos", self.max_videos(), 1)?;
        validate_positive_number("prompt.description_chars", self.description_chars(), 1)?;
        Ok(())
    }

    pub fn prompt_options(&self) -> PromptOptions {
        PromptOptions {
            max_videos: self.max_videos(),
            description_chars: self.description_chars(),
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn api_key(&self) -> Option<&str> {
        // 未替換的 ${VAR} 視為沒有金鑰
        self.provider
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !key.starts_with("${"))
    }

    fn api_base_url(&self) -> &str {
        self.provider.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    fn model(&self) -> &str {
        self.provider.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    fn temperature(&self) -> f32 {
        self.provider.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    fn timeout_seconds(&self) -> u64 {
        self.provider
            .timeout_seconds
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn system_instruction(&self) -> &str {
        self.provider
            .system_instruction
            .as_deref()
            .unwrap_or(DEFAULT_SYSTEM_INSTRUCTION)
    }

    fn max_videos(&self) -> usize {
        self.prompt
            .max_videos
            .unwrap_or(PromptOptions::default().max_videos)
    }

    fn description_chars(&self) -> usize {
        self.prompt
            .description_chars
            .unwrap_or(PromptOptions::default().description_chars)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[provider]
api_key = "abc123"
base_url = "http://localhost:9999/v1beta"
model = "gemini-2.5-pro"
temperature = 0.4
timeout_seconds = 30

[prompt]
max_videos = 5
description_chars = 120
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.api_key(), Some("abc123"));
        assert_eq!(config.api_base_url(), "http://localhost:9999/v1beta");
        assert_eq!(config.model(), "gemini-2.5-pro");
        assert_eq!(config.temperature(), 0.4);
        assert_eq!(config.timeout_seconds(), 30);
        assert_eq!(config.max_videos(), 5);
        assert_eq!(config.description_chars(), 120);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.api_key(), None);
        assert_eq!(config.api_base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.model(), DEFAULT_MODEL);
        assert_eq!(config.temperature(), DEFAULT_TEMPERATURE);
        assert_eq!(config.timeout_seconds(), DEFAULT_TIMEOUT_SECONDS);
        assert_eq!(config.prompt_options(), PromptOptions::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CHANNEL_INSIGHTS_TEST_KEY", "from-env");

        let toml_content = r#"
[provider]
api_key = "${CHANNEL_INSIGHTS_TEST_KEY}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api_key(), Some("from-env"));

        std::env::remove_var("CHANNEL_INSIGHTS_TEST_KEY");
    }

    #[test]
    fn test_unresolved_placeholder_means_no_key() {
        let toml_content = r#"
[provider]
api_key = "${CHANNEL_INSIGHTS_UNSET_VARIABLE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn test_config_validation() {
        let bad_url = TomlConfig::from_toml_str("[provider]\nbase_url = \"invalid-url\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let bad_temperature =
            TomlConfig::from_toml_str("[provider]\ntemperature = 3.5\n").unwrap();
        assert!(bad_temperature.validate().is_err());

        let no_videos = TomlConfig::from_toml_str("[prompt]\nmax_videos = 0\n").unwrap();
        assert!(no_videos.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        assert!(matches!(
            TomlConfig::from_toml_str("[provider\nmodel = 1"),
            Err(InsightError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[provider]\nmodel = \"gemini-2.5-flash-lite\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.model(), "gemini-2.5-flash-lite");
    }
}
