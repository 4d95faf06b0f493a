use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsightError {
    #[error("No provider credential configured: {field}")]
    ConfigurationAbsent { field: String },

    #[error("Provider unreachable: {0}")]
    ProviderUnavailable(#[source] reqwest::Error),

    #[error("Provider error{}: {message}", status_suffix(.status))]
    ProviderError { status: Option<u16>, message: String },

    #[error("Provider call exceeded {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Malformed provider output: {message}")]
    MalformedOutput { message: String },

    #[error("Unknown service id: {id}")]
    UnknownService { id: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, InsightError>;

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default()
}

/// Why the primary path gave way to the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    ConfigurationAbsent,
    ProviderUnreachable,
    ProviderError,
    Timeout,
    DecodeError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Provider,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl InsightError {
    pub fn provider(message: impl Into<String>) -> Self {
        Self::ProviderError {
            status: None,
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedOutput {
            message: message.into(),
        }
    }

    /// Classification used by the engine before it substitutes the fallback.
    /// `None` for errors that never come out of the provider path.
    pub fn failure_reason(&self) -> Option<FailureReason> {
        match self {
            Self::ConfigurationAbsent { .. } => Some(FailureReason::ConfigurationAbsent),
            Self::ProviderUnavailable(_) => Some(FailureReason::ProviderUnreachable),
            Self::ProviderError { .. } => Some(FailureReason::ProviderError),
            Self::Timeout { .. } => Some(FailureReason::Timeout),
            Self::MalformedOutput { .. } | Self::SerializationError(_) => {
                Some(FailureReason::DecodeError)
            }
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigurationAbsent { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::ProviderUnavailable(_) | Self::ProviderError { .. } | Self::Timeout { .. } => {
                ErrorCategory::Provider
            }
            Self::MalformedOutput { .. }
            | Self::UnknownService { .. }
            | Self::SerializationError(_) => ErrorCategory::Data,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 分析流程會自動退回到本地結果
            ErrorCategory::Provider => ErrorSeverity::Low,
            ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ConfigurationAbsent { .. } => {
                "Set GEMINI_API_KEY or provider.api_key to enable live analysis"
            }
            Self::ProviderUnavailable(_) => "Check network connectivity and provider.base_url",
            Self::ProviderError { .. } => "Verify the API key, model name and provider quota",
            Self::Timeout { .. } => "Raise provider.timeout_seconds or retry later",
            Self::MalformedOutput { .. } | Self::SerializationError(_) => {
                "Inspect the input JSON; it must be valid and match the documented shape"
            }
            Self::UnknownService { .. } => "Use one of the service ids 1, 2, 3, 7, 8 or 10",
            Self::IoError(_) => "Check that the file exists and is readable",
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Provider => format!("Analysis provider problem: {}", self),
            ErrorCategory::Data => format!("Data problem: {}", self),
            ErrorCategory::System => format!("System problem: {}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_path_errors_have_failure_reasons() {
        let absent = InsightError::ConfigurationAbsent {
            field: "provider.api_key".to_string(),
        };
        assert_eq!(
            absent.failure_reason(),
            Some(FailureReason::ConfigurationAbsent)
        );
        assert_eq!(
            InsightError::provider("boom").failure_reason(),
            Some(FailureReason::ProviderError)
        );
        assert_eq!(
            InsightError::Timeout { seconds: 5 }.failure_reason(),
            Some(FailureReason::Timeout)
        );
        assert_eq!(
            InsightError::malformed("eof").failure_reason(),
            Some(FailureReason::DecodeError)
        );
    }

    #[test]
    fn test_config_errors_are_not_failure_reasons() {
        let err = InsightError::InvalidConfigValueError {
            field: "input".to_string(),
            value: "videos.csv".to_string(),
            reason: "Unsupported file extension".to_string(),
        };
        assert_eq!(err.failure_reason(), None);
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_provider_error_display_includes_status() {
        let err = InsightError::ProviderError {
            status: Some(503),
            message: "overloaded".to_string(),
        };
        assert_eq!(err.to_string(), "Provider error (HTTP 503): overloaded");
        assert_eq!(
            InsightError::provider("no candidates").to_string(),
            "Provider error: no candidates"
        );
    }
}
