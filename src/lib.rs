pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::GeminiClient;
pub use core::{engine::AnalysisEngine, prompt::PromptOptions, registry::ServiceKind};
pub use domain::model::{AnalysisRequest, AnalysisResult, Video};
pub use utils::error::{FailureReason, InsightError, Result};
