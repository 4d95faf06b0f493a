pub mod decoder;
pub mod engine;
pub mod fallback;
pub mod prompt;
pub mod registry;

pub use crate::domain::model::{AnalysisRequest, AnalysisResult, Video};
pub use crate::domain::ports::{AnalysisProvider, ConfigProvider};
pub use crate::utils::error::Result;
