use crate::utils::error::Result;
use async_trait::async_trait;

/// The external generative-analysis provider. One call per orchestration
/// attempt; implementations do not retry.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Sends the composite prompt and returns the raw response text.
    async fn invoke(&self, prompt: &str) -> Result<String>;

    fn name(&self) -> &str;
}

pub trait ConfigProvider: Send + Sync {
    /// `None` means no usable credential is configured.
    fn api_key(&self) -> Option<&str>;
    fn api_base_url(&self) -> &str;
    fn model(&self) -> &str;
    fn temperature(&self) -> f32;
    fn timeout_seconds(&self) -> u64;
    fn system_instruction(&self) -> &str;
    fn max_videos(&self) -> usize;
    fn description_chars(&self) -> usize;
}
