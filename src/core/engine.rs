use crate::adapters::gemini::GeminiClient;
use crate::core::prompt::{build_prompt, PromptOptions};
use crate::core::{decoder, fallback, registry};
use crate::domain::model::{AnalysisRequest, AnalysisResult, Video};
use crate::domain::ports::{AnalysisProvider, ConfigProvider};
use crate::utils::error::{InsightError, Result};
use serde_json::{Map, Value};

/// Public entry point. Runs prompt -> provider -> decode and substitutes the
/// fallback result in full when any step fails.
pub struct AnalysisEngine<P: AnalysisProvider> {
    provider: Option<P>,
    options: PromptOptions,
}

impl<P: AnalysisProvider> AnalysisEngine<P> {
    pub fn new(provider: P) -> Self {
        Self::with_provider(Some(provider))
    }

    /// `None` behaves like a missing credential: every call uses the fallback.
    pub fn with_provider(provider: Option<P>) -> Self {
        Self {
            provider,
            options: PromptOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PromptOptions) -> Self {
        self.options = options;
        self
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub async fn analyse<S: AsRef<str>>(
        &self,
        videos: Vec<Video>,
        channel_stats: Option<Map<String, Value>>,
        service_ids: &[S],
    ) -> AnalysisResult {
        self.run(&AnalysisRequest::new(videos, channel_stats, service_ids))
            .await
    }

    /// Never fails; errors are logged and masked by the fallback result.
    pub async fn run(&self, request: &AnalysisRequest) -> AnalysisResult {
        match self.attempt(request).await {
            Ok(result) => {
                tracing::info!(
                    services = ?result.service_names(),
                    "Analysis delivered from provider"
                );
                result
            }
            Err(e) => {
                tracing::warn!(
                    reason = ?e.failure_reason(),
                    services = ?request.services,
                    error = %e,
                    "Primary analysis failed, using fallback"
                );
                fallback::generate(&request.videos, &request.services)
            }
        }
    }

    async fn attempt(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| InsightError::ConfigurationAbsent {
                field: "provider.api_key".to_string(),
            })?;

        let prompt = build_prompt(request, &self.options);
        tracing::info!(
            "Calling {} with {} services (prompt length: {})",
            provider.name(),
            request.services.len(),
            prompt.len()
        );

        let raw = provider.invoke(&prompt).await?;
        tracing::debug!("Provider response received (length: {})", raw.len());

        let decoded = decoder::decode(&raw)?;

        let requested: Vec<&str> = registry::resolve(&request.services)
            .iter()
            .map(|kind| kind.canonical_name())
            .collect();
        Ok(decoded.retain_services(&requested))
    }
}

impl AnalysisEngine<GeminiClient> {
    /// Wires the Gemini client. A missing credential is not an error here;
    /// the engine just serves fallback results.
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        let provider = match GeminiClient::from_config(config) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!("Provider disabled: {}", e);
                None
            }
        };

        Self::with_provider(provider).with_options(PromptOptions {
            max_videos: config.max_videos(),
            description_chars: config.description_chars(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    enum Script {
        Respond(String),
        Fail(fn() -> InsightError),
    }

    #[derive(Clone)]
    struct ScriptedProvider {
        script: Arc<Script>,
        calls: Arc<AtomicUsize>,
        prompts: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedProvider {
        fn new(script: Script) -> Self {
            Self {
                script: Arc::new(script),
                calls: Arc::new(AtomicUsize::new(0)),
                prompts: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn responding(text: &str) -> Self {
            Self::new(Script::Respond(text.to_string()))
        }

        fn failing(error: fn() -> InsightError) -> Self {
            Self::new(Script::Fail(error))
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AnalysisProvider for ScriptedProvider {
        async fn invoke(&self, prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().await.push(prompt.to_string());
            match self.script.as_ref() {
                Script::Respond(text) => Ok(text.clone()),
                Script::Fail(error) => Err(error()),
            }
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn videos() -> Vec<Video> {
        vec![Video::new("How I Edit Faster")
            .with_description("My editing workflow")
            .with_url("https://youtu.be/abc")
            .with_statistic("viewCount", 1000)]
    }

    const SERVICES: [&str; 4] = ["1", "7", "99", "10"];

    #[tokio::test]
    async fn test_provider_failures_return_fallback_exactly() {
        let failures: [fn() -> InsightError; 4] = [
            || InsightError::provider("simulated exception"),
            || InsightError::Timeout { seconds: 60 },
            || InsightError::ProviderError {
                status: Some(500),
                message: "internal".to_string(),
            },
            || InsightError::ConfigurationAbsent {
                field: "provider.api_key".to_string(),
            },
        ];

        let expected = fallback::generate(&videos(), &SERVICES);
        for failure in failures {
            let provider = ScriptedProvider::failing(failure);
            let engine = AnalysisEngine::new(provider.clone());

            let result = engine.analyse(videos(), None, &SERVICES).await;

            assert_eq!(result, expected);
            assert_eq!(provider.call_count(), 1);
        }
    }

    #[tokio::test]
    async fn test_missing_provider_skips_the_call() {
        let engine: AnalysisEngine<ScriptedProvider> = AnalysisEngine::with_provider(None);
        assert!(!engine.has_provider());

        let result = engine.analyse(videos(), None, &SERVICES).await;
        assert_eq!(result, fallback::generate(&videos(), &SERVICES));
    }

    #[tokio::test]
    async fn test_malformed_output_returns_fallback() {
        let provider = ScriptedProvider::responding("{\"services\": {\"semantic_title_engine\": ");
        let engine = AnalysisEngine::new(provider);

        let result = engine.analyse(videos(), None, &["1"]).await;
        assert_eq!(result, fallback::generate(&videos(), &["1"]));
    }

    #[tokio::test]
    async fn test_success_returns_decoded_result() {
        let body = json!({
            "services": {
                "copyright_protection": {"risk_level": "MEDIUM", "flags": ["Background music"]},
                "fair_use_analysis": {"score": 60}
            }
        });
        let provider = ScriptedProvider::responding(&format!("```json\n{}\n```", body));
        let engine = AnalysisEngine::new(provider.clone());

        let result = engine.analyse(videos(), None, &["7", "8"]).await;

        assert_eq!(result.get("copyright_protection").unwrap()["risk_level"], json!("MEDIUM"));
        assert_eq!(result.get("fair_use_analysis").unwrap(), &json!({"score": 60}));
        assert_eq!(provider.call_count(), 1);

        let prompts = provider.prompts.lock().await;
        assert!(prompts[0].contains("How I Edit Faster"));
        assert!(prompts[0].contains("COPYRIGHT PROTECTION"));
    }

    #[tokio::test]
    async fn test_unrequested_keys_are_dropped() {
        let body = json!({
            "services": {
                "copyright_protection": {"risk_level": "LOW"},
                "trend_intelligence": {"predictions": []},
                "99": {}
            }
        });
        let engine = AnalysisEngine::new(ScriptedProvider::responding(&body.to_string()));

        let result = engine.analyse(videos(), None, &["7", "99"]).await;
        assert_eq!(result.service_names(), vec!["copyright_protection"]);
    }

    #[tokio::test]
    async fn test_prompt_options_are_applied() {
        let provider = ScriptedProvider::responding("{\"services\": {}}");
        let engine = AnalysisEngine::new(provider.clone()).with_options(PromptOptions {
            max_videos: 1,
            description_chars: 10,
        });

        let many = vec![Video::new("first"), Video::new("second")];
        engine.analyse(many, None, &["1"]).await;

        let prompts = provider.prompts.lock().await;
        assert!(prompts[0].contains("\"first\""));
        assert!(!prompts[0].contains("\"second\""));
    }

    #[tokio::test]
    async fn test_concurrent_requests_are_independent() {
        let engine = AnalysisEngine::new(ScriptedProvider::failing(|| {
            InsightError::provider("down")
        }));

        let (a, b) = tokio::join!(
            engine.analyse(videos(), None, &["1"]),
            engine.analyse(videos(), None, &["7"])
        );

        assert_eq!(a.service_names(), vec!["semantic_title_engine"]);
        assert_eq!(b.service_names(), vec!["copyright_protection"]);
    }
}
