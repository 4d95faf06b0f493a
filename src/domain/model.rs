use crate::domain::schema::ServiceView;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Marker rendered wherever a video fact is missing.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Video {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Named counters such as `viewCount`; values may be numbers, strings or null.
    #[serde(default)]
    pub statistics: Map<String, Value>,
}

impl Video {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_statistic(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.statistics.insert(name.to_string(), value.into());
        self
    }

    /// Title with blank values treated as absent.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Description cut to at most `max_chars` characters.
    pub fn description_excerpt(&self, max_chars: usize) -> Option<String> {
        self.description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .map(|d| d.chars().take(max_chars).collect())
    }

    /// Counter rendered as text, `None` when absent or null.
    pub fn statistic(&self, name: &str) -> Option<String> {
        match self.statistics.get(name)? {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisRequest {
    pub videos: Vec<Video>,
    pub channel_stats: Option<Map<String, Value>>,
    /// Service tokens as the caller supplied them, unknown ones included.
    pub services: Vec<String>,
}

impl AnalysisRequest {
    pub fn new<S: AsRef<str>>(
        videos: Vec<Video>,
        channel_stats: Option<Map<String, Value>>,
        services: &[S],
    ) -> Self {
        Self {
            videos,
            channel_stats,
            services: services.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }
}

/// Top-level analysis document keyed by canonical service name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub services: Map<String, Value>,
}

impl AnalysisResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, canonical_name: &str, payload: Value) {
        self.services.insert(canonical_name.to_string(), payload);
    }

    pub fn get(&self, canonical_name: &str) -> Option<&Value> {
        self.services.get(canonical_name)
    }

    pub fn service_names(&self) -> Vec<&str> {
        self.services.keys().map(String::as_str).collect()
    }

    /// Drops every service key not listed in `allowed`.
    pub fn retain_services(mut self, allowed: &[&str]) -> Self {
        self.services.retain(|name, _| allowed.contains(&name.as_str()));
        self
    }

    /// Projects one payload into its typed view. `Ok(None)` when the service
    /// is absent, an error when the payload does not fit the view.
    pub fn view<V: ServiceView>(&self) -> Result<Option<V>> {
        match self.services.get(V::CANONICAL_NAME) {
            Some(payload) => Ok(Some(serde_json::from_value(payload.clone())?)),
            None => Ok(None),
        }
    }
}
