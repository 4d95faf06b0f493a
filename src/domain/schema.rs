//! Typed views over the per-service payloads.
//!
//! Decoding keeps provider output as loose JSON. These structs are for
//! consumers that want field-level guarantees on one service; project with
//! [`AnalysisResult::view`](crate::domain::model::AnalysisResult::view).
//! Every field is optional so a payload missing a documented field still
//! projects, and unknown fields are ignored.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A typed view bound to one canonical service name.
pub trait ServiceView: DeserializeOwned {
    const CANONICAL_NAME: &'static str;
}

// ---- semantic_title_engine ----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticTitleEngine {
    pub channel_analysis: Option<ChannelAnalysis>,
    #[serde(default)]
    pub suggestions: Vec<TitleSuggestion>,
    #[serde(default)]
    pub growth_tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelAnalysis {
    pub overall_assessment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleSuggestion {
    pub original_title: Option<String>,
    #[serde(default)]
    pub current_issues: Vec<String>,
    #[serde(default)]
    pub alternative_titles: Vec<AlternativeTitle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeTitle {
    pub new_suggested_title: Option<String>,
    /// 0-10
    pub ctr_potential_rating: Option<f64>,
    pub why_it_s_effective: Option<String>,
}

impl ServiceView for SemanticTitleEngine {
    const CANONICAL_NAME: &'static str = "semantic_title_engine";
}

// ---- predictive_ctr_analysis ----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictiveCtrAnalysis {
    /// 0-10
    pub score: Option<f64>,
    pub reasoning: Option<String>,
    pub comparison_to_industry_average: Option<String>,
    pub what_is_working_or_missing: Option<WorkingOrMissing>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    pub potential_increase: Option<String>,
    #[serde(default)]
    pub psychological_triggers_to_boost_engagement: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingOrMissing {
    pub working: Option<String>,
    pub missing: Option<String>,
}

impl ServiceView for PredictiveCtrAnalysis {
    const CANONICAL_NAME: &'static str = "predictive_ctr_analysis";
}

// ---- multi_platform_mastery ----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiPlatformMastery {
    /// Keyed by `youtube`, `x_twitter`, `linkedin`.
    #[serde(default)]
    pub platforms: BTreeMap<String, PlatformAnalysis>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformAnalysis {
    pub score: Option<f64>,
    pub reasoning: Option<String>,
    pub strategy: Option<String>,
    #[serde(default)]
    pub optimization_tips: Vec<String>,
}

impl ServiceView for MultiPlatformMastery {
    const CANONICAL_NAME: &'static str = "multi_platform_mastery";
}

// ---- copyright_protection ----

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopyrightProtection {
    pub risk_level: Option<RiskLevel>,
    #[serde(default)]
    pub flags: Vec<String>,
    pub assessment: Option<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl ServiceView for CopyrightProtection {
    const CANONICAL_NAME: &'static str = "copyright_protection";
}

// ---- fair_use_analysis ----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairUseAnalysis {
    /// 0-100
    pub score: Option<f64>,
    pub reasoning: Option<String>,
    pub assessment: Option<String>,
    pub fair_use_factors_breakdown: Option<FairUseFactors>,
    pub recommendation_for_legal_safety: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairUseFactors {
    pub purpose_and_character: Option<FairUseFactor>,
    pub nature_of_work: Option<FairUseFactor>,
    pub amount_used: Option<FairUseFactor>,
    pub market_effect: Option<FairUseFactor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairUseFactor {
    /// 0-10
    pub score: Option<f64>,
    pub reasoning: Option<String>,
}

impl ServiceView for FairUseAnalysis {
    const CANONICAL_NAME: &'static str = "fair_use_analysis";
}

// ---- trend_intelligence ----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendIntelligence {
    #[serde(default)]
    pub trending_topics: Vec<TrendingTopic>,
    #[serde(default)]
    pub predictions: Vec<String>,
    #[serde(default)]
    pub actionable_content_ideas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingTopic {
    pub name: Option<String>,
    pub growth_percentage: Option<String>,
    /// 0-10
    pub relevance_rating: Option<f64>,
    pub reasoning: Option<String>,
}

impl ServiceView for TrendIntelligence {
    const CANONICAL_NAME: &'static str = "trend_intelligence";
}
