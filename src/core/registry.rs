//! Static table of analysis services.
//!
//! Both the prompt builder and the fallback generator read from here, so the
//! primary and fallback paths always agree on which services exist and what
//! their output keys are called.

use crate::utils::error::{InsightError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ServiceKind {
    SemanticTitleEngine,
    PredictiveCtrAnalysis,
    MultiPlatformMastery,
    CopyrightProtection,
    FairUseAnalysis,
    TrendIntelligence,
}

#[derive(Debug)]
pub struct ServiceDescriptor {
    pub kind: ServiceKind,
    pub id: &'static str,
    pub canonical_name: &'static str,
    pub heading: &'static str,
    pub instruction: &'static str,
    pub expectations: &'static str,
    /// JSON shape of this service's value under `services`.
    pub schema: &'static str,
}

pub static SERVICES: [ServiceDescriptor; 6] = [
    ServiceDescriptor {
        kind: ServiceKind::SemanticTitleEngine,
        id: "1",
        canonical_name: "semantic_title_engine",
        heading: "SEMANTIC TITLE ENGINE (LLM-Driven Headline Generation)",
        instruction: r#"For EACH VIDEO, provide:
   - Channel Analysis: overall assessment of the channel's title strategy, content themes and approach
   - Original Title: the current title exactly as it appears
   - Current Issues: 2-4 specific problems with the title
   - 3 Alternative Titles, each with:
     * the new suggested title
     * CTR potential rating (0-10 scale)
     * why it's effective: the psychology behind it (curiosity gap, power words, emotional triggers)
   - Growth Tips: 3-5 actionable recommendations for the channel's overall title strategy

   Rules:
   - Be highly specific about what is wrong with current titles
   - Make alternatives drastically different from the originals
   - Growth tips must fit this channel's niche and style"#,
        expectations: r#"- Titles must be platform-native (YouTube style)
- Use curiosity gaps, specificity, emotional triggers
- Avoid clickbait without payoff
- Ratings must reflect realistic CTR potential"#,
        schema: r#"{
  "channel_analysis": {
    "overall_assessment": "string - channel title strategy analysis"
  },
  "suggestions": [
    {
      "original_title": "string - exact current title",
      "current_issues": ["string issue 1", "string issue 2"],
      "alternative_titles": [
        {
          "new_suggested_title": "string",
          "ctr_potential_rating": 8,
          "why_it_s_effective": "string - psychology explanation"
        }
      ]
    }
  ],
  "growth_tips": ["string tip 1", "string tip 2", "string tip 3"]
}"#,
    },
    ServiceDescriptor {
        kind: ServiceKind::PredictiveCtrAnalysis,
        id: "2",
        canonical_name: "predictive_ctr_analysis",
        heading: "PREDICTIVE CTR ANALYSIS (Thumbnail Saliency Mapping)",
        instruction: r#"- Score the channel's click-through potential (0-10)
   - Compare to the industry average
   - Identify what is working and what is missing in titles and thumbnails
   - Provide 4-6 specific, actionable recommendations to improve click-through rate
   - Estimate the potential increase with these optimizations
   - Highlight psychological triggers that could boost engagement"#,
        expectations: r#"- Scores must reflect title + thumbnail psychology
- Highlight concrete weaknesses (length, clarity, emotion, promise)
- Recommend specific changes (words, numbers, framing)"#,
        schema: r#"{
  "score": 5.5,
  "reasoning": "string - explanation of score",
  "comparison_to_industry_average": "string",
  "what_is_working_or_missing": {
    "working": "string paragraph",
    "missing": "string paragraph"
  },
  "recommendations": ["string rec 1", "string rec 2"],
  "potential_increase": "30-50%",
  "psychological_triggers_to_boost_engagement": ["string trigger 1"]
}"#,
    },
    ServiceDescriptor {
        kind: ServiceKind::MultiPlatformMastery,
        id: "3",
        canonical_name: "multi_platform_mastery",
        heading: "MULTI-PLATFORM MASTERY (Cross-Platform Algorithm Alignment)",
        instruction: r#"- Analyze how this content would perform on:
     * YouTube (long-form, algorithm preferences)
     * X / Twitter (short-form threads, viral hooks)
     * LinkedIn (professional networking, thought leadership)
   - For EACH platform provide a score (0-10), a platform-specific strategy and concrete optimization tips
   - Suggest content adaptations, not reposting"#,
        expectations: r#"- Do NOT repeat the same advice across platforms
- Respect platform-native behavior (scroll speed, hook time)
- Optimize for algorithmic discovery, not followers"#,
        schema: r#"{
  "platforms": {
    "youtube": {
      "score": 9,
      "reasoning": "string",
      "strategy": "string",
      "optimization_tips": ["string tip 1", "string tip 2"]
    },
    "x_twitter": { "score": 6, "reasoning": "string", "strategy": "string", "optimization_tips": ["string"] },
    "linkedin": { "score": 7, "reasoning": "string", "strategy": "string", "optimization_tips": ["string"] }
  }
}"#,
    },
    ServiceDescriptor {
        kind: ServiceKind::CopyrightProtection,
        id: "7",
        canonical_name: "copyright_protection",
        heading: "COPYRIGHT PROTECTION (Content ID Scanning Pre-Upload)",
        instruction: r#"Only flag ACTUAL copyright issues:
   - background music from copyrighted sources
   - clips from other creators' videos
   - copyrighted images, logos or graphics
   - brand names used commercially
   Do NOT flag educational content, original commentary, tutorials or technical terms.

   Provide:
   - Risk Level: LOW, MEDIUM or HIGH (most educational content is LOW)
   - Flags: only actual copyrighted material detected
   - Assessment: brief explanation
   - Recommendations: safe alternatives if risks were found"#,
        expectations: r#"- Be conservative and risk-aware
- Assume Content ID systems, not manual review
- Provide safe, creator-friendly alternatives"#,
        schema: r#"{
  "risk_level": "LOW",
  "flags": ["string flag 1"],
  "assessment": "string - detailed assessment",
  "recommendations": ["string rec 1", "string rec 2"]
}"#,
    },
    ServiceDescriptor {
        kind: ServiceKind::FairUseAnalysis,
        id: "8",
        canonical_name: "fair_use_analysis",
        heading: "FAIR USE ANALYSIS (Transformative Content Assessment)",
        instruction: r#"- Evaluate the transformativeness of the content (0-100 score)
   - Assess commentary, criticism or educational value
   - Break down the fair use factors, each scored 0-10:
     * purpose and character (educational/commentary)
     * nature of the work (factual/creative)
     * amount used
     * market effect
   - Give a clear recommendation for legal safety"#,
        expectations: r#"- Assess transformation, not intent
- Be explicit about risk boundaries
- Provide actionable legal safety guidance, not disclaimers"#,
        schema: r#"{
  "score": 90,
  "reasoning": "string - explanation of score",
  "assessment": "string - detailed fair use assessment",
  "fair_use_factors_breakdown": {
    "purpose_and_character": { "score": 9, "reasoning": "string" },
    "nature_of_work": { "score": 8, "reasoning": "string" },
    "amount_used": { "score": 7, "reasoning": "string" },
    "market_effect": { "score": 9, "reasoning": "string" }
  },
  "recommendation_for_legal_safety": "string"
}"#,
    },
    ServiceDescriptor {
        kind: ServiceKind::TrendIntelligence,
        id: "10",
        canonical_name: "trend_intelligence",
        heading: "TREND INTELLIGENCE (48-Hour Early Trend Detection)",
        instruction: r#"- Identify 3-5 trending topics related to this channel's niche
   - For each topic: name, growth percentage, relevance rating (0-10) and reasoning
   - Provide 3-5 specific predictions for the next 24-72 hours
   - Suggest 3-5 actionable content ideas aligned with emerging trends"#,
        expectations: r#"- Focus on EARLY signals, not obvious trends
- Avoid generic topics everyone already covers
- Think in a 24-72 hour opportunity window"#,
        schema: r#"{
  "trending_topics": [
    {
      "name": "string - topic name",
      "growth_percentage": "12%",
      "relevance_rating": 9,
      "reasoning": "string - why relevant"
    }
  ],
  "predictions": ["string prediction 1"],
  "actionable_content_ideas": ["string idea 1"]
}"#,
    },
];

impl ServiceKind {
    pub fn all() -> impl Iterator<Item = ServiceKind> {
        SERVICES.iter().map(|d| d.kind)
    }

    pub fn from_id(id: &str) -> Option<ServiceKind> {
        SERVICES.iter().find(|d| d.id == id).map(|d| d.kind)
    }

    pub fn descriptor(&self) -> &'static ServiceDescriptor {
        // 表格順序與 enum 宣告順序一致
        &SERVICES[*self as usize]
    }

    pub fn id(&self) -> &'static str {
        self.descriptor().id
    }

    pub fn canonical_name(&self) -> &'static str {
        self.descriptor().canonical_name
    }
}

pub fn instruction_for(id: &str) -> Result<&'static str> {
    ServiceKind::from_id(id)
        .map(|kind| kind.descriptor().instruction)
        .ok_or_else(|| InsightError::UnknownService { id: id.to_string() })
}

pub fn name_for(id: &str) -> Result<&'static str> {
    ServiceKind::from_id(id)
        .map(|kind| kind.canonical_name())
        .ok_or_else(|| InsightError::UnknownService { id: id.to_string() })
}

/// Recognized services in caller order, duplicates and unknown ids dropped.
pub fn resolve<S: AsRef<str>>(ids: &[S]) -> Vec<ServiceKind> {
    let mut kinds = Vec::new();
    for id in ids {
        match ServiceKind::from_id(id.as_ref()) {
            Some(kind) if !kinds.contains(&kind) => kinds.push(kind),
            Some(_) => {}
            None => tracing::debug!("Ignoring unknown service id '{}'", id.as_ref()),
        }
    }
    kinds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::{
        CopyrightProtection, FairUseAnalysis, MultiPlatformMastery, PredictiveCtrAnalysis,
        SemanticTitleEngine, ServiceView, TrendIntelligence,
    };

    #[test]
    fn test_lookup_known_ids() {
        assert_eq!(name_for("1").unwrap(), "semantic_title_engine");
        assert_eq!(name_for("2").unwrap(), "predictive_ctr_analysis");
        assert_eq!(name_for("3").unwrap(), "multi_platform_mastery");
        assert_eq!(name_for("7").unwrap(), "copyright_protection");
        assert_eq!(name_for("8").unwrap(), "fair_use_analysis");
        assert_eq!(name_for("10").unwrap(), "trend_intelligence");
        assert!(instruction_for("7").unwrap().contains("Risk Level"));
    }

    #[test]
    fn test_lookup_unknown_id_fails() {
        assert!(matches!(
            name_for("99"),
            Err(InsightError::UnknownService { ref id }) if id == "99"
        ));
        assert!(instruction_for("").is_err());
    }

    #[test]
    fn test_ids_match_exactly() {
        for id in [" 7 ", "7 ", "07", "1.0"] {
            assert_eq!(ServiceKind::from_id(id), None, "{:?}", id);
        }
        assert!(resolve(&[" 7 ", "10 "]).is_empty());
    }

    #[test]
    fn test_descriptor_table_matches_enum_order() {
        for kind in ServiceKind::all() {
            assert_eq!(kind.descriptor().kind, kind);
            assert_eq!(ServiceKind::from_id(kind.id()), Some(kind));
        }
    }

    #[test]
    fn test_schema_snippets_are_valid_json() {
        for descriptor in SERVICES.iter() {
            let parsed: serde_json::Value = serde_json::from_str(descriptor.schema)
                .unwrap_or_else(|e| panic!("{} schema: {}", descriptor.canonical_name, e));
            assert!(parsed.is_object());
        }
    }

    #[test]
    fn test_typed_views_share_canonical_names() {
        assert_eq!(
            SemanticTitleEngine::CANONICAL_NAME,
            ServiceKind::SemanticTitleEngine.canonical_name()
        );
        assert_eq!(
            PredictiveCtrAnalysis::CANONICAL_NAME,
            ServiceKind::PredictiveCtrAnalysis.canonical_name()
        );
        assert_eq!(
            MultiPlatformMastery::CANONICAL_NAME,
            ServiceKind::MultiPlatformMastery.canonical_name()
        );
        assert_eq!(
            CopyrightProtection::CANONICAL_NAME,
            ServiceKind::CopyrightProtection.canonical_name()
        );
        assert_eq!(
            FairUseAnalysis::CANONICAL_NAME,
            ServiceKind::FairUseAnalysis.canonical_name()
        );
        assert_eq!(
            TrendIntelligence::CANONICAL_NAME,
            ServiceKind::TrendIntelligence.canonical_name()
        );
    }

    #[test]
    fn test_resolve_keeps_order_and_drops_unknown_and_duplicates() {
        let kinds = resolve(&["10", "99", "1", "10", "7"]);
        assert_eq!(
            kinds,
            vec![
                ServiceKind::TrendIntelligence,
                ServiceKind::SemanticTitleEngine,
                ServiceKind::CopyrightProtection,
            ]
        );
        assert!(resolve::<&str>(&[]).is_empty());
    }
}
