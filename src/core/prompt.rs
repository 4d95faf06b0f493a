use crate::core::registry::{self, ServiceDescriptor, ServiceKind};
use crate::domain::model::{AnalysisRequest, Video, NOT_AVAILABLE};
use serde_json::{Map, Value};
use std::fmt::Write;

/// Used instead of an empty instructions section.
pub const GENERIC_OVERVIEW_INSTRUCTION: &str =
    "Provide a general channel overview and basic recommendations.";

const SECTION_RULE: &str = "===========================";

const PREAMBLE: &str = r#"You are an AI-powered YouTube Intelligence Suite used by professional creators and growth teams.

You do NOT give generic advice.
You produce EXECUTABLE INSIGHTS that can be shown directly in a product dashboard.
Be decisive, confident and specific. Avoid vague phrases like "could be improved" or "might work"."#;

const EXECUTION_RULES: &str = r#"- Execute ONLY the services explicitly requested
- Do NOT include services that were not requested
- Each service must be clearly separated in the output
- Every score, rating, or risk level MUST include reasoning"#;

const FIELD_NAME_RULES: &str = r#"FIELD NAME RULES:
- Use snake_case (underscores): "channel_analysis", "current_issues", "why_it_s_effective"
- NOT camelCase: "channelAnalysis", "currentIssues", "whyItsEffective"
- risk_level values: "LOW", "MEDIUM", or "HIGH" (uppercase)
- Scores and ratings are numbers (not strings): 5.5, 90, 8
- Growth figures and percentages are strings: "30-50%", "12%"
- Arrays must contain strings or objects as shown above"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptOptions {
    /// Only the first `max_videos` videos are described.
    pub max_videos: usize,
    /// Description excerpts are capped at this many characters.
    pub description_chars: usize,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            max_videos: 3,
            description_chars: 200,
        }
    }
}

/// Renders the composite instruction document for one request.
pub fn build_prompt(request: &AnalysisRequest, options: &PromptOptions) -> String {
    let services = registry::resolve(&request.services);
    let mut prompt = String::with_capacity(4096);

    prompt.push_str(PREAMBLE);
    prompt.push_str("\n\n");

    push_section(&mut prompt, "CHANNEL VIDEO DATA");
    prompt.push_str(&render_videos(&request.videos, options));

    if let Some(stats) = request.channel_stats.as_ref().filter(|s| !s.is_empty()) {
        push_section(&mut prompt, "CHANNEL STATISTICS");
        prompt.push_str(&render_channel_stats(stats));
    }

    push_section(&mut prompt, "REQUESTED SERVICES");
    prompt.push_str(&build_service_instructions(&services));

    push_section(&mut prompt, "SERVICE EXECUTION RULES");
    prompt.push_str(EXECUTION_RULES);
    prompt.push_str("\n\n");

    if !services.is_empty() {
        push_section(&mut prompt, "SERVICE-SPECIFIC EXPECTATIONS");
        for kind in &services {
            let descriptor = kind.descriptor();
            let _ = writeln!(prompt, "{}", short_heading(descriptor));
            let _ = writeln!(prompt, "{}\n", descriptor.expectations);
        }
    }

    push_section(&mut prompt, "OUTPUT FORMAT (STRICT)");
    prompt.push_str(&render_output_contract(&services));

    prompt
}

/// Instruction blocks for the recognized services in request order, or the
/// generic overview instruction when there are none.
pub fn build_service_instructions(services: &[ServiceKind]) -> String {
    if services.is_empty() {
        return format!("{}\n\n", GENERIC_OVERVIEW_INSTRUCTION);
    }

    let mut instructions = String::from("PERFORM THE FOLLOWING ANALYSES:\n\n");
    for (position, kind) in services.iter().enumerate() {
        let descriptor = kind.descriptor();
        let _ = writeln!(
            instructions,
            "{}. {}:\n   {}\n",
            position + 1,
            descriptor.heading,
            descriptor.instruction
        );
    }
    instructions
}

fn push_section(prompt: &mut String, title: &str) {
    let _ = write!(prompt, "{rule}\n{title}\n{rule}\n", rule = SECTION_RULE, title = title);
}

fn render_videos(videos: &[Video], options: &PromptOptions) -> String {
    if videos.is_empty() {
        return "No videos were supplied.\n\n".to_string();
    }

    let mut out = String::new();
    for (index, video) in videos.iter().take(options.max_videos).enumerate() {
        let description = match video.description_excerpt(options.description_chars) {
            Some(excerpt) if video_description_len(video) > options.description_chars => {
                format!("{}...", excerpt)
            }
            Some(excerpt) => excerpt,
            None => NOT_AVAILABLE.to_string(),
        };

        let _ = writeln!(out, "VIDEO {}:", index + 1);
        let _ = writeln!(out, "- Title: \"{}\"", video.title().unwrap_or(NOT_AVAILABLE));
        let _ = writeln!(out, "- URL: {}", video.url.as_deref().unwrap_or(NOT_AVAILABLE));
        let _ = writeln!(out, "- Description: {}", description);
        let _ = writeln!(out, "- Views: {}", stat_or_na(video, "viewCount"));
        let _ = writeln!(out, "- Likes: {}", stat_or_na(video, "likeCount"));
        let _ = writeln!(out, "- Comments: {}\n", stat_or_na(video, "commentCount"));
    }
    out
}

fn video_description_len(video: &Video) -> usize {
    video
        .description
        .as_deref()
        .map(|d| d.chars().count())
        .unwrap_or(0)
}

fn stat_or_na(video: &Video, name: &str) -> String {
    video
        .statistic(name)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn render_channel_stats(stats: &Map<String, Value>) -> String {
    let mut out = String::new();
    for (name, value) in stats {
        let rendered = match value {
            Value::Null => NOT_AVAILABLE.to_string(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let _ = writeln!(out, "- {}: {}", name, rendered);
    }
    out.push('\n');
    out
}

fn short_heading(descriptor: &ServiceDescriptor) -> &'static str {
    descriptor
        .heading
        .split(" (")
        .next()
        .unwrap_or(descriptor.heading)
}

fn render_output_contract(services: &[ServiceKind]) -> String {
    let mut out = String::from(
        "Return VALID JSON ONLY.\n\
         No markdown. No explanations outside JSON.\n\n",
    );

    // 沒有可辨識的服務時只回傳空的 services
    if services.is_empty() {
        out.push_str(
            "No specific service was requested. Return exactly:\n\
             {\n  \"services\": {}\n}\n",
        );
        return out;
    }

    out.push_str(
        "CRITICAL: Follow this EXACT schema. Do not add, remove, or rename fields.\n\
         Use the exact field names shown below (case-sensitive, with underscores).\n\n\
         JSON STRUCTURE:\n{\n  \"services\": {\n",
    );

    for (position, kind) in services.iter().enumerate() {
        let descriptor = kind.descriptor();
        let separator = if position + 1 < services.len() { "," } else { "" };
        let _ = writeln!(
            out,
            "    \"{}\": {}{}",
            descriptor.canonical_name,
            indent_continuation(descriptor.schema, "    "),
            separator
        );
    }
    out.push_str("  }\n}\n\n");
    out.push_str(FIELD_NAME_RULES);
    out.push_str("\n\n");

    let keys: Vec<String> = services
        .iter()
        .map(|k| format!("\"{}\"", k.canonical_name()))
        .collect();
    let _ = writeln!(
        out,
        "Include ONLY these keys under \"services\": {}",
        keys.join(", ")
    );
    out.push_str("Be concise, concrete, and product-ready.\n");
    out
}

fn indent_continuation(text: &str, indent: &str) -> String {
    text.lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line.to_string()
            } else {
                format!("{}{}", indent, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
