use crate::domain::model::AnalysisResult;
use crate::utils::error::{InsightError, Result};
use serde_json::Value;

const FENCE: &str = "```";

/// Removes a surrounding markdown code fence (```` ```json ```` or bare
/// ```` ``` ````) if present.
pub fn strip_fences(raw: &str) -> &str {
    let text = raw.trim();
    let Some(rest) = text.strip_prefix(FENCE) else {
        return text;
    };

    // drop the info string on the opening line (`json`, `JSON`, ...)
    let body = match rest.find('\n') {
        Some(newline) if rest[..newline].trim().chars().all(|c| c.is_ascii_alphanumeric()) => {
            &rest[newline + 1..]
        }
        _ => rest,
    };

    body.trim_end()
        .strip_suffix(FENCE)
        .unwrap_or(body)
        .trim()
}

/// Parses provider text into an [`AnalysisResult`]. Only syntax and the
/// top-level `services` mapping are checked; payloads stay loose JSON.
pub fn decode(raw: &str) -> Result<AnalysisResult> {
    let text = strip_fences(raw);
    if text.is_empty() {
        return Err(InsightError::malformed("empty response"));
    }

    let document: Value = serde_json::from_str(text).map_err(|e| {
        InsightError::malformed(format!(
            "{} (line {}, column {})",
            e,
            e.line(),
            e.column()
        ))
    })?;

    // 只接受物件；serde 的 struct visitor 也會吃 JSON 陣列
    if !document.is_object() {
        return Err(InsightError::malformed(format!(
            "expected a JSON object, got {}",
            kind_of(&document)
        )));
    }

    serde_json::from_value::<AnalysisResult>(document)
        .map_err(|e| InsightError::malformed(e.to_string()))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BODY: &str = r#"{"services": {"copyright_protection": {"risk_level": "LOW", "flags": []}}}"#;

    #[test]
    fn test_decode_plain_json() {
        let result = decode(BODY).unwrap();
        assert_eq!(result.service_names(), vec!["copyright_protection"]);
        assert_eq!(
            result.get("copyright_protection").unwrap()["risk_level"],
            json!("LOW")
        );
    }

    #[test]
    fn test_fenced_and_plain_decode_identically() {
        let plain = decode(BODY).unwrap();

        for fenced in [
            format!("```json\n{}\n```", BODY),
            format!("```\n{}\n```", BODY),
            format!("  ```JSON\n{}\n```  \n", BODY),
            format!("```json\n{}```", BODY),
        ] {
            assert_eq!(decode(&fenced).unwrap(), plain, "{:?}", fenced);
        }
    }

    #[test]
    fn test_strip_fences_is_idempotent() {
        let fenced = format!("```json\n{}\n```", BODY);
        let once = strip_fences(&fenced);
        assert_eq!(once, BODY);
        assert_eq!(strip_fences(once), once);
    }

    #[test]
    fn test_truncated_json_is_malformed() {
        let truncated = &BODY[..BODY.len() - 10];
        assert!(matches!(
            decode(truncated),
            Err(InsightError::MalformedOutput { .. })
        ));
    }

    #[test]
    fn test_invalid_inputs_are_malformed() {
        for raw in [
            "",
            "```json\n```",
            "Sure! Here is your analysis.",
            "[1, 2, 3]",
            "[{}]",
            r#"[{"copyright_protection": {}}]"#,
            r#"[{"services": {"copyright_protection": {}}}]"#,
            r#""services""#,
            "null",
            r#"{"services": ["not", "a", "map"]}"#,
            r#"{"analysis": {}}"#,
        ] {
            assert!(
                matches!(decode(raw), Err(InsightError::MalformedOutput { .. })),
                "{:?}",
                raw
            );
        }
    }

    #[test]
    fn test_top_level_array_is_rejected() {
        let err = decode(r#"[{"copyright_protection": {"risk_level": "LOW"}}]"#).unwrap_err();
        match err {
            InsightError::MalformedOutput { message } => assert!(message.contains("array")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_payloads_are_not_schema_checked() {
        let result = decode(r#"{"services": {"copyright_protection": {"riskLevel": "low"}}}"#)
            .unwrap();
        assert_eq!(
            result.get("copyright_protection").unwrap(),
            &json!({"riskLevel": "low"})
        );
    }
}
