//! JSON提取器 - 从模型的自由文本回答中定位并解析出单个JSON对象
//!
//! 后端契约是文本而非结构化数据，模型常把JSON包裹在寒暄性文字中间，
//! 因此"JSON嵌在散文里"是常态而不是错误场景。

use serde_json::Value;

use crate::error::{AuditError, ProbeResult};

/// 从任意文本中提取第一个配平的顶层JSON对象并解析。
///
/// 扫描器跟踪花括号深度与字符串字面量转义，取第一个深度归零的
/// `{...}` 片段尝试解析；找不到配平片段时回退为对全文直接解析。
/// 两者都失败则返回`AuditError::Extraction`。
/// 已知局限：文本中存在多个并列JSON对象时只取第一个。
pub fn extract_json(text: &str) -> ProbeResult<Value> {
    if let Some(candidate) = find_balanced_object(text) {
        if let Ok(value) = serde_json::from_str::<Value>(candidate) {
            return Ok(value);
        }
    }

    // 兜底：整段文本本身就是JSON的情况
    serde_json::from_str::<Value>(text.trim()).map_err(|e| {
        AuditError::Extraction(format!("no parseable JSON object in response: {}", e))
    })
}

/// 定位第一个配平的顶层`{...}`片段
fn find_balanced_object(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let start = text.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bare_json() {
        let value = extract_json(r#"{"companyName":"Acme"}"#).unwrap();
        assert_eq!(value["companyName"], "Acme");
    }

    #[test]
    fn test_extract_json_wrapped_in_prose() {
        let text = "Sure, here it is:\n{\"companyName\":\"Acme\",\"industry\":\"Widgets\"}\nLet me know if you need more.";
        let value = extract_json(text).unwrap();
        assert_eq!(value["industry"], "Widgets");
    }

    #[test]
    fn test_extract_handles_braces_in_string_literals() {
        // 首括号/尾括号切片法在这里会失败，深度扫描不会
        let text = r#"The shape is {"summary":"uses {mustache} templates","tech":[]} as requested. Note: {unbalanced"#;
        let value = extract_json(text).unwrap();
        assert_eq!(value["summary"], "uses {mustache} templates");
    }

    #[test]
    fn test_extract_nested_objects() {
        let text = r#"analysis follows {"swot":{"strengths":["fast"]},"battlecard":{}} end"#;
        let value = extract_json(text).unwrap();
        assert_eq!(value["swot"]["strengths"][0], "fast");
    }

    #[test]
    fn test_extract_escaped_quotes() {
        let text = r#"{"summary":"they call it \"the best\" on their site"}"#;
        let value = extract_json(text).unwrap();
        assert_eq!(value["summary"], r#"they call it "the best" on their site"#);
    }

    #[test]
    fn test_prose_only_fails_with_extraction_error() {
        let err = extract_json("I could not find anything useful about that domain.").unwrap_err();
        assert!(matches!(err, AuditError::Extraction(_)));
    }

    #[test]
    fn test_truncated_json_fails() {
        let err = extract_json(r#"{"companyName":"Acme","industry":"#).unwrap_err();
        assert!(matches!(err, AuditError::Extraction(_)));
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(extract_json("").is_err());
    }
}
