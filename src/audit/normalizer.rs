//! 字段规整器 - 把松散类型的解析结果补齐为完整的报告主体
//!
//! 这是整个系统对生成后端不可靠性的唯一屏障：输入里任何字段都可能
//! 缺失、类型错误或为null，输出保证每个列表字段都是真实列表、
//! 每个字符串字段都非空。该组件永不失败。

use serde_json::Value;

use crate::types::{
    AuditCore, BattlecardData, FeatureGapEntry, FeatureStatus, SentimentAnalysis, SwotData,
};

/// 行业字段缺失时的占位值
pub const DEFAULT_INDUSTRY: &str = "General Industry";
/// 摘要字段缺失时的占位值
pub const DEFAULT_SUMMARY: &str = "Intelligence summary complete.";

/// 将解析出的松散对象规整为完整的`AuditCore`。
/// 公司名缺失时回退为输入域名本身。
pub fn normalize(domain: &str, parsed: &Value) -> AuditCore {
    AuditCore {
        company_name: non_empty_string(parsed.get("companyName"), domain),
        industry: non_empty_string(parsed.get("industry"), DEFAULT_INDUSTRY),
        summary: non_empty_string(parsed.get("summary"), DEFAULT_SUMMARY),
        tech_stack: string_list(parsed.get("techStack")),
        swot: normalize_swot(parsed.get("swot")),
        battlecard: normalize_battlecard(parsed.get("battlecard")),
        feature_gap: normalize_feature_gap(parsed.get("featureGap")),
        sentiment: normalize_sentiment(parsed.get("sentiment")),
    }
}

/// 取非空字符串，否则使用占位值
fn non_empty_string(value: Option<&Value>, fallback: &str) -> String {
    match value.and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => fallback.to_string(),
    }
}

/// 只有确实是数组时才接收；字符串等错误类型一律归为空列表，
/// 不做部分修复（不把裸字符串包装成单元素列表）
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value.and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(|s| s.to_string())
            .collect(),
        None => Vec::new(),
    }
}

/// 嵌套对象按子字段粒度补默认值：对象本身缺失给全默认，
/// 对象存在但缺子字段只补缺的那个
fn normalize_swot(value: Option<&Value>) -> SwotData {
    SwotData {
        strengths: string_list(value.and_then(|v| v.get("strengths"))),
        weaknesses: string_list(value.and_then(|v| v.get("weaknesses"))),
        opportunities: string_list(value.and_then(|v| v.get("opportunities"))),
        threats: string_list(value.and_then(|v| v.get("threats"))),
    }
}

fn normalize_battlecard(value: Option<&Value>) -> BattlecardData {
    BattlecardData {
        how_to_win: string_list(value.and_then(|v| v.get("howToWin"))),
        common_objections: string_list(value.and_then(|v| v.get("commonObjections"))),
        discovery_questions: string_list(value.and_then(|v| v.get("discoveryQuestions"))),
    }
}

fn normalize_feature_gap(value: Option<&Value>) -> Vec<FeatureGapEntry> {
    match value.and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .filter_map(|item| {
                let obj = item.as_object()?;
                Some(FeatureGapEntry {
                    feature: non_empty_string(obj.get("feature"), "Unknown feature"),
                    status: FeatureStatus::classify(
                        obj.get("status").and_then(Value::as_str).unwrap_or(""),
                    ),
                    description: non_empty_string(obj.get("description"), "-"),
                })
            })
            .collect(),
        None => Vec::new(),
    }
}

fn normalize_sentiment(value: Option<&Value>) -> Vec<SentimentAnalysis> {
    match value.and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .filter_map(|item| {
                let obj = item.as_object()?;
                Some(SentimentAnalysis {
                    category: non_empty_string(obj.get("category"), "General"),
                    score: clamp_score(obj.get("score")),
                    gripes: string_list(obj.get("gripes")),
                })
            })
            .collect(),
        None => Vec::new(),
    }
}

/// 得分收敛到[0,100]整数；缺失或非数值按0处理
fn clamp_score(value: Option<&Value>) -> u8 {
    let raw = value.and_then(Value::as_f64).unwrap_or(0.0);
    raw.round().clamp(0.0, 100.0) as u8
}
