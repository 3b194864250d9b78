//! 审计编排器 - 探测引擎的唯一公共入口
//!
//! 给定目标域名，构建生成请求（提示词+输出schema+检索落地），调用文本
//! 生成后端，对原始文本做提取与规整，按需补一张头图，装配出一条完整的
//! 审计记录。单次尝试，失败直接上抛给调用方，不落任何半成品记录。

use chrono::Utc;
use regex::Regex;
use serde_json::{Value, json};
use std::sync::LazyLock;
use uuid::Uuid;

use crate::error::{AuditError, ProbeResult};
use crate::llm::{GenerationRequest, extractor::extract_json};
use crate::types::AuditResult;
use crate::workflow::context::ProbeContext;

pub mod normalizer;
pub mod progress;

/// 审计系统指令：法证级市场分析师角色设定
const SYSTEM_INSTRUCTION: &str = "You are a World-Class Strategic Market Auditor and Forensic Intelligence Specialist.\n\
Your mission is to perform a deep forensic audit and provide a high-fidelity report in JSON format.\n\
\n\
REPORT SECTIONS:\n\
- SWOT: 4 bullet points for each quadrant.\n\
- BATTLECARD: Generate high-impact 'Win Sequences', real customer objections, and discovery questions that expose technical debt.\n\
- FEATURE GAP: Identify 5-8 specific product features. Statuses must be: 'available', 'limited', or 'missing'.\n\
- SENTIMENT: Analyze Product, Support, and Pricing with 0-100 scores and specific user complaints.\n\
- TECH STACK: Identify 10+ specific technologies used (CDNs, Frameworks, CRMs, etc.).\n\
\n\
BE SPECIFIC, AGGRESSIVE, AND ACTIONABLE. DO NOT PROVIDE GENERIC CONTENT.";

static DOMAIN_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(https?://)?(www\.)?").expect("domain prefix regex"));

/// 域名归一：大小写不敏感地剥掉scheme与`www.`前缀，丢弃路径，主机名转小写。
/// `https://www.Example.com/pricing` -> `example.com`
pub fn normalize_domain(raw: &str) -> String {
    let stripped = DOMAIN_PREFIX.replace(raw.trim(), "");
    stripped
        .split('/')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// 面向单个目标的用户提示词
fn build_user_prompt(domain: &str) -> String {
    format!(
        "Perform an exhaustive forensic tactical audit for: {}. \
         Focus on SaaS infrastructure, feature gaps, and offensive sales win-strategies.",
        domain
    )
}

/// 输出schema声明，与`AuditCore`的形状一一对应
fn string_array() -> Value {
    json!({ "type": "ARRAY", "items": { "type": "STRING" } })
}

fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "companyName": { "type": "STRING" },
            "industry": { "type": "STRING" },
            "summary": { "type": "STRING" },
            "techStack": string_array(),
            "swot": {
                "type": "OBJECT",
                "properties": {
                    "strengths": string_array(),
                    "weaknesses": string_array(),
                    "opportunities": string_array(),
                    "threats": string_array(),
                },
                "required": ["strengths", "weaknesses", "opportunities", "threats"],
            },
            "battlecard": {
                "type": "OBJECT",
                "properties": {
                    "howToWin": string_array(),
                    "commonObjections": string_array(),
                    "discoveryQuestions": string_array(),
                },
                "required": ["howToWin", "commonObjections", "discoveryQuestions"],
            },
            "featureGap": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "feature": { "type": "STRING" },
                        "status": { "type": "STRING" },
                        "description": { "type": "STRING" },
                    },
                    "required": ["feature", "status", "description"],
                },
            },
            "sentiment": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "category": { "type": "STRING" },
                        "score": { "type": "NUMBER" },
                        "gripes": string_array(),
                    },
                    "required": ["category", "score", "gripes"],
                },
            },
        },
        "required": [
            "companyName", "industry", "summary", "techStack",
            "swot", "battlecard", "featureGap", "sentiment"
        ],
    })
}

/// 对目标域名执行一次完整探测。
///
/// 恰好一次文本生成调用，至多一次头图调用；头图失败不致命，
/// 以静态兜底图替代。本函数不写存储，持久化是调用方的责任。
pub async fn run_audit(context: &ProbeContext, raw_domain: &str) -> ProbeResult<AuditResult> {
    let domain = normalize_domain(raw_domain);
    if domain.is_empty() {
        return Err(AuditError::Configuration(format!(
            "target domain has no host: {:?}",
            raw_domain
        )));
    }
    println!("🛰️ 目标锁定: {}", domain);

    let request = GenerationRequest {
        system_instruction: SYSTEM_INSTRUCTION.to_string(),
        user_prompt: build_user_prompt(&domain),
        response_schema: Some(response_schema()),
        grounding: true,
    };

    let ticker = progress::ProgressTicker::spawn();
    let generated = context.generation.generate(&request).await;
    ticker.stop();
    let generated = generated?;

    let parsed = extract_json(&generated.text)?;
    let core = normalizer::normalize(&domain, &parsed);

    let mut result = AuditResult {
        id: Uuid::new_v4().to_string(),
        domain,
        timestamp: Utc::now().to_rfc3339(),
        source_urls: if generated.source_urls.is_empty() {
            None
        } else {
            Some(generated.source_urls)
        },
        core,
        visual_url: None,
        audio_url: None,
        video_url: None,
    };

    if context.config.media.enable_visual {
        let visual =
            crate::media::generate_visual(context, &result.core.company_name, &result.core.industry)
                .await;
        result.visual_url = Some(visual);
    }

    println!(
        "✅ 探测完成: {} ({})",
        result.core.company_name, result.core.industry
    );
    Ok(result)
}

#[cfg(test)]
mod tests;
