//! 报告渲染器 - 把一条审计记录渲染为多段式markdown报告
//!
//! 纯函数渲染，只读取记录，不做网络与存储。规整器保证所有列表字段
//! 可直接迭代，这里无需再做空值防御。

use crate::types::{AuditResult, FeatureStatus};

/// 渲染完整报告
pub fn render_report(record: &AuditResult) -> String {
    let mut content = String::new();

    content.push_str(&format!(
        "# Strategic Audit: {}\n\n",
        record.core.company_name
    ));
    content.push_str(&format!("- Domain: `{}`\n", record.domain));
    content.push_str(&format!("- Industry: {}\n", record.core.industry));
    content.push_str(&format!("- Generated: {}\n", record.timestamp));
    content.push_str(&format!("- Report ID: `{}`\n\n", record.id));

    render_overview(&mut content, record);
    render_battlecard(&mut content, record);
    render_feature_matrix(&mut content, record);
    render_sentiment(&mut content, record);
    render_tech_stack(&mut content, record);
    render_media(&mut content, record);
    render_sources(&mut content, record);

    content
}

fn render_overview(content: &mut String, record: &AuditResult) {
    content.push_str("## Overview\n\n");
    content.push_str(&format!("{}\n\n", record.core.summary));

    content.push_str("### SWOT\n\n");
    render_bullets(content, "Strengths", &record.core.swot.strengths);
    render_bullets(content, "Weaknesses", &record.core.swot.weaknesses);
    render_bullets(content, "Opportunities", &record.core.swot.opportunities);
    render_bullets(content, "Threats", &record.core.swot.threats);
}

fn render_battlecard(content: &mut String, record: &AuditResult) {
    content.push_str("## Sales Battlecard\n\n");
    render_bullets(content, "How to Win", &record.core.battlecard.how_to_win);
    render_bullets(
        content,
        "Common Objections",
        &record.core.battlecard.common_objections,
    );
    render_bullets(
        content,
        "Discovery Questions",
        &record.core.battlecard.discovery_questions,
    );
}

fn render_feature_matrix(content: &mut String, record: &AuditResult) {
    content.push_str("## Feature Gap Matrix\n\n");
    if record.core.feature_gap.is_empty() {
        content.push_str("_No feature gap data._\n\n");
        return;
    }

    content.push_str("| Feature | Status | Notes |\n|---|---|---|\n");
    for entry in &record.core.feature_gap {
        content.push_str(&format!(
            "| {} | {} {} | {} |\n",
            entry.feature,
            status_glyph(entry.status),
            entry.status,
            entry.description
        ));
    }
    content.push('\n');
}

fn status_glyph(status: FeatureStatus) -> &'static str {
    match status {
        FeatureStatus::Available => "🟢",
        FeatureStatus::Limited => "🟡",
        FeatureStatus::Missing => "🔴",
    }
}

fn render_sentiment(content: &mut String, record: &AuditResult) {
    content.push_str("## Sentiment\n\n");
    content.push_str(&format!(
        "Average score: **{}** / 100\n\n",
        record.average_sentiment()
    ));
    for entry in &record.core.sentiment {
        content.push_str(&format!("### {} — {} / 100\n\n", entry.category, entry.score));
        for gripe in &entry.gripes {
            content.push_str(&format!("- {}\n", gripe));
        }
        content.push('\n');
    }
}

fn render_tech_stack(content: &mut String, record: &AuditResult) {
    content.push_str("## Tech Stack\n\n");
    if record.core.tech_stack.is_empty() {
        content.push_str("_No technologies identified._\n\n");
        return;
    }
    // 保持后端给出的相关度顺序
    for tech in &record.core.tech_stack {
        content.push_str(&format!("- {}\n", tech));
    }
    content.push('\n');
}

fn render_media(content: &mut String, record: &AuditResult) {
    let any_media =
        record.visual_url.is_some() || record.audio_url.is_some() || record.video_url.is_some();
    if !any_media {
        return;
    }

    content.push_str("## Media Briefings\n\n");
    if let Some(visual) = &record.visual_url {
        content.push_str(&format!("- Visual: {}\n", shorten_reference(visual)));
    }
    if let Some(audio) = &record.audio_url {
        content.push_str(&format!("- Audio: {}\n", shorten_reference(audio)));
    }
    if let Some(video) = &record.video_url {
        content.push_str(&format!("- Video: {}\n", video));
    }
    content.push('\n');
}

/// data URI在报告中只展示头部，避免整页base64
fn shorten_reference(reference: &str) -> String {
    const LIMIT: usize = 64;
    if reference.starts_with("data:") && reference.len() > LIMIT {
        format!("{}... ({} bytes inline)", &reference[..LIMIT], reference.len())
    } else {
        reference.to_string()
    }
}

fn render_sources(content: &mut String, record: &AuditResult) {
    let Some(sources) = &record.source_urls else {
        return;
    };
    if sources.is_empty() {
        return;
    }

    content.push_str("## Sources\n\n");
    for (i, url) in sources.iter().enumerate() {
        content.push_str(&format!("{}. {}\n", i + 1, url));
    }
    content.push('\n');
}

fn render_bullets(content: &mut String, title: &str, items: &[String]) {
    content.push_str(&format!("**{}**\n\n", title));
    if items.is_empty() {
        content.push_str("- _none identified_\n");
    } else {
        for item in items {
            content.push_str(&format!("- {}\n", item));
        }
    }
    content.push('\n');
}
