//! 媒体编排器 - 用生成的图像/音频/视频简报充实既有报告
//!
//! 三种媒体相互独立、各自可选，基础记录在它们全部缺席时依然完整可渲染。
//! 每种媒体对每条记录至多生成一次：触发路径先查在途标记，写入路径
//! 先写者胜。

use crate::error::ProbeResult;
use crate::workflow::context::ProbeContext;

pub mod inflight;
pub mod video;

/// 头图提示词模板
pub fn visual_prompt(company_name: &str, industry: &str) -> String {
    format!(
        "High-end strategic market visual: {} ({}). Abstract data flows, \
         minimalist dark mode UI aesthetic, indigo and violet highlights, 16:9 cinematic.",
        company_name, industry
    )
}

/// 语音简报的播报稿
pub fn briefing_script(company_name: &str, summary: &str) -> String {
    format!(
        "Strategic intelligence briefing for {}. {}",
        company_name, summary
    )
}

/// 生成头图，返回data URI。
/// 失败不致命：打一行警告并返回静态兜底图，绝不向上传播图像错误。
pub async fn generate_visual(
    context: &ProbeContext,
    company_name: &str,
    industry: &str,
) -> String {
    let prompt = visual_prompt(company_name, industry);
    match context
        .media
        .generate_image(&prompt, &context.config.media.aspect_ratio)
        .await
    {
        Ok(data_uri) => data_uri,
        Err(e) => {
            eprintln!("⚠️ 头图生成失败，使用兜底图: {}", e);
            context.config.media.fallback_visual_url.clone()
        }
    }
}

/// 合成语音简报，返回data URI。音频失败向上抛给调用方，只影响该媒体本身。
pub async fn generate_audio_briefing(
    context: &ProbeContext,
    company_name: &str,
    summary: &str,
) -> ProbeResult<String> {
    let script = briefing_script(company_name, summary);
    context
        .media
        .generate_speech(&script, &context.config.media.voice)
        .await
}
