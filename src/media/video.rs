//! 长耗时视频简报编排器
//!
//! 提交生成任务后按固定间隔轮询，直到后端报告完成，再下载产物到本地。
//! 轮询有次数上限（超出视为超时），并支持调用方协作式取消；取消只停止
//! 本地轮询，不会撤销后端已提交的任务。

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::error::{AuditError, ProbeResult};
use crate::llm::VideoJobStatus;
use crate::workflow::context::ProbeContext;

/// 协作式取消令牌
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// 视频简报提示词模板
fn video_prompt(source_text: &str) -> String {
    format!(
        "Cinematic strategic intelligence briefing, dark mode aesthetic, \
         abstract data visualizations, narrated over: {}",
        source_text
    )
}

/// 生成一段视频简报并下载到本地，返回可播放的文件路径。
///
/// 一次调用对应一个在途任务，调用内部没有并发；对同一输入的并发调用
/// 不会去重，各自提交独立任务（触发路径应先查在途标记）。
pub async fn run_video_briefing(
    context: &ProbeContext,
    source_text: &str,
    token: &CancellationToken,
) -> ProbeResult<PathBuf> {
    let media_config = &context.config.media;
    let prompt = video_prompt(source_text);

    let job = context
        .media
        .submit_video(&prompt, &media_config.resolution)
        .await?;
    println!("🎬 视频任务已提交: {}", job.operation_name);

    let interval = Duration::from_secs(media_config.poll_interval_secs);
    let started = Instant::now();

    for poll in 1..=media_config.max_polls {
        if token.is_cancelled() {
            return Err(AuditError::MediaGeneration(
                "video briefing cancelled by caller".to_string(),
            ));
        }

        tokio::time::sleep(interval).await;

        if token.is_cancelled() {
            return Err(AuditError::MediaGeneration(
                "video briefing cancelled by caller".to_string(),
            ));
        }

        match context.media.poll_video(&job).await? {
            VideoJobStatus::Running => {
                println!(
                    "   ⏳ 渲染中... (第 {} / {} 次轮询)",
                    poll, media_config.max_polls
                );
            }
            VideoJobStatus::Failed(message) => {
                return Err(AuditError::MediaGeneration(message));
            }
            VideoJobStatus::Done { asset_uri: None } => {
                // 完成却没有产物引用，按后端契约违例处理
                return Err(AuditError::MediaGeneration(
                    "video job reported done without an asset reference".to_string(),
                ));
            }
            VideoJobStatus::Done {
                asset_uri: Some(uri),
            } => {
                let dest = media_config
                    .assets_dir
                    .join(format!("briefing-{}.mp4", Uuid::new_v4()));
                let path = context.media.download_asset(&uri, &dest).await?;
                println!("✅ 视频简报就绪: {}", path.display());
                return Ok(path);
            }
        }
    }

    Err(AuditError::Timeout {
        polls: media_config.max_polls,
        elapsed_secs: started.elapsed().as_secs(),
    })
}
