//! 生成后端接入层 - 提供统一的文本生成与媒体生成接口

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::error::ProbeResult;

pub mod extractor;
pub mod gemini;

pub use gemini::GeminiClient;

/// 一次文本生成请求
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// 系统指令（角色设定）
    pub system_instruction: String,
    /// 面向本次目标的用户提示词
    pub user_prompt: String,
    /// 期望输出的schema声明
    pub response_schema: Option<Value>,
    /// 是否启用实时检索落地（grounding），允许后端引用来源
    pub grounding: bool,
}

/// 文本生成响应：正文文本加可选的落地引用来源
#[derive(Debug, Clone, Default)]
pub struct GenerationResponse {
    pub text: String,
    pub source_urls: Vec<String>,
}

/// 文本生成后端
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> ProbeResult<GenerationResponse>;
}

/// 视频生成任务句柄
#[derive(Debug, Clone, PartialEq)]
pub struct VideoJob {
    /// 后端长耗时操作的名称，用于轮询
    pub operation_name: String,
}

/// 视频任务轮询结果
#[derive(Debug, Clone, PartialEq)]
pub enum VideoJobStatus {
    Running,
    /// 后端报告完成；asset_uri缺失属于后端契约违例，由调用方判定
    Done { asset_uri: Option<String> },
    Failed(String),
}

/// 媒体生成后端（图像/音频走内联载荷，视频走异步任务）
#[async_trait]
pub trait MediaBackend: Send + Sync {
    /// 生成头图，返回data URI
    async fn generate_image(&self, prompt: &str, aspect_ratio: &str) -> ProbeResult<String>;

    /// 合成语音简报，返回data URI
    async fn generate_speech(&self, text: &str, voice: &str) -> ProbeResult<String>;

    /// 提交视频生成任务，返回可轮询的任务句柄
    async fn submit_video(&self, prompt: &str, resolution: &str) -> ProbeResult<VideoJob>;

    /// 轮询视频任务状态
    async fn poll_video(&self, job: &VideoJob) -> ProbeResult<VideoJobStatus>;

    /// 下载任务产物到本地，返回可播放的文件路径
    async fn download_asset(&self, uri: &str, dest: &Path) -> ProbeResult<PathBuf>;
}
