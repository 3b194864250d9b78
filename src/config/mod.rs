use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// 探测引擎兜底头图，图像生成失败时使用
pub const FALLBACK_VISUAL_URL: &str =
    "https://images.unsplash.com/photo-1460925895917-afdab827c52f?auto=format&fit=crop&q=80&w=1200";

/// 应用程序配置
///
/// 进程启动时构建一次，此后只读，通过引用注入到各编排器中。
/// 凭证也在这一时刻从环境读入配置对象，调用路径上不再触碰环境变量。
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// LLM模型配置
    pub llm: LLMConfig,

    /// 媒体生成配置
    pub media: MediaConfig,

    /// 本地报告存储配置
    pub store: StoreConfig,

    /// 是否启用详细日志
    pub verbose: bool,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LLMConfig {
    /// 后端API KEY
    pub api_key: String,

    /// 后端API基地址
    pub api_base_url: String,

    /// 审计推理模型
    pub model_audit: String,

    /// 头图生成模型
    pub model_image: String,

    /// 语音简报合成模型
    pub model_speech: String,

    /// 视频简报生成模型
    pub model_video: String,

    /// 温度
    pub temperature: f64,

    /// 推理预算（tokens），用于检索结果的深度战略综合
    pub thinking_budget: u32,

    /// 超时时间（秒）
    pub timeout_seconds: u64,
}

/// 媒体生成配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MediaConfig {
    /// 审计完成后是否自动生成头图
    pub enable_visual: bool,

    /// 头图宽高比
    pub aspect_ratio: String,

    /// 语音简报的音色
    pub voice: String,

    /// 视频简报分辨率
    pub resolution: String,

    /// 视频任务轮询间隔（秒）
    pub poll_interval_secs: u64,

    /// 视频任务轮询次数上限，超出视为超时
    pub max_polls: u32,

    /// 图像生成失败时的静态兜底头图
    pub fallback_visual_url: String,

    /// 下载的媒体产物存放目录
    pub assets_dir: PathBuf,
}

/// 本地报告存储配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StoreConfig {
    /// 报告列表的持久化文件
    pub store_path: PathBuf,

    /// 导出的markdown报告目录
    pub reports_dir: PathBuf,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LLMConfig::default(),
            media: MediaConfig::default(),
            store: StoreConfig::default(),
            verbose: false,
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("COMPETEAI_API_KEY").unwrap_or_default(),
            api_base_url: String::from("https://generativelanguage.googleapis.com/v1beta"),
            model_audit: String::from("gemini-3-pro-preview"),
            model_image: String::from("gemini-2.5-flash-image"),
            model_speech: String::from("gemini-2.5-flash-preview-tts"),
            model_video: String::from("veo-3.1-generate-preview"),
            temperature: 0.2,
            thinking_budget: 8000,
            timeout_seconds: 300,
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            enable_visual: true,
            aspect_ratio: String::from("16:9"),
            voice: String::from("Kore"),
            resolution: String::from("720p"),
            poll_interval_secs: 10,
            max_polls: 40,
            fallback_visual_url: String::from(FALLBACK_VISUAL_URL),
            assets_dir: PathBuf::from("./competeai.assets"),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("./competeai_audits.json"),
            reports_dir: PathBuf::from("./competeai.reports"),
        }
    }
}

// Include tests
#[cfg(test)]
mod tests;
