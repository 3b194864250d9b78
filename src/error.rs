use thiserror::Error;

/// 探测引擎统一错误类型
///
/// 除字段规整器（normalizer，契约为永不失败）之外，
/// 所有组件在不可恢复的情况下都以该类型抛错，且任何环节都不做自动重试。
#[derive(Debug, Error)]
pub enum AuditError {
    /// 必需的后端凭证或输入参数缺失/无效，本次操作无法继续
    #[error("configuration error: {0}")]
    Configuration(String),

    /// 文本/图像/音频/视频生成后端调用失败（网络、鉴权、配额）
    #[error("generation backend failed: {0}")]
    Generation(String),

    /// 后端文本响应中找不到可解析的JSON对象
    #[error("strategic intelligence extraction failed, please re-run the probe: {0}")]
    Extraction(String),

    /// 媒体任务失败，或完成后没有给出可用的产物引用
    #[error("media generation failed: {0}")]
    MediaGeneration(String),

    /// 长耗时媒体任务轮询超出上限
    #[error("media job timed out after {polls} polls ({elapsed_secs}s)")]
    Timeout { polls: u32, elapsed_secs: u64 },

    /// 本地报告存储读写失败
    #[error("report store error: {0}")]
    Store(String),
}

impl From<reqwest::Error> for AuditError {
    fn from(err: reqwest::Error) -> Self {
        AuditError::Generation(err.to_string())
    }
}

impl From<std::io::Error> for AuditError {
    fn from(err: std::io::Error) -> Self {
        AuditError::Store(err.to_string())
    }
}

pub type ProbeResult<T> = std::result::Result<T, AuditError>;
