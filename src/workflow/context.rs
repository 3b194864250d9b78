use std::sync::Arc;

use crate::{
    config::Config,
    error::ProbeResult,
    llm::{GeminiClient, GenerationBackend, MediaBackend},
    media::inflight::InflightRegistry,
};

/// 探测上下文
///
/// 启动时构建一次，持有配置与两类后端的引用，注入到各编排器中。
#[derive(Clone)]
pub struct ProbeContext {
    /// 配置
    pub config: Config,
    /// 文本生成后端
    pub generation: Arc<dyn GenerationBackend>,
    /// 媒体生成后端
    pub media: Arc<dyn MediaBackend>,
    /// 媒体生成的在途标记表
    pub inflight: InflightRegistry,
}

impl ProbeContext {
    /// 创建新的探测上下文；凭证校验在后端客户端构建时完成
    pub fn new(config: Config) -> ProbeResult<Self> {
        let client = GeminiClient::new(&config.llm)?;
        let generation: Arc<dyn GenerationBackend> = Arc::new(client.clone());
        let media: Arc<dyn MediaBackend> = Arc::new(client);

        Ok(Self {
            config,
            generation,
            media,
            inflight: InflightRegistry::new(),
        })
    }

    /// 用外部提供的后端构建上下文（测试注入用）
    pub fn with_backends(
        config: Config,
        generation: Arc<dyn GenerationBackend>,
        media: Arc<dyn MediaBackend>,
    ) -> Self {
        Self {
            config,
            generation,
            media,
            inflight: InflightRegistry::new(),
        }
    }
}
