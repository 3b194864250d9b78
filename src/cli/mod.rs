use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// CompeteAI - 由Rust与AI驱动的竞争对手审计引擎
#[derive(Parser, Debug)]
#[command(name = "competeai")]
#[command(
    about = "AI-based competitive intelligence probe. Point it at a competitor domain and it performs a grounded forensic audit: SWOT, sales battlecard, feature gap matrix, sentiment and tech stack, with optional media briefings."
)]
#[command(version)]
pub struct Args {
    /// 目标域名（如 acme.com），指定即发起一次审计
    pub domain: Option<String>,

    /// 列出本地存档中的全部审计记录
    #[arg(long)]
    pub list: bool,

    /// 删除指定ID的审计记录
    #[arg(long, value_name = "ID")]
    pub remove: Option<String>,

    /// 将指定ID的审计记录导出为markdown报告
    #[arg(long, value_name = "ID")]
    pub export: Option<String>,

    /// 为指定ID的审计记录生成视频简报
    #[arg(long, value_name = "ID")]
    pub video: Option<String>,

    /// 为指定ID的审计记录生成语音简报
    #[arg(long, value_name = "ID")]
    pub audio: Option<String>,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// LLM API KEY
    #[arg(long)]
    pub api_key: Option<String>,

    /// 审计所用的文本生成模型
    #[arg(long)]
    pub model: Option<String>,

    /// 审计后不生成头图
    #[arg(long)]
    pub no_visual: bool,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

/// 一次进程运行要执行的操作
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeCommand {
    Audit { domain: String },
    List,
    Remove { id: String },
    Export { id: String },
    EnrichVideo { id: String },
    EnrichAudio { id: String },
}

impl Args {
    /// 从参数组合推导操作；无法推导时返回None（调用方展示用法提示）。
    /// 标志之间互斥，按固定优先级取第一个命中的。
    pub fn command(&self) -> Option<ProbeCommand> {
        if self.list {
            return Some(ProbeCommand::List);
        }
        if let Some(id) = &self.remove {
            return Some(ProbeCommand::Remove { id: id.clone() });
        }
        if let Some(id) = &self.export {
            return Some(ProbeCommand::Export { id: id.clone() });
        }
        if let Some(id) = &self.video {
            return Some(ProbeCommand::EnrichVideo { id: id.clone() });
        }
        if let Some(id) = &self.audio {
            return Some(ProbeCommand::EnrichAudio { id: id.clone() });
        }
        self.domain
            .as_ref()
            .map(|domain| ProbeCommand::Audit {
                domain: domain.clone(),
            })
    }

    /// 将CLI参数转换为配置
    pub fn into_config(self) -> Config {
        let mut config = if let Some(config_path) = &self.config {
            // 显式指定了配置文件路径，从该路径加载
            Config::from_file(config_path).unwrap_or_else(|_| {
                panic!("⚠️ 警告: 无法读取配置文件 {:?}", config_path)
            })
        } else {
            // 未显式指定时尝试从工作目录的默认位置加载
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join("competeai.toml");

            if default_config_path.exists() {
                Config::from_file(&default_config_path).unwrap_or_else(|_| {
                    panic!(
                        "⚠️ 警告: 无法读取默认配置文件 {:?}",
                        default_config_path
                    )
                })
            } else {
                Config::default()
            }
        };

        // CLI参数优先级高于配置文件
        if let Some(api_key) = self.api_key {
            config.llm.api_key = api_key;
        }
        if let Some(model) = self.model {
            config.llm.model_audit = model;
        }
        if self.no_visual {
            config.media.enable_visual = false;
        }
        config.verbose = self.verbose;

        config
    }
}

// Include tests
#[cfg(test)]
mod tests;
