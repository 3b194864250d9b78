//! 本地报告存储
//!
//! 单个JSON文件承载整张报告列表，启动时读一次，每次变更整体重写。
//! 尽力而为的本地持久化：无事务保证，无存储形态的迁移版本号。

use std::path::PathBuf;
use tokio::fs;

use crate::config::StoreConfig;
use crate::error::{AuditError, ProbeResult};
use crate::types::{AuditResult, MediaField};

/// 报告存储管理器
pub struct ReportStore {
    store_path: PathBuf,
}

impl ReportStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            store_path: config.store_path.clone(),
        }
    }

    /// 加载全部报告。文件缺失返回空列表；
    /// 持久化内容解析失败同样非致命，打警告后按空列表处理。
    pub async fn load_all(&self) -> Vec<AuditResult> {
        if !self.store_path.exists() {
            return Vec::new();
        }

        match fs::read_to_string(&self.store_path).await {
            Ok(content) => match serde_json::from_str::<Vec<AuditResult>>(&content) {
                Ok(records) => records,
                Err(e) => {
                    eprintln!("⚠️ 报告存档解析失败，按空档案处理: {}", e);
                    Vec::new()
                }
            },
            Err(e) => {
                eprintln!("⚠️ 报告存档读取失败，按空档案处理: {}", e);
                Vec::new()
            }
        }
    }

    /// 整体重写存档
    pub async fn save_all(&self, records: &[AuditResult]) -> ProbeResult<()> {
        if let Some(parent) = self.store_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(records)
            .map_err(|e| AuditError::Store(format!("serialize archive: {}", e)))?;
        fs::write(&self.store_path, content).await?;
        Ok(())
    }

    /// 追加一条新报告（最新的排在最前）
    pub async fn append(&self, record: AuditResult) -> ProbeResult<()> {
        let mut records = self.load_all().await;
        records.insert(0, record);
        self.save_all(&records).await
    }

    /// 按id删除整条报告；存在并删除了返回true
    pub async fn remove(&self, id: &str) -> ProbeResult<bool> {
        let mut records = self.load_all().await;
        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.save_all(&records).await?;
        Ok(true)
    }

    /// 按id查找单条报告
    pub async fn find(&self, id: &str) -> Option<AuditResult> {
        self.load_all()
            .await
            .into_iter()
            .find(|record| record.id == id)
    }

    /// 更新某条记录的媒体字段（读-改-写单条记录后整体持久化）。
    /// 记录不存在或字段已有值（先写者胜）时返回false，不落盘。
    pub async fn update_media_field(
        &self,
        id: &str,
        field: MediaField,
        value: String,
    ) -> ProbeResult<bool> {
        let mut records = self.load_all().await;
        let Some(record) = records.iter_mut().find(|record| record.id == id) else {
            return Ok(false);
        };
        if !record.set_media_url(field, value) {
            return Ok(false);
        }
        self.save_all(&records).await?;
        Ok(true)
    }
}
