//! 媒体生成的在途标记
//!
//! 同一条记录的同一媒体字段在请求未返回期间再次触发会被拒绝，
//! 与记录上先写者胜的媒体字段共同保证每字段至多成功生成一次。
//!
//! 标记表只在进程内生效：标记存活于`ProbeContext`，库调用方需在
//! 进程生命周期内共享同一个上下文才能得到去重。跨进程的并发触发
//! 不经过这里，由存储写入路径上的先写者胜兜底。

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::types::MediaField;

/// 按（记录id，媒体字段）粒度的在途标记表
#[derive(Clone, Default)]
pub struct InflightRegistry {
    entries: Arc<Mutex<HashSet<(String, MediaField)>>>,
}

impl InflightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 申请在途标记。已有同键请求在途时返回None；
    /// 成功返回的守卫在drop时（无论完成还是失败）清除标记。
    pub fn try_begin(&self, record_id: &str, field: MediaField) -> Option<InflightGuard> {
        let key = (record_id.to_string(), field);
        let mut entries = self.entries.lock().expect("inflight lock poisoned");
        if !entries.insert(key.clone()) {
            return None;
        }
        Some(InflightGuard {
            registry: self.clone(),
            key,
        })
    }

    pub fn is_inflight(&self, record_id: &str, field: MediaField) -> bool {
        let entries = self.entries.lock().expect("inflight lock poisoned");
        entries.contains(&(record_id.to_string(), field))
    }

    fn clear(&self, key: &(String, MediaField)) {
        let mut entries = self.entries.lock().expect("inflight lock poisoned");
        entries.remove(key);
    }
}

/// 在途标记守卫
pub struct InflightGuard {
    registry: InflightRegistry,
    key: (String, MediaField),
}

impl Drop for InflightGuard {
    fn drop(&mut self) {
        self.registry.clear(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_trigger_refused_while_inflight() {
        let registry = InflightRegistry::new();

        let guard = registry.try_begin("r1", MediaField::Video);
        assert!(guard.is_some());
        assert!(registry.is_inflight("r1", MediaField::Video));
        // 同记录同字段的并发触发被拒绝
        assert!(registry.try_begin("r1", MediaField::Video).is_none());
        // 不同字段、不同记录互不影响
        assert!(registry.try_begin("r1", MediaField::Audio).is_some());
        assert!(registry.try_begin("r2", MediaField::Video).is_some());
    }

    #[test]
    fn test_guard_drop_clears_marker() {
        let registry = InflightRegistry::new();
        {
            let _guard = registry.try_begin("r1", MediaField::Visual).unwrap();
            assert!(registry.is_inflight("r1", MediaField::Visual));
        }
        assert!(!registry.is_inflight("r1", MediaField::Visual));
        assert!(registry.try_begin("r1", MediaField::Visual).is_some());
    }
}
