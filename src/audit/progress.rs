//! 探测过程的控制台进度提示
//!
//! 文本生成调用可能持续数十秒且没有中间产出，这里用固定间隔滚动
//! 输出阶段性状态行，调用解析后立即停止。纯展示用途，不影响流程。

use std::time::Duration;
use tokio::task::JoinHandle;

/// 滚动展示的阶段性状态行
const LOADING_STEPS: [&str; 7] = [
    "Establishing high-speed link...",
    "Injecting forensic crawlers...",
    "Parsing target metadata...",
    "Querying global sentiment indexes...",
    "Analyzing SWOT vectors...",
    "Building tactical battlecard...",
    "Synthesizing high-fidelity visuals...",
];

const TICK_INTERVAL: Duration = Duration::from_millis(2500);

/// 进度滚动器句柄；`stop`或drop时终止后台任务
pub struct ProgressTicker {
    handle: JoinHandle<()>,
}

impl ProgressTicker {
    pub fn spawn() -> Self {
        let handle = tokio::spawn(async {
            let mut interval = tokio::time::interval(TICK_INTERVAL);
            // 第一个tick立即触发，跳过它让首行延后一个周期
            interval.tick().await;
            let mut step = 0usize;
            loop {
                interval.tick().await;
                println!("   ➜ {}", LOADING_STEPS[step % LOADING_STEPS.len()]);
                step += 1;
            }
        });
        Self { handle }
    }

    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
