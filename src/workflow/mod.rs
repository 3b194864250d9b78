//! 探测工作流 - 把CLI操作映射到编排器与存储的组合
//!
//! 每次进程运行执行恰好一个操作：发起审计、查看或删除存档、导出报告，
//! 或为既有记录增补一种媒体简报。

use anyhow::{Context, Result, bail};
use std::path::PathBuf;

use crate::cli::ProbeCommand;
use crate::config::Config;
use crate::media::video::CancellationToken;
use crate::store::ReportStore;
use crate::types::{AuditResult, MediaField};
use crate::viewer::render_report;

pub mod context;

use context::ProbeContext;

/// 启动探测工作流
pub async fn launch(config: &Config, command: ProbeCommand) -> Result<()> {
    let store = ReportStore::new(&config.store);

    match command {
        ProbeCommand::Audit { domain } => {
            let probe_context = ProbeContext::new(config.clone())?;
            let record = crate::audit::run_audit(&probe_context, &domain).await?;

            let report_path = export_report(config, &record).await?;
            store.append(record.clone()).await?;

            println!("📦 记录已入档: {}", record.id);
            println!("📄 报告已导出: {}", report_path.display());
        }
        ProbeCommand::List => {
            let records = store.load_all().await;
            if records.is_empty() {
                println!("📭 存档为空，先对一个域名发起审计吧");
                return Ok(());
            }
            println!("📚 存档共 {} 条记录（新在前）:\n", records.len());
            for record in &records {
                println!(
                    "  {}  {}  {}  [{}]",
                    record.id, record.timestamp, record.domain, record.core.company_name
                );
            }
        }
        ProbeCommand::Remove { id } => {
            if store.remove(&id).await? {
                println!("🗑️ 已删除记录: {}", id);
            } else {
                bail!("record not found: {}", id);
            }
        }
        ProbeCommand::Export { id } => {
            let record = find_record(&store, &id).await?;
            let report_path = export_report(config, &record).await?;
            println!("📄 报告已导出: {}", report_path.display());
        }
        ProbeCommand::EnrichVideo { id } => {
            enrich_video(config, &store, &id).await?;
        }
        ProbeCommand::EnrichAudio { id } => {
            enrich_audio(config, &store, &id).await?;
        }
    }

    Ok(())
}

async fn find_record(store: &ReportStore, id: &str) -> Result<AuditResult> {
    store
        .find(id)
        .await
        .with_context(|| format!("record not found: {}", id))
}

/// 把记录渲染为markdown并写入报告目录
async fn export_report(config: &Config, record: &AuditResult) -> Result<PathBuf> {
    let reports_dir = &config.store.reports_dir;
    tokio::fs::create_dir_all(reports_dir)
        .await
        .with_context(|| format!("创建报告目录失败: {:?}", reports_dir))?;

    let report_path = reports_dir.join(format!("{}-{}.md", record.domain, record.id));
    let content = render_report(record);
    tokio::fs::write(&report_path, content)
        .await
        .with_context(|| format!("写入报告失败: {:?}", report_path))?;

    Ok(report_path)
}

async fn enrich_video(config: &Config, store: &ReportStore, id: &str) -> Result<()> {
    let record = find_record(store, id).await?;
    if record.video_url.is_some() {
        println!("⏭️ 该记录已有视频简报，跳过");
        return Ok(());
    }

    let probe_context = ProbeContext::new(config.clone())?;
    // 在途去重只覆盖同一上下文内的触发；跨进程由存储的先写者胜兜底
    let _guard = probe_context
        .inflight
        .try_begin(&record.id, MediaField::Video)
        .context("a video briefing for this record is already in flight")?;

    tokio::fs::create_dir_all(&config.media.assets_dir)
        .await
        .with_context(|| format!("创建媒体目录失败: {:?}", config.media.assets_dir))?;

    // Ctrl+C只取消本地轮询，后端已提交的任务不撤销
    let token = CancellationToken::new();
    let ctrl_c_token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\n🛑 收到中断信号，停止轮询");
            ctrl_c_token.cancel();
        }
    });

    let source_text = format!("{}. {}", record.core.company_name, record.core.summary);
    let path = crate::media::video::run_video_briefing(&probe_context, &source_text, &token).await?;

    let stored = store
        .update_media_field(&record.id, MediaField::Video, path.display().to_string())
        .await?;
    if !stored {
        println!("⏭️ 记录已被并发写入视频字段，本次产物未入档");
    }
    Ok(())
}

async fn enrich_audio(config: &Config, store: &ReportStore, id: &str) -> Result<()> {
    let record = find_record(store, id).await?;
    if record.audio_url.is_some() {
        println!("⏭️ 该记录已有语音简报，跳过");
        return Ok(());
    }

    let probe_context = ProbeContext::new(config.clone())?;
    let _guard = probe_context
        .inflight
        .try_begin(&record.id, MediaField::Audio)
        .context("an audio briefing for this record is already in flight")?;

    println!("🎙️ 正在合成语音简报...");
    let data_uri = crate::media::generate_audio_briefing(
        &probe_context,
        &record.core.company_name,
        &record.core.summary,
    )
    .await?;

    let stored = store
        .update_media_field(&record.id, MediaField::Audio, data_uri)
        .await?;
    if stored {
        println!("✅ 语音简报已入档: {}", record.id);
    } else {
        println!("⏭️ 记录已被并发写入语音字段，本次产物未入档");
    }
    Ok(())
}
