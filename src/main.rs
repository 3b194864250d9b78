use crate::workflow::launch;
use anyhow::Result;
use clap::Parser;

mod audit;
mod cli;
mod config;
mod error;
mod llm;
mod media;
mod store;
mod types;
mod viewer;
mod workflow;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    let Some(command) = args.command() else {
        eprintln!("⚠️ 未指定操作。给一个目标域名发起审计，或使用 --list / --export / --video 等操作，--help 查看完整用法");
        std::process::exit(2);
    };
    let config = args.into_config();

    launch(&config, command).await
}
