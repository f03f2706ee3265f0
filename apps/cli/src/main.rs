//! # Resense CLI
//!
//! Command-line interface for HEX force/torque sensor recordings.
//!
//! ## 常用命令
//!
//! ```bash
//! # 查看录制概况
//! resense-cli info press.csv
//!
//! # 格式转换（FTE 二进制 ↔ CSV）
//! resense-cli convert press.bin press.csv
//!
//! # 截取 1.0s ~ 2.5s 的样本
//! resense-cli window press.csv --start 1.0 --end 2.5 --output press-cut.csv
//!
//! # 回放原始帧转储并标定
//! resense-cli capture dump.raw --output press.bin --duration 2.0 --calibration hex21.csv
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod utils;

use commands::{
    CaptureCommand, ConcatCommand, ConfigCommand, ConvertCommand, InfoCommand, SetCommand,
    StatsCommand, WindowCommand,
};

/// Resense CLI - HEX 力/力矩录制工具
#[derive(Parser, Debug)]
#[command(name = "resense-cli")]
#[command(about = "Command-line interface for HEX force/torque sensor recordings", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 配置管理
    #[command(subcommand)]
    Config(ConfigCommand),

    /// 显示录制概况
    Info {
        #[command(flatten)]
        args: InfoCommand,
    },

    /// 格式转换
    Convert {
        #[command(flatten)]
        args: ConvertCommand,
    },

    /// 按时间窗口截取样本
    Window {
        #[command(flatten)]
        args: WindowCommand,
    },

    /// 拼接两个录制
    Concat {
        #[command(flatten)]
        args: ConcatCommand,
    },

    /// 录制集合（目录）管理
    #[command(subcommand)]
    Set(SetCommand),

    /// 通道统计
    Stats {
        #[command(flatten)]
        args: StatsCommand,
    },

    /// 从原始帧转储采集
    Capture {
        #[command(flatten)]
        args: CaptureCommand,
    },
}

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("resense_cli=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Config(cmd) => cmd.execute(),
        Commands::Info { args } => args.execute(),
        Commands::Convert { args } => args.execute(),
        Commands::Window { args } => args.execute(),
        Commands::Concat { args } => args.execute(),
        Commands::Set(cmd) => cmd.execute(),
        Commands::Stats { args } => args.execute(),
        Commands::Capture { args } => args.execute(),
    }
}
