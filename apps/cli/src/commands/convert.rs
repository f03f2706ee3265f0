//! convert 命令
//!
//! 在 CSV / FTE 二进制 / JSON / 归档格式之间转换

use crate::utils::{load_recording, save_recording};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// convert 命令参数
#[derive(Args, Debug)]
pub struct ConvertCommand {
    /// 输入文件
    pub input: PathBuf,

    /// 输出文件
    pub output: PathBuf,

    /// 输入格式（覆盖扩展名）
    #[arg(long)]
    pub from: Option<String>,

    /// 输出格式（覆盖扩展名）
    #[arg(long)]
    pub to: Option<String>,
}

impl ConvertCommand {
    pub fn execute(&self) -> Result<()> {
        let recording = load_recording(&self.input, self.from.as_deref())?;
        save_recording(&recording, &self.output, self.to.as_deref())?;

        println!(
            "✅ {} -> {} ({} 个样本)",
            self.input.display(),
            self.output.display(),
            recording.sample_count()
        );
        Ok(())
    }
}
