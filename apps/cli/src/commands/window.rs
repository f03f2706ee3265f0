//! window 命令
//!
//! 按相对时间（秒）定位样本下标，可选导出窗口内的样本

use crate::utils::{load_recording, save_recording};
use anyhow::{Result, bail};
use clap::Args;
use resense_tools::{Recording, locate_window};
use std::path::PathBuf;

/// window 命令参数
#[derive(Args, Debug)]
pub struct WindowCommand {
    /// 录制文件
    pub input: PathBuf,

    /// 起始时间（秒，相对第一个样本）
    #[arg(short, long)]
    pub start: f64,

    /// 结束时间（秒，相对第一个样本）
    #[arg(short, long)]
    pub end: f64,

    /// 导出窗口内样本
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 输入格式（覆盖扩展名）
    #[arg(long)]
    pub from: Option<String>,

    /// 输出格式（覆盖扩展名）
    #[arg(long)]
    pub to: Option<String>,
}

impl WindowCommand {
    pub fn execute(&self) -> Result<()> {
        let recording = load_recording(&self.input, self.from.as_deref())?;

        let Some((start, end)) = locate_window(&recording, self.start, self.end) else {
            bail!(
                "Window {}s..{}s is outside the recording ({} samples)",
                self.start,
                self.end,
                recording.sample_count()
            );
        };

        let count = (end + 1).saturating_sub(start);
        println!("🔍 窗口 {}s ~ {}s: 样本 {}..={} ({} 个)", self.start, self.end, start, end, count);

        if let Some(output) = &self.output {
            if count == 0 {
                bail!("Window contains no samples, nothing to export");
            }

            let name = format!("{}-window", recording.name());
            let window = Recording::with_name(name, recording.samples()[start..=end].to_vec())?;
            save_recording(&window, output, self.to.as_deref())?;
            println!("✅ 已导出: {}", output.display());
        }

        Ok(())
    }
}
