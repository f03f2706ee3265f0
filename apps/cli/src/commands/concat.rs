//! concat 命令

use crate::utils::{load_recording, save_recording};
use anyhow::Result;
use clap::Args;
use resense_tools::concatenate;
use std::path::PathBuf;

/// concat 命令参数
#[derive(Args, Debug)]
pub struct ConcatCommand {
    /// 第一个录制
    pub first: PathBuf,

    /// 第二个录制（样本追加在第一个之后，不重新排序）
    pub second: PathBuf,

    /// 输出文件
    #[arg(short, long)]
    pub output: PathBuf,

    /// 输出录制名称
    #[arg(short, long)]
    pub name: Option<String>,

    /// 输出格式（覆盖扩展名）
    #[arg(long)]
    pub to: Option<String>,
}

impl ConcatCommand {
    pub fn execute(&self) -> Result<()> {
        let first = load_recording(&self.first, None)?;
        let second = load_recording(&self.second, None)?;

        let mut combined = concatenate(&first, &second);
        if let Some(name) = &self.name {
            combined.set_name(name.as_str());
        }

        save_recording(&combined, &self.output, self.to.as_deref())?;
        println!(
            "✅ {} + {} = {} 个样本 -> {}",
            first.sample_count(),
            second.sample_count(),
            combined.sample_count(),
            self.output.display()
        );
        Ok(())
    }
}
