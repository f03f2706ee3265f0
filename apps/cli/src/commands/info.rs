//! info 命令
//!
//! 显示录制的样本数、时长和平均采样频率

use crate::utils::{format_secs, load_recording};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// info 命令参数
#[derive(Args, Debug)]
pub struct InfoCommand {
    /// 录制文件
    pub input: PathBuf,

    /// 输入格式（覆盖扩展名）
    #[arg(long)]
    pub from: Option<String>,
}

impl InfoCommand {
    pub fn execute(&self) -> Result<()> {
        let recording = load_recording(&self.input, self.from.as_deref())?;

        println!("📁 文件: {}", self.input.display());
        println!("   名称: {}", recording.name());
        println!("   样本数: {}", recording.sample_count());
        println!("   起始时间戳: {} µs", recording.first_time_offset());
        println!("   时长: {}", format_secs(recording.duration_us()));

        // 单个样本时频率无意义
        if recording.sample_count() > 1 && recording.duration_us() > 0 {
            println!("   平均频率: {:.3} Hz", recording.average_frequency());
        } else {
            println!("   平均频率: N/A");
        }

        Ok(())
    }
}
