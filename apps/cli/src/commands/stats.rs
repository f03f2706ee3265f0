//! stats 命令
//!
//! 各通道统计（整个录制或一个时间窗口）

use crate::utils::{format_secs, load_recording};
use anyhow::{Context, Result, bail};
use clap::Args;
use resense_tools::{Direction, RecordingStatistics, Variable, locate_window};
use std::path::PathBuf;

/// stats 命令参数
#[derive(Args, Debug)]
pub struct StatsCommand {
    /// 录制文件
    pub input: PathBuf,

    /// 窗口起始时间（秒），需与 `--end` 同时给出
    #[arg(short, long, requires = "end")]
    pub start: Option<f64>,

    /// 窗口结束时间（秒）
    #[arg(short, long, requires = "start")]
    pub end: Option<f64>,

    /// 以 JSON 输出
    #[arg(long)]
    pub json: bool,

    /// 输入格式（覆盖扩展名）
    #[arg(long)]
    pub from: Option<String>,
}

impl StatsCommand {
    pub fn execute(&self) -> Result<()> {
        let recording = load_recording(&self.input, self.from.as_deref())?;

        let samples = match (self.start, self.end) {
            (Some(start), Some(end)) => {
                let Some((first, last)) = locate_window(&recording, start, end) else {
                    bail!("Window {}s..{}s is outside the recording", start, end);
                };
                recording.samples().get(first..=last).unwrap_or(&[])
            },
            _ => recording.samples(),
        };

        let stats = RecordingStatistics::calculate(samples);

        if self.json {
            let text = serde_json::to_string_pretty(&stats).context("Failed to serialize statistics")?;
            println!("{}", text);
            return Ok(());
        }

        println!("📊 {} 个样本, {}", stats.sample_count, format_secs(stats.duration_us));
        println!("   {:<4} {:>12} {:>12} {:>12} {:>12}", "", "mean", "std", "min", "max");
        for variable in [Variable::Force, Variable::Torque] {
            for direction in [Direction::X, Direction::Y, Direction::Z] {
                let channel = stats.channel(variable, direction);
                println!(
                    "   {:<4} {:>12.4} {:>12.4} {:>12.4} {:>12.4}",
                    channel_label(variable, direction),
                    channel.mean,
                    channel.std_dev,
                    channel.min,
                    channel.max
                );
            }
        }
        println!("   峰值合力: {:.4} N", stats.peak_force);
        println!("   峰值合力矩: {:.4} Nm", stats.peak_torque);

        Ok(())
    }
}

fn channel_label(variable: Variable, direction: Direction) -> &'static str {
    match (variable, direction) {
        (Variable::Force, Direction::X) => "Fx",
        (Variable::Force, Direction::Y) => "Fy",
        (Variable::Force, Direction::Z) => "Fz",
        (Variable::Torque, Direction::X) => "Mx",
        (Variable::Torque, Direction::Y) => "My",
        (Variable::Torque, Direction::Z) => "Mz",
    }
}
