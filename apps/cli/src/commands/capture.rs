//! capture 命令
//!
//! 把电子接口的原始帧转储（每帧 28 字节）回放为标定后的录制。
//! 时间戳按采样率均匀生成。

use crate::commands::config::CliConfig;
use crate::utils::save_recording;
use anyhow::{Context, Result, bail};
use clap::Args;
use resense_driver::{HexSensor, ReaderSource, SteppedClock};
use resense_tools::CalibrationMatrix;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::info;

/// capture 命令参数
#[derive(Args, Debug)]
pub struct CaptureCommand {
    /// 原始帧转储文件
    pub input: PathBuf,

    /// 输出文件
    #[arg(short, long)]
    pub output: PathBuf,

    /// 采集样本数
    #[arg(short = 'n', long, conflicts_with = "duration")]
    pub samples: Option<usize>,

    /// 采集时长（秒）
    #[arg(short, long)]
    pub duration: Option<f64>,

    /// 电子接口采样率（Hz）
    #[arg(short, long, default_value_t = 1000)]
    pub rate: u32,

    /// 标定矩阵文件（覆盖配置）
    #[arg(short, long)]
    pub calibration: Option<PathBuf>,

    /// 录制名称
    #[arg(long)]
    pub name: Option<String>,

    /// 输出格式（覆盖扩展名）
    #[arg(long)]
    pub to: Option<String>,
}

impl CaptureCommand {
    pub fn execute(&self) -> Result<()> {
        if self.rate == 0 {
            bail!("Sample rate must be positive");
        }

        let calibration_path = match &self.calibration {
            Some(path) => Some(path.clone()),
            None => CliConfig::load()?.calibration,
        };

        let file = File::open(&self.input)
            .with_context(|| format!("Failed to open raw dump: {}", self.input.display()))?;
        let source = ReaderSource::new(BufReader::new(file));
        let mut sensor = HexSensor::with_clock(source, SteppedClock::from_sample_rate(self.rate));

        if let Some(path) = &calibration_path {
            let matrix = CalibrationMatrix::from_file(path)
                .with_context(|| format!("Failed to load calibration matrix: {}", path.display()))?;
            sensor.set_calibration_matrix(matrix);
            info!("Using calibration matrix {}", path.display());
        }

        let recording = match (self.samples, self.duration) {
            (Some(n), _) => sensor.record_samples(n),
            (None, Some(secs)) => sensor.record_duration(secs, self.rate),
            (None, None) => sensor.record_samples(usize::MAX),
        };
        let Some(mut recording) = recording else {
            bail!("No samples captured from {}", self.input.display());
        };

        if let Some(name) = &self.name {
            recording.set_name(name.as_str());
        }

        save_recording(&recording, &self.output, self.to.as_deref())?;
        println!(
            "✅ 采集 {} 个样本 -> {}",
            recording.sample_count(),
            self.output.display()
        );
        Ok(())
    }
}
