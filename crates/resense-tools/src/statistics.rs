//! # 统计工具
//!
//! 录制或时间窗口内各通道的统计量（可选模块）
//!
//! 需要启用 `statistics` feature：
//! ```toml
//! resense-tools = { workspace = true, features = ["statistics"] }
//! ```

use crate::recording::{Direction, Sample, Variable};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// 单通道统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelStatistics {
    pub mean: f64,

    /// 总体标准差
    pub std_dev: f64,

    pub min: f64,

    pub max: f64,
}

impl ChannelStatistics {
    /// 计算统计量，空输入返回全 0
    pub fn calculate(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        Self {
            mean: Statistics::mean(values.iter()),
            std_dev: Statistics::population_std_dev(values.iter()),
            min: Statistics::min(values.iter()),
            max: Statistics::max(values.iter()),
        }
    }

    /// 峰峰值
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// 录制统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordingStatistics {
    /// 样本数量
    pub sample_count: usize,

    /// 时间跨度（微秒）
    pub duration_us: i64,

    /// Fx, Fy, Fz, Mx, My, Mz
    pub channels: [ChannelStatistics; 6],

    /// 最大合力（N）
    pub peak_force: f64,

    /// 最大合力矩（Nm）
    pub peak_torque: f64,
}

impl RecordingStatistics {
    /// 计算统计（可传入整个录制或 `Recording::window` 返回的切片）
    pub fn calculate(samples: &[Sample]) -> Self {
        let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
            return Self::default();
        };

        let mut channels = [ChannelStatistics::default(); 6];
        for (c, stats) in channels.iter_mut().enumerate() {
            let values: Vec<f64> = samples.iter().map(|s| s.channels()[c]).collect();
            *stats = ChannelStatistics::calculate(&values);
        }

        let peak = |variable: Variable| {
            samples.iter().map(|s| s.vector(variable).length()).fold(0.0, f64::max)
        };

        Self {
            sample_count: samples.len(),
            duration_us: last.time_offset.saturating_sub(first.time_offset),
            channels,
            peak_force: peak(Variable::Force),
            peak_torque: peak(Variable::Torque),
        }
    }

    /// 按物理量和方向取通道统计
    pub fn channel(&self, variable: Variable, direction: Direction) -> &ChannelStatistics {
        let base = match variable {
            Variable::Force => 0,
            Variable::Torque => 3,
        };
        let offset = match direction {
            Direction::X => 0,
            Direction::Y => 1,
            Direction::Z => 2,
        };
        &self.channels[base + offset]
    }
}
