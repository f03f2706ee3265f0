//! # 录制数据模型
//!
//! 力/力矩样本及其有序集合，所有编解码器和工具共用

use crate::error::{RecordingError, Result};
use crate::index::locate_window;
use serde::{Deserialize, Serialize};

/// 三维向量（力或力矩）
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// 力（N）
pub type Force = Vector3;

/// 力矩（Nm）
pub type Torque = Vector3;

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// 模长的平方
    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// 欧几里得模长
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// 按方向取分量
    pub fn component(&self, direction: Direction) -> f64 {
        match direction {
            Direction::X => self.x,
            Direction::Y => self.y,
            Direction::Z => self.z,
        }
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// 物理量选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variable {
    Force,
    Torque,
}

/// 坐标轴选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    X,
    Y,
    Z,
}

/// 时间单位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Seconds,
    Microseconds,
}

impl TimeUnit {
    /// 把微秒值换算为该单位
    pub fn from_micros(self, micros: i64) -> f64 {
        self.from_micros_f64(micros as f64)
    }

    fn from_micros_f64(self, micros: f64) -> f64 {
        match self {
            TimeUnit::Seconds => micros / 1_000_000.0,
            TimeUnit::Microseconds => micros,
        }
    }
}

/// `later - earlier`（微秒），在 i128 中计算，不会溢出
fn span_us(earlier: i64, later: i64) -> f64 {
    (i128::from(later) - i128::from(earlier)) as f64
}

/// 单个带时间戳的力/力矩样本
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// 时间戳（微秒，录制内单调）
    pub time_offset: i64,

    pub force: Force,

    pub torque: Torque,
}

impl Sample {
    pub fn new(time_offset: i64, force: Force, torque: Torque) -> Self {
        Self {
            time_offset,
            force,
            torque,
        }
    }

    /// 从标定后的 6 维向量创建（Fx, Fy, Fz, Mx, My, Mz）
    pub fn from_channels(time_offset: i64, channels: [f64; 6]) -> Self {
        Self::new(
            time_offset,
            Vector3::new(channels[0], channels[1], channels[2]),
            Vector3::new(channels[3], channels[4], channels[5]),
        )
    }

    /// 绝对时间戳
    pub fn time_stamp(&self, unit: TimeUnit) -> f64 {
        unit.from_micros(self.time_offset)
    }

    /// 相对参考时间戳的偏移
    pub fn time_offset_from(&self, first_time_offset: i64, unit: TimeUnit) -> f64 {
        unit.from_micros_f64(span_us(first_time_offset, self.time_offset))
    }

    /// 按物理量取向量
    pub fn vector(&self, variable: Variable) -> Vector3 {
        match variable {
            Variable::Force => self.force,
            Variable::Torque => self.torque,
        }
    }

    /// 6 个通道值，顺序与 CSV 列一致
    pub fn channels(&self) -> [f64; 6] {
        [
            self.force.x,
            self.force.y,
            self.force.z,
            self.torque.x,
            self.torque.y,
            self.torque.z,
        ]
    }
}

/// 录制：非空、按时间有序的样本序列
///
/// 构建后只读（重命名除外）。样本顺序由调用方负责，这里不重新排序。
#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    name: String,
    samples: Vec<Sample>,
    /// 构建时缓存的第一个样本时间戳，之后不再重新计算
    first_time_offset: i64,
}

impl Recording {
    /// 创建未命名录制
    ///
    /// 样本为空时返回 [`RecordingError::EmptyRecording`]。
    pub fn new(samples: Vec<Sample>) -> Result<Self> {
        Self::with_name(String::new(), samples)
    }

    /// 创建带名称的录制
    pub fn with_name(name: impl Into<String>, samples: Vec<Sample>) -> Result<Self> {
        let first_time_offset = samples.first().ok_or(RecordingError::EmptyRecording)?.time_offset;

        Ok(Self {
            name: name.into(),
            samples,
            first_time_offset,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// 获取样本数量（总是 >= 1）
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn first_time_offset(&self) -> i64 {
        self.first_time_offset
    }

    /// 时间跨度（微秒），超出 `i64` 范围时饱和
    pub fn duration_us(&self) -> i64 {
        self.last_time_offset().saturating_sub(self.first_time_offset)
    }

    /// 时间跨度
    pub fn duration(&self, unit: TimeUnit) -> f64 {
        unit.from_micros_f64(span_us(self.first_time_offset, self.last_time_offset()))
    }

    fn last_time_offset(&self) -> i64 {
        self.samples.last().map_or(self.first_time_offset, |s| s.time_offset)
    }

    /// 平均采样频率（Hz）= 样本数 / 时长（秒）
    ///
    /// # 前置条件
    ///
    /// 调用方需保证样本数 > 1 且时长非零；否则结果为 `inf` 或 `NaN`，
    /// 这里不做特殊处理。
    pub fn average_frequency(&self) -> f64 {
        self.samples.len() as f64 / self.duration(TimeUnit::Seconds)
    }

    /// 获取第 n 个样本，越界返回 `None`
    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// 获取样本切片 `[start, end)`，越界部分被截断
    pub fn samples_range(&self, start: usize, end: Option<usize>) -> &[Sample] {
        let end = end.unwrap_or(self.samples.len()).min(self.samples.len());
        let start = start.min(end);
        &self.samples[start..end]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }

    /// 所有样本的时间戳
    ///
    /// `relative` 为 true 时相对第一个样本，否则为绝对值。
    pub fn timestamps(&self, relative: bool, unit: TimeUnit) -> Vec<f64> {
        self.samples
            .iter()
            .map(|s| {
                if relative {
                    s.time_offset_from(self.first_time_offset, unit)
                } else {
                    s.time_stamp(unit)
                }
            })
            .collect()
    }

    /// 单通道数值序列
    pub fn values(&self, variable: Variable, direction: Direction) -> Vec<f64> {
        self.samples.iter().map(|s| s.vector(variable).component(direction)).collect()
    }

    /// 力或力矩的向量序列，每行 [x, y, z]
    pub fn vectors(&self, variable: Variable) -> Vec<[f64; 3]> {
        self.samples.iter().map(|s| s.vector(variable).to_array()).collect()
    }

    /// 按相对时间窗口（秒，闭区间）取样本
    ///
    /// 窗口不在录制范围内时返回 `None`；窗口内没有样本时返回空切片。
    pub fn window(&self, start_secs: f64, end_secs: f64) -> Option<&[Sample]> {
        let (start, end) = locate_window(self, start_secs, end_secs)?;
        self.samples.get(start..=end).or(Some(&[]))
    }
}

impl<'a> IntoIterator for &'a Recording {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// 拼接两个录制：先 `first` 的样本，后 `second` 的样本
///
/// 不重新排序也不校验拼接点的时间连续性，由调用方负责。结果未命名。
pub fn concatenate(first: &Recording, second: &Recording) -> Recording {
    let mut samples = Vec::with_capacity(first.samples.len() + second.samples.len());
    samples.extend_from_slice(&first.samples);
    samples.extend_from_slice(&second.samples);

    Recording {
        name: String::new(),
        first_time_offset: first.first_time_offset,
        samples,
    }
}
