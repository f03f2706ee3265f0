//! # 时间索引
//!
//! 把相对时间窗口（秒）转换为样本下标区间。
//!
//! 录制通常以近似恒定的频率采样，因此先用平均频率估算下标，
//! 再在估算点附近线性修正。典型步数取决于局部抖动，而非样本总数；
//! 抖动极端时退化为 O(n)。

use crate::recording::{Recording, Sample};

/// 查找时间窗口 `[start_secs, end_secs]` 的样本下标区间
///
/// 时间相对于录制的第一个样本（`first_time_offset`）。
///
/// # 返回
///
/// - `Some((start, end))`：`start` 为第一个时间戳 >= 起始时间的样本，
///   `end` 为最后一个时间戳 <= 结束时间的样本（均为闭区间下标）。
///   窗口内没有样本时 `start > end`
/// - `None`：估算下标或修正过程越过录制边界，即窗口不在录制范围内
///
/// 平均频率的前置条件见 [`Recording::average_frequency`]：
/// 单样本录制的频率为无穷大，估算结果无效，总是返回 `None`。
///
/// # 示例
///
/// ```rust
/// use resense_tools::{locate_window, Recording, Sample, Vector3};
///
/// let samples = (0..1000)
///     .map(|i| Sample::new(i * 1000, Vector3::default(), Vector3::default()))
///     .collect();
/// let recording = Recording::new(samples).unwrap();
///
/// assert_eq!(locate_window(&recording, 0.0, 0.5), Some((0, 500)));
/// assert_eq!(locate_window(&recording, 2.0, 3.0), None);
/// ```
pub fn locate_window(recording: &Recording, start_secs: f64, end_secs: f64) -> Option<(usize, usize)> {
    let samples = recording.samples();
    let count = samples.len();
    if count == 0 {
        return None;
    }

    // 转换为绝对微秒时间戳，便于直接比较
    let origin = recording.first_time_offset() as f64;
    let start_target = start_secs * 1_000_000.0 + origin;
    let end_target = end_secs * 1_000_000.0 + origin;

    let frequency = recording.average_frequency();

    let start = estimate_index(start_secs, frequency, count)?;
    let start = seek_first_at_or_after(samples, start, start_target)?;

    let end = estimate_index(end_secs, frequency, count)?;
    let end = seek_last_at_or_before(samples, end, end_target)?;

    Some((start, end))
}

/// 估算下标：`floor(secs * frequency)`，不在 `[0, count)` 内返回 `None`
fn estimate_index(secs: f64, frequency: f64, count: usize) -> Option<usize> {
    let estimate = (secs * frequency).floor();
    if !estimate.is_finite() || estimate < 0.0 || estimate >= count as f64 {
        return None;
    }
    Some(estimate as usize)
}

#[inline]
fn timestamp(samples: &[Sample], index: usize) -> f64 {
    samples[index].time_offset as f64
}

/// 起始边界：先回退越过目标的部分，再前进到第一个 >= 目标的样本
fn seek_first_at_or_after(samples: &[Sample], mut index: usize, target: f64) -> Option<usize> {
    while timestamp(samples, index) > target {
        index = index.checked_sub(1)?;
    }
    while timestamp(samples, index) < target {
        index += 1;
        if index >= samples.len() {
            return None;
        }
    }
    Some(index)
}

/// 结束边界：先前进补足不足的部分，再回退到最后一个 <= 目标的样本
fn seek_last_at_or_before(samples: &[Sample], mut index: usize, target: f64) -> Option<usize> {
    while timestamp(samples, index) < target {
        index += 1;
        if index >= samples.len() {
            return None;
        }
    }
    while timestamp(samples, index) > target {
        index = index.checked_sub(1)?;
    }
    Some(index)
}
