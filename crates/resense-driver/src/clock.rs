//! 时间戳时钟
//!
//! 样本时间戳由单调微秒时钟提供，与墙上时间无关。

use std::time::Instant;

/// 单调微秒时钟
pub trait Clock {
    /// 当前时间（微秒），必须单调不减
    fn now_us(&mut self) -> i64;
}

/// 基于 `Instant` 的单调时钟，时间从创建时刻开始计数
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_us(&mut self) -> i64 {
        i64::try_from(self.origin.elapsed().as_micros()).unwrap_or(i64::MAX)
    }
}

/// 固定步长时钟：每次调用前进 `step_us`
///
/// 用于回放和测试，生成严格均匀的时间戳。
#[derive(Debug, Clone, Copy)]
pub struct SteppedClock {
    next_us: i64,
    step_us: i64,
}

impl SteppedClock {
    pub fn new(start_us: i64, step_us: i64) -> Self {
        Self {
            next_us: start_us,
            step_us,
        }
    }

    /// 按采样率创建（从 0 开始）
    pub fn from_sample_rate(sample_rate_hz: u32) -> Self {
        Self::new(0, 1_000_000 / i64::from(sample_rate_hz.max(1)))
    }
}

impl Clock for SteppedClock {
    fn now_us(&mut self) -> i64 {
        let now = self.next_us;
        self.next_us += self.step_us;
        now
    }
}
