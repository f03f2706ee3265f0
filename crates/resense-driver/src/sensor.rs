//! HEX 传感器实时采集
//!
//! 每次调用同步读取一帧、标定并打时间戳；背压和时序完全由传输层负责。
//!
//! # 使用示例
//!
//! ```rust
//! use resense_driver::{HexSensor, ReaderSource, SteppedClock};
//! use resense_protocol::RawFrame;
//! use std::io::Cursor;
//!
//! let bytes: Vec<u8> = (0..3).flat_map(|_| RawFrame::new([1.0; 6]).to_bytes()).collect();
//! let source = ReaderSource::new(Cursor::new(bytes));
//!
//! let mut sensor = HexSensor::with_clock(source, SteppedClock::from_sample_rate(1000));
//! let recording = sensor.record_samples(3).unwrap();
//! assert_eq!(recording.sample_count(), 3);
//! ```

use crate::clock::{Clock, MonotonicClock};
use crate::error::DriverError;
use crate::source::SampleSource;
use resense_tools::{CalibrationMatrix, Recording, Sample};
use tracing::{debug, warn};

/// 预分配样本缓冲的上限
const MAX_PREALLOCATED_SAMPLES: usize = 1 << 16;

/// HEX 六维力传感器
///
/// 独占持有数据源、时钟和标定矩阵。
pub struct HexSensor<S, C = MonotonicClock> {
    source: Option<S>,
    clock: C,
    calibration: CalibrationMatrix,
}

impl<S: SampleSource> HexSensor<S, MonotonicClock> {
    /// 使用单调时钟和单位标定矩阵创建
    pub fn new(source: S) -> Self {
        Self::with_clock(source, MonotonicClock::new())
    }
}

impl<S: SampleSource, C: Clock> HexSensor<S, C> {
    /// 使用指定时钟创建
    pub fn with_clock(source: S, clock: C) -> Self {
        Self {
            source: Some(source),
            clock,
            calibration: CalibrationMatrix::default(),
        }
    }

    /// 数据源是否仍然可用
    pub fn is_connected(&self) -> bool {
        self.source.is_some()
    }

    /// 断开并返回数据源；未连接时返回 `None`
    pub fn disconnect(&mut self) -> Option<S> {
        self.source.take()
    }

    /// 设置标定矩阵
    ///
    /// 默认是单位矩阵，此时要求电子接口直接输出 F/T 值（DIP 开关 6 置为 ON）。
    pub fn set_calibration_matrix(&mut self, matrix: CalibrationMatrix) {
        self.calibration = matrix;
    }

    pub fn calibration_matrix(&self) -> &CalibrationMatrix {
        &self.calibration
    }

    /// 读取一个样本（阻塞直到收到一帧）
    pub fn record_sample(&mut self) -> Result<Sample, DriverError> {
        let source = self.source.as_mut().ok_or(DriverError::Disconnected)?;
        let frame = source.read_frame()?;
        let time_offset = self.clock.now_us();

        let calibrated = self.calibration.process(frame.channels());
        Ok(Sample::from_channels(time_offset, calibrated))
    }

    /// 连续读取 `num_samples` 个样本
    ///
    /// 遇到数据源错误（含 EOF）时提前结束，返回已读取的部分；
    /// 一个样本都没有读到时返回 `None`。
    pub fn record_samples(&mut self, num_samples: usize) -> Option<Recording> {
        let mut samples = Vec::with_capacity(num_samples.min(MAX_PREALLOCATED_SAMPLES));
        for _ in 0..num_samples {
            match self.record_sample() {
                Ok(sample) => samples.push(sample),
                Err(e) => {
                    warn!(
                        "Capture stopped after {}/{} samples: {}",
                        samples.len(),
                        num_samples,
                        e
                    );
                    break;
                },
            }
        }

        debug!("Captured {} samples", samples.len());
        Recording::new(samples).ok()
    }

    /// 按时长读取：样本数 = `floor(sample_rate * duration)`
    ///
    /// `sample_rate` 必须与电子接口配置的采样率一致。
    pub fn record_duration(&mut self, duration_secs: f64, sample_rate: u32) -> Option<Recording> {
        let num_samples = (f64::from(sample_rate) * duration_secs).max(0.0) as usize;
        self.record_samples(num_samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SteppedClock;
    use crate::source::MockSource;
    use resense_protocol::RawFrame;
    use resense_tools::Vector3;

    fn sensor_with(frames: usize) -> HexSensor<MockSource, SteppedClock> {
        let source = MockSource::new((0..frames).map(|i| {
            let v = i as f32;
            RawFrame::new([v, v, v, 1.0, 2.0, 3.0])
        }));
        HexSensor::with_clock(source, SteppedClock::new(5_000, 1_000))
    }

    #[test]
    fn test_identity_passthrough() {
        let mut sensor = sensor_with(2);
        sensor.record_sample().unwrap();
        let sample = sensor.record_sample().unwrap();

        assert_eq!(sample.time_offset, 6_000);
        assert_eq!(sample.force, Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(sample.torque, Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_calibration_applied() {
        let mut sensor = sensor_with(1);
        let mut rows = [[0.0; 6]; 6];
        for (i, row) in rows.iter_mut().enumerate() {
            row[i] = 10.0;
        }
        sensor.set_calibration_matrix(CalibrationMatrix::from_rows(rows));

        let sample = sensor.record_sample().unwrap();
        assert_eq!(sample.torque, Vector3::new(10.0, 20.0, 30.0));
    }

    #[test]
    fn test_record_samples_uniform_timestamps() {
        let mut sensor = sensor_with(10);
        let recording = sensor.record_samples(10).unwrap();

        assert_eq!(recording.sample_count(), 10);
        assert_eq!(recording.first_time_offset(), 5_000);
        assert_eq!(recording.duration_us(), 9_000);
    }

    #[test]
    fn test_record_samples_stops_early() {
        let mut sensor = sensor_with(3);
        let recording = sensor.record_samples(10).unwrap();
        assert_eq!(recording.sample_count(), 3);

        // 数据源已耗尽
        assert!(sensor.record_samples(5).is_none());
    }

    #[test]
    fn test_record_duration() {
        let mut sensor = sensor_with(100);
        let recording = sensor.record_duration(0.05, 1000).unwrap();
        assert_eq!(recording.sample_count(), 50);
    }

    #[test]
    fn test_disconnected() {
        let mut sensor = sensor_with(3);
        assert!(sensor.is_connected());
        let source = sensor.disconnect().unwrap();
        assert_eq!(source.remaining(), 3);

        assert!(!sensor.is_connected());
        assert!(matches!(sensor.record_sample(), Err(DriverError::Disconnected)));
        assert!(sensor.record_samples(2).is_none());
    }
}
