//! 驱动层模块
//!
//! 本模块提供 HEX 六维力传感器的实时采集功能，包括：
//! - 原始帧数据源（任意字节流 / 串口 / 模拟）
//! - 单调微秒时钟
//! - 标定与打时间戳，产出 [`Recording`](resense_tools::Recording)
//!
//! # 使用场景
//!
//! 采集是同步的：每次 `record_sample` 阻塞直到收到一帧。
//! 已有的录制文件请直接使用 `resense-tools`。

pub mod clock;
pub mod config;
mod error;
mod sensor;
#[cfg(feature = "serial")]
pub mod serial;
pub mod source;

pub use clock::{Clock, MonotonicClock, SteppedClock};
pub use config::{DEFAULT_BAUD_RATE, SensorConfig};
pub use error::DriverError;
pub use sensor::HexSensor;
#[cfg(any(test, feature = "mock"))]
pub use source::MockSource;
pub use source::{ReaderSource, SampleSource};

#[cfg(feature = "serial")]
use resense_tools::CalibrationMatrix;

/// 按配置打开串口并加载标定矩阵（需要 `serial` feature）
#[cfg(feature = "serial")]
pub fn connect(config: &SensorConfig) -> Result<HexSensor<serial::SerialSource>, DriverError> {
    let source = serial::open(config)?;
    let mut sensor = HexSensor::new(source);
    if let Some(path) = &config.calibration {
        sensor.set_calibration_matrix(CalibrationMatrix::from_file(path)?);
    }
    Ok(sensor)
}
