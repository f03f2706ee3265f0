//! 串口传输（需要 `serial` feature）

use crate::config::SensorConfig;
use crate::error::DriverError;
use crate::source::ReaderSource;
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use std::time::Duration;
use tracing::info;

/// 串口数据源
pub type SerialSource = ReaderSource<Box<dyn SerialPort>>;

/// 按配置打开串口（8N1，无流控）
pub fn open(config: &SensorConfig) -> Result<SerialSource, DriverError> {
    let port = serialport::new(&config.port, config.baud_rate)
        .data_bits(DataBits::Eight)
        .parity(Parity::None)
        .stop_bits(StopBits::One)
        .flow_control(FlowControl::None)
        .timeout(Duration::from_millis(config.read_timeout_ms))
        .open()?;

    info!("Opened serial port: {} at {} baud", config.port, config.baud_rate);

    Ok(ReaderSource::new(port))
}
