//! 驱动层错误类型定义

use resense_protocol::ProtocolError;
use resense_tools::RecordingError;
use thiserror::Error;

/// 驱动层错误类型
#[derive(Error, Debug)]
pub enum DriverError {
    /// 传输层 IO 错误
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    /// 原始帧解析错误
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// 录制构建或标定加载错误
    #[error("Recording error: {0}")]
    Recording(#[from] RecordingError),

    /// 串口打开失败
    #[cfg(feature = "serial")]
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// 传感器未连接（或已断开）
    #[error("Sensor not connected")]
    Disconnected,

    /// 数据源已结束
    #[error("End of stream")]
    EndOfStream,
}

#[cfg(test)]
mod tests {
    use super::DriverError;
    use resense_protocol::ProtocolError;
    use resense_tools::RecordingError;

    #[test]
    fn test_driver_error_display() {
        let err = DriverError::Protocol(ProtocolError::InvalidLength {
            expected: 24,
            actual: 3,
        });
        assert!(format!("{}", err).contains("Invalid frame length"));

        let err: DriverError = RecordingError::EmptyRecording.into();
        assert!(format!("{}", err).contains("at least one sample"));

        assert_eq!(format!("{}", DriverError::Disconnected), "Sensor not connected");
        assert_eq!(format!("{}", DriverError::EndOfStream), "End of stream");
    }
}
