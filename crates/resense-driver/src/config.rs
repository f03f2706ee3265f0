//! 传感器配置

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 电子接口默认波特率
pub const DEFAULT_BAUD_RATE: u32 = 2_000_000;

/// 传感器配置
///
/// 采样率必须与电子接口 DIP 开关设置一致（见传感器手册）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// 串口名（如 `/dev/ttyUSB0`、`COM3`）
    pub port: String,

    /// 波特率
    pub baud_rate: u32,

    /// 电子接口采样率（Hz）
    pub sample_rate: u32,

    /// 标定矩阵文件；`None` 表示单位矩阵（电子接口直接输出 F/T 值）
    pub calibration: Option<PathBuf>,

    /// 串口读超时（毫秒）
    pub read_timeout_ms: u64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            port: String::new(),
            baud_rate: DEFAULT_BAUD_RATE,
            sample_rate: 1000,
            calibration: None,
            read_timeout_ms: 1000,
        }
    }
}

impl SensorConfig {
    /// 给定时长（秒）对应的样本数：`floor(sample_rate * duration)`
    pub fn samples_for_duration(&self, duration_secs: f64) -> usize {
        (f64::from(self.sample_rate) * duration_secs).max(0.0) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SensorConfig::default();
        assert_eq!(config.baud_rate, 2_000_000);
        assert!(config.calibration.is_none());
    }

    #[test]
    fn test_samples_for_duration() {
        let config = SensorConfig {
            sample_rate: 500,
            ..Default::default()
        };
        assert_eq!(config.samples_for_duration(2.5), 1250);
        assert_eq!(config.samples_for_duration(-1.0), 0);
    }

    #[test]
    fn test_partial_toml() {
        let config: SensorConfig = toml::from_str(
            r#"
port = "/dev/ttyUSB0"
calibration = "/etc/resense/hex21.csv"
"#,
        )
        .unwrap();
        assert_eq!(config.port, "/dev/ttyUSB0");
        assert_eq!(config.baud_rate, DEFAULT_BAUD_RATE);
        assert_eq!(config.calibration, Some(PathBuf::from("/etc/resense/hex21.csv")));
    }
}
