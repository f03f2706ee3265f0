//! # Resense Tools - 录制数据结构和算法
//!
//! **依赖原则**: 只依赖 `resense-protocol`，不依赖任何传输层
//!
//! ## 包含模块
//!
//! - `recording` - 样本和录制（纯数据结构）
//! - `set` - 录制集合及目录持久化
//! - `codec` - CSV / FTE 二进制 / JSON / 原生归档编解码
//! - `index` - 时间窗口 → 样本下标（纯函数）
//! - `calibration` - 6×6 标定矩阵
//! - `statistics` - 通道统计（纯函数，可选）
//!
//! ## Feature Flags
//!
//! - `default` - 启用 `json`
//! - `json` - JSON 结构化文本格式
//! - `pickle` - 只读导入 Python pickle 快照（`.pkl`）
//! - `statistics` - 启用统计模块
//! - `full` - 启用所有功能
//!
//! ## 使用示例
//!
//! ```rust,no_run
//! use resense_tools::{import_recording, locate_window};
//!
//! # fn main() -> Result<(), resense_tools::RecordingError> {
//! let recording = import_recording("press.csv", None)?;
//! if let Some((start, end)) = locate_window(&recording, 1.0, 2.5) {
//!     println!("samples {}..={}", start, end);
//! }
//! # Ok(())
//! # }
//! ```

pub mod calibration;
pub mod codec;
pub mod error;
pub mod index;
pub mod recording;
pub mod set;

// ⭐ 可选模块（通过 feature flags 控制）
#[cfg(feature = "statistics")]
pub mod statistics;

// 重新导出常用类型
pub use calibration::CalibrationMatrix;
pub use codec::{CodecConfig, Format, decode, encode, export_recording, import_recording};
pub use error::{RecordingError, Result};
pub use index::locate_window;
pub use recording::{
    Direction, Force, Recording, Sample, TimeUnit, Torque, Variable, Vector3, concatenate,
};
pub use set::RecordingSet;

#[cfg(feature = "statistics")]
pub use statistics::{ChannelStatistics, RecordingStatistics};
