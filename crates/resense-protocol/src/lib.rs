//! # Resense Protocol
//!
//! HEX 六维力/力矩传感器的线上格式定义（无硬件依赖）
//!
//! ## 模块
//!
//! - `fte`: FTE 兼容二进制录制文件的布局常量
//!
//! ## 字节序
//!
//! - 传感器原始帧：本机字节序 `f32`（由电子接口固定，不可更改）
//! - FTE 二进制文件：计数和时间戳为大端，浮点数为小端
//!
//! 本模块提供了字节序转换工具函数。

pub mod fte;

pub use fte::*;

use thiserror::Error;

/// 原始帧中的通道数（Fx, Fy, Fz, Mx, My, Mz）
pub const CHANNEL_COUNT: usize = 6;

/// 电子接口每次发送的原始帧长度（字节）
///
/// 前 24 字节是 6 个通道值，后 4 字节为尾部数据，解析时忽略。
pub const RAW_FRAME_LEN: usize = 28;

/// 原始帧中通道值占用的字节数
const CHANNEL_BYTES: usize = CHANNEL_COUNT * 4;

/// 传感器原始帧
///
/// # 设计目的
///
/// `RawFrame` 是传输层和标定层之间的中间抽象：
/// - **层次解耦**：标定和录制不依赖串口实现
/// - **固定长度**：28 字节，无堆分配
/// - **Copy trait**：适合高频采样（~1kHz）
///
/// # 在架构中的位置
///
/// ```text
/// Transport (串口 / 任意 Read)
///     ↓ 28 字节
/// RawFrame (此类型)
///     ↓ channels()
/// CalibrationMatrix::process
///     ↓
/// Sample
/// ```
///
/// # 示例
///
/// ```rust
/// use resense_protocol::{RawFrame, RAW_FRAME_LEN};
///
/// let mut bytes = [0u8; RAW_FRAME_LEN];
/// bytes[..4].copy_from_slice(&1.5f32.to_ne_bytes());
///
/// let frame = RawFrame::from_bytes(&bytes).unwrap();
/// assert_eq!(frame.channels()[0], 1.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawFrame {
    /// 原始通道值（未标定）
    pub values: [f32; CHANNEL_COUNT],
}

impl RawFrame {
    /// 从 6 个通道值创建
    pub fn new(values: [f32; CHANNEL_COUNT]) -> Self {
        Self { values }
    }

    /// 从电子接口字节流解析
    ///
    /// 至少需要 24 字节（6 个本机字节序 `f32`）；多余字节被忽略。
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProtocolError> {
        if bytes.len() < CHANNEL_BYTES {
            return Err(ProtocolError::InvalidLength {
                expected: CHANNEL_BYTES,
                actual: bytes.len(),
            });
        }

        let mut values = [0f32; CHANNEL_COUNT];
        for (i, value) in values.iter_mut().enumerate() {
            let mut word = [0u8; 4];
            word.copy_from_slice(&bytes[i * 4..(i + 1) * 4]);
            *value = f32::from_ne_bytes(word);
        }

        Ok(Self { values })
    }

    /// 编码为完整的 28 字节帧（尾部填 0），用于测试和回放
    pub fn to_bytes(&self) -> [u8; RAW_FRAME_LEN] {
        let mut bytes = [0u8; RAW_FRAME_LEN];
        for (i, value) in self.values.iter().enumerate() {
            bytes[i * 4..(i + 1) * 4].copy_from_slice(&value.to_ne_bytes());
        }
        bytes
    }

    /// 以 `f64` 返回通道值，作为标定矩阵的输入
    pub fn channels(&self) -> [f64; CHANNEL_COUNT] {
        self.values.map(f64::from)
    }
}

/// 协议解析错误类型
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Invalid frame length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// 字节序转换工具函数
///
/// FTE 录制文件的计数和时间戳使用大端字节序，
/// 力/力矩浮点数使用小端字节序。
///
/// 大端字节序转 i32
pub fn bytes_to_i32_be(bytes: [u8; 4]) -> i32 {
    i32::from_be_bytes(bytes)
}

/// 大端字节序转 i64
pub fn bytes_to_i64_be(bytes: [u8; 8]) -> i64 {
    i64::from_be_bytes(bytes)
}

/// 小端字节序转 f32
pub fn bytes_to_f32_le(bytes: [u8; 4]) -> f32 {
    f32::from_le_bytes(bytes)
}

/// i32 转大端字节序
pub fn i32_to_bytes_be(value: i32) -> [u8; 4] {
    value.to_be_bytes()
}

/// i64 转大端字节序
pub fn i64_to_bytes_be(value: i64) -> [u8; 8] {
    value.to_be_bytes()
}

/// f32 转小端字节序
pub fn f32_to_bytes_le(value: f32) -> [u8; 4] {
    value.to_le_bytes()
}
