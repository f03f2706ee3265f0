//! FTE 兼容二进制录制文件布局
//!
//! ```text
//! [count_field: i32 BE]          |count| = 样本数，负数表示每个样本带温度
//! [Sample 0]
//!   [timestamp: i64 BE]          微秒
//!   [fx fy fz mx my mz: f32 LE]
//!   [temperature: f32 LE]        仅当 count_field < 0
//! [Sample 1]
//! ...
//! ```
//!
//! ⚠️ 这是与外部 FTE 工具的兼容面，任何偏差都视为兼容性 bug。

/// 文件头长度（count_field）
pub const HEADER_LEN: usize = 4;

/// 时间戳长度
pub const TIMESTAMP_LEN: usize = 8;

/// 不带温度时每个样本的浮点数个数
pub const FLOATS_PER_SAMPLE: usize = 6;

/// 带温度时每个样本的浮点数个数
pub const FLOATS_PER_SAMPLE_WITH_TEMPERATURE: usize = 7;

/// 解析后的文件头
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryHeader {
    /// 样本数（count_field 的绝对值）
    pub sample_count: usize,

    /// 每个样本是否带温度字段
    pub has_temperature: bool,
}

impl BinaryHeader {
    /// 从 count_field 解析
    ///
    /// 符号仅是格式版本标志，不是数量的符号。
    pub fn from_count_field(count_field: i32) -> Self {
        Self {
            sample_count: count_field.unsigned_abs() as usize,
            has_temperature: count_field < 0,
        }
    }

    /// 每个样本的浮点数个数
    pub fn floats_per_sample(&self) -> usize {
        if self.has_temperature {
            FLOATS_PER_SAMPLE_WITH_TEMPERATURE
        } else {
            FLOATS_PER_SAMPLE
        }
    }

    /// 每个样本占用的字节数
    pub fn record_len(&self) -> usize {
        TIMESTAMP_LEN + self.floats_per_sample() * 4
    }

    /// 文件头声明的总长度（字节，含文件头）
    pub fn declared_len(&self) -> usize {
        HEADER_LEN + self.sample_count.saturating_mul(self.record_len())
    }
}
