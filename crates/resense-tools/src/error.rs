//! 录制层错误类型定义

use thiserror::Error;

/// 录制、标定和编解码的统一错误类型
///
/// 时间窗口查找失败不是错误：`locate_window` 返回 `None`。
#[derive(Error, Debug)]
pub enum RecordingError {
    /// 标定矩阵文本格式错误（行号从 1 开始）
    #[error("Invalid calibration matrix at line {line}: {message}")]
    Config { line: usize, message: String },

    /// 路径缺少扩展名，或文件内容不符合格式
    #[error("Format error: {0}")]
    Format(String),

    /// 无法处理的扩展名（未知，或当前构建未启用）
    #[error("Unsupported file extension: .{extension}")]
    UnsupportedFormat { extension: String },

    /// 解析失败
    ///
    /// `row` 从 1 开始：CSV 为文件中的行号（表头计入）；JSON 与 pickle 为
    /// `data` 数组中的元组序号，文档级错误（缺少 `data`）为 0，JSON 语法错误为文本行号。
    #[error("Parse error at row {row}: {message}")]
    Parse { row: usize, message: String },

    /// 二进制数据短于文件头声明的长度
    #[error("Truncated data: header declares {declared} bytes, only {available} available")]
    Truncated { declared: usize, available: usize },

    /// 尝试用 0 个样本构建录制
    #[error("Recording must contain at least one sample")]
    EmptyRecording,

    /// IO 错误
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    /// 归档（bincode）序列化/反序列化失败
    #[error("Archive error: {0}")]
    Archive(String),
}

impl From<bincode::Error> for RecordingError {
    fn from(err: bincode::Error) -> Self {
        RecordingError::Archive(err.to_string())
    }
}

/// 录制层 Result 别名
pub type Result<T> = std::result::Result<T, RecordingError>;
