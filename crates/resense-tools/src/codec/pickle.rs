//! Python pickle 快照（`.pkl`，只读）
//!
//! 旧版 Python 工具导出的对象快照：顶层字典的 `data` 键是 7 元组序列
//! `(t, fx, fy, fz, mx, my, mz)`，结构与 JSON 格式相同，按同样规则解码。
//! 不支持写出。

use crate::codec::json;
use crate::error::{RecordingError, Result};
use crate::recording::Recording;
use serde_json::Value;
use std::io::Read;
use tracing::debug;

/// 从读取器解码
pub fn decode<R: Read>(reader: R) -> Result<Recording> {
    let document: Value =
        serde_pickle::from_reader(reader, serde_pickle::DeOptions::new()).map_err(|e| match e {
            serde_pickle::Error::Io(e) => RecordingError::Io(e),
            other => RecordingError::Archive(format!("invalid pickle: {}", other)),
        })?;

    debug!("Decoded pickle document, reusing the tuple decoder");
    json::decode_value(&document)
}
