//! JSON 结构化文本格式
//!
//! ```json
//! { "name": "grip", "data": [[1000, 0.5, 1.0, 1.5, 0.01, 0.02, 0.03], ...] }
//! ```
//!
//! 每个元组已是数值，不做区域约定处理。`name` 可选，其他键被忽略。

use crate::error::{RecordingError, Result};
use crate::recording::{Recording, Sample};
use serde::Serialize;
use serde_json::Value;
use std::io::{Read, Write};

/// 元组长度：时间戳 + 6 个通道
const TUPLE_LEN: usize = 7;

#[derive(Serialize)]
struct Document<'a> {
    name: &'a str,
    data: Vec<(i64, f64, f64, f64, f64, f64, f64)>,
}

/// 从读取器解码
pub fn decode<R: Read>(reader: R) -> Result<Recording> {
    let document: Value = serde_json::from_reader(reader).map_err(|e| {
        if e.is_io() {
            RecordingError::Io(e.into())
        } else {
            RecordingError::Parse {
                row: e.line(),
                message: e.to_string(),
            }
        }
    })?;
    decode_value(&document)
}

/// 从已解析的 JSON 值解码
///
/// 错误中的 `row` 为 `data` 数组下标（从 1 开始）。
pub fn decode_value(document: &Value) -> Result<Recording> {
    let data = document
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| RecordingError::Parse {
            row: 0,
            message: "expected a top-level object with a `data` array".to_string(),
        })?;

    let samples = data
        .iter()
        .enumerate()
        .map(|(i, tuple)| parse_tuple(tuple, i + 1))
        .collect::<Result<Vec<_>>>()?;

    let name = document.get("name").and_then(Value::as_str).unwrap_or_default();
    Recording::with_name(name, samples)
}

fn parse_tuple(tuple: &Value, row: usize) -> Result<Sample> {
    let fields = tuple.as_array().filter(|a| a.len() >= TUPLE_LEN).ok_or_else(|| {
        RecordingError::Parse {
            row,
            message: format!("expected an array of {} numbers, got {}", TUPLE_LEN, tuple),
        }
    })?;

    let time_offset = match (fields[0].as_i64(), fields[0].as_f64()) {
        (Some(t), _) => t,
        (None, Some(t)) if t.fract() == 0.0 && t.abs() < i64::MAX as f64 => t as i64,
        _ => {
            return Err(RecordingError::Parse {
                row,
                message: format!("invalid timestamp {}", fields[0]),
            });
        },
    };

    let mut channels = [0.0; 6];
    for (c, value) in channels.iter_mut().enumerate() {
        *value = fields[c + 1].as_f64().ok_or_else(|| RecordingError::Parse {
            row,
            message: format!("invalid value {} at position {}", fields[c + 1], c + 1),
        })?;
    }

    Ok(Sample::from_channels(time_offset, channels))
}

/// 编码
pub fn encode<W: Write>(recording: &Recording, writer: W) -> Result<()> {
    let document = Document {
        name: recording.name(),
        data: recording
            .iter()
            .map(|s| {
                let [fx, fy, fz, mx, my, mz] = s.channels();
                (s.time_offset, fx, fy, fz, mx, my, mz)
            })
            .collect(),
    };

    serde_json::to_writer(writer, &document).map_err(|e| {
        if e.is_io() {
            RecordingError::Io(e.into())
        } else {
            RecordingError::Format(e.to_string())
        }
    })
}
