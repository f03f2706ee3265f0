//! 原生归档格式（`.rsa`）
//!
//! [`RecordingSet`](crate::RecordingSet) 目录持久化使用的对象快照格式，
//! 不属于与 FTE 工具的交换契约。
//!
//! ```text
//! [MAGIC: 8 bytes]
//! [Version: 1 byte]
//! [Data: bincode serialized { name, samples }]
//! ```

use crate::error::{RecordingError, Result};
use crate::recording::{Recording, Sample};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// 归档文件魔数（用于文件格式识别）
pub const MAGIC: &[u8; 8] = b"RESENSE\0";

/// 当前归档版本
pub const VERSION: u8 = 1;

/// 归档文件扩展名
pub const EXTENSION: &str = "rsa";

/// 归档内容
///
/// `first_time_offset` 不落盘，加载时由 [`Recording::with_name`] 重新缓存。
#[derive(Serialize)]
struct ArchiveRef<'a> {
    name: &'a str,
    samples: &'a [Sample],
}

#[derive(Deserialize)]
struct ArchiveOwned {
    name: String,
    samples: Vec<Sample>,
}

/// 写入归档
pub fn encode<W: Write>(recording: &Recording, mut writer: W) -> Result<()> {
    // 写入魔数
    writer.write_all(MAGIC)?;

    // 写入版本
    writer.write_all(&[VERSION])?;

    // 序列化数据
    let body = ArchiveRef {
        name: recording.name(),
        samples: recording.samples(),
    };
    bincode::serialize_into(&mut writer, &body)?;

    Ok(())
}

/// 读取归档
pub fn decode<R: Read>(mut reader: R) -> Result<Recording> {
    // 读取并验证魔数
    let mut magic = [0u8; 8];
    reader.read_exact(&mut magic)?;
    if &magic != MAGIC {
        return Err(RecordingError::Format(
            "invalid archive (magic mismatch)".to_string(),
        ));
    }

    // 读取版本
    let mut version = [0u8; 1];
    reader.read_exact(&mut version)?;
    if version[0] != VERSION {
        return Err(RecordingError::Format(format!(
            "unsupported archive version: {}",
            version[0]
        )));
    }

    let body: ArchiveOwned = bincode::deserialize_from(reader)?;
    Recording::with_name(body.name, body.samples)
}
