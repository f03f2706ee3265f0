//! FTE 兼容二进制格式
//!
//! 布局见 [`resense_protocol::fte`]。解码是严格的：数据短于文件头声明的长度时
//! 返回 [`RecordingError::Truncated`]，不做重新同步。

use crate::error::{RecordingError, Result};
use crate::recording::{Recording, Sample, Vector3};
use resense_protocol::{
    BinaryHeader, HEADER_LEN, TIMESTAMP_LEN, bytes_to_f32_le, bytes_to_i32_be, bytes_to_i64_be,
    f32_to_bytes_le, i32_to_bytes_be, i64_to_bytes_be,
};
use std::io::{Read, Write};
use tracing::{debug, warn};

/// 从读取器解码
pub fn decode<R: Read>(mut reader: R) -> Result<Recording> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode_bytes(&bytes)
}

/// 从完整字节缓冲解码
pub fn decode_bytes(bytes: &[u8]) -> Result<Recording> {
    if bytes.len() < HEADER_LEN {
        return Err(RecordingError::Truncated {
            declared: HEADER_LEN,
            available: bytes.len(),
        });
    }

    let count_field = bytes_to_i32_be(read_array(bytes, 0));
    let header = BinaryHeader::from_count_field(count_field);

    let declared = header.declared_len();
    if bytes.len() < declared {
        return Err(RecordingError::Truncated {
            declared,
            available: bytes.len(),
        });
    }
    if bytes.len() > declared {
        warn!(
            "Binary recording has {} trailing bytes after {} declared samples",
            bytes.len() - declared,
            header.sample_count
        );
    }

    debug!(
        "Decoding {} binary samples (temperature: {})",
        header.sample_count, header.has_temperature
    );

    let record_len = header.record_len();
    let samples = bytes[HEADER_LEN..declared]
        .chunks_exact(record_len)
        .map(|record| {
            let time_offset = bytes_to_i64_be(read_array(record, 0));
            // 温度字段（若有）位于 torque.z 之后，读取时直接跳过
            let f = |i: usize| f64::from(bytes_to_f32_le(read_array(record, TIMESTAMP_LEN + i * 4)));
            Sample::new(
                time_offset,
                Vector3::new(f(0), f(1), f(2)),
                Vector3::new(f(3), f(4), f(5)),
            )
        })
        .collect();

    Recording::new(samples)
}

/// 编码为不带温度的布局（count_field 非负）
///
/// 力/力矩在线上以 `f32` 存储，精度会下降到单精度。
pub fn encode<W: Write>(recording: &Recording, mut writer: W) -> Result<()> {
    let count = i32::try_from(recording.sample_count()).map_err(|_| {
        RecordingError::Format(format!(
            "{} samples exceed the binary format limit of {}",
            recording.sample_count(),
            i32::MAX
        ))
    })?;

    writer.write_all(&i32_to_bytes_be(count))?;
    for sample in recording {
        writer.write_all(&i64_to_bytes_be(sample.time_offset))?;
        for value in sample.channels() {
            writer.write_all(&f32_to_bytes_le(value as f32))?;
        }
    }

    Ok(())
}

fn read_array<const N: usize>(bytes: &[u8], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[offset..offset + N]);
    out
}
