//! CSV 格式
//!
//! ```text
//! Timestamp,Fx,Fy,Fz,Mx,My,Mz
//! 1000,1.5,2,3,0.1,0.2,0.3
//! ```
//!
//! 解码时按第一行自动识别区域约定：
//!
//! | 第一行 | 字段分隔符 | 小数点 |
//! |------|------|------|
//! | `,` 多于 `;` | `,` | `.` |
//! | 其他 | `;` | `,`（欧洲约定） |
//!
//! 编码总是使用 `,` / `.`。

use crate::error::{RecordingError, Result};
use crate::recording::{Recording, Sample};
use std::io::{Read, Write};
use tracing::debug;

/// 表头
pub const HEADER: &str = "Timestamp,Fx,Fy,Fz,Mx,My,Mz";

/// 每行字段数
const FIELD_COUNT: usize = 7;

/// 分隔约定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    /// 字段分隔符
    pub separator: char,

    /// 小数点
    pub decimal: char,
}

impl Dialect {
    /// `1.5,2.0`
    pub const COMMA: Dialect = Dialect {
        separator: ',',
        decimal: '.',
    };

    /// `1,5;2,0`
    pub const SEMICOLON: Dialect = Dialect {
        separator: ';',
        decimal: ',',
    };

    /// 比较第一行中 `,` 和 `;` 的数量
    pub fn detect(first_line: &str) -> Self {
        let commas = first_line.matches(',').count();
        let semicolons = first_line.matches(';').count();
        if commas > semicolons {
            Self::COMMA
        } else {
            Self::SEMICOLON
        }
    }
}

/// 从读取器解码
pub fn decode<R: Read>(mut reader: R) -> Result<Recording> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    decode_str(&text)
}

/// 解码 CSV 文本
///
/// 第一行用于识别分隔约定；只有当它没有任何数值字段时（如
/// `Timestamp,Fx,...`）才视为表头跳过，否则按数据行解析。
/// 空行被忽略。错误中的行号从 1 开始，包含表头行。
pub fn decode_str(text: &str) -> Result<Recording> {
    let mut lines = text.lines().enumerate().peekable();

    let first_line = lines.peek().map(|(_, line)| *line).unwrap_or_default();
    let dialect = Dialect::detect(first_line);
    debug!("Detected CSV dialect: {:?}", dialect);

    if is_header(first_line, dialect) {
        lines.next();
    }

    let mut samples = Vec::new();
    for (i, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        samples.push(parse_row(line, i + 1, dialect)?);
    }

    Recording::new(samples)
}

/// 表头行：每个字段都不是数值（按当前小数点约定替换后）
fn is_header(line: &str, dialect: Dialect) -> bool {
    !line.trim().is_empty()
        && line
            .split(dialect.separator)
            .all(|field| field.trim().replace(dialect.decimal, ".").parse::<f64>().is_err())
}

fn parse_row(line: &str, row: usize, dialect: Dialect) -> Result<Sample> {
    let fields: Vec<&str> = line.split(dialect.separator).map(str::trim).collect();
    if fields.len() < FIELD_COUNT {
        return Err(RecordingError::Parse {
            row,
            message: format!("expected {} fields, found {}", FIELD_COUNT, fields.len()),
        });
    }

    let time_offset = fields[0].parse::<i64>().map_err(|e| RecordingError::Parse {
        row,
        message: format!("invalid timestamp {:?}: {}", fields[0], e),
    })?;

    let mut channels = [0.0; 6];
    for (c, value) in channels.iter_mut().enumerate() {
        let field = fields[c + 1];
        // 先替换小数点，再解析数值
        let normalized = field.replace(dialect.decimal, ".");
        *value = normalized.parse::<f64>().map_err(|e| RecordingError::Parse {
            row,
            message: format!("invalid value {:?} in column {}: {}", field, c + 2, e),
        })?;
    }

    Ok(Sample::from_channels(time_offset, channels))
}

/// 编码（`,` 分隔、`.` 小数点）
pub fn encode<W: Write>(recording: &Recording, mut writer: W) -> Result<()> {
    writeln!(writer, "{}", HEADER)?;
    for sample in recording {
        let [fx, fy, fz, mx, my, mz] = sample.channels();
        writeln!(
            writer,
            "{},{},{},{},{},{},{}",
            sample.time_offset, fx, fy, fz, mx, my, mz
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::Vector3;
    use crate::recording::tests::uniform_recording;

    #[test]
    fn test_detect_dialect() {
        assert_eq!(Dialect::detect("0,1.0,2.0,3.0,4.0,5.0,6.0"), Dialect::COMMA);
        assert_eq!(Dialect::detect("0;1,0;2,0;3,0;4,0;5,0;6,0"), Dialect::SEMICOLON);
        assert_eq!(Dialect::detect(HEADER), Dialect::COMMA);
        assert_eq!(Dialect::detect("Timestamp;Fx;Fy;Fz;Mx;My;Mz"), Dialect::SEMICOLON);
    }

    #[test]
    fn test_decode_comma_without_header() {
        let recording = decode_str("0,1.0,2.0,3.0,4.0,5.0,6.0\n").unwrap();
        let s = recording.get(0).unwrap();
        assert_eq!(s.time_offset, 0);
        assert_eq!(s.force, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(s.torque, Vector3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_decode_semicolon_european_decimal() {
        let recording = decode_str("0;1,0;2,0;3,0;4,0;5,0;6,0\n10;1,5;-2,25;0;0;0;0\n").unwrap();
        assert_eq!(recording.sample_count(), 2);
        assert_eq!(recording.get(0).unwrap().force.x, 1.0);
        assert_eq!(recording.get(1).unwrap().force, Vector3::new(1.5, -2.25, 0.0));
    }

    #[test]
    fn test_decode_fte_export_with_header() {
        let text = "Timestamp;Fx;Fy;Fz;Mx;My;Mz\r\n\
                    1000;0,5;1;1,5;0,01;0,02;0,03\r\n\
                    2000;0,6;1;1,5;0,01;0,02;0,03\r\n";
        let recording = decode_str(text).unwrap();
        assert_eq!(recording.sample_count(), 2);
        assert_eq!(recording.first_time_offset(), 1000);
        assert_eq!(recording.get(1).unwrap().force.x, 0.6);
        assert_eq!(recording.get(1).unwrap().torque.z, 0.03);
    }

    #[test]
    fn test_timestamp_must_be_integer() {
        let err = decode_str("Timestamp,Fx,Fy,Fz,Mx,My,Mz\n1.5,0,0,0,0,0,0\n").unwrap_err();
        match err {
            RecordingError::Parse { row, message } => {
                assert_eq!(row, 2);
                assert!(message.contains("timestamp"), "{}", message);
            },
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_headerless_bad_first_row_is_error() {
        // 第一行有数值字段，即使时间戳非法也按数据行解析
        match decode_str("1.5,0,0,0,0,0,0\n2,1,1,1,1,1,1\n") {
            Err(RecordingError::Parse { row, message }) => {
                assert_eq!(row, 1);
                assert!(message.contains("timestamp"), "{}", message);
            },
            other => panic!("unexpected result: {:?}", other),
        }

        assert!(matches!(
            decode_str("t0;1,0;2,0;3,0;4,0;5,0;6,0\n"),
            Err(RecordingError::Parse { row: 1, .. })
        ));
    }

    #[test]
    fn test_is_header() {
        assert!(is_header(HEADER, Dialect::COMMA));
        assert!(is_header("Timestamp;Fx;Fy;Fz;Mx;My;Mz", Dialect::SEMICOLON));
        assert!(!is_header("0,1.0,2.0,3.0,4.0,5.0,6.0", Dialect::COMMA));
        assert!(!is_header("x;1,5;a;b;c;d;e", Dialect::SEMICOLON));
        assert!(!is_header("", Dialect::COMMA));
    }

    #[test]
    fn test_short_row_names_row() {
        let text = format!("{}\n0,0,0,0,0,0,0\n1,0,0,0,0,0,0\n2,0,0\n", HEADER);
        match decode_str(&text) {
            Err(RecordingError::Parse { row, message }) => {
                assert_eq!(row, 4);
                assert!(message.contains("found 3"), "{}", message);
            },
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_value() {
        let text = format!("{}\n0,0,abc,0,0,0,0\n", HEADER);
        assert!(matches!(
            decode_str(&text),
            Err(RecordingError::Parse { row: 2, .. })
        ));
    }

    #[test]
    fn test_header_only_is_empty() {
        assert!(matches!(
            decode_str(&format!("{}\n", HEADER)),
            Err(RecordingError::EmptyRecording)
        ));
        assert!(matches!(decode_str(""), Err(RecordingError::EmptyRecording)));
    }

    #[test]
    fn test_roundtrip() {
        let recording = uniform_recording(25, 1_000, 1_234_567);
        let mut bytes = Vec::new();
        encode(&recording, &mut bytes).unwrap();

        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with(HEADER));

        let decoded = decode_str(&text).unwrap();
        assert_eq!(decoded.samples(), recording.samples());
    }
}
