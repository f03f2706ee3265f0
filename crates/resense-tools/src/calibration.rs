//! # 标定矩阵
//!
//! 把 6 通道原始值线性变换为力/力矩值

use crate::error::{RecordingError, Result};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// 矩阵维度
pub const DIMENSION: usize = 6;

/// 6×6 标定矩阵（行主序）
///
/// 默认值为单位矩阵，适用于电子接口已直接输出 F/T 值的情况
/// （DIP 开关 6 置为 ON）。
///
/// 文本格式：恰好 6 行，每行 6 个逗号分隔的浮点数。
///
/// ```text
/// 1.0,0,0,0,0,0
/// 0,1.0,0,0,0,0
/// ...
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationMatrix {
    rows: [[f64; DIMENSION]; DIMENSION],
}

impl Default for CalibrationMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl CalibrationMatrix {
    /// 单位矩阵
    pub fn identity() -> Self {
        let mut rows = [[0.0; DIMENSION]; DIMENSION];
        for (i, row) in rows.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        Self { rows }
    }

    pub fn from_rows(rows: [[f64; DIMENSION]; DIMENSION]) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[[f64; DIMENSION]; DIMENSION] {
        &self.rows
    }

    /// 从文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        content.parse()
    }

    /// 标定：`dest[r] = Σ_c matrix[r][c] * raw[c]`
    ///
    /// 普通稠密矩阵乘法，不做任何捷径或额外舍入。
    pub fn process(&self, raw: [f64; DIMENSION]) -> [f64; DIMENSION] {
        let mut dest = [0.0; DIMENSION];
        for (value, row) in dest.iter_mut().zip(self.rows.iter()) {
            let mut result = 0.0;
            for (m, r) in row.iter().zip(raw.iter()) {
                result += m * r;
            }
            *value = result;
        }
        dest
    }
}

impl FromStr for CalibrationMatrix {
    type Err = RecordingError;

    fn from_str(text: &str) -> Result<Self> {
        let mut rows = [[0.0; DIMENSION]; DIMENSION];
        let mut lines = text.lines();

        for (r, row) in rows.iter_mut().enumerate() {
            let line_no = r + 1;
            let line = lines.next().ok_or_else(|| RecordingError::Config {
                line: line_no,
                message: format!("expected {} rows, found {}", DIMENSION, r),
            })?;

            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() != DIMENSION {
                return Err(RecordingError::Config {
                    line: line_no,
                    message: format!("expected {} fields, found {}", DIMENSION, fields.len()),
                });
            }

            for (c, field) in fields.iter().enumerate() {
                row[c] = field.trim().parse::<f64>().map_err(|e| RecordingError::Config {
                    line: line_no,
                    message: format!("column {}: invalid number {:?}: {}", c + 1, field.trim(), e),
                })?;
            }
        }

        // 第 6 行之后只允许空行
        if let Some((i, _)) = lines.enumerate().find(|(_, l)| !l.trim().is_empty()) {
            return Err(RecordingError::Config {
                line: DIMENSION + i + 1,
                message: format!("expected {} rows, found extra content", DIMENSION),
            });
        }

        Ok(Self { rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCALED: &str = "2,0,0,0,0,0\n\
                          0,2,0,0,0,0\n\
                          0,0,2,0,0,0\n\
                          0,0,0,0.5,0,0\n\
                          0,0,0,0,0.5,0\n\
                          1,0,0,0,0,0.5\n";

    #[test]
    fn test_identity_is_passthrough() {
        let matrix = CalibrationMatrix::default();
        let inputs = [
            [0.0; 6],
            [1.0, -2.0, 3.5, 1e-9, -7e12, 0.25],
            [f64::MAX, f64::MIN_POSITIVE, -0.0, 42.0, -42.0, 0.1],
        ];
        for v in inputs {
            assert_eq!(matrix.process(v), v);
        }
    }

    #[test]
    fn test_parse_and_process() {
        let matrix: CalibrationMatrix = SCALED.parse().unwrap();
        let out = matrix.process([1.0, 2.0, 3.0, 4.0, 6.0, 8.0]);
        assert_eq!(out, [2.0, 4.0, 6.0, 2.0, 3.0, 5.0]);
    }

    #[test]
    fn test_parse_tolerates_whitespace_and_trailing_blank_lines() {
        let text = " 1, 0,0,0,0,0\r\n0,1,0,0,0,0\n0,0,1,0,0,0\n0,0,0,1,0,0\n0,0,0,0,1,0\n0,0,0,0,0,1\n\n";
        let matrix: CalibrationMatrix = text.parse().unwrap();
        assert_eq!(matrix, CalibrationMatrix::identity());
    }

    #[test]
    fn test_too_few_rows() {
        let err = "1,0,0,0,0,0\n0,1,0,0,0,0\n".parse::<CalibrationMatrix>().unwrap_err();
        match err {
            RecordingError::Config { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_wrong_field_count() {
        let text = SCALED.replacen("0,0,0,0.5,0,0", "0,0,0,0.5,0", 1);
        let err = text.parse::<CalibrationMatrix>().unwrap_err();
        match err {
            RecordingError::Config { line, message } => {
                assert_eq!(line, 4);
                assert!(message.contains("found 5"), "{}", message);
            },
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_field() {
        let text = SCALED.replacen("0,2,0", "0,two,0", 1);
        let err = text.parse::<CalibrationMatrix>().unwrap_err();
        assert!(matches!(err, RecordingError::Config { line: 2, .. }));
    }

    #[test]
    fn test_extra_rows_rejected() {
        let text = format!("{}0,0,0,0,0,0\n", SCALED);
        let err = text.parse::<CalibrationMatrix>().unwrap_err();
        assert!(matches!(err, RecordingError::Config { line: 7, .. }));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calibration.csv");
        std::fs::write(&path, SCALED).unwrap();

        let matrix = CalibrationMatrix::from_file(&path).unwrap();
        assert_eq!(matrix.rows()[5], [1.0, 0.0, 0.0, 0.0, 0.0, 0.5]);
    }
}
