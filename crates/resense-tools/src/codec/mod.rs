//! # 编解码层
//!
//! 在内存录制和持久化表示之间转换。
//!
//! | 扩展名 | 格式 | 说明 |
//! |------|------|------|
//! | `csv` | [`Format::Csv`] | 自动识别 `,`/`;` 分隔约定 |
//! | `bin`, `dat` | [`Format::Binary`] | FTE 兼容二进制（规范交换格式） |
//! | `json` | [`Format::Json`] | 结构化文本（`json` feature） |
//! | `rsa` | [`Format::Archive`] | 原生归档，供 [`RecordingSet`](crate::RecordingSet) 持久化 |
//! | `pkl` | [`Format::Pickle`] | Python pickle 快照，只读（`pickle` feature） |
//!
//! 其他扩展名返回 [`RecordingError::UnsupportedFormat`]，且在打开文件之前返回；
//! 向只读格式导出同样在创建文件之前失败。

pub mod archive;
pub mod binary;
pub mod csv;
#[cfg(feature = "json")]
pub mod json;
#[cfg(feature = "pickle")]
pub mod pickle;

use crate::error::{RecordingError, Result};
use crate::recording::Recording;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::debug;

/// 持久化格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Csv,
    Binary,
    Json,
    Archive,
    Pickle,
}

impl Format {
    /// 写文件时使用的规范扩展名
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Binary => "bin",
            Format::Json => "json",
            Format::Archive => archive::EXTENSION,
            Format::Pickle => "pkl",
        }
    }

    /// 当前构建是否能处理该格式
    pub fn is_enabled(&self) -> bool {
        match self {
            Format::Json => cfg!(feature = "json"),
            Format::Pickle => cfg!(feature = "pickle"),
            Format::Csv | Format::Binary | Format::Archive => true,
        }
    }

    /// 是否支持写出（pickle 只读）
    pub fn can_encode(&self) -> bool {
        self.is_enabled() && *self != Format::Pickle
    }

    fn unsupported(&self) -> RecordingError {
        RecordingError::UnsupportedFormat {
            extension: self.extension().to_string(),
        }
    }
}

/// 编解码配置
///
/// 持有扩展名 → 格式的映射表（显式初始化，无全局状态）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// 扩展名（不含 `.`，小写）→ 格式
    pub extensions: BTreeMap<String, Format>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        let extensions = [
            ("csv", Format::Csv),
            ("bin", Format::Binary),
            ("dat", Format::Binary),
            ("json", Format::Json),
            (archive::EXTENSION, Format::Archive),
            ("pkl", Format::Pickle),
        ]
        .into_iter()
        .map(|(ext, format)| (ext.to_string(), format))
        .collect();

        Self { extensions }
    }
}

impl CodecConfig {
    /// 按扩展名查找格式
    ///
    /// 大小写不敏感；未知或当前构建未启用的格式返回 `UnsupportedFormat`。
    pub fn format_for_extension(&self, extension: &str) -> Result<Format> {
        let format = self
            .extensions
            .get(&extension.to_ascii_lowercase())
            .copied()
            .ok_or_else(|| RecordingError::UnsupportedFormat {
                extension: extension.to_string(),
            })?;

        if !format.is_enabled() {
            return Err(RecordingError::UnsupportedFormat {
                extension: extension.to_string(),
            });
        }

        Ok(format)
    }

    /// 确定文件格式：优先使用 `extension_override`，否则取文件名中最后一个 `.` 之后的部分
    pub fn resolve(&self, path: &Path, extension_override: Option<&str>) -> Result<Format> {
        match extension_override {
            Some(ext) => self.format_for_extension(ext),
            None => self.format_for_extension(extension_of(path)?),
        }
    }

    /// 从文件导入录制，录制名取文件名（不含扩展名）
    pub fn import<P: AsRef<Path>>(&self, path: P, extension_override: Option<&str>) -> Result<Recording> {
        let path = path.as_ref();
        // 先确定格式，不支持的格式不触发任何文件 IO
        let format = self.resolve(path, extension_override)?;

        debug!("Importing {:?} recording from {}", format, path.display());
        let file = File::open(path)?;
        let mut recording = decode(BufReader::new(file), format)?;

        if recording.name().is_empty() {
            recording.set_name(file_stem(path));
        }

        debug!(
            "Imported {} samples from {}",
            recording.sample_count(),
            path.display()
        );
        Ok(recording)
    }

    /// 导出录制到文件
    pub fn export<P: AsRef<Path>>(
        &self,
        recording: &Recording,
        path: P,
        extension_override: Option<&str>,
    ) -> Result<()> {
        let path = path.as_ref();
        let format = self.resolve(path, extension_override)?;
        if !format.can_encode() {
            return Err(format.unsupported());
        }

        debug!(
            "Exporting {} samples as {:?} to {}",
            recording.sample_count(),
            format,
            path.display()
        );
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        encode(recording, &mut writer, format)?;
        writer.flush()?;

        Ok(())
    }
}

/// 从读取器解码录制
///
/// 要么完整成功，要么返回错误，不会返回部分录制。
pub fn decode<R: Read>(reader: R, format: Format) -> Result<Recording> {
    match format {
        Format::Csv => csv::decode(reader),
        Format::Binary => binary::decode(reader),
        Format::Archive => archive::decode(reader),
        #[cfg(feature = "json")]
        Format::Json => json::decode(reader),
        #[cfg(not(feature = "json"))]
        Format::Json => Err(format.unsupported()),
        #[cfg(feature = "pickle")]
        Format::Pickle => pickle::decode(reader),
        #[cfg(not(feature = "pickle"))]
        Format::Pickle => Err(format.unsupported()),
    }
}

/// 把录制编码到写入器
///
/// 只读格式返回 `UnsupportedFormat`。
pub fn encode<W: Write>(recording: &Recording, writer: W, format: Format) -> Result<()> {
    match format {
        Format::Csv => csv::encode(recording, writer),
        Format::Binary => binary::encode(recording, writer),
        Format::Archive => archive::encode(recording, writer),
        #[cfg(feature = "json")]
        Format::Json => json::encode(recording, writer),
        #[cfg(not(feature = "json"))]
        Format::Json => Err(format.unsupported()),
        Format::Pickle => Err(format.unsupported()),
    }
}

/// 使用默认配置导入（FTE 导出的文件可直接读取）
pub fn import_recording<P: AsRef<Path>>(path: P, extension_override: Option<&str>) -> Result<Recording> {
    CodecConfig::default().import(path, extension_override)
}

/// 使用默认配置导出（导出的文件可被 FTE 读取）
pub fn export_recording<P: AsRef<Path>>(
    recording: &Recording,
    path: P,
    extension_override: Option<&str>,
) -> Result<()> {
    CodecConfig::default().export(recording, path, extension_override)
}

/// 取文件名中最后一个 `.` 之后的部分
///
/// 没有 `.`、或 `.` 是最后一个字符时返回 `Format` 错误。
pub fn extension_of(path: &Path) -> Result<&str> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| RecordingError::Format(format!("no file name in path {}", path.display())))?;

    match name.rfind('.') {
        Some(i) if i + 1 < name.len() => Ok(&name[i + 1..]),
        _ => Err(RecordingError::Format(format!(
            "file path without extension: {}",
            path.display()
        ))),
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem().and_then(|s| s.to_str()).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::tests::uniform_recording;
    use std::path::PathBuf;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of(Path::new("data/run.csv")).unwrap(), "csv");
        assert_eq!(extension_of(Path::new("run.backup.bin")).unwrap(), "bin");
        assert!(matches!(
            extension_of(Path::new("data/run")),
            Err(RecordingError::Format(_))
        ));
        assert!(matches!(
            extension_of(Path::new("data/run.")),
            Err(RecordingError::Format(_))
        ));
    }

    #[test]
    fn test_dispatch_table() {
        let config = CodecConfig::default();
        assert_eq!(config.format_for_extension("csv").unwrap(), Format::Csv);
        assert_eq!(config.format_for_extension("bin").unwrap(), Format::Binary);
        assert_eq!(config.format_for_extension("DAT").unwrap(), Format::Binary);
        assert_eq!(config.format_for_extension("rsa").unwrap(), Format::Archive);
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_enabled() {
        let config = CodecConfig::default();
        assert_eq!(config.format_for_extension("json").unwrap(), Format::Json);
    }

    #[test]
    fn test_override_wins_over_suffix() {
        let config = CodecConfig::default();
        let format = config.resolve(Path::new("export.txt"), Some("csv")).unwrap();
        assert_eq!(format, Format::Csv);
    }

    #[test]
    fn test_unsupported_fails_before_io() {
        // 文件不存在：若先打开文件会得到 Io 错误
        let path = PathBuf::from("/nonexistent/dir/recording.xyz");
        match import_recording(&path, None) {
            Err(RecordingError::UnsupportedFormat { extension }) => assert_eq!(extension, "xyz"),
            other => panic!("unexpected result: {:?}", other),
        }

        let recording = uniform_recording(2, 10, 0);
        match export_recording(&recording, "/nonexistent/dir/out.xlsx", None) {
            Err(RecordingError::UnsupportedFormat { extension }) => assert_eq!(extension, "xlsx"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_extension_fails_before_io() {
        let result = import_recording("/nonexistent/dir/recording", None);
        assert!(matches!(result, Err(RecordingError::Format(_))));
    }

    #[test]
    fn test_import_missing_file_is_io_error() {
        let result = import_recording("/nonexistent/dir/recording.csv", None);
        assert!(matches!(result, Err(RecordingError::Io(_))));
    }

    #[test]
    fn test_file_roundtrip_names_by_stem() {
        let dir = tempfile::tempdir().unwrap();
        let recording = uniform_recording(10, 1000, 42);

        for ext in ["csv", "bin", "dat", "rsa"] {
            let path = dir.path().join(format!("trial-1.{}", ext));
            export_recording(&recording, &path, None).unwrap();

            let loaded = import_recording(&path, None).unwrap();
            assert_eq!(loaded.sample_count(), 10, "format {}", ext);
            assert_eq!(loaded.first_time_offset(), 42, "format {}", ext);
            assert_eq!(loaded.name(), "trial-1", "format {}", ext);
        }
    }

    #[test]
    fn test_codec_config_custom_table() {
        let mut config = CodecConfig::default();
        config.extensions.insert("txt".to_string(), Format::Csv);
        assert_eq!(config.resolve(Path::new("a.txt"), None).unwrap(), Format::Csv);
        assert!(CodecConfig::default().resolve(Path::new("a.txt"), None).is_err());
    }

    #[test]
    fn test_pickle_is_read_only() {
        assert!(!Format::Pickle.can_encode());
        assert!(Format::Csv.can_encode());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pkl");
        let recording = uniform_recording(2, 10, 0);
        match export_recording(&recording, &path, None) {
            Err(RecordingError::UnsupportedFormat { extension }) => assert_eq!(extension, "pkl"),
            other => panic!("unexpected result: {:?}", other),
        }
        // 失败发生在创建文件之前
        assert!(!path.exists());

        let mut buffer = Vec::new();
        assert!(matches!(
            encode(&recording, &mut buffer, Format::Pickle),
            Err(RecordingError::UnsupportedFormat { .. })
        ));
        assert!(buffer.is_empty());
    }

    #[cfg(feature = "pickle")]
    #[test]
    fn test_import_pickle_file() {
        // pickle.dumps({'data': [(500, 1.0, 2.0, 3.0, 0.0, 0.0, 0.0)]}, protocol=2)
        let bytes: &[u8] = b"\x80\x02}q\x00X\x04\x00\x00\x00dataq\x01]q\x02(M\xf4\x01G?\xf0\x00\x00\x00\x00\x00\x00G@\x00\x00\x00\x00\x00\x00\x00G@\x08\x00\x00\x00\x00\x00\x00G\x00\x00\x00\x00\x00\x00\x00\x00G\x00\x00\x00\x00\x00\x00\x00\x00G\x00\x00\x00\x00\x00\x00\x00\x00tq\x03as.";
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy-run.PKL");
        std::fs::write(&path, bytes).unwrap();

        let recording = import_recording(&path, None).unwrap();
        assert_eq!(recording.sample_count(), 1);
        assert_eq!(recording.first_time_offset(), 500);
        assert_eq!(recording.get(0).unwrap().force.z, 3.0);
        assert_eq!(recording.name(), "legacy-run");
    }

    #[cfg(not(feature = "pickle"))]
    #[test]
    fn test_pickle_disabled() {
        assert!(matches!(
            CodecConfig::default().format_for_extension("pkl"),
            Err(RecordingError::UnsupportedFormat { .. })
        ));
    }
}
