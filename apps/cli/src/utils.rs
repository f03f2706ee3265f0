//! 命令共用的文件读写辅助

use crate::commands::config::CliConfig;
use anyhow::{Context, Result};
use resense_tools::codec::extension_of;
use resense_tools::{Recording, export_recording, import_recording};
use std::path::Path;

/// 导入录制（格式由 `from` 或扩展名决定）
pub fn load_recording(path: &Path, from: Option<&str>) -> Result<Recording> {
    import_recording(path, from)
        .with_context(|| format!("Failed to import recording: {}", path.display()))
}

/// 导出录制
///
/// 优先使用 `to`；输出路径没有扩展名时回退到配置中的 `default_format`。
pub fn save_recording(recording: &Recording, path: &Path, to: Option<&str>) -> Result<()> {
    let fallback = match to {
        Some(_) => None,
        None if extension_of(path).is_ok() => None,
        None => CliConfig::load()?.default_format,
    };
    let extension = to.or(fallback.as_deref());

    export_recording(recording, path, extension)
        .with_context(|| format!("Failed to export recording: {}", path.display()))
}

/// 以秒为单位格式化微秒时长
pub fn format_secs(micros: i64) -> String {
    format!("{:.6} s", micros as f64 * 1e-6)
}
