//! 配置管理命令
//!
//! 用于管理 CLI 配置（默认导出格式、标定矩阵文件）

use anyhow::{Context, Result};
use clap::Subcommand;
use resense_tools::{CalibrationMatrix, CodecConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// 覆盖配置目录的环境变量
const CONFIG_DIR_ENV: &str = "RESENSE_CONFIG_DIR";

/// 配置目录：`$RESENSE_CONFIG_DIR`，否则 `<config_dir>/resense`
fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    let mut path = dirs::config_dir().context("Unable to determine config directory")?;
    path.push("resense");
    Ok(path)
}

fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// CLI 配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// 输出路径没有扩展名时使用的格式（如 `csv`、`bin`）
    pub default_format: Option<String>,

    /// 默认标定矩阵文件
    pub calibration: Option<PathBuf>,
}

impl CliConfig {
    /// 加载配置，文件不存在时返回默认配置
    pub fn load() -> Result<Self> {
        let path = config_file()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// 保存配置
    pub fn save(&self) -> Result<()> {
        let path = config_file()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string(self).context("Failed to serialize config")?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}

/// 配置命令
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// 设置配置项
    Set {
        /// 默认导出格式（csv, bin, dat, json, rsa）
        #[arg(short, long)]
        format: Option<String>,

        /// 默认标定矩阵文件
        #[arg(short, long)]
        calibration: Option<PathBuf>,
    },

    /// 获取配置项
    Get {
        /// 配置项名称（default_format, calibration, all）
        #[arg(default_value = "all")]
        key: String,
    },

    /// 检查配置
    Check,
}

impl ConfigCommand {
    pub fn execute(self) -> Result<()> {
        match self {
            ConfigCommand::Set {
                format,
                calibration,
            } => Self::set_(format, calibration),

            ConfigCommand::Get { key } => Self::get_(&key),

            ConfigCommand::Check => Self::check_(),
        }
    }

    fn set_(format: Option<String>, calibration: Option<PathBuf>) -> Result<()> {
        let mut config = CliConfig::load()?;

        if let Some(format) = format {
            // 只接受已知且可写出的格式
            let resolved = CodecConfig::default().format_for_extension(&format)?;
            anyhow::ensure!(resolved.can_encode(), "Format {} is read-only", format);
            println!("✅ 设置默认格式: {}", format);
            config.default_format = Some(format);
        }

        if let Some(calibration) = calibration {
            println!("✅ 设置标定矩阵: {}", calibration.display());
            config.calibration = Some(calibration);
        }

        config.save()
    }

    fn get_(key: &str) -> Result<()> {
        let config = CliConfig::load()?;

        match key {
            "default_format" => match config.default_format {
                Some(format) => println!("{}", format),
                None => println!("(未设置)"),
            },

            "calibration" => match config.calibration {
                Some(path) => println!("{}", path.display()),
                None => println!("(未设置)"),
            },

            _ => {
                println!("Resense CLI 配置:");
                println!("  默认格式: {:?}", config.default_format);
                println!("  标定矩阵: {:?}", config.calibration);
            },
        }

        Ok(())
    }

    fn check_() -> Result<()> {
        let config = CliConfig::load()?;
        let path = config_file()?;

        println!("配置文件: {}", path.display());

        match config.default_format.as_deref() {
            Some(format) => match CodecConfig::default().format_for_extension(format) {
                Ok(_) => println!("  ✅ 默认格式: {}", format),
                Err(e) => println!("  ❌ 默认格式: {}", e),
            },
            None => println!("  默认格式: (未设置)"),
        }

        match config.calibration.as_deref() {
            Some(path) => match CalibrationMatrix::from_file(path) {
                Ok(_) => println!("  ✅ 标定矩阵: {}", path.display()),
                Err(e) => println!("  ❌ 标定矩阵: {} ({})", path.display(), e),
            },
            None => println!("  标定矩阵: (未设置，使用单位矩阵)"),
        }

        Ok(())
    }
}
