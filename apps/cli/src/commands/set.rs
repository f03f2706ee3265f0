//! set 命令
//!
//! 录制集合的目录持久化（每个录制一个 `.rsa` 文件）

use crate::utils::{format_secs, load_recording};
use anyhow::{Context, Result};
use clap::Subcommand;
use resense_tools::RecordingSet;
use std::path::PathBuf;

/// set 命令
#[derive(Subcommand, Debug)]
pub enum SetCommand {
    /// 把多个录制文件保存为集合目录
    Save {
        /// 集合目录
        folder: PathBuf,

        /// 录制文件
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// 统一命名为 `<name>-0`, `<name>-1`, ...
        #[arg(short, long)]
        name: Option<String>,
    },

    /// 加载集合目录并列出其中的录制
    Load {
        /// 集合目录
        folder: PathBuf,
    },
}

impl SetCommand {
    pub fn execute(self) -> Result<()> {
        match self {
            SetCommand::Save {
                folder,
                inputs,
                name,
            } => Self::save_(folder, inputs, name),
            SetCommand::Load { folder } => Self::load_(folder),
        }
    }

    fn save_(folder: PathBuf, inputs: Vec<PathBuf>, name: Option<String>) -> Result<()> {
        let mut set = RecordingSet::new();
        for input in &inputs {
            set.add_recording(load_recording(input, None)?);
        }

        if let Some(name) = name {
            set.set_recording_names(&name);
        }

        let paths = set
            .save(&folder)
            .with_context(|| format!("Failed to save recording set: {}", folder.display()))?;

        println!("✅ 已保存 {} 个录制到 {}", paths.len(), folder.display());
        for path in paths {
            println!("   {}", path.display());
        }
        Ok(())
    }

    fn load_(folder: PathBuf) -> Result<()> {
        let mut set = RecordingSet::new();
        set.load(&folder)
            .with_context(|| format!("Failed to load recording set: {}", folder.display()))?;

        let mut recordings: Vec<_> = set.iter().collect();
        recordings.sort_by(|a, b| a.name().cmp(b.name()));

        println!("📁 {}: {} 个录制", folder.display(), recordings.len());
        for recording in recordings {
            println!(
                "   {}: {} 个样本, {}",
                recording.name(),
                recording.sample_count(),
                format_secs(recording.duration_us())
            );
        }
        Ok(())
    }
}
