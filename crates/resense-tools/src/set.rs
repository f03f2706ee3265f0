//! # 录制集合
//!
//! 多个录制的有序集合，按目录批量持久化（每个录制一个 `.rsa` 文件）

use crate::codec::{Format, archive};
use crate::error::Result;
use crate::recording::Recording;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// 录制集合
///
/// 集合按值持有录制；加入集合即转移所有权。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSet {
    recordings: Vec<Recording>,
}

impl RecordingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加录制
    pub fn add_recording(&mut self, recording: Recording) {
        self.recordings.push(recording);
    }

    /// 合并另一个集合的所有录制（保持顺序）
    pub fn add_recordings(&mut self, other: RecordingSet) {
        self.recordings.extend(other.recordings);
    }

    /// 统一命名：`<name>-0`, `<name>-1`, ...
    pub fn set_recording_names(&mut self, name: &str) {
        for (i, recording) in self.recordings.iter_mut().enumerate() {
            recording.set_name(format!("{}-{}", name, i));
        }
    }

    pub fn recordings(&self) -> &[Recording] {
        &self.recordings
    }

    pub fn recording_count(&self) -> usize {
        self.recordings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recordings.is_empty()
    }

    /// 获取第 n 个录制，越界返回 `None`
    pub fn get(&self, index: usize) -> Option<&Recording> {
        self.recordings.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recording> {
        self.recordings.iter()
    }

    /// 保存到目录
    ///
    /// 目录不存在时自动创建。文件名为录制名，未命名的录制依次命名为
    /// `unnamed-0`, `unnamed-1`, ...。本次保存中重名（不区分大小写）的录制
    /// 追加 `-1`, `-2`, ... 后缀，每个录制都写入独立的文件。
    /// 逐个写入，失败时已写入的文件保留。
    ///
    /// # 返回
    ///
    /// 按集合顺序写入的文件路径
    pub fn save<P: AsRef<Path>>(&self, folder: P) -> Result<Vec<PathBuf>> {
        let folder = folder.as_ref();
        fs::create_dir_all(folder)?;

        let mut names = FileNames::default();
        let mut paths = Vec::with_capacity(self.recordings.len());
        for recording in &self.recordings {
            let file_name = names.allocate(recording.name());

            let path = folder.join(format!("{}.{}", file_name, Format::Archive.extension()));
            debug!("Saving recording to {}", path.display());

            let mut writer = BufWriter::new(File::create(&path)?);
            archive::encode(recording, &mut writer)?;
            writer.flush()?;

            paths.push(path);
        }

        info!(
            "Saved {} recordings to {}",
            self.recordings.len(),
            folder.display()
        );
        Ok(paths)
    }

    /// 从目录加载所有录制并追加到集合
    ///
    /// 只枚举目录下的普通文件（不递归）；顺序取决于文件系统，如需稳定顺序请按名称排序。
    /// 录制名取文件名（不含扩展名）。
    ///
    /// 尽力而为：遇到无法读取的文件时返回错误，但之前已加载的录制保留在集合中。
    ///
    /// # 返回
    ///
    /// 本次加载的录制数量
    pub fn load<P: AsRef<Path>>(&mut self, folder: P) -> Result<usize> {
        let folder = folder.as_ref();
        let mut loaded = 0;

        for entry in fs::read_dir(folder)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let path = entry.path();
            debug!("Loading recording from {}", path.display());

            let mut recording = match archive::decode(BufReader::new(File::open(&path)?)) {
                Ok(recording) => recording,
                Err(e) => {
                    warn!(
                        "Failed to load {} ({} recordings already loaded): {}",
                        path.display(),
                        loaded,
                        e
                    );
                    return Err(e);
                },
            };

            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                recording.set_name(stem);
            }
            self.add_recording(recording);
            loaded += 1;
        }

        info!("Loaded {} recordings from {}", loaded, folder.display());
        Ok(loaded)
    }
}

/// 一次保存中已分配的文件名
#[derive(Default)]
struct FileNames {
    used: HashSet<String>,
    unnamed_index: usize,
}

impl FileNames {
    /// 分配一个本次保存中未使用的文件名（不含扩展名）
    fn allocate(&mut self, name: &str) -> String {
        let file_name = if name.is_empty() {
            loop {
                let candidate = format!("unnamed-{}", self.unnamed_index);
                self.unnamed_index += 1;
                if !self.is_used(&candidate) {
                    break candidate;
                }
            }
        } else if !self.is_used(name) {
            name.to_string()
        } else {
            let candidate = (1..)
                .map(|n| format!("{}-{}", name, n))
                .find(|candidate| !self.is_used(candidate))
                .unwrap_or_default();
            warn!("Duplicate recording name {:?}, saving as {:?}", name, candidate);
            candidate
        };

        self.used.insert(file_name.to_lowercase());
        file_name
    }

    // 大小写不敏感的文件系统上 `Run` 和 `run` 是同一个文件
    fn is_used(&self, name: &str) -> bool {
        self.used.contains(&name.to_lowercase())
    }
}

impl From<Vec<Recording>> for RecordingSet {
    fn from(recordings: Vec<Recording>) -> Self {
        Self { recordings }
    }
}

impl<'a> IntoIterator for &'a RecordingSet {
    type Item = &'a Recording;
    type IntoIter = std::slice::Iter<'a, Recording>;

    fn into_iter(self) -> Self::IntoIter {
        self.recordings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordingError;
    use crate::recording::tests::uniform_recording;

    fn named(name: &str, count: usize) -> Recording {
        let mut recording = uniform_recording(count, 1000, 0);
        recording.set_name(name);
        recording
    }

    #[test]
    fn test_add_and_merge() {
        let mut set = RecordingSet::new();
        set.add_recording(named("a", 2));

        let other = RecordingSet::from(vec![named("b", 3), named("c", 4)]);
        set.add_recordings(other);

        assert_eq!(set.recording_count(), 3);
        let names: Vec<&str> = set.iter().map(|r| r.name()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert!(set.get(3).is_none());
    }

    #[test]
    fn test_set_recording_names() {
        let mut set = RecordingSet::from(vec![named("x", 2), named("", 2)]);
        set.set_recording_names("trial");
        assert_eq!(set.get(0).unwrap().name(), "trial-0");
        assert_eq!(set.get(1).unwrap().name(), "trial-1");
    }

    #[test]
    fn test_save_names_unnamed_sequentially() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("nested").join("set");

        let set = RecordingSet::from(vec![named("", 2), named("grip", 3), named("", 4)]);
        let paths = set.save(&folder).unwrap();

        let names: Vec<String> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["unnamed-0.rsa", "grip.rsa", "unnamed-1.rsa"]);
        assert!(paths.iter().all(|p| p.is_file()));
    }

    #[test]
    fn test_save_duplicate_names_get_distinct_files() {
        let dir = tempfile::tempdir().unwrap();
        let set = RecordingSet::from(vec![
            named("run", 2),
            named("run", 7),
            named("unnamed-0", 1),
            named("", 3),
            named("RUN", 4),
        ]);
        let paths = set.save(dir.path()).unwrap();

        let names: Vec<String> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            ["run.rsa", "run-1.rsa", "unnamed-0.rsa", "unnamed-1.rsa", "RUN-2.rsa"]
        );

        let mut loaded = RecordingSet::new();
        assert_eq!(loaded.load(dir.path()).unwrap(), 5);

        let mut counts: Vec<usize> = loaded.iter().map(|r| r.sample_count()).collect();
        counts.sort();
        assert_eq!(counts, [1, 2, 3, 4, 7]);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let set = RecordingSet::from(vec![named("a", 2), named("b", 3), named("", 5)]);
        set.save(dir.path()).unwrap();

        let mut loaded = RecordingSet::new();
        assert_eq!(loaded.load(dir.path()).unwrap(), 3);

        let mut by_name: Vec<(String, usize)> = loaded
            .iter()
            .map(|r| (r.name().to_string(), r.sample_count()))
            .collect();
        by_name.sort();
        assert_eq!(
            by_name,
            [
                ("a".to_string(), 2),
                ("b".to_string(), 3),
                ("unnamed-0".to_string(), 5)
            ]
        );
    }

    #[test]
    fn test_load_skips_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        RecordingSet::from(vec![named("only", 2)]).save(dir.path()).unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let mut set = RecordingSet::new();
        assert_eq!(set.load(dir.path()).unwrap(), 1);
    }

    #[test]
    fn test_load_partial_failure_keeps_loaded() {
        let dir = tempfile::tempdir().unwrap();
        RecordingSet::from(vec![named("good", 2)]).save(dir.path()).unwrap();
        std::fs::write(dir.path().join("broken.rsa"), b"garbage!!").unwrap();

        let mut set = RecordingSet::new();
        set.add_recording(named("existing", 2));
        let result = set.load(dir.path());

        assert!(matches!(result, Err(RecordingError::Format(_))));
        // 原有录制保留；good.rsa 是否已加载取决于枚举顺序
        assert!(set.recording_count() >= 1);
        assert_eq!(set.get(0).unwrap().name(), "existing");
    }

    #[test]
    fn test_load_missing_folder() {
        let mut set = RecordingSet::new();
        assert!(matches!(
            set.load("/nonexistent/recordings"),
            Err(RecordingError::Io(_))
        ));
    }
}
