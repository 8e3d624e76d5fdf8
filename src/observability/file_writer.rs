//! Append-only line writer with size-based rotation.
//!
//! Before each write the current file's size is checked. Once it exceeds the
//! limit, backups shift up by one (`.2` becomes `.3`, `.1` becomes `.2`), the
//! current file becomes `.1`, and the oldest backup beyond the retention count
//! is dropped. `.1` is therefore always the newest backup.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Size and retention limits for a [`FileWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Rotate once the file grows past this many bytes.
    pub max_bytes: u64,
    /// Numbered backups kept after rotation.
    pub backups: usize,
}

impl Default for RotationPolicy {
    /// 10 MB, three backups.
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            backups: 3,
        }
    }
}

/// Thread-safe rotating line writer.
///
/// The file is opened lazily on the first write, so construction cannot fail.
pub struct FileWriter {
    file_path: PathBuf,
    policy: RotationPolicy,
    writer: Mutex<Option<File>>,
}

impl FileWriter {
    pub const fn new(file_path: PathBuf, policy: RotationPolicy) -> Self {
        Self {
            file_path,
            policy,
            writer: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from rotating, opening or writing, or an error
    /// if a previous writer panicked while holding the lock.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| io::Error::other(format!("Mutex poisoned: {e}")))?;

        if self.needs_rotation() {
            *writer = None;
            self.rotate()?;
        }

        if writer.is_none() {
            *writer = Some(OpenOptions::new().create(true).append(true).open(&self.file_path)?);
        }
        let file = writer.as_mut().ok_or_else(|| io::Error::other("trace file not open"))?;

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.file_path).is_ok_and(|metadata| metadata.len() > self.policy.max_bytes)
    }

    fn rotate(&self) -> io::Result<()> {
        if self.policy.backups == 0 {
            return fs::remove_file(&self.file_path);
        }

        let oldest = self.backup_path(self.policy.backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }

        for index in (1..self.policy.backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }

        fs::rename(&self.file_path, self.backup_path(1))
    }

    /// Path of the `index`th backup, e.g. `stockroom-otlp.json.2`.
    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self
            .file_path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(format!(".{index}"));
        self.file_path.with_file_name(name)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_writer(dir: &Path) -> FileWriter {
        FileWriter::new(
            dir.join("trace.json"),
            RotationPolicy {
                max_bytes: 10,
                backups: 2,
            },
        )
    }

    fn read(path: PathBuf) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let writer = small_writer(dir.path());
        writer.write_line("a").unwrap();
        writer.write_line("b").unwrap();
        assert_eq!(read(writer.path().to_path_buf()), "a\nb\n");
    }

    #[test]
    fn rotates_with_newest_backup_first() {
        let dir = tempfile::tempdir().unwrap();
        let writer = small_writer(dir.path());

        writer.write_line("first-line-over-ten").unwrap();
        writer.write_line("second-line-over-ten").unwrap();
        writer.write_line("third").unwrap();

        assert_eq!(read(writer.path().to_path_buf()), "third\n");
        assert_eq!(read(dir.path().join("trace.json.1")), "second-line-over-ten\n");
        assert_eq!(read(dir.path().join("trace.json.2")), "first-line-over-ten\n");
    }

    #[test]
    fn keeps_only_configured_backups() {
        let dir = tempfile::tempdir().unwrap();
        let writer = small_writer(dir.path());

        for i in 0..6 {
            writer.write_line(&format!("line-number-{i}-padding")).unwrap();
        }

        assert!(dir.path().join("trace.json.1").exists());
        assert!(dir.path().join("trace.json.2").exists());
        assert!(!dir.path().join("trace.json.3").exists());
        assert_eq!(read(dir.path().join("trace.json.1")), "line-number-4-padding\n");
    }

    #[test]
    fn default_policy() {
        let policy = RotationPolicy::default();
        assert_eq!(policy.max_bytes, 10 * 1024 * 1024);
        assert_eq!(policy.backups, 3);
    }
}
