//! Rotating trace file writer.
//!
//! Appends one line per export and rotates the file once it grows past a size
//! limit, keeping a bounded number of backups so traces never fill the disk.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// When to rotate and how many rotated files to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Rotate once the live file is larger than this.
    pub max_bytes: u64,
    /// Rotated files kept next to the live one; older ones are deleted.
    pub max_backups: usize,
}

impl Default for RotationPolicy {
    /// 10 MB per file, 3 backups.
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            max_backups: 3,
        }
    }
}

/// Thread-safe, size-rotating line writer.
///
/// # Rotation Strategy
///
/// 1. Check the live file's size before each write
/// 2. Past `max_bytes`, rename it to `<name>.<n>` where `n` increases with
///    every rotation
/// 3. Delete the oldest backups beyond `max_backups`
///
/// The file is opened lazily on the first write, so constructing a writer for
/// an unwritable location succeeds and only exports fail.
pub struct FileWriter {
    file_path: PathBuf,
    policy: RotationPolicy,
    writer: Mutex<Option<File>>,
}

impl FileWriter {
    pub fn new(file_path: PathBuf) -> Self {
        Self::with_policy(file_path, RotationPolicy::default())
    }

    pub const fn with_policy(file_path: PathBuf, policy: RotationPolicy) -> Self {
        Self {
            file_path,
            policy,
            writer: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline and flushes.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors while rotating, opening or writing, or when the
    /// lock was poisoned by a panicking writer.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("writer lock poisoned: {e}")))?;

        if self.needs_rotation() {
            *writer = None;
            self.rotate()?;
        }

        if writer.is_none() {
            *writer = Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.file_path)?,
            );
        }
        let Some(file) = writer.as_mut() else {
            return Err(io::Error::new(io::ErrorKind::Other, "trace file unavailable"));
        };

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.file_path).is_ok_and(|m| m.len() > self.policy.max_bytes)
    }

    fn rotate(&self) -> io::Result<()> {
        let mut backups = self.backups()?;
        let next = backups.last().map_or(1, |(n, _)| n + 1);

        fs::rename(&self.file_path, self.backup_path(next))?;
        backups.push((next, self.backup_path(next)));

        let excess = backups.len().saturating_sub(self.policy.max_backups);
        for (_, old) in backups.iter().take(excess) {
            // A backup we cannot delete is retried on the next rotation.
            let _ = fs::remove_file(old);
        }
        Ok(())
    }

    /// Existing backups, oldest first.
    fn backups(&self) -> io::Result<Vec<(u64, PathBuf)>> {
        let Some(name) = self.file_path.file_name().and_then(|n| n.to_str()) else {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "trace file has no name"));
        };
        let prefix = format!("{name}.");
        let dir = self.file_path.parent().unwrap_or_else(|| Path::new("."));

        let mut backups: Vec<(u64, PathBuf)> = fs::read_dir(dir)?
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let file_name = entry.file_name();
                let n = file_name.to_str()?.strip_prefix(&prefix)?.parse::<u64>().ok()?;
                Some((n, entry.path()))
            })
            .collect();

        backups.sort_unstable_by_key(|(n, _)| *n);
        Ok(backups)
    }

    fn backup_path(&self, n: u64) -> PathBuf {
        let mut name = self.file_path.clone().into_os_string();
        name.push(format!(".{n}"));
        PathBuf::from(name)
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
