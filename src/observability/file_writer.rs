//! Rotating log file writer with size-based rotation and backup retention.
//!
//! The writer is handed to the `tracing-subscriber` fmt layer. The layer
//! formats each event into one buffer and writes it in a single call, so a
//! rotation never splits a line.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Maximum file size before rotation (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
const MAX_BACKUP_FILES: usize = 3;

/// Cloneable handle to a size-rotated log file.
///
/// All clones share one file handle behind a `Mutex`.
///
/// # Rotation Strategy
///
/// 1. Check file size before each write
/// 2. If the size exceeds the limit, rename the file to
///    `<name>.<YYYYmmddHHMMSS>` and start a new one
/// 3. Remove the oldest backups beyond the retention limit
#[derive(Clone)]
pub struct RotatingFileWriter {
    shared: Arc<Shared>,
}

struct Shared {
    file_path: PathBuf,
    max_bytes: u64,
    file: Mutex<Option<fs::File>>,
}

impl RotatingFileWriter {
    /// Creates a writer for `file_path`. The file is opened on first write.
    #[must_use]
    pub fn new(file_path: PathBuf) -> Self {
        Self::with_limit(file_path, MAX_FILE_SIZE_BYTES)
    }

    fn with_limit(file_path: PathBuf, max_bytes: u64) -> Self {
        Self {
            shared: Arc::new(Shared {
                file_path,
                max_bytes,
                file: Mutex::new(None),
            }),
        }
    }

    fn write_record(&self, buf: &[u8]) -> std::io::Result<()> {
        let shared = &self.shared;
        let mut file = shared
            .file
            .lock()
            .map_err(|e| std::io::Error::other(format!("Mutex poisoned: {e}")))?;

        if fs::metadata(&shared.file_path).is_ok_and(|m| m.len() > shared.max_bytes) {
            *file = None;
            shared.rotate()?;
        }

        if file.is_none() {
            *file = Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&shared.file_path)?,
            );
        }

        let handle = file
            .as_mut()
            .ok_or_else(|| std::io::Error::other("No file available"))?;
        handle.write_all(buf)?;
        handle.flush()
    }
}

impl Shared {
    fn rotate(&self) -> std::io::Result<()> {
        let stamp = chrono::Utc::now().format("%Y%m%d%H%M%S").to_string();

        if self.file_path.exists() {
            fs::rename(&self.file_path, self.free_backup_path(&stamp))?;
        }

        self.cleanup_old_backups();
        Ok(())
    }

    /// First unused backup path for `stamp`: `<name>.<stamp>`, then
    /// `<name>.<stamp>.1`, `<name>.<stamp>.2`, ...
    fn free_backup_path(&self, stamp: &str) -> PathBuf {
        let base = self.backup_prefix().map_or_else(
            || self.file_path.with_extension(format!("log.{stamp}")),
            |prefix| self.file_path.with_file_name(format!("{prefix}{stamp}")),
        );

        let mut candidate = base.clone();
        let mut counter = 0u32;
        while candidate.exists() {
            counter += 1;
            let mut name = base.clone().into_os_string();
            name.push(format!(".{counter}"));
            candidate = PathBuf::from(name);
        }
        candidate
    }

    /// `"<file name>."`, the prefix every backup of this file starts with.
    fn backup_prefix(&self) -> Option<String> {
        self.file_path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| format!("{name}."))
    }

    /// Deletes backups beyond the retention limit, newest kept.
    ///
    /// Individual deletion failures are ignored.
    fn cleanup_old_backups(&self) {
        let (Some(parent), Some(prefix)) = (self.file_path.parent(), self.backup_prefix()) else {
            return;
        };
        let Ok(entries) = fs::read_dir(parent) else {
            return;
        };

        let mut backups: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect();

        // Timestamp suffixes sort chronologically.
        backups.sort_unstable_by(|a, b| b.cmp(a));

        for old_backup in backups.iter().skip(MAX_BACKUP_FILES) {
            let _ = fs::remove_file(old_backup);
        }
    }
}

impl Write for RotatingFileWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.write_record(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl std::fmt::Debug for RotatingFileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFileWriter")
            .field("file_path", &self.shared.file_path)
            .finish_non_exhaustive()
    }
}
