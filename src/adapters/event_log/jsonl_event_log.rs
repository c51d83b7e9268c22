use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::core::errors::{Result, ReviewError};
use crate::core::models::log_record::LogRecord;
use crate::core::traits::event_log::{EventLog, after_last_marker};

/// Event log that appends records as JSON lines to a file.
///
/// Each line in the log file is a self-contained JSON object representing
/// one `LogRecord`. Every operation holds an exclusive advisory lock on a
/// sibling `.lock` file, so appends from concurrent hook processes are
/// serialized. The lock only binds processes that take it; nothing stops a
/// foreign writer from appending directly.
pub struct JsonlEventLog {
    log_path: PathBuf,
    lock_path: PathBuf,
}

impl JsonlEventLog {
    /// Create a log backed by `log_path`, locked through `{log_path}.lock`.
    pub fn new(log_path: PathBuf) -> Self {
        let mut lock_name = OsString::from(log_path.as_os_str());
        lock_name.push(".lock");
        Self {
            lock_path: PathBuf::from(lock_name),
            log_path,
        }
    }

    /// Return the file path this log writes to.
    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Run `operation` while holding the log's exclusive lock.
    ///
    /// Blocks until the lock is free, with no timeout. The lock is released
    /// when the handle is dropped, including on early return.
    pub fn locked<T>(&self, operation: impl FnOnce() -> Result<T>) -> Result<T> {
        self.ensure_parent_dir()?;

        let lock_file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&self.lock_path)
            .map_err(|e| self.error(format!("cannot open lock file: {e}")))?;

        FileExt::lock_exclusive(&lock_file)
            .map_err(|e| self.error(format!("cannot acquire lock: {e}")))?;

        let result = operation();
        drop(lock_file);
        result
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.log_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)
                .map_err(|e| self.error(format!("cannot create log directory: {e}")))?;
        }
        Ok(())
    }

    /// Read every parseable record. Blank and malformed lines are skipped.
    fn read_records(&self) -> Result<Vec<LogRecord>> {
        let bytes = match fs::read(&self.log_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.error(format!("cannot read log: {e}"))),
        };

        let mut records = Vec::new();
        for (line_num, line) in bytes.split(|b| *b == b'\n').enumerate() {
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            match serde_json::from_slice::<LogRecord>(line) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::debug!(
                        "skipping malformed line {} in {}: {e}",
                        line_num + 1,
                        self.log_path.display()
                    );
                }
            }
        }

        Ok(records)
    }

    fn write_record(&self, record: &LogRecord) -> Result<()> {
        let mut line = serde_json::to_string(record)
            .map_err(|e| self.error(format!("cannot serialize record: {e}")))?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| self.error(format!("cannot open log: {e}")))?;

        file.write_all(line.as_bytes())
            .map_err(|e| self.error(format!("cannot write record: {e}")))?;

        Ok(())
    }

    fn error(&self, detail: String) -> ReviewError {
        ReviewError::EventLog {
            path: self.log_path.clone(),
            detail,
        }
    }
}

impl EventLog for JsonlEventLog {
    fn append(&self, record: &LogRecord) -> Result<()> {
        self.locked(|| self.write_record(record))
    }

    fn scan_since(&self, is_marker: fn(&LogRecord) -> bool) -> Result<Vec<LogRecord>> {
        // Nothing to lock against and no directory to create yet.
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }
        let records = self.locked(|| self.read_records())?;
        Ok(after_last_marker(records, is_marker))
    }

    fn scan_and_append(
        &self,
        is_marker: fn(&LogRecord) -> bool,
        build: &mut dyn FnMut(&[LogRecord]) -> Option<LogRecord>,
    ) -> Result<Option<LogRecord>> {
        // A missing log is empty; only take the lock (and create its
        // directory) when there is something to write.
        if !self.log_path.exists() && build(&[]).is_none() {
            return Ok(None);
        }
        self.locked(|| {
            let pending = after_last_marker(self.read_records()?, is_marker);
            match build(&pending) {
                Some(record) => {
                    self.write_record(&record)?;
                    Ok(Some(record))
                }
                None => Ok(None),
            }
        })
    }
}
