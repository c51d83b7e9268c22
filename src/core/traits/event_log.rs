use crate::core::errors::Result;
use crate::core::models::log_record::LogRecord;

/// Port for the append-only event log.
///
/// Line order is the only ordering signal: a record's position defines its
/// logical time relative to every other record.
pub trait EventLog: Send + Sync {
    /// Append one record to the end of the log.
    fn append(&self, record: &LogRecord) -> Result<()>;

    /// Return every record after the last one matching `is_marker`, in log
    /// order. With no matching record the whole log is returned.
    fn scan_since(&self, is_marker: fn(&LogRecord) -> bool) -> Result<Vec<LogRecord>>;

    /// Scan like [`EventLog::scan_since`] and append whatever `build` returns,
    /// holding the log exclusively across both steps. Returns the appended
    /// record, if any.
    fn scan_and_append(
        &self,
        is_marker: fn(&LogRecord) -> bool,
        build: &mut dyn FnMut(&[LogRecord]) -> Option<LogRecord>,
    ) -> Result<Option<LogRecord>>;
}

/// Records after the last marker in `records`.
///
/// Shared by every `EventLog` backend so the "last marker, then filter" rule
/// is implemented once.
pub fn after_last_marker(
    records: Vec<LogRecord>,
    is_marker: fn(&LogRecord) -> bool,
) -> Vec<LogRecord> {
    match records.iter().rposition(is_marker) {
        Some(idx) => records.into_iter().skip(idx + 1).collect(),
        None => records,
    }
}
