use std::collections::BTreeSet;

use crate::core::errors::Result;
use crate::core::models::log_record::LogRecord;
use crate::core::traits::event_log::EventLog;

/// Deduplicated, lexicographically sorted files of the `FileModified`
/// records in `records`. Markers are ignored.
pub fn pending_files(records: &[LogRecord]) -> Vec<String> {
    records
        .iter()
        .filter_map(|record| match record {
            LogRecord::FileModified { file, .. } => Some(file.as_str()),
            LogRecord::ReviewTriggered { .. } => None,
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Files modified since the last review marker, without recording anything.
pub fn peek_pending(log: &dyn EventLog) -> Result<Vec<String>> {
    let records = log.scan_since(LogRecord::is_marker)?;
    Ok(pending_files(&records))
}

/// Compute the pending set and, when it is non-empty, append a
/// `ReviewTriggered` marker carrying it.
///
/// The scan and the marker append happen under one exclusive hold of the
/// log, so a concurrent write is either included in the marker or stays
/// pending for the next call. Returns `None` when nothing is pending.
pub fn trigger_review(log: &dyn EventLog) -> Result<Option<Vec<String>>> {
    let mut pending = Vec::new();
    let appended = log.scan_and_append(LogRecord::is_marker, &mut |records| {
        pending = pending_files(records);
        if pending.is_empty() {
            None
        } else {
            Some(LogRecord::review_triggered(pending.clone()))
        }
    })?;

    Ok(appended.map(|_| pending))
}
