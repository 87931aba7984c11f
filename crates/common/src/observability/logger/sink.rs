use std::fmt::Debug;
use std::io::Write;

use parking_lot::Mutex;

use super::record::LogRecord;
use super::render::RenderedRecord;

/// Destination for rendered records.
///
/// Implementations must not panic; write failures are dropped.
pub trait LogSink: Send + Sync + Debug {
    fn emit(&self, record: &LogRecord, rendered: &RenderedRecord);
}

/// Writes rendered records to standard error.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl LogSink for StderrSink {
    fn emit(&self, _record: &LogRecord, rendered: &RenderedRecord) {
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "{}", rendered.to_text());
    }
}

/// A record captured by [`MemorySink`].
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRecord {
    pub record: LogRecord,
    pub rendered: RenderedRecord,
}

/// Keeps every emitted record in memory.
///
/// Used by tests and by in-app log viewers.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<CapturedRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Snapshot of the captured records, oldest first.
    pub fn records(&self) -> Vec<LogRecord> {
        self.entries.lock().iter().map(|entry| entry.record.clone()).collect()
    }

    /// Snapshot of the captured records together with their rendering.
    pub fn captured(&self) -> Vec<CapturedRecord> {
        self.entries.lock().clone()
    }
}

impl LogSink for MemorySink {
    fn emit(&self, record: &LogRecord, rendered: &RenderedRecord) {
        self.entries
            .lock()
            .push(CapturedRecord { record: record.clone(), rendered: rendered.clone() });
    }
}
