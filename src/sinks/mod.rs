//! Emission boundaries for encoded records.

use std::io::{self, Write};

/// Destination for encoded log records.
///
/// Implementations receive one complete JSON line per record and decide
/// where it goes. `write_line` is called from whatever thread emits, so
/// implementations must be safe to share.
pub trait Sink: Send + Sync {
    /// Writes one encoded record.
    fn write_line(&self, line: &str);
}

/// Sink that writes each record to standard output.
///
/// The stream lock is held per line, so concurrent handles interleave at
/// record granularity. A write failure is reported on standard error and
/// never reaches the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl StdoutSink {
    /// Creates a new stdout sink.
    pub fn new() -> Self {
        Self
    }
}

impl Sink for StdoutSink {
    fn write_line(&self, line: &str) {
        let mut handle = io::stdout().lock();
        if let Err(err) = writeln!(handle, "{}", line) {
            eprintln!(
                "integrations-logging: failed to write record to stdout: {}",
                err
            );
        }
    }
}

/// Sink that discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl NoopSink {
    /// Creates a new discarding sink.
    pub fn new() -> Self {
        Self
    }
}

impl Sink for NoopSink {
    fn write_line(&self, _line: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_sink_accepts_lines() {
        let sink = NoopSink::new();
        sink.write_line("{\"level\":\"INFO\"}");
        sink.write_line("");
    }

    #[test]
    fn test_sinks_are_shareable() {
        fn assert_sink<S: Sink>(_sink: &S) {}

        assert_sink(&StdoutSink::new());
        assert_sink(&NoopSink::new());
    }
}
