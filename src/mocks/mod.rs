//! Mock implementations for testing.

use parking_lot::Mutex;
use serde_json::Value;

use crate::sinks::Sink;

/// Sink that retains every encoded record in memory.
///
/// Share one with a logger through an `Arc`, emit, then assert on the
/// captured lines. Lines arrive exactly as [`StdoutSink`](crate::sinks::StdoutSink)
/// would have written them.
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Creates an empty capture sink.
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(Vec::new()),
        }
    }

    /// Returns all captured lines in emission order.
    pub fn get_lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Returns all captured lines parsed as JSON, skipping any line that is
    /// not a valid JSON document.
    pub fn get_records(&self) -> Vec<Value> {
        self.lines
            .lock()
            .iter()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    /// Returns the most recently captured line, parsed as JSON.
    pub fn last_record(&self) -> Option<Value> {
        self.lines
            .lock()
            .last()
            .and_then(|line| serde_json::from_str(line).ok())
    }

    /// Returns the number of captured lines.
    pub fn line_count(&self) -> usize {
        self.lines.lock().len()
    }

    /// Discards all captured lines.
    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for MemorySink {
    fn write_line(&self, line: &str) {
        self.lines.lock().push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_captures_in_order() {
        let sink = MemorySink::new();

        sink.write_line("first");
        sink.write_line("second");

        assert_eq!(sink.get_lines(), vec!["first", "second"]);
        assert_eq!(sink.line_count(), 2);
    }

    #[test]
    fn test_memory_sink_parses_json_records() {
        let sink = MemorySink::new();

        sink.write_line(r#"{"level":"INFO"}"#);
        sink.write_line("not json");

        let records = sink.get_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["level"], "INFO");
    }

    #[test]
    fn test_memory_sink_last_record() {
        let sink = MemorySink::new();
        assert!(sink.last_record().is_none());

        sink.write_line(r#"{"message":"a"}"#);
        sink.write_line(r#"{"message":"b"}"#);

        let last = sink.last_record().unwrap();
        assert_eq!(last["message"], "b");
    }

    #[test]
    fn test_memory_sink_clear() {
        let sink = MemorySink::new();
        sink.write_line("line");

        sink.clear();
        assert_eq!(sink.line_count(), 0);
    }
}
