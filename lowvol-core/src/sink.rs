//! Destinations for suite log lines

use std::io::Write;

/// Receives formatted suite output one line at a time
///
/// A line may contain embedded newlines (`"Actual:\n3"`).
pub trait LogSink {
    fn log(&mut self, line: &str);
}

/// Forwards lines to `tracing` at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&mut self, line: &str) {
        tracing::info!(target: "lowvol::suite", "{}", line);
    }
}

/// Keeps every line in memory
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub lines: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines joined with newlines
    pub fn transcript(&self) -> String {
        self.lines.join("\n")
    }
}

impl LogSink for MemorySink {
    fn log(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

/// Writes lines to any `io::Write`
///
/// Write errors are dropped; the suite never consumes a sink result.
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LogSink for WriterSink<W> {
    fn log(&mut self, line: &str) {
        let _ = writeln!(self.writer, "{}", line);
    }
}

impl<S: LogSink + ?Sized> LogSink for &mut S {
    fn log(&mut self, line: &str) {
        (**self).log(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_collects_in_order() {
        let mut sink = MemorySink::new();
        sink.log("first");
        sink.log("second");
        assert_eq!(sink.lines, vec!["first", "second"]);
        assert_eq!(sink.transcript(), "first\nsecond");
    }

    #[test]
    fn test_writer_sink_appends_newlines() {
        let mut sink = WriterSink::new(Vec::new());
        sink.log("Actual:\n3");
        sink.log("done");
        let bytes = sink.into_inner();
        assert_eq!(String::from_utf8(bytes).unwrap(), "Actual:\n3\ndone\n");
    }

    #[test]
    fn test_sink_by_mutable_reference() {
        fn emit(mut sink: impl LogSink) {
            sink.log("via ref");
        }

        let mut sink = MemorySink::new();
        emit(&mut sink);
        assert_eq!(sink.lines, vec!["via ref"]);
    }
}
