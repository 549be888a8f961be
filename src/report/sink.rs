//! @ai:module:intent Destination of report lines: an open file or an in-memory fallback queue
//! @ai:module:layer infrastructure
//! @ai:module:public_api OutputSink
//! @ai:module:stateless false
//!
//! Lines are terminated lazily: the newline of a line is only written when
//! the next line starts or the sink closes. This lets the writer extend the
//! previous line with a `,` once it knows another entry follows, so no
//! separator ever has to be taken back.

use crate::error::ReportError;
use crate::report::log_sink::LogSink;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// @ai:intent Active output for one report session; chosen once in `open`
#[derive(Debug)]
pub enum OutputSink {
    File(FileSink),
    Fallback(FallbackQueue),
}

/// @ai:intent Exclusively owned report file
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    writer: BufWriter<File>,
    has_lines: bool,
    write_failed: bool,
}

/// @ai:intent Ordered, unbounded queue of pre-rendered lines
#[derive(Debug, Default)]
pub struct FallbackQueue {
    marker: String,
    lines: Vec<String>,
}

impl OutputSink {
    /// @ai:intent Open the file sink or fall back to the queue
    /// @ai:post open failures are reported on `log` and never propagated
    /// @ai:effects fs:write, io
    pub fn open(destination: &Path, file_output: bool, marker: String, log: &dyn LogSink) -> Self {
        if !file_output {
            tracing::debug!(
                "File output disabled; queueing report for {}",
                destination.display()
            );
            return OutputSink::Fallback(FallbackQueue::new(marker));
        }

        match File::create(destination) {
            Ok(file) => OutputSink::File(FileSink {
                path: destination.to_path_buf(),
                writer: BufWriter::new(file),
                has_lines: false,
                write_failed: false,
            }),
            Err(source) => {
                let err = ReportError::SinkUnavailable {
                    path: destination.to_path_buf(),
                    source,
                };
                log.error(&format!("{}!", err));
                OutputSink::Fallback(FallbackQueue::new(marker))
            }
        }
    }

    /// @ai:intent Start a new line
    /// @ai:effects fs:write, state:write
    pub fn write_line(&mut self, line: &str) {
        match self {
            OutputSink::File(sink) => {
                let separator = if sink.has_lines { "\n" } else { "" };
                sink.has_lines = true;
                sink.write(&format!("{}{}", separator, line));
            }
            OutputSink::Fallback(queue) => queue.lines.push(line.trim_end().to_string()),
        }
    }

    /// @ai:intent Append text to the most recent line
    /// @ai:effects fs:write, state:write
    pub fn extend_last_line(&mut self, text: &str) {
        match self {
            OutputSink::File(sink) => sink.write(text),
            OutputSink::Fallback(queue) => match queue.lines.last_mut() {
                Some(last) => last.push_str(text),
                None => queue.lines.push(text.to_string()),
            },
        }
    }

    /// @ai:intent Push buffered file output to disk; no-op for the queue
    /// @ai:effects fs:write
    pub fn flush(&mut self) {
        if let OutputSink::File(sink) = self {
            if let Err(e) = sink.writer.flush() {
                sink.report_failure(&e);
            }
        }
    }

    /// @ai:intent Whether output is being queued instead of written to a file
    /// @ai:effects pure
    pub fn is_fallback(&self) -> bool {
        matches!(self, OutputSink::Fallback(_))
    }

    /// @ai:intent Close the file, or deliver the queue between begin/end markers
    /// @ai:effects fs:write, io
    pub fn close(self, log: &dyn LogSink) {
        match self {
            OutputSink::File(mut sink) => {
                if sink.has_lines {
                    sink.write("\n");
                }
                if let Err(e) = sink.writer.flush() {
                    sink.report_failure(&e);
                }
                tracing::debug!("Report closed: {}", sink.path.display());
            }
            OutputSink::Fallback(queue) => queue.deliver(log),
        }
    }
}

impl FileSink {
    fn write(&mut self, text: &str) {
        if let Err(e) = self.writer.write_all(text.as_bytes()) {
            self.report_failure(&e);
        }
    }

    fn report_failure(&mut self, err: &std::io::Error) {
        if !self.write_failed {
            self.write_failed = true;
            tracing::warn!("Failed to write report {}: {}", self.path.display(), err);
        }
    }
}

impl FallbackQueue {
    fn new(marker: String) -> Self {
        Self {
            marker,
            lines: Vec::new(),
        }
    }

    /// @ai:intent Queued lines, in write order
    /// @ai:effects pure
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn deliver(self, log: &dyn LogSink) {
        if self.lines.is_empty() {
            return;
        }
        log.info(&format!("***** BEGIN FILE {} *****", self.marker));
        for line in &self.lines {
            log.info(line);
        }
        log.info(&format!("***** END FILE {} *****", self.marker));
    }
}
