//! @ai:module:intent Line-oriented log channel used for diagnostics and fallback output
//! @ai:module:layer infrastructure
//! @ai:module:public_api LogSink, TracingLogSink

#[cfg(test)]
use std::sync::{Arc, Mutex};

/// @ai:intent Receives whole lines; never fails
pub trait LogSink {
    fn info(&self, line: &str);
    fn error(&self, line: &str);
}

/// @ai:intent Forward lines to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn info(&self, line: &str) {
        tracing::info!(target: "testreport::fallback", "{}", line);
    }

    fn error(&self, line: &str) {
        tracing::error!(target: "testreport::fallback", "{}", line);
    }
}

/// @ai:intent Severity of a captured line
#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LogLevel {
    Info,
    Error,
}

/// @ai:intent Capture lines in memory; clones share one buffer
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryLogSink {
    lines: Arc<Mutex<Vec<(LogLevel, String)>>>,
}

#[cfg(test)]
impl MemoryLogSink {
    /// @ai:intent Create an empty capture buffer
    /// @ai:effects pure
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// @ai:intent All captured lines with their level, in arrival order
    /// @ai:effects state:read
    pub(crate) fn entries(&self) -> Vec<(LogLevel, String)> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    /// @ai:intent Captured lines of one level, in arrival order
    /// @ai:effects state:read
    pub(crate) fn lines(&self, level: LogLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, line)| line)
            .collect()
    }

    fn push(&self, level: LogLevel, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((level, line.to_string()));
        }
    }
}

#[cfg(test)]
impl LogSink for MemoryLogSink {
    fn info(&self, line: &str) {
        self.push(LogLevel::Info, line);
    }

    fn error(&self, line: &str) {
        self.push(LogLevel::Error, line);
    }
}
