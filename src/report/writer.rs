//! @ai:module:intent Incrementally emit a JSON report of test and benchmark results
//! @ai:module:layer application
//! @ai:module:public_api JsonReportWriter, SessionState
//! @ai:module:stateless false
//!
//! The document is written in a single pass and never held in memory when a
//! file is available:
//!
//! ```text
//! {
//!     "build": "...", "os": "...", "ram": 16000, "cpuBrandName": "...",
//!     "cpuid": "...", "cpuidInfo": "...", "cpuSpeed": 3700,
//!     "defines": { "debug_assertions": true },
//!     "results": [
//!         { "type": "test", "name": "...", ... },
//!         ...
//!     ]
//! }
//! ```
//!
//! Separators are emitted only once the next entry is known to exist, so the
//! document stays valid JSON for any number of results.

use crate::clock::FixedFrequency;
use crate::config::ReporterConfig;
use crate::environment::{build_description, ReportEnvironment};
use crate::report::record::{json_string, ResultRecord};
use crate::report::sink::OutputSink;
use std::path::Path;

/// @ai:intent Observable lifecycle of a writer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unopened,
    HeaderWritten,
    Finalized,
}

enum Session {
    Unopened,
    Open { sink: OutputSink, results: usize },
    Finalized,
}

/// @ai:intent Single-writer report session over a file or the fallback log
pub struct JsonReportWriter {
    env: ReportEnvironment,
    config: ReporterConfig,
    session: Session,
}

impl JsonReportWriter {
    /// @ai:intent Create an unopened writer
    /// @ai:post a configured `ticks_per_second` replaces the environment clock
    /// @ai:effects pure
    pub fn new(mut env: ReportEnvironment, config: ReporterConfig) -> Self {
        if let Some(frequency) = config.ticks_per_second {
            env = env.with_clock(FixedFrequency(frequency));
        }
        Self {
            env,
            config,
            session: Session::Unopened,
        }
    }

    /// @ai:intent Current lifecycle state
    /// @ai:effects pure
    pub fn state(&self) -> SessionState {
        match self.session {
            Session::Unopened => SessionState::Unopened,
            Session::Open { .. } => SessionState::HeaderWritten,
            Session::Finalized => SessionState::Finalized,
        }
    }

    /// @ai:intent Whether the open session queues output for the log channel
    /// @ai:effects pure
    pub fn is_fallback(&self) -> bool {
        matches!(&self.session, Session::Open { sink, .. } if sink.is_fallback())
    }

    /// @ai:intent Open a session at the configured output path
    /// @ai:effects fs:write, io
    pub fn create_default(&mut self) {
        let destination = self.config.output_path.clone();
        self.create(&destination);
    }

    /// @ai:intent Open a session and write the header up to the results array
    /// @ai:post state is HeaderWritten
    /// @ai:effects fs:write, io
    pub fn create(&mut self, destination: impl AsRef<Path>) {
        self.finish();

        let destination = destination.as_ref();
        let mut sink = OutputSink::open(
            destination,
            self.config.file_output,
            self.config.report_name.clone(),
            self.env.log.as_ref(),
        );

        self.write_header(&mut sink);
        sink.flush();

        tracing::debug!(
            "Report session opened for {} ({})",
            destination.display(),
            if sink.is_fallback() { "fallback" } else { "file" }
        );
        self.session = Session::Open { sink, results: 0 };
    }

    fn write_header(&self, sink: &mut OutputSink) {
        let system = self.env.system.as_ref();
        let ram_mib = system.total_physical_memory() / 1024 / 1024;

        sink.write_line("{");
        sink.write_line(&format!(
            "\t\"build\": {},",
            json_string(&build_description(self.env.build.as_ref()))
        ));
        sink.write_line(&format!("\t\"os\": {},", json_string(&system.os_display())));
        sink.write_line(&format!("\t\"ram\": {},", ram_mib));
        sink.write_line(&format!(
            "\t\"cpuBrandName\": {},",
            json_string(&system.cpu_brand_name())
        ));
        sink.write_line(&format!("\t\"cpuid\": {},", json_string(&system.cpuid())));
        sink.write_line(&format!(
            "\t\"cpuidInfo\": {},",
            json_string(&system.cpuid_info())
        ));
        sink.write_line(&format!("\t\"cpuSpeed\": {},", system.cpu_speed_mhz()));

        sink.write_line("\t\"defines\": {");
        let mut first = true;
        for name in self.env.defines.active_defines() {
            if !first {
                sink.extend_last_line(",");
            }
            first = false;
            sink.write_line(&format!("\t\t{}: true", json_string(&name)));
        }
        sink.write_line("\t},");

        sink.write_line("\t\"results\": [");
    }

    /// @ai:intent Append one result and push it to the sink immediately
    /// @ai:pre state is HeaderWritten; otherwise the call is ignored
    /// @ai:effects fs:write, state:write
    pub fn report(&mut self, record: &ResultRecord) {
        let Session::Open { sink, results } = &mut self.session else {
            tracing::warn!(
                "Ignoring result '{}': no report session is open",
                record.name
            );
            return;
        };

        if *results > 0 {
            sink.extend_last_line(",");
        }
        sink.write_line(&format!("\t\t{}", record.render(self.env.clock.as_ref())));
        sink.flush();
        *results += 1;
    }

    /// @ai:intent Number of results written in the open session
    /// @ai:effects pure
    pub fn result_count(&self) -> usize {
        match self.session {
            Session::Open { results, .. } => results,
            _ => 0,
        }
    }

    /// @ai:intent Close the document and release or deliver the sink
    /// @ai:post state is not HeaderWritten; repeated calls do nothing
    /// @ai:effects fs:write, io
    pub fn finish(&mut self) {
        let session = std::mem::replace(&mut self.session, Session::Finalized);
        match session {
            Session::Open { mut sink, results } => {
                sink.write_line("\t]");
                sink.write_line("}");
                sink.close(self.env.log.as_ref());
                tracing::debug!("Report finished with {} results", results);
            }
            Session::Unopened => self.session = Session::Unopened,
            Session::Finalized => {}
        }
    }
}

impl Drop for JsonReportWriter {
    fn drop(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{StaticBuildInfo, StaticDefines, StaticSystemInfo};
    use crate::report::log_sink::{LogLevel, MemoryLogSink};
    use crate::report::record::ResultKind;
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use tempfile::TempDir;

    fn test_env(log: &MemoryLogSink, defines: &[&str]) -> ReportEnvironment {
        ReportEnvironment {
            build: Box::new(StaticBuildInfo {
                os: "Linux".to_string(),
                compiler: "rustc 1.80.0".to_string(),
                architecture: "x86-64bit".to_string(),
                simd: "SSE2(manual)".to_string(),
                configuration: "Release".to_string(),
            }),
            system: Box::new(StaticSystemInfo {
                os_display: "linux x86_64".to_string(),
                total_physical_memory: 8 * 1024 * 1024 * 1024,
                cpu_brand_name: "Test CPU".to_string(),
                cpuid: "GenuineIntel".to_string(),
                cpuid_info: "sse sse2".to_string(),
                cpu_speed_mhz: 3000,
            }),
            defines: Box::new(StaticDefines::new(defines.iter().copied())),
            clock: Box::new(FixedFrequency(1_000_000.0)),
            log: Box::new(log.clone()),
        }
    }

    fn record(name: &str, kind: ResultKind) -> ResultRecord {
        ResultRecord {
            kind,
            name: name.to_string(),
            num_times_run: 1,
            num_trials_per_run: 1,
            num_passes: 1,
            num_fails: 0,
            fastest_ticks: 100.0,
            average_ticks: 120.0,
            slowest_ticks: 150.0,
            fastest_cycles: 500.0,
        }
    }

    fn fallback_config() -> ReporterConfig {
        ReporterConfig {
            file_output: false,
            ..ReporterConfig::default()
        }
    }

    /// Joins the lines between the begin and end markers.
    fn extract_fallback_document(log: &MemoryLogSink) -> String {
        let lines = log.lines(LogLevel::Info);
        let begin = lines
            .iter()
            .position(|l| l.starts_with("***** BEGIN FILE"))
            .unwrap();
        let end = lines
            .iter()
            .position(|l| l.starts_with("***** END FILE"))
            .unwrap();
        lines[begin + 1..end].join("\n")
    }

    #[test]
    fn test_single_test_result_written_to_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.json");
        let log = MemoryLogSink::new();

        let mut writer = JsonReportWriter::new(test_env(&log, &[]), ReporterConfig::default());
        writer.create(&path);
        assert_eq!(writer.state(), SessionState::HeaderWritten);
        assert!(!writer.is_fallback());

        writer.report(&record("A", ResultKind::Test));
        writer.finish();
        assert_eq!(writer.state(), SessionState::Finalized);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"fastestTime\": 100.000000"));
        assert!(content.contains("\"fastestCycles\": 500.000000"));
        assert!(content.contains("\"type\": \"test\""));

        let doc: Value = serde_json::from_str(&content).unwrap();
        let results = doc["results"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["name"], "A");
        assert_eq!(results[0]["averageTime"].as_f64(), Some(120.0));
        assert_eq!(results[0]["slowestTime"].as_f64(), Some(150.0));
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_header_fields_in_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.json");
        let log = MemoryLogSink::new();

        let mut writer =
            JsonReportWriter::new(test_env(&log, &["A", "B"]), ReporterConfig::default());
        writer.create(&path);
        writer.finish();

        let content = std::fs::read_to_string(&path).unwrap();
        let expected = [
            "{",
            "\t\"build\": \"Linux rustc 1.80.0 x86-64bit SSE2(manual) Release\",",
            "\t\"os\": \"linux x86_64\",",
            "\t\"ram\": 8192,",
            "\t\"cpuBrandName\": \"Test CPU\",",
            "\t\"cpuid\": \"GenuineIntel\",",
            "\t\"cpuidInfo\": \"sse sse2\",",
            "\t\"cpuSpeed\": 3000,",
            "\t\"defines\": {",
            "\t\t\"A\": true,",
            "\t\t\"B\": true",
            "\t},",
            "\t\"results\": [",
            "\t]",
            "}",
        ];
        assert_eq!(content, format!("{}\n", expected.join("\n")));
    }

    #[test]
    fn test_any_number_of_results_is_valid_json() {
        let temp = TempDir::new().unwrap();
        let log = MemoryLogSink::new();

        for count in [0usize, 1, 2, 7] {
            for defines in [&[][..], &["debug_assertions"][..], &["x", "y", "z"][..]] {
                let path = temp.path().join(format!("out-{}-{}.json", count, defines.len()));
                let mut writer =
                    JsonReportWriter::new(test_env(&log, defines), ReporterConfig::default());
                writer.create(&path);
                for i in 0..count {
                    writer.report(&record(&format!("t{}", i), ResultKind::Benchmark));
                }
                assert_eq!(writer.result_count(), count);
                writer.finish();

                let doc: Value =
                    serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
                assert_eq!(doc["results"].as_array().unwrap().len(), count);
                let flags = doc["defines"].as_object().unwrap();
                assert_eq!(flags.len(), defines.len());
                assert!(flags.values().all(|v| v == &Value::Bool(true)));
            }
        }
    }

    #[test]
    fn test_partial_file_visible_before_finish() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.json");
        let log = MemoryLogSink::new();

        let mut writer = JsonReportWriter::new(test_env(&log, &[]), ReporterConfig::default());
        writer.create(&path);
        writer.report(&record("first", ResultKind::Test));

        let partial = std::fs::read_to_string(&path).unwrap();
        assert!(partial.trim_end().ends_with("\"fastestCycles\": 500.000000 }"));
    }

    #[test]
    fn test_unwritable_path_delivers_to_log() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("no-such-dir").join("out.json");
        let log = MemoryLogSink::new();

        let mut writer = JsonReportWriter::new(test_env(&log, &[]), ReporterConfig::default());
        writer.create(&path);
        assert!(writer.is_fallback());
        writer.report(&record("first", ResultKind::Test));
        writer.report(&record("second", ResultKind::Benchmark));
        writer.finish();

        assert!(!path.exists());
        assert_eq!(log.lines(LogLevel::Error).len(), 1);

        let info = log.lines(LogLevel::Info);
        assert_eq!(info.first().unwrap(), "***** BEGIN FILE test_report.json *****");
        assert_eq!(info.last().unwrap(), "***** END FILE test_report.json *****");

        let result_lines: Vec<&String> =
            info.iter().filter(|l| l.contains("\"type\"")).collect();
        assert_eq!(result_lines.len(), 2);
        assert!(result_lines[0].contains("\"name\": \"first\""));
        assert!(result_lines[1].contains("\"name\": \"second\""));

        let doc: Value = serde_json::from_str(&extract_fallback_document(&log)).unwrap();
        assert_eq!(doc["results"].as_array().unwrap().len(), 2);
        assert_eq!(doc["results"][1]["type"], "benchmark");
    }

    #[test]
    fn test_disabled_file_output_uses_fallback_without_diagnostic() {
        let log = MemoryLogSink::new();
        let mut writer = JsonReportWriter::new(test_env(&log, &["F"]), fallback_config());
        writer.create("report.json");
        writer.finish();

        assert!(log.lines(LogLevel::Error).is_empty());
        let doc: Value = serde_json::from_str(&extract_fallback_document(&log)).unwrap();
        assert_eq!(doc["defines"]["F"], true);
        assert_eq!(doc["results"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_finish_twice_and_drop_emit_once() {
        let log = MemoryLogSink::new();
        {
            let mut writer = JsonReportWriter::new(test_env(&log, &[]), fallback_config());
            writer.create("queued.json");
            writer.report(&record("only", ResultKind::Test));
            writer.finish();
            writer.finish();
        }

        let begins = log
            .lines(LogLevel::Info)
            .iter()
            .filter(|l| l.starts_with("***** BEGIN FILE"))
            .count();
        assert_eq!(begins, 1);
    }

    #[test]
    fn test_drop_finishes_open_session() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.json");
        let log = MemoryLogSink::new();
        {
            let mut writer =
                JsonReportWriter::new(test_env(&log, &[]), ReporterConfig::default());
            writer.create(&path);
            writer.report(&record("A", ResultKind::Test));
        }

        let doc: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc["results"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_finish_without_create_is_noop() {
        let log = MemoryLogSink::new();
        let mut writer = JsonReportWriter::new(test_env(&log, &[]), fallback_config());
        writer.finish();
        assert_eq!(writer.state(), SessionState::Unopened);
        writer.report(&record("ignored", ResultKind::Test));
        drop(writer);
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_create_finalizes_previous_session() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("first.json");
        let second = temp.path().join("second.json");
        let log = MemoryLogSink::new();

        let mut writer = JsonReportWriter::new(test_env(&log, &[]), ReporterConfig::default());
        writer.create(&first);
        writer.report(&record("A", ResultKind::Test));
        writer.create(&second);
        writer.finish();

        let doc: Value = serde_json::from_str(&std::fs::read_to_string(&first).unwrap()).unwrap();
        assert_eq!(doc["results"].as_array().unwrap().len(), 1);
        let doc: Value =
            serde_json::from_str(&std::fs::read_to_string(&second).unwrap()).unwrap();
        assert_eq!(doc["results"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_report_after_finish_is_ignored() {
        let log = MemoryLogSink::new();
        let mut writer = JsonReportWriter::new(test_env(&log, &[]), fallback_config());
        writer.create("late.json");
        writer.finish();
        let delivered = log.entries().len();

        writer.report(&record("late", ResultKind::Test));
        writer.finish();
        assert_eq!(log.entries().len(), delivered);
    }

    #[test]
    fn test_time_conversion_uses_clock_frequency() {
        let log = MemoryLogSink::new();
        let env = test_env(&log, &[]).with_clock(FixedFrequency(2_000_000.0));
        let mut writer = JsonReportWriter::new(env, fallback_config());
        writer.create("clock.json");
        writer.report(&ResultRecord {
            fastest_ticks: 300.0,
            fastest_cycles: 300.0,
            ..record("scaled", ResultKind::Benchmark)
        });
        writer.finish();

        let doc: Value = serde_json::from_str(&extract_fallback_document(&log)).unwrap();
        let result = &doc["results"][0];
        assert!((result["fastestTime"].as_f64().unwrap() - 150.0).abs() < 1e-9);
        assert_eq!(result["fastestCycles"].as_f64(), Some(300.0));
    }

    #[test]
    fn test_configured_frequency_overrides_environment_clock() {
        let log = MemoryLogSink::new();
        let env = test_env(&log, &[]).with_clock(FixedFrequency(1_000_000_000.0));
        let config = ReporterConfig {
            ticks_per_second: Some(1_000_000.0),
            ..fallback_config()
        };
        let mut writer = JsonReportWriter::new(env, config);
        writer.create("override.json");
        writer.report(&record("A", ResultKind::Test));
        writer.finish();

        let doc: Value = serde_json::from_str(&extract_fallback_document(&log)).unwrap();
        assert_eq!(doc["results"][0]["fastestTime"].as_f64(), Some(100.0));
        assert_eq!(doc["results"][0]["fastestCycles"].as_f64(), Some(500.0));
    }

    #[test]
    fn test_create_default_uses_configured_output_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("configured.json");
        let log = MemoryLogSink::new();
        let config = ReporterConfig {
            output_path: path.clone(),
            ..ReporterConfig::default()
        };

        let mut writer = JsonReportWriter::new(test_env(&log, &[]), config);
        writer.create_default();
        assert!(!writer.is_fallback());
        writer.report(&record("A", ResultKind::Test));
        writer.finish();

        let doc: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc["results"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_with_log_routes_fallback_output() {
        let original = MemoryLogSink::new();
        let replacement = MemoryLogSink::new();
        let env = test_env(&original, &[]).with_log(replacement.clone());

        let mut writer = JsonReportWriter::new(env, fallback_config());
        writer.create("routed.json");
        writer.finish();

        assert!(original.entries().is_empty());
        let doc: Value = serde_json::from_str(&extract_fallback_document(&replacement)).unwrap();
        assert_eq!(doc["cpuSpeed"], 3000);
    }

    #[test]
    fn test_markers_use_report_name_regardless_of_destination() {
        let log = MemoryLogSink::new();
        let config = ReporterConfig {
            report_name: "suite_report.json".to_string(),
            ..fallback_config()
        };
        let mut writer = JsonReportWriter::new(test_env(&log, &[]), config);
        writer.create("some/other/run-42.json");
        writer.finish();

        let info = log.lines(LogLevel::Info);
        assert_eq!(info.first().unwrap(), "***** BEGIN FILE suite_report.json *****");
        assert_eq!(info.last().unwrap(), "***** END FILE suite_report.json *****");
    }
}
