//! @ai:module:intent Test and benchmark result reporter with build environment metadata
//! @ai:module:layer application
//! @ai:module:public_api clock, config, environment, error, report
//!
//! # Example
//!
//! ```rust,no_run
//! use testreport::{JsonReportWriter, ReportEnvironment, ReporterConfig, ResultKind, ResultRecord};
//!
//! let mut writer = JsonReportWriter::new(ReportEnvironment::detect(), ReporterConfig::default());
//! writer.create("test_report.json");
//! writer.report(&ResultRecord {
//!     kind: ResultKind::Benchmark,
//!     name: "vec_push".to_string(),
//!     num_times_run: 10,
//!     num_trials_per_run: 1000,
//!     num_passes: 10,
//!     ..Default::default()
//! });
//! writer.finish();
//! ```

pub mod clock;
pub mod config;
pub mod environment;
pub mod error;
pub mod report;

pub use clock::{ClockFrequency, FixedFrequency, MonotonicClock};
pub use config::ReporterConfig;
pub use environment::{build_description, ReportEnvironment};
pub use error::{ReportError, Result};
pub use report::{JsonReportWriter, ResultKind, ResultRecord, SessionState};
