//! @ai:module:intent Incremental JSON report generation for test and benchmark results
//! @ai:module:layer infrastructure
//! @ai:module:public_api JsonReportWriter, ResultRecord, OutputSink, LogSink

pub mod log_sink;
pub mod record;
pub mod sink;
pub mod writer;

pub use log_sink::{LogSink, TracingLogSink};
pub use record::{ResultKind, ResultRecord};
pub use sink::OutputSink;
pub use writer::{JsonReportWriter, SessionState};
