//! @ai:module:intent Result records and their single-line JSON rendering
//! @ai:module:layer domain
//! @ai:module:public_api ResultRecord, ResultKind
//! @ai:module:stateless true

use crate::clock::{ticks_to_microseconds, ClockFrequency};
use serde::{Deserialize, Serialize};

/// @ai:intent Whether a record comes from a correctness test or a benchmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    #[default]
    Test,
    Benchmark,
}

impl ResultKind {
    /// @ai:intent Value written to the `type` field
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultKind::Test => "test",
            ResultKind::Benchmark => "benchmark",
        }
    }
}

impl std::fmt::Display for ResultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent One executed test or benchmark, timings still in raw ticks
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(default)]
    pub kind: ResultKind,
    pub name: String,
    pub num_times_run: u32,
    pub num_trials_per_run: u32,
    pub num_passes: u32,
    pub num_fails: u32,
    pub fastest_ticks: f64,
    pub average_ticks: f64,
    pub slowest_ticks: f64,
    /// Raw cycle count; never converted to time.
    pub fastest_cycles: f64,
}

impl ResultRecord {
    /// @ai:intent Render as one JSON object on one line, without separator
    /// @ai:pre clock reports a non-zero frequency
    /// @ai:effects pure
    pub fn render(&self, clock: &dyn ClockFrequency) -> String {
        format!(
            "{{ \"type\": \"{}\", \"name\": {}, \"numTimesRun\": {}, \"numTrialsPerRun\": {}, \
             \"numPasses\": {}, \"numFails\": {}, \"fastestTime\": {:.6}, \"averageTime\": {:.6}, \
             \"slowestTime\": {:.6}, \"fastestCycles\": {:.6} }}",
            self.kind,
            json_string(&self.name),
            self.num_times_run,
            self.num_trials_per_run,
            self.num_passes,
            self.num_fails,
            ticks_to_microseconds(self.fastest_ticks, clock),
            ticks_to_microseconds(self.average_ticks, clock),
            ticks_to_microseconds(self.slowest_ticks, clock),
            self.fastest_cycles,
        )
    }
}

/// @ai:intent Quote and escape a string as a JSON literal
/// @ai:effects pure
pub(crate) fn json_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}
