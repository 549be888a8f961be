//! @ai:module:intent Providers describing the build and the host machine
//! @ai:module:layer infrastructure
//! @ai:module:public_api BuildInfoProvider, SystemInfoProvider, DefinesProvider, ReportEnvironment

pub mod build_info;
pub mod defines;
pub mod system_info;

pub use build_info::{
    build_description, BuildInfoProvider, CompileTimeBuildInfo, SimdDispatch, StaticBuildInfo,
};
pub use defines::{CompileTimeDefines, DefinesProvider, StaticDefines};
pub use system_info::{HostSystemInfo, StaticSystemInfo, SystemInfoProvider};

use crate::clock::{ClockFrequency, MonotonicClock};
use crate::report::log_sink::{LogSink, TracingLogSink};

/// @ai:intent Bundle of collaborators a report session reads from and logs to
pub struct ReportEnvironment {
    pub build: Box<dyn BuildInfoProvider>,
    pub system: Box<dyn SystemInfoProvider>,
    pub defines: Box<dyn DefinesProvider>,
    pub clock: Box<dyn ClockFrequency>,
    pub log: Box<dyn LogSink>,
}

impl ReportEnvironment {
    /// @ai:intent Environment resolved from the compiled target and running host
    /// @ai:effects fs:read
    pub fn detect() -> Self {
        Self {
            build: Box::new(CompileTimeBuildInfo::new()),
            system: Box::new(HostSystemInfo::detect()),
            defines: Box::new(CompileTimeDefines::new()),
            clock: Box::new(MonotonicClock::new()),
            log: Box::new(TracingLogSink),
        }
    }

    /// @ai:intent Replace the clock frequency provider
    /// @ai:effects pure
    pub fn with_clock(mut self, clock: impl ClockFrequency + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// @ai:intent Replace the fallback log sink
    /// @ai:effects pure
    pub fn with_log(mut self, log: impl LogSink + 'static) -> Self {
        self.log = Box::new(log);
        self
    }
}
