//! @ai:module:intent Tick frequency used to convert raw timings to microseconds
//! @ai:module:layer infrastructure
//! @ai:module:public_api ClockFrequency, FixedFrequency, MonotonicClock, ticks_to_microseconds

/// @ai:intent Source of the high-resolution clock frequency
pub trait ClockFrequency {
    fn ticks_per_second(&self) -> f64;
}

/// @ai:intent Convert ticks to microseconds: `ticks * 1_000_000 / ticks_per_second`
/// @ai:effects pure
pub fn ticks_to_microseconds(ticks: f64, clock: &dyn ClockFrequency) -> f64 {
    ticks * 1_000_000.0 / clock.ticks_per_second()
}

/// @ai:intent Clock with a known, constant frequency
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedFrequency(pub f64);

impl ClockFrequency for FixedFrequency {
    fn ticks_per_second(&self) -> f64 {
        self.0
    }
}

/// @ai:intent Frequency of nanosecond ticks, as taken from `Instant::elapsed().as_nanos()`
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl MonotonicClock {
    const TICKS_PER_SECOND: f64 = 1_000_000_000.0;

    /// @ai:intent Create the nanosecond clock
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }
}

impl ClockFrequency for MonotonicClock {
    fn ticks_per_second(&self) -> f64 {
        Self::TICKS_PER_SECOND
    }
}
