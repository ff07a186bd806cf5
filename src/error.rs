//! Error types for timing configuration.
//!
//! The generator itself never fails once built: every tick is a total function
//! of the current state and inputs. The only failure surface is a [`Timing`]
//! record that would let a strobe fall outside the counter's range or make the
//! clock phases degenerate, which is rejected before any generator exists.
//!
//! [`Timing`]: crate::timing::Timing

use thiserror::Error;

/// The timing invariant that a configuration broke.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum TimingViolation {
    /// `high_len` was zero; the clock would never be released.
    #[error("high phase must be at least one tick")]
    EmptyHighPhase,
    /// `high_len >= period`; the clock would never be driven low.
    #[error("high phase ({high_len} ticks) must be shorter than the period ({period} ticks)")]
    HighPhaseTooLong {
        /// Configured high phase length.
        high_len: u16,
        /// Configured period.
        period: u16,
    },
    /// The sample point does not fall strictly inside the high phase.
    #[error("sample offset {sample_offset} must lie in 1..{high_len}")]
    SampleOutsideHighPhase {
        /// Configured sample offset.
        sample_offset: u16,
        /// Configured high phase length.
        high_len: u16,
    },
    /// `high_len + shift_offset` is past the end of the period.
    #[error("shift point {shift_tick} lies beyond the period ({period} ticks)")]
    ShiftOutsidePeriod {
        /// `high_len + shift_offset`.
        shift_tick: u32,
        /// Configured period.
        period: u16,
    },
    /// `stop_setup_offset` was zero; the stop strobe needs at least one tick
    /// after the clock has been released.
    #[error("stop setup offset must be at least one tick")]
    EmptyStopSetup,
    /// `stop_setup_offset + buffer_offset` is past the end of the period.
    #[error("bus free point {bus_free_tick} lies beyond the period ({period} ticks)")]
    BusFreeOutsidePeriod {
        /// `stop_setup_offset + buffer_offset`.
        bus_free_tick: u32,
        /// Configured period.
        period: u16,
    },
    /// The tick source is too slow to express the requested bus timing.
    #[error("tick rate {tick_hz} Hz cannot resolve the requested bus timing")]
    TickRateTooLow {
        /// Tick source frequency.
        tick_hz: u32,
    },
}

/// Errors returned while building a generator.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Error {
    /// The timing configuration violates an invariant.
    #[error("invalid timing: {0}")]
    InvalidTiming(#[from] TimingViolation),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
