//! Published bus timing minimums.
//!
//! This module defines the Fast-mode (400 kHz) timing characteristics of the
//! I2C bus, expressed in nanoseconds. They are the lower bounds a
//! [`Timing`](crate::timing::Timing) has to respect once converted into ticks of
//! the caller's tick source.
//!
//! ## Key Concepts
//!
//! - **tLOW / tHIGH**: minimum low and high periods of SCL.
//! - **tSU;DAT**: data setup time before the rising SCL edge.
//! - **tSU;STO**: setup time for a STOP condition after SCL is released.
//! - **tBUF**: bus free time between a STOP and the next START.
//!
//! These values only feed [`Timing::from_bus_minimums`](crate::timing::Timing::from_bus_minimums);
//! a hand-built [`TimingParams`](crate::timing::TimingParams) does not consult them.

/// Maximum SCL frequency of Fast-mode, in Hz.
pub const FAST_MODE_MAX_HZ: u32 = 400_000;

/// Minimum LOW period of SCL in Fast-mode, in ns.
pub const FAST_MODE_T_LOW_NS: u32 = 1_300;

/// Minimum HIGH period of SCL in Fast-mode, in ns.
pub const FAST_MODE_T_HIGH_NS: u32 = 600;

/// Minimum data setup time in Fast-mode, in ns.
pub const FAST_MODE_T_SU_DAT_NS: u32 = 100;

/// Minimum STOP setup time in Fast-mode, in ns.
pub const FAST_MODE_T_SU_STO_NS: u32 = 600;

/// Minimum bus free time between STOP and START in Fast-mode, in ns.
pub const FAST_MODE_T_BUF_NS: u32 = 1_300;

/// Nanoseconds in one second.
pub const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// Minimum durations of a bus speed mode, all in nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct BusMinimums {
    /// Minimum LOW period of the clock.
    pub t_low_ns: u32,
    /// Minimum HIGH period of the clock.
    pub t_high_ns: u32,
    /// Minimum data setup time before the rising clock edge.
    pub t_su_dat_ns: u32,
    /// Minimum STOP setup time after the clock is released.
    pub t_su_sto_ns: u32,
    /// Minimum bus free time between STOP and START.
    pub t_buf_ns: u32,
}

/// Fast-mode (400 kHz) minimums.
pub const FAST_MODE: BusMinimums = BusMinimums {
    t_low_ns: FAST_MODE_T_LOW_NS,
    t_high_ns: FAST_MODE_T_HIGH_NS,
    t_su_dat_ns: FAST_MODE_T_SU_DAT_NS,
    t_su_sto_ns: FAST_MODE_T_SU_STO_NS,
    t_buf_ns: FAST_MODE_T_BUF_NS,
};
