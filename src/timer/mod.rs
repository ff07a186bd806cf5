//! Tick-rate arithmetic and tick-loop utilities.
//!
//! Logic for driving the generator from a fixed tick source. This employs two
//! approaches: an interrupt service routine using `critical_section::with`
//! (`timer-isr` feature), or a busy-loop delay timer (`delay-loop` feature).
//!
//! Contains helpers for converting between wall time and ticks, including:
//! - `ticks_for_ns`: runtime duration to tick count, rounding up
//! - `const_ticks_for_ns`: compile-time duration to tick count, rounding up
//! - `bus_frequency_hz`: SCL frequency produced by a period at a tick rate
//! - `run_tick_loop`: blocking driver loop for `DelayNs` (feature `delay-loop`)
//! - `global_scl_timer_tick` and `init_scl_driver!()`: interrupt-based tick
//!   callback wrapper (feature `timer-isr`)
//!
//! Common tick sources for a 400 kHz bus:
//!
//! | Tick rate | Period (ticks) | SCL       |
//! |-----------|----------------|-----------|
//! |    50 MHz |            125 | 400 kHz   |
//! |    16 MHz |             40 | 400 kHz   |
//! |     8 MHz |             20 | 400 kHz   |
//! |     4 MHz |             10 | 400 kHz   |

use libm::ceil;

use crate::consts::NANOS_PER_SECOND;

#[cfg(feature = "delay-loop")]
mod delay;
#[cfg(feature = "delay-loop")]
pub use delay::*;

#[cfg(feature = "timer-isr")]
mod isr;
#[cfg(feature = "timer-isr")]
pub use isr::*;

#[cfg(feature = "timer-isr")]
mod macros;

/// Number of ticks needed to cover at least `ns` nanoseconds.
///
/// # Arguments
/// - `tick_hz`: tick source frequency in Hz
/// - `ns`: minimum duration in nanoseconds
///
/// # Returns
/// - The duration rounded up to whole ticks, saturating at `u16::MAX`
pub fn ticks_for_ns(tick_hz: u32, ns: u32) -> u16 {
    let ticks = ceil(tick_hz as f64 * ns as f64 / NANOS_PER_SECOND as f64);
    if ticks >= u16::MAX as f64 {
        u16::MAX
    } else {
        ticks as u16
    }
}

/// Compile-time variant of [`ticks_for_ns`], in integer arithmetic.
pub const fn const_ticks_for_ns(tick_hz: u32, ns: u32) -> u16 {
    let product = tick_hz as u64 * ns as u64;
    let ticks = product.div_ceil(NANOS_PER_SECOND as u64);
    if ticks >= u16::MAX as u64 {
        u16::MAX
    } else {
        ticks as u16
    }
}

/// SCL frequency in Hz produced by a `period` of ticks at `tick_hz`.
///
/// Returns 0 for a zero period.
pub const fn bus_frequency_hz(tick_hz: u32, period: u16) -> u32 {
    if period == 0 {
        0
    } else {
        tick_hz / period as u32
    }
}

/// Tick interval in nanoseconds for a tick source, rounded to the nearest ns.
pub fn tick_interval_ns(tick_hz: u32) -> u32 {
    if tick_hz == 0 {
        return 0;
    }
    libm::round(NANOS_PER_SECOND as f64 / tick_hz as f64) as u32
}
