//! Intended clock level.
//!
//! The level computed here is what SCL *should* be, before the one tick of
//! latency added by the [`Synchronizer`](crate::sync::Synchronizer). The
//! generator asserts high on the pre-wrap tick (`counter == period`) rather
//! than waiting for the wrapped value, which cancels that latency: the
//! observed line is released for exactly `high_len` ticks and driven low for
//! exactly `low_len` ticks per period.

use crate::timing::Timing;

/// Logical clock level for `counter` under `enable`.
///
/// High while `counter < high_len` and on the pre-wrap tick. Otherwise low when
/// enabled and high (idle bus) when not.
pub fn intended_level(timing: &Timing, counter: u16, enable: bool) -> bool {
    if counter < timing.high_len() || counter == timing.period() {
        return true;
    }
    !enable
}
