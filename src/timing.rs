//! Validated timing configuration.
//!
//! Every output of the generator is defined by an exact tick offset within one
//! SCL period. [`TimingParams`] names those offsets; [`Timing::new`] checks
//! that each one is reachable by a counter running over `1..=period` and
//! freezes them.
//!
//! All values are tick counts of the caller's tick source. At a 50 MHz tick,
//! a `period` of 125 ticks yields a 400 kHz bus clock.
//!
//! ```
//! use i2c_fm_timing::timing::{Timing, TimingParams};
//!
//! let timing = Timing::new(TimingParams {
//!     period: 20,
//!     high_len: 10,
//!     sample_offset: 5,
//!     shift_offset: 4,
//!     stop_setup_offset: 1,
//!     buffer_offset: 3,
//! })
//! .unwrap();
//! assert_eq!(timing.low_len(), 10);
//! assert_eq!(timing.bus_free_tick(), 4);
//! ```

use crate::consts::BusMinimums;
use crate::error::{Error, TimingViolation};
use crate::timer::{bus_frequency_hz, ticks_for_ns};

/// Named timing parameters, in ticks, before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct TimingParams {
    /// Ticks per SCL period.
    pub period: u16,
    /// Ticks the clock stays released (high) per period.
    pub high_len: u16,
    /// Tick within the high phase at which SDA is sampled.
    pub sample_offset: u16,
    /// Ticks after the falling edge at which outgoing data is shifted.
    pub shift_offset: u16,
    /// Ticks after disable at which a STOP may be asserted.
    pub stop_setup_offset: u16,
    /// Additional ticks after the STOP point before the bus is free.
    pub buffer_offset: u16,
}

/// An immutable, validated timing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Timing {
    period: u16,
    high_len: u16,
    sample_offset: u16,
    shift_offset: u16,
    stop_setup_offset: u16,
    buffer_offset: u16,
}

impl Timing {
    /// Validates `params` and builds a timing record.
    ///
    /// # Errors
    /// [`Error::InvalidTiming`] naming the first invariant that does not hold:
    /// - `0 < high_len < period`
    /// - `1 <= sample_offset < high_len`
    /// - `high_len + shift_offset <= period`
    /// - `stop_setup_offset >= 1`
    /// - `stop_setup_offset + buffer_offset <= period`
    pub fn new(params: TimingParams) -> Result<Self, Error> {
        let TimingParams {
            period,
            high_len,
            sample_offset,
            shift_offset,
            stop_setup_offset,
            buffer_offset,
        } = params;

        if high_len == 0 {
            return Err(TimingViolation::EmptyHighPhase.into());
        }
        if high_len >= period {
            return Err(TimingViolation::HighPhaseTooLong { high_len, period }.into());
        }
        if sample_offset == 0 || sample_offset >= high_len {
            return Err(TimingViolation::SampleOutsideHighPhase {
                sample_offset,
                high_len,
            }
            .into());
        }
        let shift_tick = u32::from(high_len) + u32::from(shift_offset);
        if shift_tick > u32::from(period) {
            return Err(TimingViolation::ShiftOutsidePeriod { shift_tick, period }.into());
        }
        if stop_setup_offset == 0 {
            return Err(TimingViolation::EmptyStopSetup.into());
        }
        let bus_free_tick = u32::from(stop_setup_offset) + u32::from(buffer_offset);
        if bus_free_tick > u32::from(period) {
            return Err(TimingViolation::BusFreeOutsidePeriod {
                bus_free_tick,
                period,
            }
            .into());
        }

        Ok(Self {
            period,
            high_len,
            sample_offset,
            shift_offset,
            stop_setup_offset,
            buffer_offset,
        })
    }

    /// Derives a timing record from a bus speed and its published minimums.
    ///
    /// The period is the longer of the requested bus period and the sum of the
    /// LOW and HIGH minimums. Surplus ticks are split evenly between the two
    /// phases, with any odd tick going to the low phase. The sample point sits
    /// in the middle of the high phase and the shift point in the middle of the
    /// low phase. STOP setup and bus free use the tSU;STO and tBUF minimums.
    ///
    /// # Arguments
    /// - `tick_hz`: tick source frequency in Hz
    /// - `bus_hz`: requested SCL frequency in Hz (an upper bound)
    /// - `minimums`: e.g. [`FAST_MODE`](crate::consts::FAST_MODE)
    ///
    /// # Errors
    /// [`TimingViolation::TickRateTooLow`] when the tick source cannot place a
    /// sample point inside the high phase or honour the data setup minimum,
    /// otherwise whatever [`Timing::new`] reports for the derived values.
    pub fn from_bus_minimums(
        tick_hz: u32,
        bus_hz: u32,
        minimums: &BusMinimums,
    ) -> Result<Self, Error> {
        if tick_hz == 0 || bus_hz == 0 || bus_hz > tick_hz {
            return Err(TimingViolation::TickRateTooLow { tick_hz }.into());
        }
        let too_low = || Error::from(TimingViolation::TickRateTooLow { tick_hz });

        // Sample strictly inside the high phase needs at least two ticks there.
        let min_high = ticks_for_ns(tick_hz, minimums.t_high_ns).max(2);
        let min_low = ticks_for_ns(tick_hz, minimums.t_low_ns).max(1);
        let requested = tick_hz.div_ceil(bus_hz);
        let requested = u16::try_from(requested).map_err(|_| too_low())?;
        let floor = min_high.checked_add(min_low).ok_or_else(too_low)?;
        let period = requested.max(floor);

        let surplus = period - floor;
        let high_len = min_high + surplus / 2;
        let low_len = period - high_len;

        let shift_offset = low_len / 2;
        let setup = ticks_for_ns(tick_hz, minimums.t_su_dat_ns);
        if low_len - shift_offset < setup {
            return Err(too_low());
        }

        Self::new(TimingParams {
            period,
            high_len,
            sample_offset: high_len / 2,
            shift_offset,
            stop_setup_offset: ticks_for_ns(tick_hz, minimums.t_su_sto_ns).max(1),
            buffer_offset: ticks_for_ns(tick_hz, minimums.t_buf_ns),
        })
    }

    /// Ticks per SCL period.
    pub const fn period(&self) -> u16 {
        self.period
    }

    /// Ticks the clock is released per period.
    pub const fn high_len(&self) -> u16 {
        self.high_len
    }

    /// Ticks the clock is driven low per period.
    pub const fn low_len(&self) -> u16 {
        self.period - self.high_len
    }

    /// Sample offset within the high phase.
    pub const fn sample_offset(&self) -> u16 {
        self.sample_offset
    }

    /// Shift offset within the low phase.
    pub const fn shift_offset(&self) -> u16 {
        self.shift_offset
    }

    /// STOP setup offset after disable.
    pub const fn stop_setup_offset(&self) -> u16 {
        self.stop_setup_offset
    }

    /// Buffer ticks between the STOP point and bus free.
    pub const fn buffer_offset(&self) -> u16 {
        self.buffer_offset
    }

    /// Counter value at which `shift_enable` fires.
    pub const fn shift_tick(&self) -> u16 {
        self.high_len + self.shift_offset
    }

    /// Counter value at which `bus_free_enable` fires.
    pub const fn bus_free_tick(&self) -> u16 {
        self.stop_setup_offset + self.buffer_offset
    }

    /// SCL frequency in Hz at the given tick rate.
    pub const fn bus_frequency_hz(&self, tick_hz: u32) -> u32 {
        bus_frequency_hz(tick_hz, self.period)
    }
}

impl TryFrom<TimingParams> for Timing {
    type Error = Error;

    fn try_from(params: TimingParams) -> Result<Self, Self::Error> {
        Self::new(params)
    }
}

impl From<Timing> for TimingParams {
    fn from(timing: Timing) -> Self {
        Self {
            period: timing.period,
            high_len: timing.high_len,
            sample_offset: timing.sample_offset,
            shift_offset: timing.shift_offset,
            stop_setup_offset: timing.stop_setup_offset,
            buffer_offset: timing.buffer_offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FAST_MODE, FAST_MODE_MAX_HZ};

    fn params() -> TimingParams {
        TimingParams {
            period: 20,
            high_len: 10,
            sample_offset: 5,
            shift_offset: 4,
            stop_setup_offset: 1,
            buffer_offset: 3,
        }
    }

    fn violation(params: TimingParams) -> TimingViolation {
        match Timing::new(params) {
            Err(Error::InvalidTiming(v)) => v,
            Ok(t) => panic!("accepted invalid timing {:?}", t),
        }
    }

    #[test]
    fn test_accepts_reference_timing() {
        let timing = Timing::new(params()).unwrap();
        assert_eq!(timing.period(), 20);
        assert_eq!(timing.low_len(), 10);
        assert_eq!(timing.shift_tick(), 14);
        assert_eq!(timing.bus_free_tick(), 4);
        assert_eq!(TimingParams::from(timing), params());
    }

    #[test]
    fn test_rejects_degenerate_high_phase() {
        let mut p = params();
        p.high_len = 0;
        assert_eq!(violation(p), TimingViolation::EmptyHighPhase);

        p.high_len = 20;
        assert_eq!(
            violation(p),
            TimingViolation::HighPhaseTooLong {
                high_len: 20,
                period: 20
            }
        );
    }

    #[test]
    fn test_rejects_sample_outside_high_phase() {
        let mut p = params();
        p.sample_offset = 10;
        assert!(matches!(
            violation(p),
            TimingViolation::SampleOutsideHighPhase { .. }
        ));
        p.sample_offset = 0;
        assert!(matches!(
            violation(p),
            TimingViolation::SampleOutsideHighPhase { .. }
        ));
    }

    #[test]
    fn test_shift_may_land_on_prewrap_tick() {
        let mut p = params();
        p.shift_offset = 10;
        assert_eq!(Timing::new(p).unwrap().shift_tick(), 20);
        p.shift_offset = 11;
        assert_eq!(
            violation(p),
            TimingViolation::ShiftOutsidePeriod {
                shift_tick: 21,
                period: 20
            }
        );
    }

    #[test]
    fn test_rejects_stop_and_bus_free_offsets() {
        let mut p = params();
        p.stop_setup_offset = 0;
        assert_eq!(violation(p), TimingViolation::EmptyStopSetup);

        p.stop_setup_offset = 15;
        p.buffer_offset = 6;
        assert_eq!(
            violation(p),
            TimingViolation::BusFreeOutsidePeriod {
                bus_free_tick: 21,
                period: 20
            }
        );
    }

    #[test]
    fn test_try_from_params() {
        let timing: Result<Timing, _> = params().try_into();
        assert!(timing.is_ok());
    }

    #[test]
    fn test_fast_mode_at_50mhz() {
        let timing = Timing::from_bus_minimums(50_000_000, FAST_MODE_MAX_HZ, &FAST_MODE).unwrap();
        assert_eq!(timing.period(), 125);
        assert_eq!(timing.bus_frequency_hz(50_000_000), 400_000);
        // 30 + 65 minimum, 30 surplus split evenly
        assert_eq!(timing.high_len(), 45);
        assert_eq!(timing.low_len(), 80);
        assert!(timing.high_len() >= 30 && timing.low_len() >= 65);
        assert_eq!(timing.sample_offset(), 22);
        assert_eq!(timing.shift_offset(), 40);
        assert_eq!(timing.stop_setup_offset(), 30);
        assert_eq!(timing.buffer_offset(), 65);
    }

    #[test]
    fn test_fast_mode_at_8mhz() {
        // high >= 5, low >= 11, four surplus ticks
        let timing = Timing::from_bus_minimums(8_000_000, FAST_MODE_MAX_HZ, &FAST_MODE).unwrap();
        assert_eq!(timing.period(), 20);
        assert_eq!(timing.high_len(), 7);
        assert_eq!(timing.low_len(), 13);
        assert_eq!(timing.bus_free_tick(), 5 + 11);
    }

    #[test]
    fn test_fast_mode_stretches_period_when_minimums_exceed_request() {
        // 1 MHz asked for, but 8 MHz ticks need 5 + 11 ticks per period
        let timing = Timing::from_bus_minimums(8_000_000, 1_000_000, &FAST_MODE).unwrap();
        assert_eq!(timing.period(), 16);
        assert_eq!(timing.high_len(), 5);
        assert_eq!(timing.low_len(), 11);
        assert_eq!(timing.bus_frequency_hz(8_000_000), 500_000);
    }

    #[test]
    fn test_fast_mode_rejects_bus_faster_than_tick() {
        assert_eq!(
            Timing::from_bus_minimums(100_000, FAST_MODE_MAX_HZ, &FAST_MODE),
            Err(Error::InvalidTiming(TimingViolation::TickRateTooLow {
                tick_hz: 100_000
            }))
        );
    }
}
