//! Single-tick strobes for the shift register and bus control logic.
//!
//! Every strobe is a pure function of the counter in force for a tick, the
//! `enable` input, the `started` flag and the bus phase. Each one is true for
//! exactly one tick per occurrence:
//!
//! | Strobe        | Condition                                        |
//! |---------------|--------------------------------------------------|
//! | `shift`       | enabled, counter == `high_len + shift_offset`    |
//! | `capture`     | enabled, started, counter == `sample_offset`     |
//! | `rising_edge` | started, counter == 1                            |
//! | `stop`        | draining, counter == `stop_setup_offset`         |
//! | `bus_free`    | draining, counter == `stop_setup_offset + buffer_offset` |
//!
//! `capture` is held off until a full period has elapsed: the first high
//! phase after enable is not preceded by a falling edge, so there is no bit to
//! sample yet. `rising_edge` fires at every wrap; consumers only act on the
//! last one before enable drops.

use crate::counter::{BusPhase, CycleCounter};
use crate::timing::Timing;

/// Identifies one of the five strobes.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Strobe {
    /// Shift the next outgoing data bit.
    Shift,
    /// Sample the data line.
    Capture,
    /// The clock has just returned high after a full period.
    RisingEdge,
    /// STOP may now be asserted with the required setup margin.
    Stop,
    /// The minimum bus free time has elapsed.
    BusFree,
}

impl Strobe {
    /// All strobes, in field order.
    pub const ALL: [Strobe; 5] = [
        Strobe::Shift,
        Strobe::Capture,
        Strobe::RisingEdge,
        Strobe::Stop,
        Strobe::BusFree,
    ];
}

/// The strobes of one tick.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Strobes {
    /// `shift_enable`
    pub shift: bool,
    /// `capture_enable`
    pub capture: bool,
    /// `rising_edge_marker`
    pub rising_edge: bool,
    /// `stop_enable`
    pub stop: bool,
    /// `bus_free_enable`
    pub bus_free: bool,
}

impl Strobes {
    /// No strobe asserted.
    pub const NONE: Strobes = Strobes {
        shift: false,
        capture: false,
        rising_edge: false,
        stop: false,
        bus_free: false,
    };

    /// Whether `strobe` is asserted.
    pub const fn is_set(&self, strobe: Strobe) -> bool {
        match strobe {
            Strobe::Shift => self.shift,
            Strobe::Capture => self.capture,
            Strobe::RisingEdge => self.rising_edge,
            Strobe::Stop => self.stop,
            Strobe::BusFree => self.bus_free,
        }
    }

    /// Whether any strobe is asserted.
    pub const fn any(&self) -> bool {
        self.shift || self.capture || self.rising_edge || self.stop || self.bus_free
    }
}

/// Computes the strobes for the counter in force this tick.
pub fn schedule(timing: &Timing, counter: &CycleCounter, enable: bool) -> Strobes {
    let value = counter.value();
    let draining = counter.phase() == BusPhase::Draining;
    Strobes {
        shift: enable && value == timing.shift_tick(),
        capture: enable && counter.started() && value == timing.sample_offset(),
        rising_edge: counter.started() && value == 1,
        stop: draining && value == timing.stop_setup_offset(),
        bus_free: draining && value == timing.bus_free_tick(),
    }
}
