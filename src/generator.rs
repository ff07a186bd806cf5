//! The per-tick controller.
//!
//! [`SclGenerator`] owns the timing, the cycle counter, the clock
//! synchronizer and the strobe latch, and advances all of them in one call to
//! [`step`](SclGenerator::step) per tick. It has no notion of wall time: the
//! caller drives it from a timer interrupt, a delay loop or a test harness.
//!
//! ## Tick model
//!
//! Each tick the generator settles the counter for the tick's `enable`,
//! evaluates the intended clock level and the five strobes on that counter,
//! commits them into its output registers and advances the counter. The
//! observation a tick returns is the content of those registers as they stood
//! when the tick began, so the clock level and every strobe of one
//! observation come from the same counter value:
//!
//! ```text
//! tick     0 ......... 10 ........ 20 ........ 30 ........ 40  41      44
//! enable   ‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾|_______________
//! SCL      ‾‾‾‾‾‾‾‾‾‾‾‾|___________|‾‾‾‾‾‾‾‾‾‾‾|___________|‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾
//! shift                   14                      34
//! capture                                 25
//! stop                                                          41
//! bus free                                                              44
//! ```
//!
//! (period 20, high 10, sample 5, shift 4, STOP setup 1, buffer 3)
//!
//! ## Reset
//!
//! [`Inputs::reset`] is checked before anything else. It returns the idle
//! state, a released line and no strobes in the same tick.

use core::convert::Infallible;

use crate::counter::{BusPhase, CycleCounter};
use crate::drive::BusDrive;
use crate::fmt::{debug, trace};
use crate::phase::intended_level;
use crate::strobe::{Strobe, Strobes, schedule};
use crate::sync::Synchronizer;
use crate::timing::Timing;

/// Inputs sampled once per tick.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Inputs {
    /// Level-active reset, taking priority over everything else.
    pub reset: bool,
    /// Marks an active bus transaction.
    pub enable: bool,
}

impl Inputs {
    /// Inputs asserting reset.
    pub const RESET: Inputs = Inputs {
        reset: true,
        enable: false,
    };

    /// Inputs with reset released and the given enable level.
    pub const fn enabled(enable: bool) -> Self {
        Self {
            reset: false,
            enable,
        }
    }
}

/// Everything the generator emits for one tick, observed atomically.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct TickOutput {
    /// The five strobes.
    pub strobes: Strobes,
    /// The open-drain clock line.
    pub drive: BusDrive,
}

impl TickOutput {
    /// Output during and immediately after reset.
    pub const RESET: TickOutput = TickOutput {
        strobes: Strobes::NONE,
        drive: BusDrive::Release,
    };

    /// Whether `strobe` fired this tick.
    pub const fn is_set(&self, strobe: Strobe) -> bool {
        self.strobes.is_set(strobe)
    }
}

/// Cycle-accurate SCL clock and strobe generator.
///
/// ## Example
///
/// ```
/// use i2c_fm_timing::drive::BusDrive;
/// use i2c_fm_timing::generator::SclGenerator;
/// use i2c_fm_timing::timing::{Timing, TimingParams};
///
/// let timing = Timing::new(TimingParams {
///     period: 20,
///     high_len: 10,
///     sample_offset: 5,
///     shift_offset: 4,
///     stop_setup_offset: 1,
///     buffer_offset: 3,
/// })
/// .unwrap();
/// let mut generator = SclGenerator::new(timing);
///
/// let mut low = 0;
/// for _ in 0..20 {
///     if generator.tick(true).drive == BusDrive::DriveLow {
///         low += 1;
///     }
/// }
/// assert_eq!(low, 10);
/// ```
#[derive(Debug, Clone)]
pub struct SclGenerator {
    timing: Timing,
    counter: CycleCounter,
    sync: Synchronizer,
    strobes: Strobes,
}

impl SclGenerator {
    /// Creates a generator in the reset state.
    pub const fn new(timing: Timing) -> Self {
        Self {
            timing,
            counter: CycleCounter::new(),
            sync: Synchronizer::new(),
            strobes: Strobes::NONE,
        }
    }

    /// Advances the generator by one tick.
    pub fn step(&mut self, inputs: Inputs) -> TickOutput {
        if inputs.reset {
            return self.reset();
        }

        let observed = self.output();
        let current = self.counter.enter(inputs.enable);
        if current.phase() != self.counter.phase() {
            trace!("bus phase {:?} -> {:?}", self.counter.phase(), current.phase());
        }

        let level = intended_level(&self.timing, current.value(), inputs.enable);
        let strobes = schedule(&self.timing, &current, inputs.enable);
        let next = current.advance(&self.timing);
        if next.phase() != current.phase() {
            trace!("bus phase {:?} -> {:?}", current.phase(), next.phase());
        }

        let _ = self.sync.clock(level);
        self.strobes = strobes;
        self.counter = next;
        observed
    }

    /// Advances by one tick with reset released.
    pub fn tick(&mut self, enable: bool) -> TickOutput {
        self.step(Inputs::enabled(enable))
    }

    /// Forces the idle state, releasing the line and clearing all strobes.
    pub fn reset(&mut self) -> TickOutput {
        debug!("reset from {:?} at counter {}", self.counter.phase(), self.counter.value());
        self.counter = CycleCounter::new();
        self.sync.reset();
        self.strobes = Strobes::NONE;
        TickOutput::RESET
    }

    /// The output the next tick will present.
    pub fn output(&self) -> TickOutput {
        TickOutput {
            strobes: self.strobes,
            drive: BusDrive::from_level(self.sync.level()),
        }
    }

    /// The validated timing this generator runs with.
    pub const fn timing(&self) -> &Timing {
        &self.timing
    }

    /// The committed counter state.
    pub const fn counter(&self) -> CycleCounter {
        self.counter
    }

    /// The bus phase the next tick starts from, before its `enable` is applied.
    pub const fn phase(&self) -> BusPhase {
        self.counter.phase()
    }

    /// Whether the bus is idle and every strobe of the last transaction has
    /// been emitted.
    pub fn is_bus_free(&self) -> bool {
        self.counter.phase() == BusPhase::Idle && !self.strobes.any()
    }

    /// Non-blocking wait for the bus free condition.
    ///
    /// Returns [`nb::Error::WouldBlock`] while a transaction is active or
    /// draining. Use with `nb::block!` in polling code.
    pub fn wait_bus_free(&self) -> nb::Result<(), Infallible> {
        if self.is_bus_free() {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }
}
