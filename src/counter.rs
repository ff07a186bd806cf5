//! Cycle counter and bus phase tracking.
//!
//! The counter is the only piece of scheduling state. It runs over
//! `1..=period` while a transaction is active, where `period` is the
//! transient pre-wrap value, and keeps advancing for a few ticks after
//! `enable` drops so the STOP and bus free strobes can still fire at their
//! offsets. Then it parks at 1, ready for the next transaction.
//!
//! All methods take `self` by value and return the next state. The caller
//! reads the current state, computes the next one into a local and commits it,
//! so nothing ever observes a half-updated counter.

use crate::timing::Timing;

/// Where the bus is in its transaction lifecycle.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum BusPhase {
    /// Enable is low, the counter is parked at 1 and the clock is released.
    #[default]
    Idle,
    /// Enable is high and the counter cycles through `1..=period`.
    Active,
    /// Enable has dropped and the counter is advancing toward the bus free
    /// offset.
    Draining,
}

/// The cycle counter, its started flag and the bus phase it implies.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct CycleCounter {
    value: u16,
    started: bool,
    phase: BusPhase,
}

impl Default for CycleCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleCounter {
    /// The reset state: counter at 1, not started, idle.
    pub const fn new() -> Self {
        Self {
            value: 1,
            started: false,
            phase: BusPhase::Idle,
        }
    }

    /// Current counter value.
    pub const fn value(&self) -> u16 {
        self.value
    }

    /// Whether a full period has completed since enable was asserted.
    pub const fn started(&self) -> bool {
        self.started
    }

    /// Current bus phase.
    pub const fn phase(&self) -> BusPhase {
        self.phase
    }

    /// Settles the counter in force for a tick given that tick's `enable`.
    ///
    /// A rising enable starts a fresh period at 1 with `started` cleared. A
    /// falling enable starts draining at 1; `started` survives only when the
    /// transaction ended on a period boundary, where the counter has already
    /// wrapped to 1 and the rising edge is real. Enable returning while
    /// draining cuts the bus free time short and drops the pending STOP and
    /// bus free strobes.
    pub fn enter(self, enable: bool) -> Self {
        match (self.phase, enable) {
            (BusPhase::Active, true) | (BusPhase::Draining, false) | (BusPhase::Idle, false) => {
                self
            }
            (_, true) => Self {
                value: 1,
                started: false,
                phase: BusPhase::Active,
            },
            (BusPhase::Active, false) => Self {
                value: 1,
                started: self.started && self.value == 1,
                phase: BusPhase::Draining,
            },
        }
    }

    /// Computes the counter for the following tick.
    ///
    /// Must be called on the value returned by [`enter`](Self::enter) for the
    /// same tick.
    pub fn advance(self, timing: &Timing) -> Self {
        match self.phase {
            BusPhase::Active if self.value < timing.period() => Self {
                value: self.value + 1,
                ..self
            },
            BusPhase::Active => Self {
                value: 1,
                started: true,
                phase: BusPhase::Active,
            },
            BusPhase::Draining if self.value >= timing.bus_free_tick() => Self::new(),
            BusPhase::Draining => Self {
                value: self.value + 1,
                started: false,
                phase: BusPhase::Draining,
            },
            BusPhase::Idle => Self::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::TimingParams;

    fn timing() -> Timing {
        Timing::new(TimingParams {
            period: 4,
            high_len: 2,
            sample_offset: 1,
            shift_offset: 1,
            stop_setup_offset: 1,
            buffer_offset: 2,
        })
        .unwrap()
    }

    fn tick(counter: CycleCounter, enable: bool) -> (CycleCounter, CycleCounter) {
        let current = counter.enter(enable);
        (current, current.advance(&timing()))
    }

    #[test]
    fn test_reset_state_is_parked() {
        let counter = CycleCounter::new();
        assert_eq!(counter.value(), 1);
        assert!(!counter.started());
        assert_eq!(counter.phase(), BusPhase::Idle);
        assert_eq!(counter, CycleCounter::default());
    }

    #[test]
    fn test_wraps_after_prewrap_value_and_latches_started() {
        let mut counter = CycleCounter::new();
        let mut seen = [0u16; 6];
        for slot in seen.iter_mut() {
            let (current, next) = tick(counter, true);
            *slot = current.value();
            counter = next;
        }
        assert_eq!(seen, [1, 2, 3, 4, 1, 2]);
        assert!(counter.started());
        assert_eq!(counter.phase(), BusPhase::Active);
    }

    #[test]
    fn test_idle_holds_at_one() {
        let mut counter = CycleCounter::new();
        for _ in 0..10 {
            let (current, next) = tick(counter, false);
            assert_eq!(current.value(), 1);
            assert_eq!(current.phase(), BusPhase::Idle);
            counter = next;
        }
    }

    #[test]
    fn test_drains_to_bus_free_then_parks() {
        let mut counter = CycleCounter::new();
        for _ in 0..4 {
            counter = tick(counter, true).1;
        }
        assert_eq!(counter.value(), 1);
        assert!(counter.started());

        assert!(counter.enter(false).started());

        let mut seen = [(0u16, BusPhase::Idle); 5];
        for slot in seen.iter_mut() {
            let (current, next) = tick(counter, false);
            *slot = (current.value(), current.phase());
            counter = next;
        }
        assert_eq!(
            seen,
            [
                (1, BusPhase::Draining),
                (2, BusPhase::Draining),
                (3, BusPhase::Draining),
                (1, BusPhase::Idle),
                (1, BusPhase::Idle),
            ]
        );
        assert!(!counter.started());
    }

    #[test]
    fn test_mid_period_disable_restarts_drain_at_one() {
        let mut counter = CycleCounter::new();
        for _ in 0..2 {
            counter = tick(counter, true).1;
        }
        assert_eq!(counter.value(), 3);
        let (current, _) = tick(counter, false);
        assert_eq!(current.value(), 1);
        assert_eq!(current.phase(), BusPhase::Draining);
        assert!(!current.started());
    }

    #[test]
    fn test_mid_period_disable_clears_started() {
        let mut counter = CycleCounter::new();
        for _ in 0..6 {
            counter = tick(counter, true).1;
        }
        assert_eq!(counter.value(), 3);
        assert!(counter.started());

        let (current, next) = tick(counter, false);
        assert_eq!(current.value(), 1);
        assert_eq!(current.phase(), BusPhase::Draining);
        assert!(!current.started());
        assert!(!next.started());
    }

    #[test]
    fn test_reenable_while_draining_restarts_period() {
        let mut counter = CycleCounter::new();
        for _ in 0..4 {
            counter = tick(counter, true).1;
        }
        counter = tick(counter, false).1;
        assert_eq!(counter.phase(), BusPhase::Draining);
        let (current, _) = tick(counter, true);
        assert_eq!(current.value(), 1);
        assert!(!current.started());
        assert_eq!(current.phase(), BusPhase::Active);
    }
}
