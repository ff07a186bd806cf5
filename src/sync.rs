//! One-tick synchronization register for the clock level.
//!
//! The intended level is a combinational function of the counter and may
//! glitch while it settles. It never reaches the shared bus line directly:
//! it is committed into this single-slot register and the register's output is
//! what the line follows, one tick later.

/// A single-slot delay register holding the observable clock level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Synchronizer {
    level: bool,
}

impl Default for Synchronizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Synchronizer {
    /// A register holding the released (high) level.
    pub const fn new() -> Self {
        Self { level: true }
    }

    /// Forces the register high, independent of tick phase.
    pub fn reset(&mut self) {
        self.level = true;
    }

    /// The level currently presented to the line.
    pub const fn level(&self) -> bool {
        self.level
    }

    /// Commits `intended` and returns the level it replaces.
    ///
    /// The returned level is the one observed during the tick in which
    /// `intended` was computed.
    pub fn clock(&mut self, intended: bool) -> bool {
        core::mem::replace(&mut self.level, intended)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_released() {
        assert!(Synchronizer::new().level());
    }

    #[test]
    fn test_delays_by_one_tick() {
        let mut sync = Synchronizer::new();
        let input = [false, false, true, false, true, true];
        let mut output = [false; 6];
        for (out, &level) in output.iter_mut().zip(input.iter()) {
            *out = sync.clock(level);
        }
        assert_eq!(output, [true, false, false, true, false, true]);
        assert!(sync.level());
    }

    #[test]
    fn test_reset_overrides_pending_level() {
        let mut sync = Synchronizer::new();
        let _ = sync.clock(false);
        assert!(!sync.level());
        sync.reset();
        assert!(sync.level());
    }
}
