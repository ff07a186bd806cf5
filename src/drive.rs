//! Open-drain projection of the clock level.
//!
//! An open-drain output can only pull the line low or let go of it; an external
//! pull-up, not modelled here, brings a released line high. [`BusDrive`] is the
//! two-valued output the generator emits each tick, and [`BusDrive::apply`]
//! maps it onto an `embedded-hal` pin configured as open-drain, where
//! `set_high` releases the line.

use embedded_hal::digital::OutputPin;

/// What the generator does to the SCL line during one tick.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum BusDrive {
    /// Actively pull the line low.
    DriveLow,
    /// Leave the line undriven so the pull-up holds it high.
    #[default]
    Release,
}

impl BusDrive {
    /// Drive state for a synchronized logical level.
    pub const fn from_level(level: bool) -> Self {
        if level {
            BusDrive::Release
        } else {
            BusDrive::DriveLow
        }
    }

    /// Whether the line is released.
    pub const fn is_released(self) -> bool {
        matches!(self, BusDrive::Release)
    }

    /// Writes this drive state to an open-drain pin.
    ///
    /// # Errors
    /// Whatever the pin reports.
    pub fn apply<P: OutputPin>(self, pin: &mut P) -> Result<(), P::Error> {
        match self {
            BusDrive::DriveLow => pin.set_low(),
            BusDrive::Release => pin.set_high(),
        }
    }
}

impl From<bool> for BusDrive {
    fn from(level: bool) -> Self {
        Self::from_level(level)
    }
}
