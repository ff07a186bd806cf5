//! Open-drain SCL pin driver.
//!
//! This module provides the [`SclDriver`] struct, which couples an
//! [`SclGenerator`] to an `embedded-hal` output pin configured as open-drain.
//! Every [`tick()`](SclDriver::tick) advances the generator and applies the
//! observed [`BusDrive`] to the pin; the strobes are handed back to the caller
//! for the shift register and bus control logic.
//!
//! The driver operates independently of the target platform's oscillator
//! speed, provided that `tick()` is called at the fixed rate the [`Timing`]
//! was built for (e.g. every 20 ns for a 50 MHz tick and `period = 125`).
//!
//! ## Example
//!
//! ```rust
//! # use embedded_hal_mock::eh1::digital::{Mock as Pin, State as PinState, Transaction as PinTransaction};
//! use i2c_fm_timing::driver::SclDriver;
//! use i2c_fm_timing::timing::{Timing, TimingParams};
//!
//! # let scl = Pin::new(&[
//! #     PinTransaction::set(PinState::High),
//! #     PinTransaction::set(PinState::Low),
//! # ]);
//! let timing = Timing::new(TimingParams {
//!     period: 20,
//!     high_len: 10,
//!     sample_offset: 5,
//!     shift_offset: 4,
//!     stop_setup_offset: 1,
//!     buffer_offset: 3,
//! })
//! .unwrap();
//! let mut driver = SclDriver::new(scl, timing).unwrap();
//!
//! for _ in 0..11 {
//!     let out = driver.tick(true).unwrap(); // Called once per tick by a timer interrupt
//!     if out.strobes.shift {
//!         // load the next SDA bit
//!     }
//! }
//! # driver.scl.done();
//! ```
//!
//! ## Design Notes
//!
//! This module does **not** drive SDA, detect START/STOP or frame bytes. It
//! only keeps SCL and the strobes in step with the tick source.

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;

use crate::counter::BusPhase;
use crate::drive::BusDrive;
use crate::generator::{Inputs, SclGenerator, TickOutput};
use crate::timing::Timing;

/// A tick-driven SCL generator bound to an open-drain output pin.
///
/// ## Type Parameters
///
/// - `SCL`: A type implementing [`embedded_hal::digital::OutputPin`], configured
///   open-drain so that `set_high` releases the line.
///
/// ## Notes
///
/// - Only one `SclDriver` instance should drive a given bus.
/// - You are responsible for calling `tick()` at the correct interval using
///   either a hardware timer interrupt or a polling loop.
/// - The pin is only written when the drive state changes.
#[derive(Debug)]
pub struct SclDriver<SCL>
where
    SCL: OutputPin,
{
    /// SCL pin
    ///
    /// Writing it directly leaves the driver's record of the last drive state
    /// stale, so the next `step()` may skip a write it needed.
    pub scl: SCL,
    generator: SclGenerator,
    last_drive: BusDrive,
}

impl<SCL> SclDriver<SCL>
where
    SCL: OutputPin,
{
    /// Creates a driver and releases the line.
    ///
    /// # Arguments
    /// - `scl`: open-drain pin carrying the bus clock
    /// - `timing`: validated timing for the tick rate `tick()` will be called at
    ///
    /// # Errors
    /// Whatever the pin reports while releasing the line.
    pub fn new(scl: SCL, timing: Timing) -> Result<Self, SCL::Error> {
        let mut scl = scl;
        BusDrive::Release.apply(&mut scl)?;
        Ok(Self {
            scl,
            generator: SclGenerator::new(timing),
            last_drive: BusDrive::Release,
        })
    }

    /// Advances the generator one tick and applies the drive state to the pin.
    ///
    /// # Errors
    /// Whatever the pin reports. The generator has already advanced; the next
    /// successful tick writes the pin again.
    pub fn step(&mut self, inputs: Inputs) -> Result<TickOutput, SCL::Error> {
        let out = self.generator.step(inputs);
        if out.drive != self.last_drive {
            out.drive.apply(&mut self.scl)?;
            self.last_drive = out.drive;
        }
        Ok(out)
    }

    /// Advances one tick with reset released.
    ///
    /// # Errors
    /// Whatever the pin reports.
    pub fn tick(&mut self, enable: bool) -> Result<TickOutput, SCL::Error> {
        self.step(Inputs::enabled(enable))
    }

    /// Resets the generator and releases the line immediately.
    ///
    /// # Errors
    /// Whatever the pin reports.
    pub fn reset(&mut self) -> Result<TickOutput, SCL::Error> {
        self.step(Inputs::RESET)
    }

    /// The underlying generator.
    pub fn generator(&self) -> &SclGenerator {
        &self.generator
    }

    /// Current bus phase.
    pub fn phase(&self) -> BusPhase {
        self.generator.phase()
    }

    /// Non-blocking wait for the bus free condition.
    pub fn wait_bus_free(&self) -> nb::Result<(), Infallible> {
        self.generator.wait_bus_free()
    }

    /// Consumes the driver and hands back the pin.
    pub fn release(self) -> SCL {
        self.scl
    }
}
