//! # i2c-fm-timing
//!
//! A portable, no_std Rust clock generator for the SCL line of a Fast-mode
//! (400 kHz) I2C master, producing the per-tick strobes the rest of the master
//! needs to shift data, sample data and control STOP and bus-free timing.
//!
//! This crate implements a software-timed SCL generator using:
//! - a cycle counter advanced once per tick of a fixed-frequency source
//! - fixed tick offsets for high time, data setup, sample point, STOP setup and bus free
//! - a one-tick registered synchronizer so SCL only changes on tick boundaries
//! - `embedded-hal` traits for driving an open-drain SCL pin and pacing a loop
//! - interrupt-safe global access with `critical-section`
//!
//! ## Crate features
//! | Feature               | Description |
//! |-----------------------|-------------|
//! | `std`                 | Disables `#![no_std]` support |
//! | `delay-loop`          | Uses `embedded_hal::delay::DelayNs` for tick timing |
//! | `timer-isr` (default) | Uses `critical_section::with` for tick timing |
//! | `defmt-0-3`           | Uses `defmt` logging |
//! | `log`                 | Uses `log` logging |
//!
//! ## Usage
//!
//! ```rust
//! use i2c_fm_timing::generator::SclGenerator;
//! use i2c_fm_timing::timing::{Timing, TimingParams};
//!
//! let timing = Timing::new(TimingParams {
//!     period: 20,
//!     high_len: 10,
//!     sample_offset: 5,
//!     shift_offset: 4,
//!     stop_setup_offset: 1,
//!     buffer_offset: 3,
//! })?;
//! let mut generator = SclGenerator::new(timing);
//! for tick in 0..64 {
//!     let out = generator.tick(tick < 40); // Call once per tick
//!     if out.strobes.capture {
//!         // sample SDA
//!     }
//! }
//! assert!(generator.is_bus_free());
//! # Ok::<(), i2c_fm_timing::error::Error>(())
//! ```
//!
//! To drive a pin, wrap the generator in a [`driver::SclDriver`] and call its
//! `tick()` from a timer interrupt, or use `run_tick_loop()` with a `DelayNs`
//! implementation:
//!
//! ```rust,ignore
//! i2c_fm_timing::timer::run_tick_loop(&mut driver, &mut delay, 2_500, |out| {
//!     Inputs::enabled(transaction.step(out))
//! })?;
//! ```
//!
//! ## Integration Notes
//!
//! - All offsets are in ticks; build them for your tick rate with
//!   [`timing::Timing::from_bus_minimums`] or pick them by hand
//! - Outputs are registered: what `tick()` returns was decided on the previous tick
//! - Only one driver instance should be active per bus in interrupt-driven mode
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "timer-isr")]
pub use critical_section;

pub use heapless;

pub(crate) mod fmt;

pub mod consts;
pub mod counter;
pub mod drive;
pub mod driver;
pub mod error;
pub mod generator;
pub mod phase;
pub mod strobe;
pub mod sync;
pub mod timer;
pub mod timing;
pub mod trace;
