//! Fixed-capacity recorder of generator output.
//!
//! A [`Trace`] keeps the [`TickOutput`] of consecutive ticks so the waveform
//! can be inspected afterwards: which ticks a strobe fired on, and how long
//! the clock line stayed released or driven low. It allocates nothing, which
//! makes it usable on target for a short capture as well as in host tests.
//!
//! ```
//! use i2c_fm_timing::generator::SclGenerator;
//! use i2c_fm_timing::strobe::Strobe;
//! use i2c_fm_timing::timing::{Timing, TimingParams};
//! use i2c_fm_timing::trace::Trace;
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
//! let mut generator = SclGenerator::new(timing);
//! let mut trace: Trace<64> = Trace::new();
//! for tick in 0..64 {
//!     trace.record(generator.tick(tick < 40)).unwrap();
//! }
//! assert!(trace.pulses(Strobe::Shift).eq([14, 34]));
//! assert_eq!(trace.count(Strobe::BusFree), 1);
//! ```

use heapless::Vec;

use crate::drive::BusDrive;
use crate::generator::TickOutput;
use crate::strobe::Strobe;

/// Records up to `N` consecutive tick outputs.
#[derive(Debug, Clone, Default)]
pub struct Trace<const N: usize> {
    outputs: Vec<TickOutput, N>,
}

impl<const N: usize> Trace<N> {
    /// An empty trace.
    pub const fn new() -> Self {
        Self {
            outputs: Vec::new(),
        }
    }

    /// Appends the output of the next tick.
    ///
    /// # Errors
    /// Returns `output` back when the trace is full.
    pub fn record(&mut self, output: TickOutput) -> Result<(), TickOutput> {
        self.outputs.push(output)
    }

    /// Number of recorded ticks.
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Whether the trace has reached its capacity.
    pub fn is_full(&self) -> bool {
        self.outputs.is_full()
    }

    /// Discards all recorded ticks.
    pub fn clear(&mut self) {
        self.outputs.clear();
    }

    /// The recorded outputs, oldest first.
    pub fn outputs(&self) -> &[TickOutput] {
        &self.outputs
    }

    /// Drive state at `tick`, if recorded.
    pub fn drive_at(&self, tick: usize) -> Option<BusDrive> {
        self.outputs.get(tick).map(|output| output.drive)
    }

    /// Ticks on which `strobe` fired.
    pub fn pulses(&self, strobe: Strobe) -> impl Iterator<Item = usize> + '_ {
        self.outputs
            .iter()
            .enumerate()
            .filter(move |(_, output)| output.strobes.is_set(strobe))
            .map(|(tick, _)| tick)
    }

    /// Number of ticks on which `strobe` fired.
    pub fn count(&self, strobe: Strobe) -> usize {
        self.pulses(strobe).count()
    }

    /// Run-length encoding of the clock line as `(drive, ticks)` pairs.
    pub fn drive_runs(&self) -> DriveRuns<'_> {
        DriveRuns {
            outputs: &self.outputs,
        }
    }
}

/// Iterator over consecutive runs of the same [`BusDrive`].
#[derive(Debug, Clone)]
pub struct DriveRuns<'a> {
    outputs: &'a [TickOutput],
}

impl Iterator for DriveRuns<'_> {
    type Item = (BusDrive, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let drive = self.outputs.first()?.drive;
        let len = self
            .outputs
            .iter()
            .position(|output| output.drive != drive)
            .unwrap_or(self.outputs.len());
        self.outputs = &self.outputs[len..];
        Some((drive, len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strobe::Strobes;

    fn output(drive: BusDrive, strobes: Strobes) -> TickOutput {
        TickOutput { strobes, drive }
    }

    #[test]
    fn test_record_until_full() {
        let mut trace: Trace<2> = Trace::new();
        assert!(trace.is_empty());
        assert!(trace.record(TickOutput::RESET).is_ok());
        assert!(trace.record(TickOutput::RESET).is_ok());
        assert!(trace.is_full());
        assert_eq!(trace.record(TickOutput::RESET), Err(TickOutput::RESET));
        assert_eq!(trace.len(), 2);
        trace.clear();
        assert!(trace.is_empty());
    }

    #[test]
    fn test_pulses_and_runs() {
        let shift = Strobes {
            shift: true,
            ..Strobes::NONE
        };
        let mut trace: Trace<8> = Trace::new();
        for out in [
            output(BusDrive::Release, Strobes::NONE),
            output(BusDrive::Release, shift),
            output(BusDrive::DriveLow, Strobes::NONE),
            output(BusDrive::DriveLow, shift),
            output(BusDrive::DriveLow, Strobes::NONE),
            output(BusDrive::Release, Strobes::NONE),
        ] {
            trace.record(out).unwrap();
        }

        assert!(trace.pulses(Strobe::Shift).eq([1, 3]));
        assert_eq!(trace.count(Strobe::Capture), 0);
        assert!(trace.drive_runs().eq([
            (BusDrive::Release, 2),
            (BusDrive::DriveLow, 3),
            (BusDrive::Release, 1),
        ]));
        assert_eq!(trace.drive_at(2), Some(BusDrive::DriveLow));
        assert_eq!(trace.drive_at(6), None);
    }

    #[test]
    fn test_empty_trace_has_no_runs() {
        let trace: Trace<4> = Trace::new();
        assert_eq!(trace.drive_runs().count(), 0);
    }
}
