use crate::driver::SclDriver;
use crate::generator::{Inputs, TickOutput};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Runs a blocking loop that repeatedly calls `step()` on the provided driver.
///
/// This is a simple timing loop for use in environments where interrupts are
/// unavailable or undesired. It paces the generator with a delay provider
/// implementing `embedded_hal::delay::DelayNs`.
///
/// # Arguments
/// - `driver`: A mutable reference to an `SclDriver` instance.
/// - `delay`: A delay provider implementing `DelayNs`, typically from the HAL.
/// - `tick_ns`: The delay between each tick, in nanoseconds.
/// - `control`: Receives the previous tick's output and returns the inputs for
///   the next tick. This is where the caller's transaction logic lives.
///
/// # Example
/// ```rust,ignore
/// use i2c_fm_timing::generator::Inputs;
/// use i2c_fm_timing::timer::run_tick_loop;
///
/// let mut bits = 0;
/// run_tick_loop(&mut driver, &mut delay, 2_500, |out| {
///     if out.strobes.shift {
///         bits += 1;
///     }
///     Inputs::enabled(bits < 9)
/// })?;
/// ```
///
/// # Notes
/// - This loop only returns when the pin reports an error.
/// - The time spent in `control` and in the pin write adds to `tick_ns`; keep
///   both short or subtract them from `tick_ns`.
pub fn run_tick_loop<D, SCL, F>(
    driver: &mut SclDriver<SCL>,
    delay: &mut D,
    tick_ns: u32,
    mut control: F,
) -> Result<core::convert::Infallible, SCL::Error>
where
    D: DelayNs,
    SCL: OutputPin,
    F: FnMut(&TickOutput) -> Inputs,
{
    let mut out = driver.generator().output();
    loop {
        out = driver.step(control(&out))?;
        delay.delay_ns(tick_ns);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::{Timing, TimingParams};
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use embedded_hal_mock::eh1::MockError;
    use std::io::ErrorKind;

    #[test]
    fn test_loop_feeds_control_and_returns_pin_error() {
        let timing = Timing::new(TimingParams {
            period: 20,
            high_len: 10,
            sample_offset: 5,
            shift_offset: 4,
            stop_setup_offset: 1,
            buffer_offset: 3,
        })
        .unwrap();
        let scl = PinMock::new(&[
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low).with_error(MockError::Io(ErrorKind::NotConnected)),
        ]);
        let mut driver = SclDriver::new(scl, timing).unwrap();
        let mut delay = NoopDelay::new();

        let mut ticks = 0;
        let result = run_tick_loop(&mut driver, &mut delay, 2_500, |_| {
            ticks += 1;
            Inputs::enabled(true)
        });
        assert!(result.is_err());
        // the falling edge at tick 10 is the first pin write after release
        assert_eq!(ticks, 11);
        driver.scl.done();
    }
}
