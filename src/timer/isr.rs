use crate::driver::SclDriver;
use crate::generator::{Inputs, TickOutput};
use crate::timing::Timing;
use core::cell::RefCell;
use critical_section::Mutex;
use embedded_hal::digital::OutputPin;

/// Global slot holding the driver shared between the tick ISR and the main loop.
pub type GlobalSclDriver<SCL> = Mutex<RefCell<Option<SclDriver<SCL>>>>;

/// Used to initialize the global static `SclDriver` for use with
/// `critical_section`.
///
/// # Returns
/// * An empty mutable ref-cell
///
/// # Example
/// ```rust,ignore
/// use i2c_fm_timing::timer::{GlobalSclDriver, global_scl_driver_init};
/// use some_hal::PB8;
///
/// static SCL_DRIVER: GlobalSclDriver<PB8> = global_scl_driver_init::<PB8>();
/// ```
pub const fn global_scl_driver_init<SCL: OutputPin>() -> GlobalSclDriver<SCL> {
    Mutex::new(RefCell::new(None))
}

/// Builds the driver and stores it in the global slot, replacing any previous
/// one.
///
/// # Arguments
/// * The global static `SclDriver`
/// * The open-drain SCL pin
/// * The timing for the interrupt rate, e.g. `period = 125` for a 50 MHz tick
///   and a 400 kHz bus
///
/// # Errors
/// Whatever the pin reports while releasing the line. The slot is left
/// untouched in that case.
///
/// # Example
/// ```rust,ignore
/// fn main() {
///     global_scl_driver_setup(&SCL_DRIVER, scl, timing).unwrap();
/// }
/// ```
pub fn global_scl_driver_setup<SCL: OutputPin>(
    global_driver: &'static GlobalSclDriver<SCL>,
    scl: SCL,
    timing: Timing,
) -> Result<(), SCL::Error> {
    let driver = SclDriver::new(scl, timing)?;
    critical_section::with(|cs| {
        let _ = global_driver.borrow(cs).replace(Some(driver));
    });
    Ok(())
}

/// Runs one tick from inside the timer interrupt.
///
/// # Returns
/// * `None` if the slot is empty
/// * `Some` with the tick's output or the pin error
///
/// # Example
/// ```rust,ignore
/// #[interrupt]
/// fn TIM2() {
///     let enable = TRANSACTION_ACTIVE.load(Ordering::Relaxed);
///     if let Some(Ok(out)) = global_scl_timer_tick(&SCL_DRIVER, Inputs::enabled(enable)) {
///         if out.strobes.capture {
///             // sample SDA
///         }
///     }
/// }
/// ```
pub fn global_scl_timer_tick<SCL: OutputPin>(
    global_driver: &'static GlobalSclDriver<SCL>,
    inputs: Inputs,
) -> Option<Result<TickOutput, SCL::Error>> {
    critical_section::with(|cs| {
        global_driver
            .borrow(cs)
            .borrow_mut()
            .as_mut()
            .map(|driver| driver.step(inputs))
    })
}

/// Takes the driver back out of the global slot, e.g. to reconfigure the bus.
pub fn global_scl_driver_take<SCL: OutputPin>(
    global_driver: &'static GlobalSclDriver<SCL>,
) -> Option<SclDriver<SCL>> {
    critical_section::with(|cs| global_driver.borrow(cs).take())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::TimingParams;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    static SCL_DRIVER: GlobalSclDriver<PinMock> = global_scl_driver_init::<PinMock>();

    #[test]
    fn test_global_driver_round_trip() {
        let timing = Timing::new(TimingParams {
            period: 20,
            high_len: 10,
            sample_offset: 5,
            shift_offset: 4,
            stop_setup_offset: 1,
            buffer_offset: 3,
        })
        .unwrap();

        assert!(global_scl_timer_tick(&SCL_DRIVER, Inputs::enabled(true)).is_none());

        let scl = PinMock::new(&[
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ]);
        global_scl_driver_setup(&SCL_DRIVER, scl, timing).unwrap();

        let mut shifts = 0;
        for _ in 0..20 {
            let out = global_scl_timer_tick(&SCL_DRIVER, Inputs::enabled(true))
                .unwrap()
                .unwrap();
            if out.strobes.shift {
                shifts += 1;
            }
        }
        assert_eq!(shifts, 1);

        let mut driver = global_scl_driver_take(&SCL_DRIVER).unwrap();
        driver.scl.done();
        assert!(global_scl_driver_take(&SCL_DRIVER).is_none());
    }
}
