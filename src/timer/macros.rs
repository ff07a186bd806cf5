/// Declares a static global `SCL_DRIVER` instance protected by a `critical_section` mutex.
///
/// This macro creates a `static` singleton `SCL_DRIVER` suitable for use in
/// interrupt-based environments, where both the main thread and the tick ISR
/// need to safely access the shared driver state.
///
/// # Arguments
/// - `$scl`: The concrete type of the SCL pin (must implement `OutputPin`)
///
/// # Example
/// ```rust,ignore
/// init_scl_driver!(MySclPinType);
/// ```
#[macro_export]
macro_rules! init_scl_driver {
    ( $scl:ty ) => {
        pub static SCL_DRIVER: $crate::timer::GlobalSclDriver<$scl> =
            $crate::timer::global_scl_driver_init::<$scl>();
    };
}

/// Initializes the global `SCL_DRIVER` singleton with a new driver instance.
///
/// This macro wraps construction of the `SclDriver` and stores it inside the
/// globally declared `SCL_DRIVER` created by `init_scl_driver!`. It evaluates
/// to the `Result` of releasing the line.
///
/// # Arguments
/// - `$scl`: The SCL pin (must implement `OutputPin`)
/// - `$timing`: A validated `Timing` for the tick rate of the ISR
///
/// # Example
/// ```rust,ignore
/// fn main() {
///     setup_scl_driver!(scl, timing).unwrap();
/// }
/// ```
///
/// # Notes
/// - Requires `init_scl_driver!` to have been used earlier.
#[macro_export]
macro_rules! setup_scl_driver {
    ( $scl:expr, $timing:expr ) => {
        $crate::timer::global_scl_driver_setup(&SCL_DRIVER, $scl, $timing)
    };
}

/// Calls `step()` on the global `SCL_DRIVER` if it has been initialized.
///
/// This macro is intended to be invoked from the timer ISR at the tick rate
/// the `Timing` was built for (e.g., every 20 ns for a 50 MHz tick). It
/// evaluates to `Option<Result<TickOutput, _>>`, `None` until the driver has
/// been set up. `tick_scl_timer!(reset)` steps with reset asserted.
///
/// # Example
/// ```rust,ignore
/// #[interrupt]
/// fn TIM2() {
///     let enable = TRANSACTION_ACTIVE.load(Ordering::Relaxed);
///     if let Some(Ok(out)) = tick_scl_timer!(enable) {
///         // react to out.strobes
///     }
/// }
/// ```
#[macro_export]
macro_rules! tick_scl_timer {
    ( reset ) => {
        $crate::timer::global_scl_timer_tick(&SCL_DRIVER, $crate::generator::Inputs::RESET)
    };
    ( $enable:expr ) => {
        $crate::timer::global_scl_timer_tick(
            &SCL_DRIVER,
            $crate::generator::Inputs::enabled($enable),
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::strobe::Strobe;
    use crate::timing::{Timing, TimingParams};
    use crate::trace::Trace;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    init_scl_driver!(PinMock);

    #[test]
    fn test_macros_drive_global_instance() {
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
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ]);

        assert!(tick_scl_timer!(true).is_none());
        setup_scl_driver!(scl, timing).unwrap();

        let mut trace: Trace<32> = Trace::new();
        for tick in 0..32 {
            let out = tick_scl_timer!(tick < 20).unwrap().unwrap();
            trace.record(out).unwrap();
        }
        assert!(trace.pulses(Strobe::Shift).eq([14]));
        assert!(trace.pulses(Strobe::Stop).eq([21]));
        assert!(trace.pulses(Strobe::BusFree).eq([24]));

        assert!(tick_scl_timer!(reset).unwrap().is_ok());
        let mut driver = crate::timer::global_scl_driver_take(&SCL_DRIVER).unwrap();
        driver.scl.done();
    }
}
