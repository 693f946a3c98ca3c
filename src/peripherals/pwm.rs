//! Servo PWM output on TIM1 channel 1.

use embassy_stm32::{
    gpio::OutputType,
    peripherals::{PA8, TIM1},
    time::Hertz,
    timer::{
        low_level::CountingMode,
        simple_pwm::{PwmPin, SimplePwm},
    },
    Peri,
};
use servoctl_rs::error::PwmError;
use servoctl_rs::platform::{timer_frequency_hz, PwmOutput};

/// Output frequency before the first period is programmed
const BOOT_FREQUENCY_HZ: u32 = 50;

/// Peripheral collection for the servo output
pub struct ServoPwmPeripherals<'d> {
    pub tim: Peri<'d, TIM1>,
    pub pin: Peri<'d, PA8>, // TIM1_CH1
}

/// Macro to claim peripherals for the servo output
#[macro_export]
macro_rules! claim_servo_pwm {
    ($peripherals:expr) => {{
        $crate::peripherals::pwm::ServoPwmPeripherals {
            tim: $peripherals.TIM1,
            pin: $peripherals.PA8, // TIM1_CH1
        }
    }};
}

/// [`PwmOutput`] backed by `SimplePwm`.
///
/// The channel stays disabled until the first successful
/// [`program`](PwmOutput::program) call. The timer runs at the period
/// rounded to the nearest whole hertz; the duty ratio is exact.
pub struct ServoPwm<'d> {
    pwm: SimplePwm<'d, TIM1>,
}

impl<'d> ServoPwm<'d> {
    pub fn new(peripherals: ServoPwmPeripherals<'d>) -> Self {
        let ch1 = PwmPin::new(peripherals.pin, OutputType::PushPull);
        let pwm = SimplePwm::new(
            peripherals.tim,
            Some(ch1),
            None,
            None,
            None,
            Hertz::hz(BOOT_FREQUENCY_HZ),
            CountingMode::EdgeAlignedUp,
        );
        Self { pwm }
    }
}

impl PwmOutput for ServoPwm<'_> {
    fn program(&mut self, period_us: u32, pulse_us: u32) -> Result<(), PwmError> {
        // Whole-hertz resolution; see `timer_frequency_hz`
        let hz = timer_frequency_hz(period_us)?;
        if pulse_us > period_us {
            return Err(PwmError::InvalidPulseWidth);
        }

        self.pwm.set_frequency(Hertz::hz(hz));

        let mut ch = self.pwm.ch1();
        let max = u64::from(ch.max_duty_cycle());
        let duty = (max * u64::from(pulse_us) / u64::from(period_us))
            .try_into()
            .map_err(|_| PwmError::Rejected)?;
        ch.set_duty_cycle(duty);
        ch.enable();
        Ok(())
    }
}
