//! Hardware collaborators used by the pipeline.
//!
//! The firmware implements these on top of `embassy-stm32`; the tests use
//! in-memory doubles.

use crate::error::PwmError;
use core::fmt;

/// Output side of the serial link.
///
/// Used to echo typed characters and to print terminal diagnostics. Writers
/// must never block for longer than it takes to shift the bytes out.
///
/// Note: when using `writeln!`, include `\r` in the format string so terminals
/// render the line ending correctly.
pub trait SerialTx: fmt::Write {
    /// Transmit a single byte.
    fn write_byte(&mut self, byte: u8);

    /// Transmit a string followed by CRLF.
    fn println(&mut self, s: &str) {
        for &b in s.as_bytes() {
            self.write_byte(b);
        }
        self.write_byte(b'\r');
        self.write_byte(b'\n');
    }
}

/// PWM output driving the servo signal.
///
/// # Safety Invariants
///
/// - Only one owner per PWM channel
/// - No concurrent access to the same channel from multiple contexts
pub trait PwmOutput {
    /// Program a new period and pulse width, both in microseconds.
    ///
    /// # Errors
    ///
    /// Returns [`PwmError::InvalidPeriod`] if the timer cannot produce the
    /// period and [`PwmError::InvalidPulseWidth`] if the pulse is longer than
    /// the period. The previous output keeps running on error.
    fn program(&mut self, period_us: u32, pulse_us: u32) -> Result<(), PwmError>;
}

/// Timer frequency for a PWM period, rounded to the nearest whole hertz.
///
/// Timers that are programmed in hertz cannot produce every microsecond
/// period exactly: 9000 us becomes 111 Hz, about 9009 us on the pin. The
/// duty ratio is kept, so the pulse width scales by the same factor.
///
/// # Errors
///
/// [`PwmError::InvalidPeriod`] for a zero period or one longer than 2 s,
/// which would round to 0 Hz.
pub fn timer_frequency_hz(period_us: u32) -> Result<u32, PwmError> {
    let hz = 1_000_000u32
        .checked_add(period_us / 2)
        .and_then(|us| us.checked_div(period_us))
        .ok_or(PwmError::InvalidPeriod)?;
    if hz == 0 {
        return Err(PwmError::InvalidPeriod);
    }
    Ok(hz)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_frequency_exact_periods() {
        assert_eq!(timer_frequency_hz(20_000), Ok(50));
        assert_eq!(timer_frequency_hz(1_000_000), Ok(1));
        assert_eq!(timer_frequency_hz(1000), Ok(1000));
    }

    #[test]
    fn test_timer_frequency_rounds_to_nearest() {
        // 111.1 Hz
        assert_eq!(timer_frequency_hz(9000), Ok(111));
        // 142.86 Hz
        assert_eq!(timer_frequency_hz(7000), Ok(143));
    }

    #[test]
    fn test_timer_frequency_rejects_zero_period() {
        assert_eq!(timer_frequency_hz(0), Err(PwmError::InvalidPeriod));
        assert_eq!(timer_frequency_hz(u32::MAX), Err(PwmError::InvalidPeriod));
    }
}
