//! Servo output: validated parameter types and the parameter state machine.

pub mod control;

pub use control::{ServoConfig, ServoControl, ServoOutcome, ServoSnapshot, ServoState};

use crate::config::{MAX_ANGLE_DEG, MAX_DUTY_PERMILLE, MAX_PERIOD_MS, US_PER_MS};
use crate::error::ValidationError;
use core::fmt;

/// Duty cycle in tenths of a percent, `0..=1000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct DutyPermille(u32);

impl DutyPermille {
    /// # Errors
    /// [`ValidationError::DutyOutOfRange`] above 1000.
    pub const fn new(raw: u32) -> Result<Self, ValidationError> {
        if raw > MAX_DUTY_PERMILLE {
            return Err(ValidationError::DutyOutOfRange(raw));
        }
        Ok(Self(raw))
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for DutyPermille {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}%", self.0 / 10, self.0 % 10)
    }
}

/// PWM period in milliseconds, `0..=1000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct PeriodMs(u32);

impl PeriodMs {
    /// # Errors
    /// [`ValidationError::PeriodOutOfRange`] above 1000 ms.
    pub const fn new(raw: u32) -> Result<Self, ValidationError> {
        if raw > MAX_PERIOD_MS {
            return Err(ValidationError::PeriodOutOfRange(raw));
        }
        Ok(Self(raw))
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    /// Period in microseconds, as programmed into the PWM timer.
    pub const fn as_micros(self) -> u32 {
        self.0 * US_PER_MS
    }
}

/// Servo angle in degrees, `0..=180`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct AngleDeg(u32);

impl AngleDeg {
    /// # Errors
    /// [`ValidationError::AngleOutOfRange`] above 180 degrees.
    pub const fn new(raw: u32) -> Result<Self, ValidationError> {
        if raw > MAX_ANGLE_DEG {
            return Err(ValidationError::AngleOutOfRange(raw));
        }
        Ok(Self(raw))
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duty_bounds() {
        assert_eq!(DutyPermille::new(0).map(DutyPermille::get), Ok(0));
        assert_eq!(DutyPermille::new(1000).map(DutyPermille::get), Ok(1000));
        assert_eq!(
            DutyPermille::new(1001),
            Err(ValidationError::DutyOutOfRange(1001))
        );
    }

    #[test]
    fn test_period_bounds_and_conversion() {
        assert_eq!(PeriodMs::new(9).unwrap().as_micros(), 9000);
        assert_eq!(PeriodMs::new(1000).unwrap().as_micros(), 1_000_000);
        assert_eq!(
            PeriodMs::new(1001),
            Err(ValidationError::PeriodOutOfRange(1001))
        );
    }

    #[test]
    fn test_angle_bounds() {
        assert!(AngleDeg::new(180).is_ok());
        assert_eq!(AngleDeg::new(181), Err(ValidationError::AngleOutOfRange(181)));
        // Negative input wrapped by the parser is rejected too
        assert!(AngleDeg::new(5u32.wrapping_neg()).is_err());
    }

    #[test]
    fn test_duty_display() {
        assert_eq!(std::format!("{}", DutyPermille::new(505).unwrap()), "50.5%");
        assert_eq!(std::format!("{}", DutyPermille::new(1000).unwrap()), "100.0%");
    }
}
