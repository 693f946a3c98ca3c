//! In-memory collaborators for unit tests.

use crate::error::PwmError;
use crate::platform::{PwmOutput, SerialTx};
use core::fmt;
use std::string::String;
use std::vec::Vec;

/// Serial double that records everything written to it.
#[derive(Debug, Default)]
pub struct MockSerial {
    tx: Vec<u8>,
}

impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything transmitted so far, as text.
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.tx).into_owned()
    }

    pub fn clear(&mut self) {
        self.tx.clear();
    }
}

impl fmt::Write for MockSerial {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.tx.extend_from_slice(s.as_bytes());
        Ok(())
    }
}

impl SerialTx for MockSerial {
    fn write_byte(&mut self, byte: u8) {
        self.tx.push(byte);
    }
}

/// PWM double that records every accepted program call.
#[derive(Debug, Default)]
pub struct MockPwm {
    /// Accepted `(period_us, pulse_us)` pairs, oldest first
    pub programs: Vec<(u32, u32)>,
    /// When set, every call fails with this error
    pub fail_with: Option<PwmError>,
}

impl MockPwm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<(u32, u32)> {
        self.programs.last().copied()
    }
}

impl PwmOutput for MockPwm {
    fn program(&mut self, period_us: u32, pulse_us: u32) -> Result<(), PwmError> {
        if let Some(error) = self.fail_with {
            return Err(error);
        }
        if period_us == 0 {
            return Err(PwmError::InvalidPeriod);
        }
        if pulse_us > period_us {
            return Err(PwmError::InvalidPulseWidth);
        }
        self.programs.push((period_us, pulse_us));
        Ok(())
    }
}
