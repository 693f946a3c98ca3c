//! Servo parameter state machine.
//!
//! [`ServoControl`] is the single owner of the servo state. It is only driven
//! through [`ServoMessage`]s taken from the servo queue, one per poll cycle.
//! A setting is committed to the state only after the PWM peripheral has
//! accepted it, so the state always describes what the output is doing.

use super::{AngleDeg, DutyPermille, PeriodMs};
use crate::config::{DEFAULT_DUTY_PERMILLE, DEFAULT_PERIOD_MS, DUTY_FULL_SCALE};
use crate::error::{Error, PwmError};
use crate::messages::{ServoCommand, ServoMessage};
use crate::platform::{PwmOutput, SerialTx};
use crate::queue::ServoQueue;
use core::fmt;

/// Initial servo configuration.
///
/// Both fields are validated types, so the servo state starts in range.
#[derive(Debug, Clone, Copy)]
pub struct ServoConfig {
    pub period: PeriodMs,
    pub duty: DutyPermille,
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self {
            period: PeriodMs(DEFAULT_PERIOD_MS),
            duty: DutyPermille(DEFAULT_DUTY_PERMILLE),
        }
    }
}

/// Current servo parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct ServoState {
    pub period_us: u32,
    pub duty: DutyPermille,
    /// Not mapped to the output yet, always 0
    pub angle: u32,
}

impl ServoState {
    /// High time of the PWM signal in microseconds.
    pub const fn pulse_width_us(&self) -> u32 {
        self.period_us * self.duty.get() / DUTY_FULL_SCALE
    }

    /// Output frequency, 0 when the period is 0.
    pub const fn frequency_hz(&self) -> u32 {
        match 1_000_000u32.checked_div(self.period_us) {
            Some(hz) => hz,
            None => 0,
        }
    }

    pub const fn snapshot(&self) -> ServoSnapshot {
        ServoSnapshot {
            frequency_hz: self.frequency_hz(),
            period_us: self.period_us,
            duty: self.duty,
            angle: self.angle,
        }
    }
}

impl From<ServoConfig> for ServoState {
    fn from(config: ServoConfig) -> Self {
        Self {
            period_us: config.period.as_micros(),
            duty: config.duty,
            angle: 0,
        }
    }
}

/// Read-out of the servo parameters for the read-data command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct ServoSnapshot {
    pub frequency_hz: u32,
    pub period_us: u32,
    pub duty: DutyPermille,
    pub angle: u32,
}

impl ServoSnapshot {
    /// Prints the servo info block to a terminal.
    pub fn write_report<W: SerialTx>(&self, out: &mut W) -> fmt::Result {
        write!(out, "Servo motor info:\r\n")?;
        write!(out, "Frequency:  {}Hz\r\n", self.frequency_hz)?;
        write!(out, "Period:     {}us\r\n", self.period_us)?;
        write!(out, "Duty cycle: {}\r\n", self.duty)?;
        write!(out, "Angle:      {} degrees\r\n", self.angle)
    }
}

/// Result of applying one servo command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum ServoOutcome {
    /// The output was reprogrammed and the state updated
    Updated(ServoState),
    /// The command was valid but has no effect on the output
    Unchanged,
    /// Current parameters, for the read-data command
    Snapshot(ServoSnapshot),
}

/// Owner of the servo state and its PWM output.
pub struct ServoControl<P: PwmOutput> {
    pwm: P,
    state: ServoState,
}

impl<P: PwmOutput> ServoControl<P> {
    /// Create a servo controller.
    ///
    /// The output is not touched until [`init`](Self::init) is called.
    pub fn new(pwm: P, config: ServoConfig) -> Self {
        Self {
            pwm,
            state: config.into(),
        }
    }

    /// Programs the initial state into the PWM output.
    ///
    /// # Errors
    /// The peripheral error; the task can keep running and the next accepted
    /// command retries the output.
    pub fn init(&mut self) -> Result<(), PwmError> {
        let (period, pulse) = (self.state.period_us, self.state.pulse_width_us());
        self.pwm.program(period, pulse).map_err(|e| {
            log_error!("Servo: failed to set initial pulse width: {:?}", e);
            e
        })?;
        log_info!("Servo: output running at {}us / {}us", period, pulse);
        Ok(())
    }

    pub fn state(&self) -> ServoState {
        self.state
    }

    pub fn pwm(&self) -> &P {
        &self.pwm
    }

    /// Handles at most one pending message.
    ///
    /// # Returns
    /// `None` when the queue was empty, otherwise the outcome of the message.
    pub fn poll(&mut self, queue: &ServoQueue) -> Option<Result<ServoOutcome, Error>> {
        let msg = queue.dequeue()?;
        Some(self.handle(msg).map_err(Error::from))
    }

    /// Applies one message.
    ///
    /// # Errors
    /// The PWM error when the peripheral rejected a new setting; the state is
    /// left unchanged in that case.
    pub fn handle(&mut self, msg: ServoMessage) -> Result<ServoOutcome, PwmError> {
        match msg.command {
            ServoCommand::SetDuty(duty) => {
                log_info!("SERVO: Set duty of {}.{}%", duty.get() / 10, duty.get() % 10);
                self.set_duty(duty)
            }
            ServoCommand::SetPeriod(period) => {
                log_info!("SERVO: Set period of {}ms", period.get());
                self.set_period(period)
            }
            ServoCommand::SetServoAngle(angle) => {
                log_info!("SERVO: Set angle of {} degrees", angle.get());
                Ok(self.set_angle(angle))
            }
            ServoCommand::ReadServoData => {
                let snapshot = self.state.snapshot();
                log_info!(
                    "Servo: {}Hz, period {}us, duty {}.{}%, angle {}",
                    snapshot.frequency_hz,
                    snapshot.period_us,
                    snapshot.duty.get() / 10,
                    snapshot.duty.get() % 10,
                    snapshot.angle
                );
                Ok(ServoOutcome::Snapshot(snapshot))
            }
        }
    }

    pub fn set_duty(&mut self, duty: DutyPermille) -> Result<ServoOutcome, PwmError> {
        self.commit(ServoState { duty, ..self.state })
    }

    pub fn set_period(&mut self, period: PeriodMs) -> Result<ServoOutcome, PwmError> {
        self.commit(ServoState {
            period_us: period.as_micros(),
            ..self.state
        })
    }

    /// Angle control is not mapped to a pulse width yet; the request is only
    /// acknowledged.
    pub fn set_angle(&mut self, _angle: AngleDeg) -> ServoOutcome {
        log_warn!("Servo: angle to pulse width mapping not implemented");
        ServoOutcome::Unchanged
    }

    fn commit(&mut self, next: ServoState) -> Result<ServoOutcome, PwmError> {
        if let Err(e) = self.pwm.program(next.period_us, next.pulse_width_us()) {
            log_error!("Servo: failed to set pulse width: {:?}", e);
            return Err(e);
        }
        self.state = next;
        Ok(ServoOutcome::Updated(next))
    }
}
