//! Message schemas for the two queue hops.
//!
//! - Hop 1 ([`HmiMessage`]): input task to coordinator, raw numeric payloads
//!   as typed at the terminal.
//! - Hop 2 ([`ServoMessage`]): coordinator to servo task, payloads already
//!   decoded into the servo's validated value types.
//!
//! Converting from one schema to the other goes through [`TryFrom`], so a
//! payload never crosses the boundary without the servo bounds being checked.

use crate::error::ValidationError;
use crate::hmi::commands::Command;
use crate::servo::{AngleDeg, DutyPermille, PeriodMs};

/// Module an HMI message is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Module {
    /// The coordinator itself
    Main,
    /// The servo task
    Servo,
}

/// Command carried on the first hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum HmiCommand {
    /// Duty in tenths of a percent
    SetDuty(u32),
    /// Period in milliseconds
    SetPeriod(u32),
    /// Angle in degrees
    SetServoAngle(u32),
    ReadServoData,
}

/// Input task to coordinator message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct HmiMessage {
    pub module: Module,
    pub command: HmiCommand,
}

impl HmiMessage {
    /// Message addressed to the servo task.
    pub const fn servo(command: HmiCommand) -> Self {
        Self {
            module: Module::Servo,
            command,
        }
    }

    /// Builds the message for a parsed serial command.
    ///
    /// # Returns
    /// `None` for commands handled locally by the input task (help).
    pub fn from_command(command: Command) -> Option<Self> {
        let command = match command {
            Command::SetDuty(v) => HmiCommand::SetDuty(v),
            Command::SetPeriod(v) => HmiCommand::SetPeriod(v),
            Command::SetServoAngle(v) => HmiCommand::SetServoAngle(v),
            Command::ReadServoData => HmiCommand::ReadServoData,
            Command::Help => return None,
        };
        Some(Self::servo(command))
    }
}

/// Command carried on the second hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum ServoCommand {
    SetDuty(DutyPermille),
    SetPeriod(PeriodMs),
    SetServoAngle(AngleDeg),
    ReadServoData,
}

impl TryFrom<HmiCommand> for ServoCommand {
    type Error = ValidationError;

    fn try_from(command: HmiCommand) -> Result<Self, Self::Error> {
        Ok(match command {
            HmiCommand::SetDuty(v) => ServoCommand::SetDuty(DutyPermille::new(v)?),
            HmiCommand::SetPeriod(v) => ServoCommand::SetPeriod(PeriodMs::new(v)?),
            HmiCommand::SetServoAngle(v) => ServoCommand::SetServoAngle(AngleDeg::new(v)?),
            HmiCommand::ReadServoData => ServoCommand::ReadServoData,
        })
    }
}

/// Coordinator to servo task message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct ServoMessage {
    pub command: ServoCommand,
    /// Motion start request; carried along but not acted on by the servo task
    pub start: bool,
}

impl ServoMessage {
    pub const fn new(command: ServoCommand) -> Self {
        Self {
            command,
            start: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_is_not_forwarded() {
        assert_eq!(HmiMessage::from_command(Command::Help), None);
    }

    #[test]
    fn test_commands_address_servo() {
        let msg = HmiMessage::from_command(Command::SetDuty(505)).unwrap();
        assert_eq!(msg.module, Module::Servo);
        assert_eq!(msg.command, HmiCommand::SetDuty(505));
    }

    #[test]
    fn test_conversion_revalidates_payload() {
        assert_eq!(
            ServoCommand::try_from(HmiCommand::SetDuty(1001)),
            Err(ValidationError::DutyOutOfRange(1001))
        );
        assert_eq!(
            ServoCommand::try_from(HmiCommand::SetPeriod(1001)),
            Err(ValidationError::PeriodOutOfRange(1001))
        );
        assert_eq!(
            ServoCommand::try_from(HmiCommand::SetServoAngle(181)),
            Err(ValidationError::AngleOutOfRange(181))
        );
    }

    #[test]
    fn test_conversion_keeps_valid_payload() {
        let cmd = ServoCommand::try_from(HmiCommand::SetDuty(1000)).unwrap();
        match cmd {
            ServoCommand::SetDuty(duty) => assert_eq!(duty.get(), 1000),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            ServoCommand::try_from(HmiCommand::ReadServoData),
            Ok(ServoCommand::ReadServoData)
        );
    }
}
