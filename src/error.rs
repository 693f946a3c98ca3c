//! Error types for every stage of the command pipeline.
//!
//! None of these are fatal: each stage reports the error to its caller, logs
//! it, and carries on with the next byte or message.

use core::fmt;

/// Result type for pipeline operations
pub type Result<T> = core::result::Result<T, Error>;

/// Pipeline-level errors
///
/// Every stage maps its own failure into one of these variants so callers can
/// tell the failure categories apart without parsing diagnostic text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Error {
    /// Line framing failed
    Frame(FrameError),
    /// No command matched a framed line
    Dispatch(DispatchError),
    /// A numeric payload violated the servo bounds
    Validation(ValidationError),
    /// A message queue was full
    Queue(QueueError),
    /// The PWM peripheral refused a new setting
    Pwm(PwmError),
}

/// Line framing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum FrameError {
    /// More bytes arrived than the line buffer can hold; the line was dropped
    TooLong,
}

/// Command dispatch errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum DispatchError {
    /// No descriptor matched both the header and the exact length
    NotFound,
}

/// Servo parameter validation errors, carrying the rejected raw value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum ValidationError {
    /// Duty above 1000 (tenths of a percent)
    DutyOutOfRange(u32),
    /// Period above 1000 ms
    PeriodOutOfRange(u32),
    /// Angle above 180 degrees
    AngleOutOfRange(u32),
}

/// Message queue errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum QueueError {
    /// The queue already holds its maximum number of messages
    Full,
}

/// PWM programming errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum PwmError {
    /// The period cannot be produced by the timer
    InvalidPeriod,
    /// The pulse width exceeds the period
    InvalidPulseWidth,
    /// The peripheral rejected the request for another reason
    Rejected,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Frame(e) => write!(f, "framing error: {}", e),
            Error::Dispatch(e) => write!(f, "dispatch error: {}", e),
            Error::Validation(e) => write!(f, "validation error: {}", e),
            Error::Queue(e) => write!(f, "queue error: {}", e),
            Error::Pwm(e) => write!(f, "PWM error: {}", e),
        }
    }
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::TooLong => write!(f, "Command too long, buffer cleared"),
        }
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::NotFound => write!(f, "command not found"),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DutyOutOfRange(v) => write!(f, "duty {} exceeds max 1000", v),
            ValidationError::PeriodOutOfRange(v) => write!(f, "period {} ms exceeds max 1000 ms", v),
            ValidationError::AngleOutOfRange(v) => write!(f, "angle {} exceeds max 180 degrees", v),
        }
    }
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::Full => write!(f, "queue full, message dropped"),
        }
    }
}

impl fmt::Display for PwmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PwmError::InvalidPeriod => write!(f, "invalid period"),
            PwmError::InvalidPulseWidth => write!(f, "pulse width exceeds period"),
            PwmError::Rejected => write!(f, "request rejected by peripheral"),
        }
    }
}

impl From<FrameError> for Error {
    fn from(error: FrameError) -> Self {
        Error::Frame(error)
    }
}

impl From<DispatchError> for Error {
    fn from(error: DispatchError) -> Self {
        Error::Dispatch(error)
    }
}

impl From<ValidationError> for Error {
    fn from(error: ValidationError) -> Self {
        Error::Validation(error)
    }
}

impl From<QueueError> for Error {
    fn from(error: QueueError) -> Self {
        Error::Queue(error)
    }
}

impl From<PwmError> for Error {
    fn from(error: PwmError) -> Self {
        Error::Pwm(error)
    }
}
