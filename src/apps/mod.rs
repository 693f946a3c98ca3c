//! Firmware tasks.
//!
//! Each task wraps one stage of the `servoctl_rs` pipeline and gives it a
//! fixed poll interval. The coordinator stage runs in the main task.

/// Serial command input
pub mod hmi_app;
/// Servo output
pub mod servo_app;
