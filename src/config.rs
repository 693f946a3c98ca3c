//! Compile-time configuration for the command pipeline and the servo output.

/// Number of received bytes the interrupt-to-task ring can hold.
pub const RX_RING_CAPACITY: usize = 64;

/// Size of the line accumulator. One slot is reserved, so a line carries at
/// most `LINE_BUFFER_SIZE - 1` bytes before it is considered too long.
pub const LINE_BUFFER_SIZE: usize = 20;

/// Longest line (terminator excluded) that can still be dispatched.
pub const MAX_LINE_LEN: usize = LINE_BUFFER_SIZE - 1;

/// Depth of both message queues.
pub const QUEUE_DEPTH: usize = 5;

/// Sleep between two drains of the receive ring.
pub const INPUT_POLL_MS: u64 = 10;

/// Sleep between two coordinator cycles.
pub const COORDINATOR_POLL_MS: u64 = 50;

/// Sleep between two servo message polls.
pub const SERVO_POLL_MS: u64 = 10;

/// Number of coordinator cycles between two heartbeat log lines (one second).
pub const HEARTBEAT_CYCLES: u32 = (1000 / COORDINATOR_POLL_MS) as u32;

/// Serial link baud rate.
pub const UART_BAUD: u32 = 115_200;

/// Duty cycles are expressed in tenths of a percent.
pub const DUTY_FULL_SCALE: u32 = 1000;

/// Highest accepted duty cycle (100.0 %).
pub const MAX_DUTY_PERMILLE: u32 = 1000;

/// Highest accepted period, in milliseconds.
pub const MAX_PERIOD_MS: u32 = 1000;

/// Highest accepted servo angle, in degrees.
pub const MAX_ANGLE_DEG: u32 = 180;

/// Microseconds per millisecond, used when converting a period command.
pub const US_PER_MS: u32 = 1000;

/// Default period: 20 ms (50 Hz), the usual hobby-servo frame.
pub const DEFAULT_PERIOD_MS: u32 = 20;

/// Default duty: 10.0 %.
pub const DEFAULT_DUTY_PERMILLE: u32 = 100;
