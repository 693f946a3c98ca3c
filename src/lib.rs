//! Command-and-control core for the servo firmware.
//!
//! Everything in this crate is hardware independent so it can be unit tested on a
//! workstation. The firmware binary (`src/main.rs`) wires it to the STM32H753
//! peripherals and runs each stage as its own embassy task.
//!
//! Data flows through the pipeline in one direction:
//!
//! ```text
//! UART IRQ -> RxRing -> LineFramer -> CommandTable -> HMI queue
//!          -> Coordinator -> servo queue -> ServoControl -> PWM
//! ```
//!
//! | Module | Purpose |
//! | ------ | ------- |
//! | [`hmi`] | Byte ring, line framing, command table and the input stage |
//! | [`messages`] | Message schemas for both queue hops |
//! | [`queue`] | Bounded non-blocking queues between stages |
//! | [`coordinator`] | Routes HMI messages to their destination module |
//! | [`servo`] | Servo parameter state machine driving the PWM output |
//! | [`platform`] | Traits for the serial and PWM collaborators |

#![cfg_attr(not(test), no_std)]

#[macro_use]
pub mod logging;

pub mod config;
pub mod coordinator;
pub mod error;
pub mod hmi;
pub mod messages;
pub mod platform;
pub mod queue;
pub mod servo;

#[cfg(test)]
pub(crate) mod mock;

pub use error::Error;
