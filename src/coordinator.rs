//! Routes HMI messages to their destination module.
//!
//! The coordinator sits between the two queue hops. Each cycle it takes at
//! most one message from the HMI queue, so a burst of commands is spread over
//! several cycles in arrival order.

use crate::error::Error;
use crate::messages::{HmiMessage, Module, ServoCommand, ServoMessage};
use crate::queue::{HmiQueue, ServoQueue};

/// What happened to a routed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Route {
    /// Addressed to the coordinator; logged only
    Main,
    /// Forwarded to the servo queue
    Servo(ServoMessage),
}

/// Top-level message router.
pub struct Coordinator<'a> {
    hmi: &'a HmiQueue,
    servo: &'a ServoQueue,
}

impl<'a> Coordinator<'a> {
    pub const fn new(hmi: &'a HmiQueue, servo: &'a ServoQueue) -> Self {
        Self { hmi, servo }
    }

    /// Routes at most one pending HMI message.
    ///
    /// # Returns
    /// `None` when nothing was pending, otherwise where the message went or
    /// why it was dropped.
    pub fn poll(&mut self) -> Option<Result<Route, Error>> {
        let msg = self.hmi.dequeue()?;
        Some(self.route(msg))
    }

    /// Routes one message.
    ///
    /// # Errors
    /// - [`Error::Validation`] if a servo payload is out of range
    /// - [`Error::Queue`] if the servo queue is full
    ///
    /// The message is dropped in both cases.
    pub fn route(&mut self, msg: HmiMessage) -> Result<Route, Error> {
        match msg.module {
            Module::Main => {
                log_info!("Main: HMI command {:?}", msg.command);
                Ok(Route::Main)
            }
            Module::Servo => {
                let command = ServoCommand::try_from(msg.command).map_err(|e| {
                    log_warn!("Main: rejected servo command: {:?}", e);
                    Error::from(e)
                })?;
                let forwarded = ServoMessage::new(command);
                self.servo.enqueue(forwarded).map_err(|e| {
                    log_warn!("Main: failed to send servo command to queue");
                    Error::from(e)
                })?;
                log_debug!("Main: forwarded {:?} to servo", forwarded.command);
                Ok(Route::Servo(forwarded))
            }
        }
    }
}
