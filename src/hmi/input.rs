//! Input stage: drains the receive ring, echoes, frames and dispatches.
//!
//! Runs in task context. Each [`poll`](HmiInput::poll) empties the ring
//! without waiting; the owning task sleeps between polls.

use super::commands::{self, Command};
use super::framer::LineFramer;
use super::ring::RxConsumer;
use crate::error::Error;
use crate::messages::HmiMessage;
use crate::platform::SerialTx;
use crate::queue::HmiQueue;

const TOO_LONG_MSG: &str = "Command too long, buffer cleared";
const QUEUE_FULL_MSG: &str = "Failed to send command to queue";
const HELP_BANNER: [&str; 3] = [
    "=========================",
    "===== UART Commands =====",
    "=========================",
];

/// Terminal front-end of the command pipeline.
pub struct HmiInput<'a, W: SerialTx> {
    rx: RxConsumer<'a>,
    framer: LineFramer,
    queue: &'a HmiQueue,
    out: W,
}

impl<'a, W: SerialTx> HmiInput<'a, W> {
    /// Create the input stage.
    ///
    /// # Arguments
    /// * `rx` - Task side of the receive ring
    /// * `queue` - Queue towards the coordinator
    /// * `out` - Serial output used for echo and terminal messages
    pub fn new(rx: RxConsumer<'a>, queue: &'a HmiQueue, out: W) -> Self {
        Self {
            rx,
            framer: LineFramer::new(),
            queue,
            out,
        }
    }

    pub fn out(&self) -> &W {
        &self.out
    }

    pub fn out_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Handles every byte currently in the ring.
    ///
    /// # Returns
    /// Number of bytes handled.
    pub fn poll(&mut self) -> usize {
        let dropped = self.rx.take_dropped();
        if dropped > 0 {
            log_warn!("HMI: receive ring full, {} bytes dropped", dropped);
        }

        let mut handled = 0;
        while let Some(byte) = self.rx.pop() {
            // Errors are already reported to the terminal and the log
            let _ = self.handle_byte(byte);
            handled += 1;
        }
        handled
    }

    /// Echoes one byte and feeds it to the framer.
    ///
    /// # Returns
    /// * `None` - no line completed
    /// * `Some(Ok(command))` - a line was dispatched
    /// * `Some(Err(_))` - the line was too long, unknown, or could not be queued
    pub fn handle_byte(&mut self, byte: u8) -> Option<Result<Command, Error>> {
        self.out.write_byte(byte);

        match self.framer.push(byte)? {
            Ok(line) => Some(self.dispatch(&line)),
            Err(e) => {
                log_warn!("HMI: {:?}", e);
                self.out.println(TOO_LONG_MSG);
                Some(Err(e.into()))
            }
        }
    }

    /// Dispatches one framed line.
    ///
    /// # Errors
    /// - [`Error::Dispatch`] if no command matches
    /// - [`Error::Queue`] if the coordinator queue is full
    pub fn dispatch(&mut self, line: &[u8]) -> Result<Command, Error> {
        let command = commands::parse(line).map_err(|e| {
            log_warn!("HMI: command not found: {:?}", line);
            self.report_not_found(line);
            e
        })?;

        match HmiMessage::from_command(command) {
            Some(msg) => self.queue.enqueue(msg).map_err(|e| {
                log_warn!("HMI: failed to send {:?} to queue", command);
                self.out.println(QUEUE_FULL_MSG);
                e
            })?,
            None => self.print_help(),
        }
        Ok(command)
    }

    fn report_not_found(&mut self, line: &[u8]) {
        for &b in b"Command not found: \"" {
            self.out.write_byte(b);
        }
        for &b in line {
            self.out.write_byte(b);
        }
        self.out.println("\"");
    }

    fn print_help(&mut self) {
        for banner in HELP_BANNER {
            self.out.println(banner);
        }
        for help in commands::help_lines() {
            self.out.println(help);
        }
    }
}
