//! Serial command input task.
//!
//! Drains the receive ring filled by the USART1 interrupt, echoes what was
//! typed and turns complete lines into HMI messages for the coordinator.

use crate::peripherals::Console;
use defmt::info;
use embassy_time::Timer;
use servoctl_rs::config::INPUT_POLL_MS;
use servoctl_rs::hmi::{HmiInput, RxConsumer};
use servoctl_rs::queue::HmiQueue;

/// Input task entry point.
///
/// # Arguments
///
/// * `rx` - Task side of the receive ring
/// * `queue` - Queue towards the coordinator
/// * `console` - Console used for echo and terminal diagnostics
#[embassy_executor::task]
pub async fn hmi_task(rx: RxConsumer<'static>, queue: &'static HmiQueue, console: Console) {
    let mut input = HmiInput::new(rx, queue, console);
    info!("HMI task started, polling every {}ms", INPUT_POLL_MS);

    loop {
        input.poll();
        Timer::after_millis(INPUT_POLL_MS).await;
    }
}
