//! Servo task: sole owner of the servo state and its PWM output.

use crate::peripherals::{Console, ServoPwm, ServoPwmPeripherals};
use defmt::{info, warn};
use embassy_time::Timer;
use servoctl_rs::config::SERVO_POLL_MS;
use servoctl_rs::queue::ServoQueue;
use servoctl_rs::servo::{ServoConfig, ServoControl, ServoOutcome};

/// Servo task entry point.
///
/// Programs the default output once, then applies one queued command per
/// cycle. Read-data requests are answered on the console.
#[embassy_executor::task]
pub async fn servo_task(
    pwm: ServoPwmPeripherals<'static>,
    queue: &'static ServoQueue,
    mut console: Console,
) {
    let mut servo = ServoControl::new(ServoPwm::new(pwm), ServoConfig::default());
    // A failed init is already logged; the next accepted command retries it
    let _ = servo.init();
    info!("Servo task started");

    loop {
        if let Some(Ok(ServoOutcome::Snapshot(snapshot))) = servo.poll(queue) {
            if snapshot.write_report(&mut console).is_err() {
                warn!("Servo: failed to write report");
            }
        }
        Timer::after_millis(SERVO_POLL_MS).await;
    }
}
