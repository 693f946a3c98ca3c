//! Firmware entry point for the servo controller.
//!
//! Initializes the STM32H753, wires the command pipeline from `servoctl_rs`
//! to USART1 and TIM1, spawns the input and servo tasks, and runs the
//! coordinator in the main task.
//!
//! The firmware only builds for bare-metal targets; on a host this file
//! reduces to an empty `main` so the library tests can run.

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
mod apps;
#[cfg(target_os = "none")]
mod peripherals;

#[cfg(target_os = "none")]
use {
    defmt::{debug, info},
    embassy_executor::Spawner,
    embassy_stm32::gpio::{Level, Output, Speed},
    embassy_time::Timer,
    peripherals::init_system,
    servoctl_rs::config::{COORDINATOR_POLL_MS, HEARTBEAT_CYCLES},
    servoctl_rs::coordinator::Coordinator,
    servoctl_rs::hmi::RxRing,
    servoctl_rs::queue::{HmiQueue, ServoQueue},
    static_cell::ConstStaticCell,
};

// Import panic handler and defmt RTT for debugging
#[cfg(all(target_os = "none", not(feature = "debug")))]
use panic_halt as _;
#[cfg(all(target_os = "none", feature = "debug"))]
use {defmt_rtt as _, panic_probe as _};

#[cfg(target_os = "none")]
static RX_RING: ConstStaticCell<RxRing> = ConstStaticCell::new(RxRing::new());
#[cfg(target_os = "none")]
static HMI_QUEUE: HmiQueue = HmiQueue::new();
#[cfg(target_os = "none")]
static SERVO_QUEUE: ServoQueue = ServoQueue::new();

/// Main application entry point
///
/// Spawns the input and servo tasks, then routes HMI messages forever.
#[cfg(target_os = "none")]
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Starting servoctl firmware v{}", env!("CARGO_PKG_VERSION"));

    let p = init_system();

    let (producer, consumer) = RX_RING.take().split();
    let console = peripherals::init_console(claim_uart!(p), producer)
        .expect("USART1 configuration rejected");
    let mut led = Output::new(p.PE1, Level::Low, Speed::Low);

    info!("System initialized, spawning tasks...");

    spawner.spawn(apps::hmi_app::hmi_task(consumer, &HMI_QUEUE, console).unwrap());
    spawner.spawn(apps::servo_app::servo_task(claim_servo_pwm!(p), &SERVO_QUEUE, console).unwrap());

    let mut coordinator = Coordinator::new(&HMI_QUEUE, &SERVO_QUEUE);
    let mut cycles: u32 = 0;
    loop {
        if let Some(routed) = coordinator.poll() {
            debug!("Main: routed {:?}", routed);
        }

        cycles += 1;
        if cycles >= HEARTBEAT_CYCLES {
            cycles = 0;
            led.toggle();
            debug!("System heartbeat - all tasks running");
        }

        Timer::after_millis(COORDINATOR_POLL_MS).await;
    }
}

#[cfg(not(target_os = "none"))]
fn main() {}
