//! USART1 command console.
//!
//! Reception is interrupt driven: the `USART1` handler moves every received
//! byte into the [`RxProducer`] half of the receive ring and never blocks.
//! Transmission goes through [`Console`], a handle to the blocking UART shared
//! by all tasks running on the thread-mode executor.

use core::cell::RefCell;
use core::fmt;

use defmt::info;
use embassy_stm32::interrupt;
use embassy_stm32::{
    interrupt::{InterruptExt, Priority},
    mode::Blocking,
    pac,
    peripherals::{PA10, PA9, USART1},
    usart::{Config, ConfigError, Uart},
    Peri,
};
use embassy_sync::blocking_mutex::{
    raw::{CriticalSectionRawMutex, ThreadModeRawMutex},
    Mutex,
};
use servoctl_rs::config::UART_BAUD;
use servoctl_rs::hmi::RxProducer;
use servoctl_rs::platform::SerialTx;

/// Peripheral collection for the command console
pub struct UartClaims<'d> {
    pub usart: Peri<'d, USART1>,
    pub rx: Peri<'d, PA10>, // USART1_RX
    pub tx: Peri<'d, PA9>,  // USART1_TX
}

/// Macro to claim peripherals for the command console
#[macro_export]
macro_rules! claim_uart {
    ($peripherals:expr) => {{
        $crate::peripherals::uart::UartClaims {
            usart: $peripherals.USART1,
            rx: $peripherals.PA10, // USART1_RX
            tx: $peripherals.PA9,  // USART1_TX
        }
    }};
}

/// Interrupt side of the receive ring, installed by [`init_console`]
static RX_PRODUCER: Mutex<CriticalSectionRawMutex, RefCell<Option<RxProducer<'static>>>> =
    Mutex::new(RefCell::new(None));

/// Console UART; only touched from thread mode
static CONSOLE_UART: Mutex<ThreadModeRawMutex, RefCell<Option<Uart<'static, Blocking>>>> =
    Mutex::new(RefCell::new(None));

/// Configure USART1, hand the ring producer to the interrupt handler and
/// enable reception.
///
/// # Errors
///
/// The UART configuration error if the baud rate cannot be generated.
pub fn init_console(
    claims: UartClaims<'static>,
    producer: RxProducer<'static>,
) -> Result<Console, ConfigError> {
    let mut config = Config::default();
    config.baudrate = UART_BAUD;

    let uart = Uart::new_blocking(claims.usart, claims.rx, claims.tx, config)?;

    RX_PRODUCER.lock(|slot| slot.replace(Some(producer)));
    CONSOLE_UART.lock(|slot| slot.replace(Some(uart)));

    pac::USART1.cr1().modify(|w| w.set_rxneie(true));
    interrupt::USART1.set_priority(Priority::P6);
    interrupt::USART1.unpend();
    // SAFETY: the handler below only touches the RDR/ICR registers and the
    // producer slot, both of which are ready at this point.
    unsafe { interrupt::USART1.enable() };

    info!("Console ready on USART1 at {} baud", UART_BAUD);
    Ok(Console)
}

#[interrupt]
fn USART1() {
    let regs = pac::USART1;
    let isr = regs.isr().read();

    if isr.ore() || isr.fe() {
        regs.icr().write(|w| {
            w.set_ore(true);
            w.set_fe(true);
        });
    }

    if isr.rxne() {
        let byte = regs.rdr().read().0 as u8;
        RX_PRODUCER.lock(|slot| {
            if let Some(producer) = slot.borrow_mut().as_mut() {
                // Overflow is counted by the ring and reported by the input task
                producer.push(byte);
            }
        });
    }
}

/// Handle to the console transmitter.
///
/// Writes before [`init_console`] has run are discarded.
#[derive(Debug, Clone, Copy)]
pub struct Console;

impl Console {
    fn write_bytes(&self, bytes: &[u8]) {
        CONSOLE_UART.lock(|slot| {
            if let Some(uart) = slot.borrow_mut().as_mut() {
                let _ = uart.blocking_write(bytes);
            }
        });
    }
}

impl fmt::Write for Console {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}

impl SerialTx for Console {
    fn write_byte(&mut self, byte: u8) {
        self.write_bytes(&[byte]);
    }
}
