pub mod pwm;
pub mod system;
pub mod uart;

pub use pwm::{ServoPwm, ServoPwmPeripherals};
pub use system::init_system;
pub use uart::{init_console, Console, UartClaims};
