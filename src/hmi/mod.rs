//! Serial human-machine interface: from received bytes to queued commands.
//!
//! - [`ring`]: interrupt-to-task byte ring
//! - [`framer`]: newline framing with overflow recovery
//! - [`commands`]: command table and dispatcher
//! - [`input`]: the input stage tying the three together

pub mod commands;
pub mod framer;
pub mod input;
pub mod ring;

pub use commands::{Command, CommandKind};
pub use framer::{Line, LineFramer};
pub use input::HmiInput;
pub use ring::{RxConsumer, RxProducer, RxRing};
