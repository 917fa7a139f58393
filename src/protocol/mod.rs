//! Byte-level Firmata I2C protocol engine.
//!
//! Official Firmata documentation: <https://github.com/firmata/protocol>

pub mod codec;
pub mod constants;
pub mod scanner;
pub mod session;

pub use scanner::{I2CReply, ReplyScanner};
pub use session::I2CSession;
