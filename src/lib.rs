//! <h1 align="center">FIRMATA-I2C - I2C over a serial link</h1>
//! <div style="text-align:center;font-style:italic;">Tunnel I2C transactions through a Firmata-compatible board.</div>
//!
//! # Features
//!
//! **Firmata-I2C** lets a host process address I2C peripherals attached to a
//! microcontroller without direct hardware access: requests are encoded into
//! SysEx-framed byte sequences the board firmware understands, and asynchronous reply
//! frames are scanned back off the wire and decoded into structured read results.
//!
//! - Build configuration, write-request and read-request frames ([`protocol::codec`])
//! - Scan an inbound byte stream for complete, address-matched replies ([`protocol::ReplyScanner`])
//! - Drive whole transactions over an exclusively owned transport ([`protocol::I2CSession`])
//! - Talk to a GrovePi hat through the tunnel ([`devices::GrovePi`])
//!
//! # Prerequisites
//!
//! The board must run a Firmata-compatible sketch with I2C support, for instance
//! [StandardFirmataPlus.ino](https://github.com/firmata/arduino/blob/main/examples/StandardFirmataPlus/StandardFirmataPlus.ino).
//!
//! # Getting Started
//!
//! ```no_run
//! use firmata_i2c::protocol::I2CSession;
//! use firmata_i2c::transport::Serial;
//!
//! fn main() -> Result<(), firmata_i2c::errors::Error> {
//!     let mut session = I2CSession::new(Serial::new("/dev/ttyACM0"));
//!     session.open(0)?;
//!
//!     // Select register 0x01 on the peripheral at 0x04 and read two bytes back.
//!     let mut reply = [0u8; 2];
//!     session.transact(0x04, Some(&[0x01]), Some(&mut reply))?;
//!     session.close()
//! }
//! ```
//!
//! # Feature flags
//!
//! - **libudev** -- (enabled by default) Activates `serialport` crate _libudev_ feature under-the-hood (required on Linux only for port listing).
//! - **serde** -- Enables serialize/deserialize capabilities for transports and replies.
//! - **mocks** -- Provides mocked transports (useful for tests mostly).

pub mod devices;
pub mod errors;
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
pub mod protocol;
pub mod transport;
