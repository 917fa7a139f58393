//! Drives complete I2C transactions across a transport.

use std::time::Duration;

use log::trace;

use crate::errors::Error;
use crate::protocol::codec::{i2c_config_frame, i2c_read_frame, i2c_write_frame};
use crate::protocol::scanner::{decode_reply, I2CReply, ReplyScanner};
use crate::transport::Transport;

/// Tunnels I2C transactions through an exclusively owned transport.
///
/// The session is single-threaded and fully blocking: one [`I2CSession::transact`]
/// call owns the link for its whole duration. Callers wanting bounded latency set a
/// read deadline with [`I2CSession::set_timeout`]; a scan that sees no matching reply
/// before the deadline surfaces [`ReplyTimeout`](crate::errors::ProtocolError::ReplyTimeout).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct I2CSession {
    transport: Box<dyn Transport>,
}

impl I2CSession {
    pub fn new<T: Transport + 'static>(transport: T) -> Self {
        Self {
            transport: Box::new(transport),
        }
    }

    /// Opens the transport and initializes the firmware I2C subsystem with the given
    /// read `delay` (microseconds).
    ///
    /// The firmware sends no acknowledgment for the configuration frame; sending it
    /// again on a later open is harmless.
    pub fn open(&mut self, delay: u16) -> Result<(), Error> {
        self.transport.open()?;
        self.configure(delay)
    }

    /// Gracefully releases the transport.
    pub fn close(&mut self) -> Result<(), Error> {
        self.transport.close()
    }

    /// Returns the owned transport.
    pub fn get_transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Sets the transport read deadline used while awaiting a reply.
    pub fn set_timeout(&mut self, duration: Duration) -> Result<(), Error> {
        self.transport.set_timeout(duration)
    }

    /// Sends an I2C_CONFIG frame with the given read `delay` (microseconds).
    pub fn configure(&mut self, delay: u16) -> Result<(), Error> {
        let frame = i2c_config_frame(delay);
        trace!("I2C config: {:02X?}", frame.as_slice());
        self.transport.write(&frame)
    }

    /// Runs one I2C transaction against the peripheral at `address`.
    ///
    /// When `outgoing` is given, its bytes are sent as a write request. When
    /// `incoming` is given, a read request reusing `outgoing` as the register
    /// selection follows, and the wire is scanned until a well-formed reply from
    /// `address` arrives; its data is then copied into `incoming`. Replies carrying
    /// another address are discarded and the scan continues until the transport
    /// fails or its deadline elapses.
    ///
    /// With neither `outgoing` nor `incoming`, the call is a no-op success.
    pub fn transact(
        &mut self,
        address: u8,
        outgoing: Option<&[u8]>,
        incoming: Option<&mut [u8]>,
    ) -> Result<(), Error> {
        if let Some(data) = outgoing {
            let frame = i2c_write_frame(address, data);
            trace!("I2C write request: {:02X?}", frame.as_slice());
            self.transport.write(&frame)?;
        }

        if let Some(buffer) = incoming {
            let frame = i2c_read_frame(address, outgoing.unwrap_or(&[]));
            trace!("I2C read request: {:02X?}", frame.as_slice());
            self.transport.write(&frame)?;

            let reply = self.await_reply(address)?;
            let len = reply.data.len().min(buffer.len());
            buffer[..len].copy_from_slice(&reply.data[..len]);
        }

        Ok(())
    }

    /// Scans inbound bytes until a well-formed reply from `address` arrives.
    fn await_reply(&mut self, address: u8) -> Result<I2CReply, Error> {
        let mut scanner = ReplyScanner::new();
        let mut byte = [0u8];
        loop {
            self.transport.read_exact(&mut byte)?;
            if let Some(payload) = scanner.push(byte[0]) {
                let reply = decode_reply(&payload)?;
                if reply.address == u16::from(address) {
                    return Ok(reply);
                }
                trace!(
                    "Discarding reply from 0x{:02X}: awaiting 0x{:02X}",
                    reply.address,
                    address
                );
            }
        }
    }
}
