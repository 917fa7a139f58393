// ***********
// All information are relative to the GrovePi firmware protocol:
// https://github.com/DexterInd/GrovePi

use std::fmt::{Display, Formatter};
use std::thread::sleep;
use std::time::Duration;

use log::debug;

use crate::errors::Error;
use crate::errors::HardwareError::{IncompatiblePin, UnknownPin};
use crate::protocol::I2CSession;

/// Controls a GrovePi hat through a tunneled I2C session.
///
/// The hat listens at a fixed I2C address and exposes its Grove connectors through a
/// small command set: each command is a 4-byte write to register 1, and reads fetch
/// the command's result bytes back.
#[derive(Debug)]
pub struct GrovePi {
    session: I2CSession,
}

impl GrovePi {
    /// I2C address the GrovePi firmware listens at.
    pub const ADDRESS: u8 = 0x04;

    // Command register.
    const REGISTER: u8 = 1;
    // Firmware command bytes.
    const DIGITAL_READ: u8 = 1;
    const DIGITAL_WRITE: u8 = 2;
    const ANALOG_READ: u8 = 3;
    const ANALOG_WRITE: u8 = 4;
    const PIN_MODE: u8 = 5;

    // The firmware needs a beat between receiving a command and acting on it.
    const SETTLE: Duration = Duration::from_millis(100);

    /// Takes over an opened session and initializes the firmware I2C subsystem.
    pub fn new(mut session: I2CSession) -> Result<Self, Error> {
        session.configure(0)?;
        Ok(Self { session })
    }

    /// Releases the underlying session transport.
    pub fn close(&mut self) -> Result<(), Error> {
        self.session.close()
    }

    /// Resolves a named connector ("A0".."A2", "D2".."D8") to its firmware pin number.
    fn lookup(pin: &str) -> Result<u8, Error> {
        let id = match pin {
            "A0" => 0,
            "A1" => 1,
            "A2" => 2,
            "D2" => 2,
            "D3" => 3,
            "D4" => 4,
            "D5" => 5,
            "D6" => 6,
            "D7" => 7,
            "D8" => 8,
            _ => {
                return Err(Error::from(UnknownPin {
                    pin: pin.to_string(),
                }))
            }
        };
        Ok(id)
    }

    /// Resolves a connector name, requiring the given prefix family.
    fn lookup_with_prefix(pin: &str, prefix: char, operation: &'static str) -> Result<u8, Error> {
        if !pin.starts_with(prefix) {
            return Err(Error::from(IncompatiblePin {
                pin: pin.to_string(),
                operation,
            }));
        }
        Self::lookup(pin)
    }

    /// Sends one firmware command and lets the hat settle.
    fn command(&mut self, command: u8, pin: u8, value: u8) -> Result<(), Error> {
        debug!("GrovePi command {} on pin {} = {}", command, pin, value);
        self.session.transact(
            Self::ADDRESS,
            Some(&[Self::REGISTER, command, pin, value, 0]),
            None,
        )?;
        sleep(Self::SETTLE);
        Ok(())
    }

    /// Configures the direction of a pin (true for output).
    pub fn pin_mode(&mut self, pin: &str, output: bool) -> Result<(), Error> {
        let id = Self::lookup(pin)?;
        self.command(Self::PIN_MODE, id, u8::from(output))
    }

    /// Drives a digital pin high or low.
    pub fn digital_write(&mut self, pin: &str, level: bool) -> Result<(), Error> {
        let id = Self::lookup_with_prefix(pin, 'D', "digital write")?;
        self.command(Self::PIN_MODE, id, 1)?;
        self.command(Self::DIGITAL_WRITE, id, u8::from(level))
    }

    /// Reads the level of a digital pin.
    pub fn digital_read(&mut self, pin: &str) -> Result<bool, Error> {
        let id = Self::lookup_with_prefix(pin, 'D', "digital read")?;
        self.command(Self::DIGITAL_READ, id, 0)?;

        let mut value = [0u8; 1];
        self.session
            .transact(Self::ADDRESS, None, Some(&mut value))?;
        Ok(value[0] != 0)
    }

    /// Writes a PWM duty value to a digital pin.
    pub fn analog_write(&mut self, pin: &str, value: u8) -> Result<(), Error> {
        let id = Self::lookup_with_prefix(pin, 'D', "analog write")?;
        self.command(Self::ANALOG_WRITE, id, value)
    }

    /// Reads the 10-bit value of an analog pin.
    ///
    /// The firmware answers with three bytes: a status byte followed by the value,
    /// high byte first.
    pub fn analog_read(&mut self, pin: &str) -> Result<u16, Error> {
        let id = Self::lookup_with_prefix(pin, 'A', "analog read")?;
        self.command(Self::ANALOG_READ, id, 0)?;

        let mut value = [0u8; 3];
        self.session
            .transact(Self::ADDRESS, None, Some(&mut value))?;
        Ok((u16::from(value[1]) << 8) | u16::from(value[2]))
    }
}

impl Display for GrovePi {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "GrovePi (address=0x{:02X})", Self::ADDRESS)
    }
}
