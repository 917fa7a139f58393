//! Firmata protocol constants.

/// Start a MIDI Sysex message
pub const START_SYSEX: u8 = 0xF0;
/// End a MIDI Sysex message
pub const END_SYSEX: u8 = 0xF7;

// Extended command set using sysex (0-127/0x00-0x7F)

/// Send an I2C read/write request
pub const I2C_REQUEST: u8 = 0x76;
/// Reply to an I2C read request
pub const I2C_REPLY: u8 = 0x77;
/// Config I2C settings such as delay times and power pins
pub const I2C_CONFIG: u8 = 0x78;
/// Report name and version of the firmware
pub const REPORT_FIRMWARE: u8 = 0x79;

/// Mode byte marking an I2C request frame as a read
pub const I2C_READ_FLAG: u8 = 1 << 3;
/// Mode byte marking an I2C request frame as a write
pub const I2C_WRITE_FLAG: u8 = 0x00;

/// In-frame payload byte mask: the top bit is reserved for framing control
pub const SYSEX_REALTIME: u8 = 0x7F;
