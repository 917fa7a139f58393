//! 7-bit payload codec and frame builders.
//!
//! The link reserves the high bit of every in-frame byte for framing control, so each
//! logical byte travels as a (low7, high7) pair, low byte first. Frame builders are
//! pure encoding and cannot fail.

use crate::protocol::constants::*;

/// Splits a byte into its 7-bit wire pair, low byte first.
pub fn pack(byte: u8) -> (u8, u8) {
    (byte & SYSEX_REALTIME, (byte >> 7) & SYSEX_REALTIME)
}

/// Merges a 7-bit wire pair back into the original byte.
pub fn unpack(low: u8, high: u8) -> u8 {
    (low & SYSEX_REALTIME) | ((high & SYSEX_REALTIME) << 7)
}

/// Merges a 7-bit wire pair into a 14-bit value (addresses and registers).
pub fn unpack_u14(low: u8, high: u8) -> u16 {
    u16::from(low & SYSEX_REALTIME) | (u16::from(high & SYSEX_REALTIME) << 7)
}

/// Builds an I2C_CONFIG frame carrying the read `delay` in microseconds.
///
/// <https://github.com/firmata/protocol/blob/master/i2c.md>
pub fn i2c_config_frame(delay: u16) -> Vec<u8> {
    vec![
        START_SYSEX,
        I2C_CONFIG,
        delay as u8 & SYSEX_REALTIME,
        (delay >> 7) as u8 & SYSEX_REALTIME,
        END_SYSEX,
    ]
}

/// Builds an I2C_REQUEST write frame carrying `data` for the peripheral at `address`.
pub fn i2c_write_frame(address: u8, data: &[u8]) -> Vec<u8> {
    let mut buf = vec![START_SYSEX, I2C_REQUEST, address, I2C_WRITE_FLAG];

    for &byte in data {
        let (low, high) = pack(byte);
        buf.push(low);
        buf.push(high);
    }

    buf.push(END_SYSEX);
    buf
}

/// Builds an I2C_REQUEST read frame for the peripheral at `address`.
///
/// `register_select` carries the same bytes the accompanying write used to address
/// the register being read; the firmware echoes the register back in its reply.
pub fn i2c_read_frame(address: u8, register_select: &[u8]) -> Vec<u8> {
    let mut buf = vec![START_SYSEX, I2C_REQUEST, address, I2C_READ_FLAG];

    for &byte in register_select {
        let (low, high) = pack(byte);
        buf.push(low);
        buf.push(high);
    }

    buf.push(END_SYSEX);
    buf
}
