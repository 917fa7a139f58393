//! Streaming recognition of I2C reply frames.

use log::trace;

use crate::errors::Error;
use crate::errors::ProtocolError::{MessageTooShort, UnalignedPayload};
use crate::protocol::codec::{unpack, unpack_u14};
use crate::protocol::constants::{END_SYSEX, I2C_REPLY, START_SYSEX};

/// A decoded I2C reply frame.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct I2CReply {
    pub address: u16,
    pub register: u16,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Discarding bytes until a start marker is seen.
    SeekStart,
    /// Inside a frame, discarding bytes until the reply tag is seen.
    SeekTag,
    /// Accumulating payload bytes until the end marker.
    Payload,
}

/// Recognizes one complete I2C reply frame in an inbound byte stream, one byte at a
/// time, with no backtracking.
///
/// Scanning is deliberately tolerant: bytes outside a frame, and non-reply tags
/// inside one (stray start markers included), are discarded without error so that
/// foreign traffic on the wire cannot abort a pending transaction.
#[derive(Debug, Clone)]
pub struct ReplyScanner {
    state: ScanState,
    payload: Vec<u8>,
}

impl Default for ReplyScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplyScanner {
    pub fn new() -> Self {
        Self {
            state: ScanState::SeekStart,
            payload: vec![],
        }
    }

    /// Discards any partial frame and restarts the scan from the seek-start state.
    pub fn reset(&mut self) {
        self.state = ScanState::SeekStart;
        self.payload.clear();
    }

    /// Feeds one byte from the wire into the scanner.
    ///
    /// Returns the raw reply payload (end marker excluded) once a complete frame has
    /// been recognized, `None` while the scan is still in progress. The scanner
    /// resets itself after a completed frame and can be fed again.
    pub fn push(&mut self, byte: u8) -> Option<Vec<u8>> {
        match self.state {
            ScanState::SeekStart => {
                if byte == START_SYSEX {
                    self.state = ScanState::SeekTag;
                } else {
                    trace!("Scanner: discarding out-of-frame byte 0x{:02X}", byte);
                }
                None
            }
            ScanState::SeekTag => {
                if byte == I2C_REPLY {
                    self.state = ScanState::Payload;
                } else {
                    trace!("Scanner: discarding non-reply byte 0x{:02X}", byte);
                }
                None
            }
            ScanState::Payload => {
                if byte == END_SYSEX {
                    self.state = ScanState::SeekStart;
                    return Some(std::mem::take(&mut self.payload));
                }
                self.payload.push(byte);
                None
            }
        }
    }
}

/// Decodes a raw reply payload into an [`I2CReply`].
///
/// The payload layout is `[low(addr), high(addr), low(reg), high(reg)]` followed by
/// one 7-bit pair per data byte. Payloads shorter than the header, or whose data
/// section does not split into pairs, are rejected rather than truncated. Stray
/// framing bits on payload bytes are masked away by the pair decoders.
pub fn decode_reply(payload: &[u8]) -> Result<I2CReply, Error> {
    if payload.len() < 4 {
        return Err(Error::from(MessageTooShort {
            operation: "decode_reply",
            expected: 4,
            received: payload.len(),
        }));
    }
    if (payload.len() - 4) % 2 != 0 {
        return Err(Error::from(UnalignedPayload {
            received: payload.len(),
        }));
    }

    let mut reply = I2CReply {
        address: unpack_u14(payload[0], payload[1]),
        register: unpack_u14(payload[2], payload[3]),
        data: Vec::with_capacity((payload.len() - 4) / 2),
    };
    for pair in payload[4..].chunks_exact(2) {
        reply.data.push(unpack(pair[0], pair[1]));
    }
    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(scanner: &mut ReplyScanner, bytes: &[u8]) -> Option<Vec<u8>> {
        bytes.iter().find_map(|&byte| scanner.push(byte))
    }

    #[test]
    fn test_scan_complete_frame() {
        let mut scanner = ReplyScanner::new();
        let payload = scan(
            &mut scanner,
            &[0xF0, 0x77, 0x40, 0x00, 0x08, 0x00, 0x63, 0x00, 0xF7],
        );
        assert_eq!(payload, Some(vec![0x40, 0x00, 0x08, 0x00, 0x63, 0x00]));
    }

    #[test]
    fn test_scan_discards_noise_before_frame() {
        let mut scanner = ReplyScanner::new();
        // Analog report traffic before the frame must not derail the scan.
        let payload = scan(
            &mut scanner,
            &[0xE0, 0x2A, 0x01, 0xF0, 0x77, 0x40, 0x00, 0x08, 0x00, 0xF7],
        );
        assert_eq!(payload, Some(vec![0x40, 0x00, 0x08, 0x00]));
    }

    #[test]
    fn test_scan_recovers_from_stray_start_marker() {
        let mut scanner = ReplyScanner::new();
        // A stray start marker and garbage, then a genuine reply. The tag seek
        // swallows everything until the reply tag shows up.
        let payload = scan(
            &mut scanner,
            &[
                0xF0, 0x11, 0x22, 0xF0, 0x79, 0x01, 0x0C, // foreign frame
                0x77, 0x40, 0x00, 0x08, 0x00, 0x2A, 0x00, 0xF7,
            ],
        );
        assert_eq!(payload, Some(vec![0x40, 0x00, 0x08, 0x00, 0x2A, 0x00]));
    }

    #[test]
    fn test_scan_resumes_after_completed_frame() {
        let mut scanner = ReplyScanner::new();
        let first = scan(&mut scanner, &[0xF0, 0x77, 0x01, 0x00, 0x02, 0x00, 0xF7]);
        assert_eq!(first, Some(vec![0x01, 0x00, 0x02, 0x00]));
        let second = scan(&mut scanner, &[0xF0, 0x77, 0x03, 0x00, 0x04, 0x00, 0xF7]);
        assert_eq!(second, Some(vec![0x03, 0x00, 0x04, 0x00]));
    }

    #[test]
    fn test_reset_drops_partial_frame() {
        let mut scanner = ReplyScanner::new();
        assert_eq!(scan(&mut scanner, &[0xF0, 0x77, 0x01, 0x00]), None);
        scanner.reset();
        // The pending payload bytes must not leak into the next frame.
        let payload = scan(&mut scanner, &[0xF0, 0x77, 0x40, 0x00, 0x08, 0x00, 0xF7]);
        assert_eq!(payload, Some(vec![0x40, 0x00, 0x08, 0x00]));
    }

    #[test]
    fn test_decode_reply() {
        let reply = decode_reply(&[0x40, 0x00, 0x08, 0x00, 0x63, 0x00, 0x7F, 0x01]).unwrap();
        assert_eq!(reply.address, 0x40);
        assert_eq!(reply.register, 0x08);
        assert_eq!(reply.data, vec![0x63, 0xFF]);
    }

    #[test]
    fn test_decode_reply_without_data() {
        let reply = decode_reply(&[0x04, 0x00, 0x01, 0x00]).unwrap();
        assert_eq!(reply.address, 0x04);
        assert_eq!(reply.register, 0x01);
        assert!(reply.data.is_empty());
    }

    #[test]
    fn test_decode_reply_masks_framing_bit() {
        // Hostile traffic can land payload bytes with the high bit set; decoding
        // masks the framing bit away instead of rejecting (or crashing on) them.
        let reply = decode_reply(&[0x84, 0x00, 0x01, 0x00, 0xAA, 0x00]).unwrap();
        assert_eq!(reply.address, 0x04);
        assert_eq!(reply.register, 0x01);
        assert_eq!(reply.data, vec![0x2A]);
    }

    #[test]
    fn test_decode_reply_14bit_address() {
        let reply = decode_reply(&[0x10, 0x02, 0x7F, 0x7F]).unwrap();
        assert_eq!(reply.address, 0x110);
        assert_eq!(reply.register, 0x3FFF);
    }

    #[test]
    fn test_decode_reply_too_short() {
        let result = decode_reply(&[0x40, 0x00]);
        assert!(result.is_err(), "{:?}", result);
        assert_eq!(
            result.err().unwrap().to_string(),
            "Protocol error: Not enough bytes received - 'decode_reply' expected 4 bytes, 2 received."
        );
    }

    #[test]
    fn test_decode_reply_unpaired_data() {
        let result = decode_reply(&[0x40, 0x00, 0x08, 0x00, 0x63]);
        assert!(result.is_err(), "{:?}", result);
        assert_eq!(
            result.err().unwrap().to_string(),
            "Protocol error: Unpaired data byte - a 5 bytes payload cannot split into 7-bit pairs."
        );
    }
}
