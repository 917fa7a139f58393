use crate::errors::Error;
use crate::transport::Transport;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// A scripted in-memory transport.
///
/// Bytes written by the code under test accumulate in `write_buf`; reads consume
/// `read_buf` in order. Reading past the scripted data fails with a timed-out I/O
/// error, the same way a deadline-bearing transport reports indefinite silence.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default)]
pub struct MockTransport {
    pub connected: bool,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub read_buf: Vec<u8>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub write_buf: Vec<u8>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub read_index: usize,
}

impl MockTransport {
    /// Creates a mock whose reads will serve the given bytes.
    pub fn with_data(data: &[u8]) -> Self {
        Self {
            read_buf: data.to_vec(),
            ..Default::default()
        }
    }
}

impl Display for MockTransport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "MockTransport")
    }
}

#[cfg_attr(feature = "serde", typetag::serde)]
impl Transport for MockTransport {
    fn open(&mut self) -> Result<(), Error> {
        self.connected = true;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Error> {
        self.connected = false;
        Ok(())
    }

    fn set_timeout(&mut self, _: Duration) -> Result<(), Error> {
        Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> Result<(), Error> {
        self.write_buf.extend_from_slice(buf);
        Ok(())
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        if self.read_index + buf.len() > self.read_buf.len() {
            // The scripted wire has gone silent.
            return Err(std::io::Error::from(std::io::ErrorKind::TimedOut).into());
        }
        buf.copy_from_slice(&self.read_buf[self.read_index..self.read_index + buf.len()]);
        self.read_index += buf.len();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_read_write() {
        let mut mock = MockTransport::with_data(&[0x01, 0x02]);
        assert!(mock.open().is_ok());
        assert!(mock.connected);

        assert!(mock.write(&[0xAA]).is_ok());
        assert!(mock.write(&[0xBB, 0xCC]).is_ok());
        assert_eq!(mock.write_buf, [0xAA, 0xBB, 0xCC]);

        let mut buf = [0u8; 2];
        assert!(mock.read_exact(&mut buf).is_ok());
        assert_eq!(buf, [0x01, 0x02]);

        // Exhausted script reads like a timed out wire.
        let result = mock.read_exact(&mut buf);
        assert!(result.is_err());
        assert_eq!(
            result.err().unwrap().to_string(),
            "Protocol error: No reply received before the transport deadline."
        );
    }
}
