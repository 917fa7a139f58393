use crate::errors::Error;
use crate::errors::ProtocolError::NotInitialized;
use crate::transport::Transport;
use log::trace;
use parking_lot::Mutex;
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use std::fmt::{Display, Formatter};
use std::io::{Read, Write};
use std::sync::Arc;
use std::time::Duration;

/// Default baud rate used by StandardFirmata sketches.
const DEFAULT_BAUD: u32 = 57_600;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug)]
pub struct Serial {
    /// The connection port.
    port: String,
    /// The baud rate the port is opened at.
    baud: u32,
    /// A Read/Write io object.
    #[cfg_attr(feature = "serde", serde(skip))]
    io: Arc<Mutex<Option<Box<dyn SerialPort>>>>,
}

impl Serial {
    /// Constructs a new `Serial` transport communicating through the specified port
    /// at the standard Firmata baud rate.
    ///
    /// # Example
    /// ```no_run
    /// use firmata_i2c::protocol::I2CSession;
    /// use firmata_i2c::transport::Serial;
    ///
    /// let mut session = I2CSession::new(Serial::new("/dev/ttyACM0"));
    /// session.open(0).expect("board reachable");
    /// ```
    pub fn new<P: Into<String>>(port: P) -> Self {
        Self::with_baud(port, DEFAULT_BAUD)
    }

    /// Constructs a new `Serial` transport with a custom baud rate.
    pub fn with_baud<P: Into<String>>(port: P, baud: u32) -> Self {
        Self {
            port: port.into(),
            baud,
            io: Arc::new(Mutex::new(None)),
        }
    }

    /// Retrieves the configured port.
    pub fn get_port(&self) -> String {
        self.port.clone()
    }
}

impl Default for Serial {
    /// Creates a serial transport on the first available port, or an empty port name
    /// if none is available (which will lead to an error during the open phase).
    #[cfg(not(tarpaulin_include))]
    fn default() -> Self {
        let ports = serialport::available_ports().unwrap_or_else(|_| vec![]);
        match ports.first() {
            Some(port) => Self::new(&port.port_name),
            None => Self::new(""),
        }
    }
}

impl Display for Serial {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Serial({})", self.port)
    }
}

#[cfg_attr(feature = "serde", typetag::serde)]
impl Transport for Serial {
    fn open(&mut self) -> Result<(), Error> {
        let connexion = serialport::new(self.port.clone(), self.baud)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(Duration::from_secs(10))
            .open_native()?;
        trace!("Serial port is now opened: {:?}", connexion);

        self.io = Arc::new(Mutex::new(Some(Box::new(connexion))));

        Ok(())
    }

    fn close(&mut self) -> Result<(), Error> {
        *self.io.lock() = None;
        Ok(())
    }

    fn set_timeout(&mut self, duration: Duration) -> Result<(), Error> {
        self.io
            .lock()
            .as_mut()
            .ok_or(NotInitialized)?
            .set_timeout(duration)?;
        Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> Result<(), Error> {
        let mut lock = self.io.lock();
        lock.as_mut().ok_or(NotInitialized)?.write_all(buf)?;
        Ok(())
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        let mut lock = self.io.lock();
        lock.as_mut().ok_or(NotInitialized)?.read_exact(buf)?;
        Ok(())
    }
}

impl From<serialport::Error> for Error {
    fn from(value: serialport::Error) -> Self {
        std::io::Error::from(value).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::serial_port::SerialPortMock;
    use serialport::ErrorKind;

    fn get_test_successful_transport() -> Serial {
        let transport = Serial::new("/dev/ttyACM0");
        *transport.io.lock() = Some(Box::new(SerialPortMock::default()));
        transport
    }

    fn get_test_failing_transport() -> Serial {
        let transport = Serial::new("/dev/ttyACM0");
        *transport.io.lock() = Some(Box::new(SerialPortMock::new(ErrorKind::InvalidInput)));
        transport
    }

    #[test]
    fn test_new_serial_transport() {
        let transport = Serial::new("/dev/ttyACM0");
        assert_eq!(transport.port, "/dev/ttyACM0");
        assert_eq!(transport.baud, 57_600);
        assert!(transport.io.lock().is_none());

        let transport = Serial::with_baud("/dev/ttyUSB0", 115_200);
        assert_eq!(transport.get_port(), "/dev/ttyUSB0");
        assert_eq!(transport.baud, 115_200);
    }

    #[test]
    fn test_close_serial_transport() {
        let mut transport = get_test_successful_transport();
        let result = transport.close();
        assert!(result.is_ok());
        assert!(transport.io.lock().is_none());
    }

    #[test]
    fn test_set_timeout() {
        let mut transport = get_test_successful_transport();
        let result = transport.set_timeout(Duration::from_millis(500));
        assert!(result.is_ok());

        let mut transport = Serial::new("/dev/ttyACM0");
        let result = transport.set_timeout(Duration::from_millis(500));
        assert!(result.is_err(), "set_timeout requires an opened port");
    }

    #[test]
    fn test_write_data() {
        let mut transport = get_test_successful_transport();
        let result = transport.write(&[1, 2, 3]);
        assert!(result.is_ok());
        let result = transport.write(&[]);
        assert!(result.is_ok());

        let mut transport = get_test_failing_transport();
        let result = transport.write(&[1, 2, 3]);
        assert!(result.is_err());
    }

    #[test]
    fn test_read_exact() {
        let mut transport = get_test_successful_transport();
        let mut buf = [0; 3];
        let result = transport.read_exact(&mut buf);
        assert!(result.is_ok());

        let mut transport = get_test_failing_transport();
        let mut buf = [0; 3];
        let result = transport.read_exact(&mut buf);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_serial_error() {
        let serial_error = serialport::Error {
            kind: ErrorKind::Unknown,
            description: String::from("test error"),
        };
        let custom_error: Error = serial_error.into();
        assert_eq!(custom_error.to_string(), "Protocol error: test error.");

        let serial_error = serialport::Error {
            kind: ErrorKind::Io(std::io::ErrorKind::NotFound),
            description: String::from("IO error"),
        };
        let custom_error: Error = serial_error.into();
        assert_eq!(
            custom_error.to_string(),
            "Protocol error: Board not found or already in use."
        );
    }

    #[test]
    fn test_display_serial_transport() {
        let transport = Serial::new("/dev/ttyACM0");
        assert_eq!(format!("{}", transport), "Serial(/dev/ttyACM0)");
    }
}
