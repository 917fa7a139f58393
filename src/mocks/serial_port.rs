use std::io::{Read, Write};
use std::time::Duration;

use serialport::{
    ClearBuffer, DataBits, Error, ErrorKind, FlowControl, Parity, SerialPort, StopBits,
};

/// A `serialport::SerialPort` stand-in that either succeeds with fixed settings or
/// fails every call with the configured error kind.
#[derive(Debug, Default, Clone)]
pub struct SerialPortMock {
    error: Option<Error>,
}

impl SerialPortMock {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            error: Some(Error::new(kind, "Mock error reason")),
        }
    }

    fn result<T>(&self, value: T) -> serialport::Result<T> {
        match &self.error {
            None => Ok(value),
            Some(error) => Err(error.clone()),
        }
    }
}

impl SerialPort for SerialPortMock {
    fn name(&self) -> Option<String> {
        Some(String::from("SerialPortMock"))
    }

    fn baud_rate(&self) -> serialport::Result<u32> {
        self.result(57_600)
    }

    fn data_bits(&self) -> serialport::Result<DataBits> {
        self.result(DataBits::Eight)
    }

    fn flow_control(&self) -> serialport::Result<FlowControl> {
        self.result(FlowControl::None)
    }

    fn parity(&self) -> serialport::Result<Parity> {
        self.result(Parity::None)
    }

    fn stop_bits(&self) -> serialport::Result<StopBits> {
        self.result(StopBits::One)
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(1)
    }

    fn set_baud_rate(&mut self, _: u32) -> serialport::Result<()> {
        self.result(())
    }

    fn set_data_bits(&mut self, _: DataBits) -> serialport::Result<()> {
        self.result(())
    }

    fn set_flow_control(&mut self, _: FlowControl) -> serialport::Result<()> {
        self.result(())
    }

    fn set_parity(&mut self, _: Parity) -> serialport::Result<()> {
        self.result(())
    }

    fn set_stop_bits(&mut self, _: StopBits) -> serialport::Result<()> {
        self.result(())
    }

    fn set_timeout(&mut self, _: Duration) -> serialport::Result<()> {
        self.result(())
    }

    fn write_request_to_send(&mut self, _: bool) -> serialport::Result<()> {
        self.result(())
    }

    fn write_data_terminal_ready(&mut self, _: bool) -> serialport::Result<()> {
        self.result(())
    }

    fn read_clear_to_send(&mut self) -> serialport::Result<bool> {
        self.result(true)
    }

    fn read_data_set_ready(&mut self) -> serialport::Result<bool> {
        self.result(true)
    }

    fn read_ring_indicator(&mut self) -> serialport::Result<bool> {
        self.result(true)
    }

    fn read_carrier_detect(&mut self) -> serialport::Result<bool> {
        self.result(true)
    }

    fn bytes_to_read(&self) -> serialport::Result<u32> {
        self.result(0)
    }

    fn bytes_to_write(&self) -> serialport::Result<u32> {
        self.result(0)
    }

    fn clear(&self, _: ClearBuffer) -> serialport::Result<()> {
        self.result(())
    }

    fn try_clone(&self) -> serialport::Result<Box<dyn SerialPort>> {
        self.result(Box::new(self.clone()) as Box<dyn SerialPort>)
    }

    fn set_break(&self) -> serialport::Result<()> {
        self.result(())
    }

    fn clear_break(&self) -> serialport::Result<()> {
        self.result(())
    }
}

impl Read for SerialPortMock {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self.error {
            None => Ok(buf.len()),
            Some(_) => Err(std::io::Error::from(std::io::ErrorKind::InvalidData)),
        }
    }
}

impl Write for SerialPortMock {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self.error {
            None => Ok(buf.len()),
            Some(_) => Err(std::io::Error::from(std::io::ErrorKind::InvalidData)),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self.error {
            None => Ok(()),
            Some(_) => Err(std::io::Error::from(std::io::ErrorKind::InvalidData)),
        }
    }
}
