//! Mocked entities of all kinds (useful for tests mostly).

pub mod serial_port;
pub mod transport;

pub use serial_port::SerialPortMock;
pub use transport::MockTransport;
