use log::error;
use snafu::Snafu;

pub use crate::errors::Error::*;
use crate::errors::ProtocolError::{IoException, ReplyTimeout};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Protocol error: {source}.
    ProtocolError { source: ProtocolError },
    /// Hardware error: {source}.
    HardwareError { source: HardwareError },
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        error!("std::io error {:?}", error);
        let source = match error.kind() {
            std::io::ErrorKind::TimedOut => ReplyTimeout,
            std::io::ErrorKind::NotFound => IoException {
                info: String::from("Board not found or already in use"),
            },
            std::io::ErrorKind::PermissionDenied => IoException {
                info: String::from("Board connection lost"),
            },
            _ => IoException {
                info: error.to_string(),
            },
        };
        Self::ProtocolError { source }
    }
}

impl From<ProtocolError> for Error {
    fn from(value: ProtocolError) -> Self {
        Self::ProtocolError { source: value }
    }
}

impl From<HardwareError> for Error {
    fn from(value: HardwareError) -> Self {
        Self::HardwareError { source: value }
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProtocolError {
    /// {info}
    IoException { info: String },
    /// Connection has not been initialized
    NotInitialized,
    /// No reply received before the transport deadline
    ReplyTimeout,
    /// Not enough bytes received - '{operation}' expected {expected} bytes, {received} received
    MessageTooShort {
        operation: &'static str,
        expected: usize,
        received: usize,
    },
    /// Unpaired data byte - a {received} bytes payload cannot split into 7-bit pairs
    UnalignedPayload { received: usize },
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum HardwareError {
    /// Unknown pin {pin}
    UnknownPin { pin: String },
    /// Pin ({pin}) does not support {operation}
    IncompatiblePin {
        pin: String,
        operation: &'static str,
    },
}
