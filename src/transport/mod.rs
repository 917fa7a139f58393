//! Byte-oriented transports carrying the framed protocol.

use crate::errors::Error;
use crate::transport::private::TraitToAny;
use dyn_clone::DynClone;
use std::fmt::{Debug, Display};
use std::time::Duration;

pub mod serial;

pub use serial::Serial;

pub(crate) mod private {
    use std::any::Any;

    pub trait TraitToAny: 'static {
        fn as_any(&self) -> &dyn Any;
    }

    impl<T: 'static> TraitToAny for T {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }
}

dyn_clone::clone_trait_object!(Transport);

/// An ordered, reliable duplex byte channel with blocking semantics.
///
/// The transport provides no message framing of its own; framing is entirely the
/// protocol engine's responsibility.
#[cfg_attr(feature = "serde", typetag::serde(tag = "type"))]
pub trait Transport: Debug + Display + DynClone + Send + Sync + TraitToAny {
    /// Opens the communication channel.
    ///
    /// # Notes
    /// The method is sync and may block until the connection is established.
    fn open(&mut self) -> Result<(), Error>;

    /// Gracefully shuts down the communication channel.
    fn close(&mut self) -> Result<(), Error>;

    /// Sets the read deadline: a blocked read fails once `duration` elapses.
    ///
    /// # Notes
    /// This function is optional and may not be supported by all transports.
    fn set_timeout(&mut self, duration: Duration) -> Result<(), Error>;

    /// Writes all bytes of `buf` to the channel. For more details see [`std::io::Write::write_all`].
    ///
    /// # Notes
    /// This function blocks until the write operation is complete. Ensure proper error handling in calling code.
    fn write(&mut self, buf: &[u8]) -> Result<(), Error>;

    /// Fills `buf` from the channel. For more details see [`std::io::Read::read_exact`].
    ///
    /// # Notes
    /// This function blocks until the buffer is filled, the deadline elapses, or an
    /// error occurs. Ensure proper error handling in calling code.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), Error>;
}
