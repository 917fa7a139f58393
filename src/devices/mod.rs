//! Board-specific peripheral glue built on top of the I2C session.

pub mod grove;

pub use grove::GrovePi;
