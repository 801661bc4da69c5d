use derive_more::derive::{Display, Error};
use embedded_hal::i2c::ErrorKind;

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A physical LED index past the end of the buffer.
    #[display("LED index {index} out of range (buffer holds {len})")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// Number of LEDs in the buffer.
        len: usize,
    },

    /// A grid coordinate outside the matrix.
    #[display("coordinate ({x}, {y}) outside {width}x{height} matrix")]
    CoordinateOutOfRange {
        /// Column.
        x: usize,
        /// Row.
        y: usize,
        /// Matrix width.
        width: usize,
        /// Matrix height.
        height: usize,
    },

    /// No PIO state machine is free to drive the LED strip.
    #[display("no free PIO state machine for the LED strip")]
    ResourceExhausted,

    // `#[error(not(source))]` below tells `derive_more` that `ErrorKind` does not implement
    // Rust's `core::error::Error` trait.
    /// The display did not acknowledge an I2C write.
    #[display("display I2C write failed: {_0:?}")]
    Display(#[error(not(source))] ErrorKind),
}

impl Error {
    /// Wraps any `embedded-hal` I2C error.
    pub(crate) fn display<E: embedded_hal::i2c::Error>(err: &E) -> Self {
        Self::Display(err.kind())
    }
}
