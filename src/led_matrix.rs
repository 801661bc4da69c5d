//! A device abstraction for a small WS2812 (NeoPixel-style) LED matrix.
//!
//! [`LedMatrix`] owns one frame of LED colours in physical wiring order plus the
//! [`MatrixLayout`] that maps logical `(x, y)` cells onto it. Callers fill the buffer,
//! then [`flush`](LedMatrix::flush) streams it to a [`PixelSink`].
//!
//! # Example
//!
//! ```rust
//! use bitdog_matrix::led_matrix::{BitDogMatrix, PixelSink, RESET_DELAY};
//! use bitdog_matrix::Result;
//! use embassy_time::Duration;
//!
//! /// Collects the bytes a flush would put on the wire.
//! #[derive(Default)]
//! struct Wire(Vec<u8>);
//!
//! impl PixelSink for Wire {
//!     async fn write_byte(&mut self, byte: u8) -> Result<()> {
//!         self.0.push(byte);
//!         Ok(())
//!     }
//!     async fn latch(&mut self, reset: Duration) -> Result<()> {
//!         assert!(reset >= RESET_DELAY);
//!         Ok(())
//!     }
//! }
//!
//! let mut matrix = BitDogMatrix::bitdog();
//! matrix.set_xy(0, 0, smart_leds::RGB8::new(10, 20, 30))?;
//!
//! let mut wire = Wire::default();
//! embassy_futures::block_on(matrix.flush(&mut wire))?;
//! assert_eq!(wire.0.len(), 75);
//! assert_eq!(&wire.0[72..], &[20, 10, 30]); // LED 24 is (0, 0), sent as G, R, B
//! # Ok::<(), bitdog_matrix::Error>(())
//! ```

pub mod claim;
pub mod frame;
pub mod layout;
#[cfg(not(feature = "host"))]
pub mod ws2812_pio;

use embassy_time::Duration;
use smart_leds::RGB8;

pub use frame::Frame2d;
pub use layout::MatrixLayout;

use crate::{Error, Result};

/// Predefined RGB color constants from the `smart_leds` crate.
#[doc(inline)]
pub use smart_leds::colors;

/// Idle time after a frame before the LEDs latch the new data.
///
/// A WS2812 protocol requirement, not a tuning knob.
pub const RESET_DELAY: Duration = Duration::from_micros(100);

/// Time to shift one byte out at the WS2812 bit rate (8 bits at 800 kHz).
pub const BYTE_TIME: Duration = Duration::from_micros(10);

/// Number of LEDs on the BitDogLab matrix.
pub const BITDOG_LEN: usize = 25;
/// Side of the square BitDogLab matrix.
pub const BITDOG_SIDE: usize = 5;

/// The 5×5 matrix soldered on the BitDogLab.
pub type BitDogMatrix = LedMatrix<BITDOG_LEN, BITDOG_SIDE, BITDOG_SIDE>;

/// One LED as the strip receives it: green, red, blue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(C)]
pub struct GrbPixel {
    /// Green channel.
    pub g: u8,
    /// Red channel.
    pub r: u8,
    /// Blue channel.
    pub b: u8,
}

impl GrbPixel {
    /// All channels off.
    pub const OFF: Self = Self { g: 0, r: 0, b: 0 };

    /// Build from red, green, blue.
    #[must_use]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { g, r, b }
    }

    /// The three bytes in wire order.
    #[must_use]
    pub const fn wire_bytes(self) -> [u8; 3] {
        [self.g, self.r, self.b]
    }
}

impl From<RGB8> for GrbPixel {
    fn from(color: RGB8) -> Self {
        Self::from_rgb(color.r, color.g, color.b)
    }
}

impl From<GrbPixel> for RGB8 {
    fn from(pixel: GrbPixel) -> Self {
        Self::new(pixel.r, pixel.g, pixel.b)
    }
}

/// Destination of a flushed frame: the LED strip peripheral, or a recorder in tests.
pub trait PixelSink {
    /// Write one byte to the strip, waiting for room if needed.
    async fn write_byte(&mut self, byte: u8) -> Result<()>;

    /// End of frame: hold the data line idle for at least `reset`.
    async fn latch(&mut self, reset: Duration) -> Result<()>;
}

impl<S: PixelSink> PixelSink for &mut S {
    async fn write_byte(&mut self, byte: u8) -> Result<()> {
        (**self).write_byte(byte).await
    }

    async fn latch(&mut self, reset: Duration) -> Result<()> {
        (**self).latch(reset).await
    }
}

/// An `N`-LED matrix, `W` columns by `H` rows, with its buffer in physical order.
///
/// See the [module documentation](mod@crate::led_matrix) for an example.
#[derive(Clone, Debug)]
pub struct LedMatrix<const N: usize, const W: usize, const H: usize> {
    pixels: [GrbPixel; N],
    layout: MatrixLayout<N, W, H>,
}

impl LedMatrix<BITDOG_LEN, BITDOG_SIDE, BITDOG_SIDE> {
    /// A blank matrix with the BitDogLab wiring.
    #[must_use]
    pub const fn bitdog() -> Self {
        Self::new(MatrixLayout::reverse_serpentine())
    }
}

impl<const N: usize, const W: usize, const H: usize> LedMatrix<N, W, H> {
    /// Number of LEDs.
    pub const LEN: usize = N;

    /// A blank (all off) matrix with the given wiring.
    #[must_use]
    pub const fn new(layout: MatrixLayout<N, W, H>) -> Self {
        Self {
            pixels: [GrbPixel::OFF; N],
            layout,
        }
    }

    /// The wiring used to place `(x, y)` cells.
    #[must_use]
    pub const fn layout(&self) -> &MatrixLayout<N, W, H> {
        &self.layout
    }

    /// The buffer in physical order.
    #[must_use]
    pub const fn pixels(&self) -> &[GrbPixel; N] {
        &self.pixels
    }

    /// Physical LED index for cell `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`Error::CoordinateOutOfRange`] for a cell outside the matrix.
    pub fn index_of(&self, x: usize, y: usize) -> Result<usize> {
        self.layout.index_of(x, y)
    }

    /// Overwrite the LED at physical `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] when `index >= N`; the buffer is left untouched.
    pub fn set(&mut self, index: usize, r: u8, g: u8, b: u8) -> Result<()> {
        let slot = self
            .pixels
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len: N })?;
        *slot = GrbPixel::from_rgb(r, g, b);
        Ok(())
    }

    /// Read back the LED at physical `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] when `index >= N`.
    pub fn get(&self, index: usize) -> Result<RGB8> {
        self.pixels
            .get(index)
            .map(|&pixel| RGB8::from(pixel))
            .ok_or(Error::IndexOutOfRange { index, len: N })
    }

    /// Set the LED lighting cell `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`Error::CoordinateOutOfRange`] for a cell outside the matrix.
    pub fn set_xy(&mut self, x: usize, y: usize, color: RGB8) -> Result<()> {
        let index = self.index_of(x, y)?;
        self.set(index, color.r, color.g, color.b)
    }

    /// Turn every LED off.
    pub fn clear(&mut self) {
        self.pixels.fill(GrbPixel::OFF);
    }

    /// Copy a logical frame into the buffer, cell `(x, y)` to `index_of(x, y)`.
    ///
    /// # Errors
    ///
    /// Propagates mapping errors; a valid layout never produces one.
    pub fn render(&mut self, frame: &Frame2d<W, H>) -> Result<()> {
        for (x_index, y_index, color) in frame.cells() {
            self.set_xy(x_index, y_index, color)?;
        }
        Ok(())
    }

    /// Stream the whole buffer to `sink`: G, R, B per LED in physical order (`3 * N` bytes),
    /// then the [`RESET_DELAY`] latch.
    ///
    /// # Errors
    ///
    /// Whatever the sink reports.
    pub async fn flush<S: PixelSink>(&self, sink: &mut S) -> Result<()> {
        for pixel in &self.pixels {
            for byte in pixel.wire_bytes() {
                sink.write_byte(byte).await?;
            }
        }
        sink.latch(RESET_DELAY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_time_covers_eight_bits_at_800_khz() {
        let bit = Duration::from_hz(800_000);
        assert!(BYTE_TIME >= bit * 8);
        assert_eq!(BYTE_TIME, Duration::from_micros(10));
    }
}
