//! Logical `W`×`H` colour grid, independent of wiring.

use core::convert::Infallible;
use core::ops::{Deref, DerefMut, Index, IndexMut};

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Pixel, Size};
use smart_leds::RGB8;

/// A logical frame: `H` rows of `W` colours, indexed `frame[y][x]` or `frame[(x, y)]`.
///
/// Frames know nothing about wiring. [`LedMatrix::render`](super::LedMatrix::render) places
/// each cell at its physical index.
///
/// Frames are also an [`embedded-graphics`](https://docs.rs/embedded-graphics) draw target:
///
/// ```rust
/// use bitdog_matrix::led_matrix::Frame2d;
/// use embedded_graphics::{pixelcolor::Rgb888, prelude::*, primitives::{Line, PrimitiveStyle}};
///
/// let mut frame = Frame2d::<5, 5>::new();
/// Line::new(Point::new(0, 0), Point::new(4, 4))
///     .into_styled(PrimitiveStyle::with_stroke(Rgb888::RED, 1))
///     .draw(&mut frame)
///     .expect("drawing on a frame cannot fail");
/// assert_eq!(frame[(2, 2)], smart_leds::RGB8::new(255, 0, 0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame2d<const W: usize, const H: usize>(pub [[RGB8; W]; H]);

impl<const W: usize, const H: usize> Frame2d<W, H> {
    /// Frame width in pixels (columns).
    pub const WIDTH: usize = W;
    /// Frame height in pixels (rows).
    pub const HEIGHT: usize = H;
    /// Total number of pixels.
    pub const LEN: usize = W * H;

    /// Create a new blank (all black) frame.
    #[must_use]
    pub const fn new() -> Self {
        Self([[RGB8::new(0, 0, 0); W]; H])
    }

    /// Create a frame filled with a single color.
    #[must_use]
    pub const fn filled(color: RGB8) -> Self {
        Self([[color; W]; H])
    }

    /// Iterate `(x, y, color)` over every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, RGB8)> + '_ {
        self.0.iter().enumerate().flat_map(|(y_index, row)| {
            row.iter()
                .enumerate()
                .map(move |(x_index, color)| (x_index, y_index, *color))
        })
    }

    /// Number of cells that are not black.
    #[must_use]
    pub fn lit_count(&self) -> usize {
        self.cells()
            .filter(|&(_, _, color)| color != RGB8::default())
            .count()
    }
}

impl<const W: usize, const H: usize> Deref for Frame2d<W, H> {
    type Target = [[RGB8; W]; H];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const W: usize, const H: usize> DerefMut for Frame2d<W, H> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<const W: usize, const H: usize> Index<(usize, usize)> for Frame2d<W, H> {
    type Output = RGB8;

    fn index(&self, (x_index, y_index): (usize, usize)) -> &Self::Output {
        assert!(x_index < W, "x_index must be within width");
        assert!(y_index < H, "y_index must be within height");
        &self.0[y_index][x_index]
    }
}

impl<const W: usize, const H: usize> IndexMut<(usize, usize)> for Frame2d<W, H> {
    fn index_mut(&mut self, (x_index, y_index): (usize, usize)) -> &mut Self::Output {
        assert!(x_index < W, "x_index must be within width");
        assert!(y_index < H, "y_index must be within height");
        &mut self.0[y_index][x_index]
    }
}

impl<const W: usize, const H: usize> Default for Frame2d<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> From<[[RGB8; W]; H]> for Frame2d<W, H> {
    fn from(array: [[RGB8; W]; H]) -> Self {
        Self(array)
    }
}

impl<const W: usize, const H: usize> OriginDimensions for Frame2d<W, H> {
    fn size(&self) -> Size {
        Size::new(W as u32, H as u32)
    }
}

impl<const W: usize, const H: usize> DrawTarget for Frame2d<W, H> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            let (Ok(x_index), Ok(y_index)) = (usize::try_from(coord.x), usize::try_from(coord.y))
            else {
                continue;
            };
            if let Some(cell) = self
                .0
                .get_mut(y_index)
                .and_then(|row| row.get_mut(x_index))
            {
                *cell = RGB8::new(color.r(), color.g(), color.b());
            }
        }
        Ok(())
    }
}
