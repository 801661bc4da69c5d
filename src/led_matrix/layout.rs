//! Compile-time description of matrix geometry and wiring.
//!
//! See [`MatrixLayout`] for the BitDogLab wiring and custom maps.

use crate::{Error, Result};

/// Compile-time description of matrix geometry and wiring.
///
/// `MatrixLayout` maps each physical LED index (its position in the WS2812 daisy-chain) to
/// the logical `(x, y)` cell it lights, and back.
///
/// Coordinates use a screen-style convention: `(0, 0)` is the top-left corner,
/// `x` increases to the right, and `y` increases downward.
///
/// Layouts are validated at **compile time** when built in a `const`:
/// - `W * H` must equal `N`
/// - coordinates must be in-bounds
/// - every `(x, y)` cell must appear exactly once
///
/// # Example
///
/// ```rust
/// use bitdog_matrix::led_matrix::layout::MatrixLayout;
///
/// const BITDOG: MatrixLayout<25, 5, 5> = MatrixLayout::reverse_serpentine();
///
/// assert_eq!(BITDOG.index_of(0, 0), Ok(24));
/// assert_eq!(BITDOG.index_of(4, 0), Ok(20));
/// assert_eq!(BITDOG.index_of(0, 1), Ok(15));
/// ```
///
/// ```text
/// 5×5 reverse serpentine (LED index per cell):
///   24  23  22  21  20
///   15  16  17  18  19
///   14  13  12  11  10
///    5   6   7   8   9
///    4   3   2   1   0
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatrixLayout<const N: usize, const W: usize, const H: usize> {
    map: [(u16, u16); N],
    inverse: [u16; N],
}

impl<const N: usize, const W: usize, const H: usize> MatrixLayout<N, W, H> {
    /// Number of columns.
    pub const WIDTH: usize = W;
    /// Number of rows.
    pub const HEIGHT: usize = H;
    /// Number of LEDs.
    pub const LEN: usize = N;

    /// Constructor: verifies the mapping covers every cell of the W×H grid exactly once.
    ///
    /// `map[led_index]` is the `(x, y)` cell lit by that LED.
    ///
    /// ```rust
    /// use bitdog_matrix::led_matrix::layout::MatrixLayout;
    ///
    /// const MAP: MatrixLayout<6, 3, 2> =
    ///     MatrixLayout::new([(0, 0), (1, 0), (2, 0), (2, 1), (1, 1), (0, 1)]);
    /// assert_eq!(MAP.index_of(0, 1), Ok(5));
    /// assert_eq!(MAP.xy_of(3), Ok((2, 1)));
    /// ```
    #[must_use]
    pub const fn new(map: [(u16, u16); N]) -> Self {
        assert!(W > 0 && H > 0, "W and H must be positive");
        assert!(W * H == N, "W*H must equal N");
        assert!(N <= u16::MAX as usize, "total LEDs must fit in u16");

        let mut seen = [false; N];
        let mut inverse = [0_u16; N];

        let mut led_index = 0;
        while led_index < N {
            let (col, row) = map[led_index];
            let col = col as usize;
            let row = row as usize;

            assert!(col < W, "column out of bounds");
            assert!(row < H, "row out of bounds");

            let cell = row * W + col;
            assert!(!seen[cell], "duplicate (col,row) in mapping");
            seen[cell] = true;
            inverse[cell] = led_index as u16;

            led_index += 1;
        }

        // N distinct in-bounds cells out of W*H == N means every cell is covered.
        Self { map, inverse }
    }

    /// The BitDogLab wiring: serpentine rows, numbered from the bottom-right LED.
    ///
    /// Even rows run left-to-right and odd rows right-to-left in raster order, and the whole
    /// raster order is reversed, so LED 0 is the last cell of the last row:
    ///
    /// - even `y`: `index = (N-1) - (y * W + x)`
    /// - odd `y`:  `index = (N-1) - (y * W + (W-1-x))`
    ///
    /// ```rust
    /// use bitdog_matrix::led_matrix::layout::MatrixLayout;
    ///
    /// const MAP: MatrixLayout<6, 3, 2> = MatrixLayout::reverse_serpentine();
    /// const EXPECTED: MatrixLayout<6, 3, 2> =
    ///     MatrixLayout::new([(0, 1), (1, 1), (2, 1), (2, 0), (1, 0), (0, 0)]);
    /// const _: () = assert!(MAP.equals(&EXPECTED));
    /// ```
    ///
    /// ```text
    /// 3×2 example:
    ///   LED5  LED4  LED3
    ///   LED0  LED1  LED2
    /// ```
    #[must_use]
    pub const fn reverse_serpentine() -> Self {
        assert!(W > 0 && H > 0, "W and H must be positive");
        assert!(W * H == N, "W*H must equal N");

        let mut mapping = [(0_u16, 0_u16); N];
        let mut y_index = 0;
        while y_index < H {
            let mut x_index = 0;
            while x_index < W {
                let raster = if y_index % 2 == 0 {
                    y_index * W + x_index
                } else {
                    y_index * W + (W - 1 - x_index)
                };
                mapping[N - 1 - raster] = (x_index as u16, y_index as u16);
                x_index += 1;
            }
            y_index += 1;
        }
        Self::new(mapping)
    }

    /// Return the array mapping LED wiring order to `(x, y)` coordinates.
    #[must_use]
    pub const fn index_to_xy(&self) -> &[(u16, u16); N] {
        &self.map
    }

    /// Physical LED index for the cell at column `x`, row `y`.
    ///
    /// # Errors
    ///
    /// [`Error::CoordinateOutOfRange`] when `x >= W` or `y >= H`.
    pub fn index_of(&self, x: usize, y: usize) -> Result<usize> {
        if x >= W || y >= H {
            return Err(Error::CoordinateOutOfRange {
                x,
                y,
                width: W,
                height: H,
            });
        }
        let cell = y * W + x;
        self.inverse
            .get(cell)
            .map(|&led_index| usize::from(led_index))
            .ok_or(Error::CoordinateOutOfRange {
                x,
                y,
                width: W,
                height: H,
            })
    }

    /// The `(x, y)` cell lit by the LED at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] when `index >= N`.
    pub fn xy_of(&self, index: usize) -> Result<(u16, u16)> {
        self.map
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfRange { index, len: N })
    }

    /// Const equality helper for doctests and compile-time asserts.
    #[must_use]
    pub const fn equals(&self, other: &Self) -> bool {
        let mut i = 0;
        while i < N {
            if self.map[i].0 != other.map[i].0 || self.map[i].1 != other.map[i].1 {
                return false;
            }
            i += 1;
        }
        true
    }
}
