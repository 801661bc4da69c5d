//! The static 5×5 pattern tables and the button-driven pattern selector.
//!
//! Patterns are plain data: one [`Frame2d`] per entry, authored row by row from the top
//! (`pattern[y][x]`). Wiring is applied later by
//! [`LedMatrix::render`](crate::led_matrix::LedMatrix::render).

use smart_leds::RGB8;

use crate::led_matrix::{BITDOG_SIDE, Frame2d};

/// A pattern for the BitDogLab matrix.
pub type Pattern = Frame2d<BITDOG_SIDE, BITDOG_SIDE>;

const BLACK: RGB8 = RGB8::new(0, 0, 0);
const CRIMSON: RGB8 = RGB8::new(182, 25, 25);
const LEAF: RGB8 = RGB8::new(91, 213, 34);
const ROSE: RGB8 = RGB8::new(241, 51, 114);
const VIOLET: RGB8 = RGB8::new(55, 13, 175);
const AMBER: RGB8 = RGB8::new(183, 129, 12);
const COBALT: RGB8 = RGB8::new(12, 28, 183);
const ORCHID: RGB8 = RGB8::new(239, 28, 182);

/// Build a single-colour pattern from five rows of `'X'` (lit) and `'.'` (off).
#[must_use]
pub const fn glyph(color: RGB8, rows: [&str; BITDOG_SIDE]) -> Pattern {
    let mut pattern = Pattern::new();
    let mut y_index = 0;
    while y_index < BITDOG_SIDE {
        let cells = rows[y_index].as_bytes();
        assert!(cells.len() == BITDOG_SIDE, "pattern rows must be 5 cells wide");
        let mut x_index = 0;
        while x_index < BITDOG_SIDE {
            pattern.0[y_index][x_index] = match cells[x_index] {
                b'X' => color,
                b'.' => BLACK,
                _ => panic!("pattern cells must be 'X' or '.'"),
            };
            x_index += 1;
        }
        y_index += 1;
    }
    pattern
}

const HEART: Pattern = glyph(CRIMSON, [".X.X.", "X.X.X", "X...X", ".X.X.", "..X.."]);
const BARS: Pattern = glyph(LEAF, [".X.XX", ".X.X.", ".X.XX", ".X.X.", ".X.X."]);

/// The full pattern set cycled by the two buttons.
pub static PATTERNS: [Pattern; 13] = [
    HEART,
    BARS,
    glyph(ROSE, ["X.X.X", ".X.X.", "X.X.X", "XXXXX", "..X.."]),
    glyph(VIOLET, [".X.X.", "X.X.X", ".X.X.", ".....", "XX.XX"]),
    glyph(ROSE, ["X...X", ".X.X.", "..X..", ".X.X.", "X...X"]),
    glyph(VIOLET, [".XXX.", "X.X.X", "XX.XX", "X.X.X", ".XXX."]),
    glyph(AMBER, [".....", ".X.X.", ".....", ".XXX.", "....."]),
    glyph(VIOLET, ["XXXXX", "X.X.X", "XXXXX", "X...X", "XXXXX"]),
    glyph(COBALT, ["XX.XX", "X.X.X", "..X..", ".X.X.", "X...X"]),
    glyph(ORCHID, ["..X..", ".X.X.", "XX.XX", "X.X.X", ".XXX."]),
    glyph(COBALT, ["XXXXX", ".X.XX", ".X.XX", ".X..X", ".X..."]),
    glyph(ORCHID, [".....", "X.X..", "X.X..", "X.XX.", "X.XXX"]),
    glyph(COBALT, ["XXXXX", ".X.XX", ".X.XX", ".X..X", ".X..."]),
];

/// The two patterns of the hold-to-show firmware.
pub static SIMPLE_PATTERNS: [Pattern; 2] = [HEART, BARS];

/// Debounced presses seen in one poll of the two buttons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonPresses {
    /// Button A: step to the previous pattern.
    pub previous: bool,
    /// Button B: step to the next pattern.
    pub next: bool,
}

/// Index of the pattern on show, wrapping at both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PatternSelector {
    index: usize,
    total: usize,
}

impl PatternSelector {
    /// Start at pattern 0 of `total`.
    ///
    /// # Panics
    ///
    /// When `total` is zero.
    #[must_use]
    pub const fn new(total: usize) -> Self {
        assert!(total > 0, "a selector needs at least one pattern");
        Self { index: 0, total }
    }

    /// The pattern on show.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Number of patterns cycled through.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Step back one pattern; from 0 this wraps to the last.
    pub const fn previous(&mut self) {
        self.index = (self.index + self.total - 1) % self.total;
    }

    /// Step forward one pattern; from the last this wraps to 0.
    pub const fn next(&mut self) {
        self.index = (self.index + 1) % self.total;
    }

    /// Apply one poll's presses, A before B. Returns whether the index moved.
    pub const fn apply(&mut self, presses: ButtonPresses) -> bool {
        let before = self.index;
        if presses.previous {
            self.previous();
        }
        if presses.next {
            self.next();
        }
        self.index != before
    }
}

/// Hold-to-show selection: a pattern is lit only while its button is held.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoldMode;

impl HoldMode {
    /// Pattern index to show for the current button levels, or `None` for a blank matrix.
    ///
    /// Only A held shows pattern 0, only B held shows pattern 1; both or neither blank it.
    #[must_use]
    pub const fn resolve(a_held: bool, b_held: bool) -> Option<usize> {
        match (a_held, b_held) {
            (true, false) => Some(0),
            (false, true) => Some(1),
            (true, true) | (false, false) => None,
        }
    }
}
