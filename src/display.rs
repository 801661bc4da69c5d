//! Status text on the 128×64 SSD1306 OLED.
//!
//! - [`Ssd1306Frame`]: page-major 1-bit framebuffer, an `embedded-graphics` draw target.
//! - [`Ssd1306`]: blocking driver over any `embedded-hal` I2C bus.
//! - [`StatusDisplay`]: the two together, implementing [`StatusPanel`] for the control loop.

use core::convert::Infallible;
use core::fmt::Write as _;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Pixel, Point, Size};
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics::Drawable;
use embedded_hal::i2c::I2c;
use heapless::{String, Vec};

use crate::{Error, Result};

/// Display width in pixels.
pub const WIDTH: usize = 128;
/// Display height in pixels.
pub const HEIGHT: usize = 64;
/// Rows of 8 pixels, one byte per column each.
pub const PAGES: usize = HEIGHT / 8;
/// Framebuffer size in bytes.
pub const BUFFER_LEN: usize = WIDTH * PAGES;

/// Left margin of every text line.
pub const TEXT_LEFT: i32 = 5;
/// Vertical distance between text lines.
pub const LINE_PITCH: i32 = 8;

/// Fixed greeting shown above the pattern number.
pub const WELCOME_LINES: [&str; 3] = ["   Welcome", " BitDogLab matrix", "  A: prev  B: next"];

/// Data bytes per I2C write during a flush.
const DATA_CHUNK: usize = 32;

/// SSD1306 command bytes.
struct Cmd;
impl Cmd {
    const DISPLAY_OFF: u8 = 0xAE;
    const DISPLAY_ON: u8 = 0xAF;
    const CLOCK_DIV: u8 = 0xD5;
    const MULTIPLEX: u8 = 0xA8;
    const DISPLAY_OFFSET: u8 = 0xD3;
    const START_LINE_0: u8 = 0x40;
    const CHARGE_PUMP: u8 = 0x8D;
    const MEMORY_MODE: u8 = 0x20;
    const SEGMENT_REMAP: u8 = 0xA1;
    const COM_SCAN_DEC: u8 = 0xC8;
    const COM_PINS: u8 = 0xDA;
    const CONTRAST: u8 = 0x81;
    const PRECHARGE: u8 = 0xD9;
    const VCOM_DETECT: u8 = 0xDB;
    const RESUME_RAM: u8 = 0xA4;
    const NORMAL: u8 = 0xA6;
    const SCROLL_OFF: u8 = 0x2E;
    const COLUMN_ADDR: u8 = 0x21;
    const PAGE_ADDR: u8 = 0x22;
}

/// Control byte: the rest of the write is commands.
const CONTROL_COMMANDS: u8 = 0x00;
/// Control byte: the rest of the write is display RAM data.
const CONTROL_DATA: u8 = 0x40;

const INIT_SEQUENCE: [u8; 26] = [
    CONTROL_COMMANDS,
    Cmd::DISPLAY_OFF,
    Cmd::CLOCK_DIV,
    0x80,
    Cmd::MULTIPLEX,
    (HEIGHT - 1) as u8,
    Cmd::DISPLAY_OFFSET,
    0x00,
    Cmd::START_LINE_0,
    Cmd::CHARGE_PUMP,
    0x14, // internal charge pump on
    Cmd::MEMORY_MODE,
    0x00, // horizontal addressing
    Cmd::SEGMENT_REMAP,
    Cmd::COM_SCAN_DEC,
    Cmd::COM_PINS,
    0x12,
    Cmd::CONTRAST,
    0xFF,
    Cmd::PRECHARGE,
    0xF1,
    Cmd::VCOM_DETECT,
    0x40,
    Cmd::RESUME_RAM,
    Cmd::NORMAL,
    Cmd::SCROLL_OFF,
];

const FULL_WINDOW: [u8; 7] = [
    CONTROL_COMMANDS,
    Cmd::COLUMN_ADDR,
    0,
    (WIDTH - 1) as u8,
    Cmd::PAGE_ADDR,
    0,
    (PAGES - 1) as u8,
];

/// A full-screen 1-bit framebuffer in SSD1306 page order.
///
/// Byte `page * 128 + x` holds pixels `(x, page * 8 .. page * 8 + 8)`, least significant bit
/// on top.
#[derive(Clone)]
pub struct Ssd1306Frame {
    buffer: [u8; BUFFER_LEN],
}

impl Ssd1306Frame {
    /// A blank frame.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: [0; BUFFER_LEN],
        }
    }

    /// Turn every pixel off.
    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    /// Whether pixel `(x, y)` is on; `false` outside the screen.
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        Self::locate(x, y)
            .and_then(|(byte, mask)| self.buffer.get(byte).map(|value| value & mask != 0))
            .unwrap_or(false)
    }

    /// Number of pixels that are on.
    #[must_use]
    pub fn lit_count(&self) -> u32 {
        self.buffer.iter().map(|byte| byte.count_ones()).sum()
    }

    /// Raw bytes in the order the controller expects them.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; BUFFER_LEN] {
        &self.buffer
    }

    fn locate(x: usize, y: usize) -> Option<(usize, u8)> {
        (x < WIDTH && y < HEIGHT).then(|| ((y / 8) * WIDTH + x, 1 << (y % 8)))
    }
}

impl Default for Ssd1306Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginDimensions for Ssd1306Frame {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for Ssd1306Frame {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            let (Ok(x), Ok(y)) = (usize::try_from(coord.x), usize::try_from(coord.y)) else {
                continue;
            };
            let Some((byte, mask)) = Self::locate(x, y) else {
                continue;
            };
            if let Some(value) = self.buffer.get_mut(byte) {
                match color {
                    BinaryColor::On => *value |= mask,
                    BinaryColor::Off => *value &= !mask,
                }
            }
        }
        Ok(())
    }
}

/// Longest line [`StatusText`] holds, in bytes. Wider than the screen so that
/// `"Pattern i/total"` is never cut short in the buffer.
pub const LINE_CAPACITY: usize = 32;

/// Text lines at fixed positions: line `i` starts at `(TEXT_LEFT, i * LINE_PITCH)`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusText {
    lines: Vec<String<LINE_CAPACITY>, PAGES>,
}

impl StatusText {
    /// The welcome greeting followed by `"Pattern i/total"`, counting from 1.
    #[must_use]
    pub fn status_lines(pattern_index: usize, total: usize) -> Self {
        let mut text = Self::default();
        for line in WELCOME_LINES {
            text.push(line);
        }
        let mut pattern = String::<LINE_CAPACITY>::new();
        // Two `u32` values take at most 29 bytes; larger `usize` values get a placeholder.
        if write!(pattern, "Pattern {}/{}", pattern_index + 1, total).is_err() {
            pattern.clear();
            let _ = pattern.push_str("Pattern ?");
        }
        text.push(&pattern);
        text
    }

    /// Append a line, truncated to [`LINE_CAPACITY`]; lines past the bottom are dropped.
    pub fn push(&mut self, line: &str) {
        let mut owned = String::new();
        for ch in line.chars() {
            if owned.push(ch).is_err() {
                break;
            }
        }
        let _ = self.lines.push(owned);
    }

    /// The lines, top first.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Draw into `frame` with `FONT_5X8`, leaving other pixels alone.
    pub fn draw(&self, frame: &mut Ssd1306Frame) {
        let style = MonoTextStyle::new(&FONT_5X8, BinaryColor::On);
        let mut top = 0;
        for line in self.lines() {
            let _ = Text::with_baseline(line, Point::new(TEXT_LEFT, top), style, Baseline::Top)
                .draw(frame);
            top += LINE_PITCH;
        }
    }
}

/// Blocking SSD1306 driver over I2C.
pub struct Ssd1306<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Ssd1306<I2C> {
    /// Wrap a bus; call [`init`](Self::init) before the first flush.
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Send the power-up configuration and switch the panel on.
    ///
    /// # Errors
    ///
    /// [`Error::Display`] when the controller does not acknowledge.
    pub fn init(&mut self) -> Result<()> {
        self.write(&INIT_SEQUENCE)?;
        self.write(&[CONTROL_COMMANDS, Cmd::DISPLAY_ON])
    }

    /// Copy a whole frame to display RAM.
    ///
    /// # Errors
    ///
    /// [`Error::Display`] when the controller does not acknowledge.
    pub fn flush(&mut self, frame: &Ssd1306Frame) -> Result<()> {
        self.write(&FULL_WINDOW)?;
        let mut packet = [0_u8; DATA_CHUNK + 1];
        packet[0] = CONTROL_DATA;
        for chunk in frame.as_bytes().chunks(DATA_CHUNK) {
            let end = chunk.len() + 1;
            packet[1..end].copy_from_slice(chunk);
            self.write(&packet[..end])?;
        }
        Ok(())
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.i2c
            .write(self.address, bytes)
            .map_err(|err| Error::display(&err))
    }
}

/// Whatever shows the current pattern to the user.
pub trait StatusPanel {
    /// Show that pattern `pattern_index` of `total` is on the matrix.
    ///
    /// # Errors
    ///
    /// Display transport failures.
    fn show(&mut self, pattern_index: usize, total: usize) -> Result<()>;
}

impl<P: StatusPanel> StatusPanel for &mut P {
    fn show(&mut self, pattern_index: usize, total: usize) -> Result<()> {
        (**self).show(pattern_index, total)
    }
}

/// The SSD1306 with its own framebuffer, drawing [`StatusText::status_lines`].
pub struct StatusDisplay<I2C> {
    driver: Ssd1306<I2C>,
    frame: Ssd1306Frame,
}

impl<I2C: I2c> StatusDisplay<I2C> {
    /// Initialise the panel and blank it.
    ///
    /// # Errors
    ///
    /// [`Error::Display`] when the controller does not acknowledge.
    pub fn new(i2c: I2C, address: u8) -> Result<Self> {
        let mut driver = Ssd1306::new(i2c, address);
        driver.init()?;
        let frame = Ssd1306Frame::new();
        driver.flush(&frame)?;
        Ok(Self { driver, frame })
    }

    /// The last frame drawn.
    #[must_use]
    pub const fn frame(&self) -> &Ssd1306Frame {
        &self.frame
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.driver.release()
    }
}

impl<I2C: I2c> StatusPanel for StatusDisplay<I2C> {
    fn show(&mut self, pattern_index: usize, total: usize) -> Result<()> {
        self.frame.clear();
        StatusText::status_lines(pattern_index, total).draw(&mut self.frame);
        self.driver.flush(&self.frame)
    }
}
