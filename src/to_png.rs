//! Host-side previews: patterns as round glowing LEDs, the OLED as a scaled bitmap.
#![cfg(feature = "host")]

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use png::{BitDepth, ColorType, Encoder, ScaledFloat};
use smart_leds::RGB8;

use crate::display::{self, Ssd1306Frame};
use crate::led_matrix::Frame2d;

const PREVIEW_INVERSE_GAMMA: f32 = 2.2;
const OLED_ON: [u8; 3] = [0x9C, 0xE0, 0xFF];
const OLED_OFF: [u8; 3] = [0x08, 0x08, 0x10];

/// An RGB image ready to encode.
struct Image {
    width: u32,
    height: u32,
    depth: BitDepth,
    bytes: Vec<u8>,
}

/// Write one matrix frame as lit LEDs on black, at most `max_dimension` pixels on a side.
///
/// # Errors
///
/// File creation and PNG encoding failures.
pub fn write_pattern_png<const W: usize, const H: usize>(
    frame: &Frame2d<W, H>,
    output_path: impl AsRef<Path>,
    max_dimension: u32,
) -> Result<(), Box<dyn Error>> {
    let cell = cell_size(W as u32, H as u32, max_dimension);
    let image = led_image(frame, cell);
    encode(output_path.as_ref(), &[image], None)
}

/// Write several frames as a looping animated PNG, `frame_delay_ms` per frame.
///
/// # Errors
///
/// File creation and PNG encoding failures, or a delay that does not fit in 16 bits.
///
/// # Panics
///
/// When `frames` is empty.
pub fn write_patterns_apng<const W: usize, const H: usize>(
    frames: &[Frame2d<W, H>],
    output_path: impl AsRef<Path>,
    max_dimension: u32,
    frame_delay_ms: u32,
) -> Result<(), Box<dyn Error>> {
    assert!(!frames.is_empty(), "frames must not be empty");
    let cell = cell_size(W as u32, H as u32, max_dimension);
    let images: Vec<Image> = frames.iter().map(|frame| led_image(frame, cell)).collect();
    let delay = u16::try_from(frame_delay_ms)?;
    encode(output_path.as_ref(), &images, Some(delay))
}

/// Write the OLED framebuffer, each display pixel as a `scale`×`scale` block.
///
/// # Errors
///
/// File creation and PNG encoding failures.
pub fn write_oled_png(
    frame: &Ssd1306Frame,
    output_path: impl AsRef<Path>,
    scale: u32,
) -> Result<(), Box<dyn Error>> {
    let scale = scale.max(1);
    let width = display::WIDTH as u32 * scale;
    let height = display::HEIGHT as u32 * scale;
    let mut bytes = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            let on = frame.pixel((x / scale) as usize, (y / scale) as usize);
            bytes.extend_from_slice(if on { &OLED_ON } else { &OLED_OFF });
        }
    }
    let image = Image {
        width,
        height,
        depth: BitDepth::Eight,
        bytes,
    };
    encode(output_path.as_ref(), &[image], None)
}

/// Largest cell such that the grid plus a half-cell border fits in `max_dimension`.
fn cell_size(columns: u32, rows: u32, max_dimension: u32) -> u32 {
    assert!(max_dimension > 0, "max_dimension must be positive");
    let longest = columns.max(rows).max(1);
    // A border of half a cell on each side adds one cell to the longest side.
    (max_dimension / (longest + 1)).max(2)
}

fn led_image<const W: usize, const H: usize>(frame: &Frame2d<W, H>, cell: u32) -> Image {
    let border = cell / 2;
    let width = W as u32 * cell + border * 2;
    let height = H as u32 * cell + border * 2;
    let mut bytes = vec![0_u8; (width * height * 6) as usize];
    let radius = (cell / 2).saturating_sub((cell / 8).max(1)).max(1) as f32;
    let solid = radius * 2.0 / 3.0;
    let center = (cell as f32 - 1.0) / 2.0;

    for (x_index, y_index, color) in frame.cells() {
        let origin_x = border + x_index as u32 * cell;
        let origin_y = border + y_index as u32 * cell;
        for local_y in 0..cell {
            for local_x in 0..cell {
                let distance = (local_x as f32 - center).hypot(local_y as f32 - center);
                let glow = if distance <= solid {
                    1.0
                } else {
                    (1.0 - (distance - solid) / (radius - solid)).max(0.0)
                };
                if glow <= 0.0 {
                    continue;
                }
                let offset = (((origin_y + local_y) * width + origin_x + local_x) * 6) as usize;
                let channels = linear_channels(color, glow);
                for (slot, value) in bytes[offset..offset + 6].chunks_mut(2).zip(channels) {
                    slot.copy_from_slice(&value.to_be_bytes());
                }
            }
        }
    }

    Image {
        width,
        height,
        depth: BitDepth::Sixteen,
        bytes,
    }
}

/// The colour as 16-bit linear light, LEDs being roughly gamma 2.2 in their byte values.
fn linear_channels(color: RGB8, glow: f32) -> [u16; 3] {
    [color.r, color.g, color.b].map(|channel| {
        let linear = (f32::from(channel) / 255.0).powf(PREVIEW_INVERSE_GAMMA) * glow;
        (linear.clamp(0.0, 1.0) * 65535.0).round() as u16
    })
}

fn encode(path: &Path, images: &[Image], delay_ms: Option<u16>) -> Result<(), Box<dyn Error>> {
    let Some(first) = images.first() else {
        return Err("no image to encode".into());
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let mut encoder = Encoder::new(BufWriter::new(file), first.width, first.height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(first.depth);
    if first.depth == BitDepth::Sixteen {
        encoder.set_source_gamma(ScaledFloat::new(1.0));
    }
    if delay_ms.is_some() {
        encoder.set_animated(u32::try_from(images.len())?, 0)?;
    }
    let mut writer = encoder.write_header()?;
    for image in images {
        if let Some(delay) = delay_ms {
            writer.set_frame_delay(delay, 1000)?;
        }
        writer.write_image_data(&image.bytes)?;
    }
    writer.finish()?;
    Ok(())
}
