#![allow(missing_docs, reason = "integration tests")]
//! Host-level tests for the PNG previews.
#![cfg(feature = "host")]

use std::error::Error;
use std::fs::File;
use std::path::Path;

use bitdog_matrix::display::{Ssd1306Frame, StatusText};
use bitdog_matrix::pattern::PATTERNS;
use bitdog_matrix::to_png::{write_oled_png, write_pattern_png, write_patterns_apng};

fn read_info(path: &Path) -> Result<png::Info<'static>, Box<dyn Error>> {
    let decoder = png::Decoder::new(File::open(path)?);
    let reader = decoder.read_info()?;
    Ok(reader.info().clone())
}

#[test]
fn pattern_png_fits_requested_size() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("heart.png");
    write_pattern_png(&PATTERNS[0], &path, 120)?;

    let info = read_info(&path)?;
    assert_eq!(info.width, info.height);
    assert!(info.width <= 120);
    assert_eq!(info.bit_depth, png::BitDepth::Sixteen);
    Ok(())
}

#[test]
fn pattern_png_has_light_where_leds_are_lit() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested").join("heart.png");
    write_pattern_png(&PATTERNS[0], &path, 120)?;

    let mut reader = png::Decoder::new(File::open(&path)?).read_info()?;
    let mut buffer = vec![0_u8; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buffer)?;
    let bytes = &buffer[..frame.buffer_size()];

    // 120 / 6 = 20 px cells with a 10 px border; cell (1, 0) is lit, cell (0, 0) is dark.
    let stride = frame.width as usize * 6;
    let centre = |x_cell: usize, y_cell: usize| {
        let x = 10 + x_cell * 20 + 10;
        let y = 10 + y_cell * 20 + 10;
        let offset = y * stride + x * 6;
        u16::from_be_bytes([bytes[offset], bytes[offset + 1]])
    };
    assert!(centre(1, 0) > 0);
    assert_eq!(centre(0, 0), 0);
    Ok(())
}

#[test]
fn patterns_apng_has_one_frame_per_pattern() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("patterns.png");
    write_patterns_apng(&PATTERNS, &path, 100, 500)?;

    let info = read_info(&path)?;
    let animation = info.animation_control.ok_or("not animated")?;
    assert_eq!(animation.num_frames, 13);
    assert_eq!(animation.num_plays, 0);
    Ok(())
}

#[test]
fn oled_png_is_scaled_framebuffer() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("oled.png");
    let mut frame = Ssd1306Frame::new();
    StatusText::status_lines(0, 13).draw(&mut frame);
    write_oled_png(&frame, &path, 3)?;

    let info = read_info(&path)?;
    assert_eq!((info.width, info.height), (384, 192));
    assert_eq!(info.bit_depth, png::BitDepth::Eight);
    Ok(())
}
