#![allow(missing_docs, reason = "integration tests")]
//! Host-level tests for the LED buffer and its flush.
#![cfg(feature = "host")]

use bitdog_matrix::led_matrix::{BitDogMatrix, Frame2d, GrbPixel, PixelSink, RESET_DELAY, colors};
use bitdog_matrix::{Error, Result};
use embassy_futures::block_on;
use embassy_time::Duration;
use smart_leds::RGB8;

/// Records everything a flush sends.
#[derive(Default)]
struct RecordingSink {
    bytes: Vec<u8>,
    latches: Vec<Duration>,
}

impl PixelSink for RecordingSink {
    async fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.bytes.push(byte);
        Ok(())
    }

    async fn latch(&mut self, reset: Duration) -> Result<()> {
        self.latches.push(reset);
        Ok(())
    }
}

#[test]
fn set_then_get_round_trips() -> Result<()> {
    let mut matrix = BitDogMatrix::bitdog();
    matrix.set(7, 1, 2, 3)?;
    assert_eq!(matrix.get(7)?, RGB8::new(1, 2, 3));
    assert_eq!(matrix.pixels()[7], GrbPixel { g: 2, r: 1, b: 3 });
    Ok(())
}

#[test]
fn set_out_of_range_leaves_buffer_unchanged() {
    let mut matrix = BitDogMatrix::bitdog();
    let before = *matrix.pixels();
    assert_eq!(
        matrix.set(25, 9, 9, 9),
        Err(Error::IndexOutOfRange { index: 25, len: 25 })
    );
    assert_eq!(*matrix.pixels(), before);
    assert!(matrix.get(25).is_err());
}

#[test]
fn clear_turns_everything_off() -> Result<()> {
    let mut matrix = BitDogMatrix::bitdog();
    for led_index in 0..25 {
        matrix.set(led_index, 255, 255, 255)?;
    }
    matrix.clear();
    assert!(matrix.pixels().iter().all(|&pixel| pixel == GrbPixel::OFF));
    Ok(())
}

#[test]
fn flush_sends_grb_in_physical_order_then_latches() -> Result<()> {
    let mut matrix = BitDogMatrix::bitdog();
    matrix.set(0, 10, 20, 30)?;
    matrix.set(24, 40, 50, 60)?;

    let mut sink = RecordingSink::default();
    block_on(matrix.flush(&mut sink))?;

    assert_eq!(sink.bytes.len(), 75);
    assert_eq!(&sink.bytes[..3], &[20, 10, 30]);
    assert_eq!(&sink.bytes[72..], &[50, 40, 60]);
    assert!(sink.bytes[3..72].iter().all(|&byte| byte == 0));
    assert_eq!(sink.latches, [RESET_DELAY]);
    assert!(RESET_DELAY >= Duration::from_micros(100));
    Ok(())
}

#[test]
fn flush_twice_sends_two_frames() -> Result<()> {
    let matrix = BitDogMatrix::bitdog();
    let mut sink = RecordingSink::default();
    block_on(matrix.flush(&mut sink))?;
    block_on(matrix.flush(&mut sink))?;
    assert_eq!(sink.bytes.len(), 150);
    assert_eq!(sink.latches.len(), 2);
    Ok(())
}

#[test]
fn render_places_cells_through_the_wiring() -> Result<()> {
    let mut frame = Frame2d::<5, 5>::new();
    frame[(0, 0)] = colors::RED;
    frame[(4, 0)] = colors::GREEN;
    frame[(0, 1)] = colors::BLUE;

    let mut matrix = BitDogMatrix::bitdog();
    matrix.render(&frame)?;

    assert_eq!(matrix.get(24)?, colors::RED);
    assert_eq!(matrix.get(20)?, colors::GREEN);
    assert_eq!(matrix.get(15)?, colors::BLUE);
    let lit = (0..25)
        .filter(|&led_index| matrix.get(led_index).is_ok_and(|color| color != colors::BLACK))
        .count();
    assert_eq!(lit, 3);
    Ok(())
}

#[test]
fn set_xy_rejects_cells_outside_the_matrix() {
    let mut matrix = BitDogMatrix::bitdog();
    assert!(matches!(
        matrix.set_xy(5, 5, colors::WHITE),
        Err(Error::CoordinateOutOfRange { x: 5, y: 5, .. })
    ));
}
