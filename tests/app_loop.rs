#![allow(missing_docs, reason = "integration tests")]
//! Host-level tests for one control-loop iteration, with recording collaborators.
#![cfg(feature = "host")]

use std::cell::RefCell;

use bitdog_matrix::app::{App, HoldApp, StepReport};
use bitdog_matrix::audio::AudioChunks;
use bitdog_matrix::display::StatusPanel;
use bitdog_matrix::led_matrix::{BitDogMatrix, PixelSink};
use bitdog_matrix::pattern::{ButtonPresses, PATTERNS, SIMPLE_PATTERNS};
use bitdog_matrix::{Error, Result};
use embassy_futures::block_on;
use embassy_time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Event {
    Byte,
    Latch,
    Show(usize, usize),
    Chunk,
}

/// One shared log so the order across collaborators is visible.
#[derive(Default)]
struct Log(RefCell<Vec<Event>>);

impl Log {
    fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    fn take(&self) -> Vec<Event> {
        self.0.take()
    }
}

struct Strip<'a>(&'a Log);

impl PixelSink for Strip<'_> {
    async fn write_byte(&mut self, _byte: u8) -> Result<()> {
        self.0.push(Event::Byte);
        Ok(())
    }

    async fn latch(&mut self, _reset: Duration) -> Result<()> {
        self.0.push(Event::Latch);
        Ok(())
    }
}

struct Panel<'a> {
    log: &'a Log,
    fail: bool,
}

impl StatusPanel for Panel<'_> {
    fn show(&mut self, pattern_index: usize, total: usize) -> Result<()> {
        if self.fail {
            return Err(Error::Display(embedded_hal::i2c::ErrorKind::Bus));
        }
        self.log.push(Event::Show(pattern_index, total));
        Ok(())
    }
}

struct Audio<'a>(&'a Log);

impl AudioChunks for Audio<'_> {
    async fn play_next_chunk(&mut self) -> Result<()> {
        self.0.push(Event::Chunk);
        Ok(())
    }
}

fn app(log: &Log) -> App<Strip<'_>, Panel<'_>, Audio<'_>> {
    App::new(
        &PATTERNS,
        Strip(log),
        Panel { log, fail: false },
        Audio(log),
    )
}

fn expected_matrix(pattern_index: usize) -> BitDogMatrix {
    let mut matrix = BitDogMatrix::bitdog();
    matrix.render(&PATTERNS[pattern_index]).expect("valid wiring");
    matrix
}

#[test]
fn step_flushes_then_shows_then_plays() -> Result<()> {
    let log = Log::default();
    let mut app = app(&log);

    let report = block_on(app.step(ButtonPresses::default()))?;
    assert_eq!(
        report,
        StepReport {
            pattern_index: 0,
            changed: false
        }
    );

    let events = log.take();
    assert_eq!(events.len(), 75 + 3);
    assert!(events[..75].iter().all(|&event| event == Event::Byte));
    assert_eq!(
        &events[75..],
        &[Event::Latch, Event::Show(0, 13), Event::Chunk]
    );
    Ok(())
}

#[test]
fn presses_move_selection_and_render_it() -> Result<()> {
    let log = Log::default();
    let mut app = app(&log);

    let back = ButtonPresses {
        previous: true,
        next: false,
    };
    let report = block_on(app.step(back))?;
    assert_eq!(report.pattern_index, 12);
    assert!(report.changed);
    assert_eq!(app.matrix().pixels(), expected_matrix(12).pixels());
    assert!(log.take().contains(&Event::Show(12, 13)));

    let forward = ButtonPresses {
        previous: false,
        next: true,
    };
    block_on(app.step(forward))?;
    block_on(app.step(forward))?;
    assert_eq!(app.pattern_index(), 1);
    assert_eq!(app.matrix().pixels(), expected_matrix(1).pixels());
    Ok(())
}

#[test]
fn display_failure_stops_the_step_before_audio() {
    let log = Log::default();
    let mut app = App::new(
        &PATTERNS,
        Strip(&log),
        Panel {
            log: &log,
            fail: true,
        },
        Audio(&log),
    );
    let result = block_on(app.step(ButtonPresses::default()));
    assert!(matches!(result, Err(Error::Display(_))));
    let events = log.take();
    assert_eq!(events.last(), Some(&Event::Latch));
    assert!(!events.contains(&Event::Chunk));
}

#[test]
fn hold_app_shows_only_while_one_button_is_held() -> Result<()> {
    let log = Log::default();
    let mut app = HoldApp::new(&SIMPLE_PATTERNS, Strip(&log));

    assert_eq!(block_on(app.step(true, false))?, Some(0));
    let mut heart = BitDogMatrix::bitdog();
    heart.render(&SIMPLE_PATTERNS[0])?;
    assert_eq!(app.matrix().pixels(), heart.pixels());

    assert_eq!(block_on(app.step(false, true))?, Some(1));
    assert_eq!(block_on(app.step(true, true))?, None);
    assert_eq!(app.matrix().pixels(), BitDogMatrix::bitdog().pixels());

    let events = log.take();
    assert_eq!(events.len(), 3 * 76);
    Ok(())
}
