//! The firmware's control loop, one iteration at a time.
//!
//! [`App`] is the pattern selector firmware; [`HoldApp`] is the hold-to-show variant. Both
//! own their collaborators and are driven by the demo binaries, which poll the buttons,
//! call `step`, log the report and sleep for [`LOOP_PERIOD`](crate::board::LOOP_PERIOD).

use crate::audio::AudioChunks;
use crate::display::StatusPanel;
use crate::led_matrix::{BitDogMatrix, PixelSink};
use crate::pattern::{ButtonPresses, HoldMode, Pattern, PatternSelector};
use crate::Result;

/// What one [`App::step`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepReport {
    /// Pattern now on the matrix.
    pub pattern_index: usize,
    /// Whether the presses moved the selection.
    pub changed: bool,
}

/// Pattern selector firmware: buttons choose, matrix shows, display names, buzzer plays.
pub struct App<S, D, A> {
    matrix: BitDogMatrix,
    selector: PatternSelector,
    patterns: &'static [Pattern],
    strip: S,
    display: D,
    audio: A,
}

impl<S: PixelSink, D: StatusPanel, A: AudioChunks> App<S, D, A> {
    /// Start on pattern 0 of `patterns` with a blank matrix.
    ///
    /// # Panics
    ///
    /// When `patterns` is empty.
    #[must_use]
    pub fn new(patterns: &'static [Pattern], strip: S, display: D, audio: A) -> Self {
        Self {
            matrix: BitDogMatrix::bitdog(),
            selector: PatternSelector::new(patterns.len()),
            patterns,
            strip,
            display,
            audio,
        }
    }

    /// The pattern on show.
    #[must_use]
    pub const fn pattern_index(&self) -> usize {
        self.selector.index()
    }

    /// The LED buffer as last rendered.
    #[must_use]
    pub const fn matrix(&self) -> &BitDogMatrix {
        &self.matrix
    }

    /// One loop iteration: move the selection, render, flush the strip, update the display,
    /// then play one audio chunk.
    ///
    /// # Errors
    ///
    /// The first failure of the strip, display or audio player; later stages are skipped.
    pub async fn step(&mut self, presses: ButtonPresses) -> Result<StepReport> {
        let changed = self.selector.apply(presses);
        let pattern_index = self.selector.index();
        if let Some(pattern) = self.patterns.get(pattern_index) {
            self.matrix.render(pattern)?;
        }
        self.matrix.flush(&mut self.strip).await?;
        self.display.show(pattern_index, self.selector.total())?;
        self.audio.play_next_chunk().await?;
        Ok(StepReport {
            pattern_index,
            changed,
        })
    }
}

/// Hold-to-show firmware: pattern 0 while A is held, pattern 1 while B is held.
pub struct HoldApp<S> {
    matrix: BitDogMatrix,
    patterns: &'static [Pattern],
    strip: S,
}

impl<S: PixelSink> HoldApp<S> {
    /// A blank matrix; `patterns` should hold at least the two hold patterns.
    #[must_use]
    pub const fn new(patterns: &'static [Pattern], strip: S) -> Self {
        Self {
            matrix: BitDogMatrix::bitdog(),
            patterns,
            strip,
        }
    }

    /// The LED buffer as last rendered.
    #[must_use]
    pub const fn matrix(&self) -> &BitDogMatrix {
        &self.matrix
    }

    /// Render the pattern for the held button, or clear, then flush.
    /// Returns the pattern shown.
    ///
    /// # Errors
    ///
    /// Strip failures.
    pub async fn step(&mut self, a_held: bool, b_held: bool) -> Result<Option<usize>> {
        let shown = HoldMode::resolve(a_held, b_held)
            .and_then(|index| self.patterns.get(index).map(|pattern| (index, pattern)));
        match shown {
            Some((_, pattern)) => self.matrix.render(pattern)?,
            None => self.matrix.clear(),
        }
        self.matrix.flush(&mut self.strip).await?;
        Ok(shown.map(|(index, _)| index))
    }
}
