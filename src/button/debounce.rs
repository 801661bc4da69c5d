//! Edge detection with a monotonic-clock debounce window.
//!
//! Pure logic: the caller supplies the raw level and the time, so it runs the same on the
//! board (with `Instant::now()`) and in host tests.

use embassy_time::{Duration, Instant};

/// A debounced level change.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Released → pressed.
    Pressed,
    /// Pressed → released.
    Released,
}

/// Reports level changes, ignoring the raw input for `window` after each one.
///
/// ```rust
/// use bitdog_matrix::button::debounce::{Debouncer, Edge};
/// use embassy_time::{Duration, Instant};
///
/// let mut debouncer = Debouncer::new(Duration::from_millis(200));
/// assert_eq!(debouncer.update(true, Instant::from_millis(0)), Some(Edge::Pressed));
/// assert_eq!(debouncer.update(false, Instant::from_millis(5)), None); // bounce
/// assert_eq!(debouncer.update(true, Instant::from_millis(9)), None);
/// assert_eq!(debouncer.update(false, Instant::from_millis(250)), Some(Edge::Released));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Debouncer {
    window: Duration,
    pressed: bool,
    quiet_until: Option<Instant>,
}

impl Debouncer {
    /// Starts released.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            pressed: false,
            quiet_until: None,
        }
    }

    /// The debounced level.
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Feed one raw sample taken at `now`.
    pub fn update(&mut self, raw_pressed: bool, now: Instant) -> Option<Edge> {
        if self.quiet_until.is_some_and(|until| now < until) {
            return None;
        }
        if raw_pressed == self.pressed {
            return None;
        }
        self.pressed = raw_pressed;
        self.quiet_until = now.checked_add(self.window);
        Some(if raw_pressed {
            Edge::Pressed
        } else {
            Edge::Released
        })
    }

    /// Like [`update`](Self::update) but only reports presses.
    pub fn pressed(&mut self, raw_pressed: bool, now: Instant) -> bool {
        self.update(raw_pressed, now) == Some(Edge::Pressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(200);

    #[test]
    fn one_press_with_bounce_reports_once() {
        let mut debouncer = Debouncer::new(WINDOW);
        let samples = [
            (0, true),
            (1, false),
            (2, true),
            (3, false),
            (4, true),
            (150, true),
        ];
        let presses = samples
            .iter()
            .filter(|&&(ms, level)| debouncer.pressed(level, Instant::from_millis(ms)))
            .count();
        assert_eq!(presses, 1);
        assert!(debouncer.is_pressed());
    }

    #[test]
    fn held_button_does_not_repeat() {
        let mut debouncer = Debouncer::new(WINDOW);
        assert!(debouncer.pressed(true, Instant::from_millis(0)));
        for ms in (10..2_000).step_by(10) {
            assert!(!debouncer.pressed(true, Instant::from_millis(ms)));
        }
    }

    #[test]
    fn second_press_after_window_counts() {
        let mut debouncer = Debouncer::new(WINDOW);
        assert!(debouncer.pressed(true, Instant::from_millis(0)));
        assert_eq!(
            debouncer.update(false, Instant::from_millis(300)),
            Some(Edge::Released)
        );
        assert!(!debouncer.pressed(true, Instant::from_millis(400)));
        assert!(debouncer.pressed(true, Instant::from_millis(500)));
    }

    #[test]
    fn release_inside_window_is_seen_once_window_closes() {
        let mut debouncer = Debouncer::new(WINDOW);
        assert!(debouncer.pressed(true, Instant::from_millis(0)));
        assert_eq!(debouncer.update(false, Instant::from_millis(50)), None);
        assert_eq!(
            debouncer.update(false, Instant::from_millis(200)),
            Some(Edge::Released)
        );
    }
}
