//! A device abstraction for the BitDogLab push-buttons.
//!
//! See [`Button`] for usage. The debounce logic itself lives in [`debounce`] so it can be
//! tested on the host.

pub mod debounce;

#[cfg(not(feature = "host"))]
pub use hardware::Button;

/// Describes how the button is physically wired.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressedTo {
    /// Button connects pin to voltage (3.3V) when pressed.
    /// Uses internal pull-down resistor. Pin reads HIGH when pressed.
    Voltage,

    /// Button connects pin to ground (GND) when pressed.
    /// Uses internal pull-up resistor. Pin reads LOW when pressed.
    /// The BitDogLab buttons are wired this way.
    Ground,
}

impl PressedTo {
    /// Whether a raw pin level means "pressed".
    #[must_use]
    pub const fn is_pressed(self, pin_high: bool) -> bool {
        match self {
            Self::Voltage => pin_high,
            Self::Ground => !pin_high,
        }
    }
}

#[cfg(not(feature = "host"))]
mod hardware {
    use embassy_rp::Peri;
    use embassy_rp::gpio::{Input, Pull};
    use embassy_time::Instant;

    use super::PressedTo;
    use super::debounce::Debouncer;
    use crate::board::DEBOUNCE_WINDOW;

    /// A polled button with edge detection and a debounce window.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # #![no_std]
    /// # #![no_main]
    /// use bitdog_matrix::button::{Button, PressedTo};
    /// # #[panic_handler]
    /// # fn panic(_info: &core::panic::PanicInfo) -> ! { loop {} }
    ///
    /// async fn example(p: embassy_rp::Peripherals) {
    ///     let mut button_a = Button::new(p.PIN_5, PressedTo::Ground);
    ///     loop {
    ///         if button_a.poll_press() {
    ///             // one press, however long it is held or however much it bounces
    ///         }
    ///         embassy_time::Timer::after_millis(10).await;
    ///     }
    /// }
    /// ```
    pub struct Button<'a> {
        input: Input<'a>,
        pressed_to: PressedTo,
        debouncer: Debouncer,
    }

    impl<'a> Button<'a> {
        /// Creates a new `Button` instance from a pin.
        ///
        /// The pin is configured based on the connection type:
        /// - [`PressedTo::Voltage`]: Uses internal pull-down (button to 3.3V)
        /// - [`PressedTo::Ground`]: Uses internal pull-up (button to GND)
        #[must_use]
        pub fn new<P: embassy_rp::gpio::Pin>(pin: Peri<'a, P>, pressed_to: PressedTo) -> Self {
            let pull = match pressed_to {
                PressedTo::Voltage => Pull::Down,
                PressedTo::Ground => Pull::Up,
            };
            Self {
                input: Input::new(pin, pull),
                pressed_to,
                debouncer: Debouncer::new(DEBOUNCE_WINDOW),
            }
        }

        /// Returns whether the button is currently pressed (raw, not debounced).
        #[must_use]
        pub fn is_pressed(&self) -> bool {
            self.pressed_to.is_pressed(self.input.is_high())
        }

        /// Sample the pin; true exactly once per debounced press.
        pub fn poll_press(&mut self) -> bool {
            let raw = self.is_pressed();
            self.debouncer.pressed(raw, Instant::now())
        }
    }
}
