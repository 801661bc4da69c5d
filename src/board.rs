//! BitDogLab wiring and timing.
//!
//! The pins are GPIO numbers. The firmware in `demos/` takes the matching `embassy_rp`
//! peripherals (`PIN_7`, `PIN_5`, ...) and logs these numbers at boot.

use embassy_time::Duration;

/// WS2812 data line of the 5×5 matrix.
pub const LED_PIN: u8 = 7;
/// Button A (previous pattern), active-low.
pub const BUTTON_A_PIN: u8 = 5;
/// Button B (next pattern), active-low.
pub const BUTTON_B_PIN: u8 = 6;
/// SSD1306 I2C1 data.
pub const I2C_SDA_PIN: u8 = 14;
/// SSD1306 I2C1 clock.
pub const I2C_SCL_PIN: u8 = 15;
/// Passive buzzer A (PWM slice 2, channel B).
pub const BUZZER_PIN: u8 = 21;

/// SSD1306 7-bit I2C address.
pub const DISPLAY_ADDRESS: u8 = 0x3C;
/// I2C bus speed for the display.
pub const I2C_FREQUENCY_HZ: u32 = 400_000;

/// Minimum time between two reported edges of one button.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(200);
/// Pause between control-loop iterations.
pub const LOOP_PERIOD: Duration = Duration::from_millis(10);
