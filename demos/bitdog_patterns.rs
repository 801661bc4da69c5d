//! Pattern selector: A steps back, B steps forward through the 13 patterns.
//! The display names the pattern and the buzzer loops a chime.
#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::convert::Infallible;

use bitdog_matrix::{
    Result,
    app::App,
    audio::{CHIME, PwmAudio},
    board::{
        BUTTON_A_PIN, BUTTON_B_PIN, BUZZER_PIN, DISPLAY_ADDRESS, I2C_FREQUENCY_HZ, I2C_SCL_PIN,
        I2C_SDA_PIN, LED_PIN, LOOP_PERIOD,
    },
    button::{Button, PressedTo},
    display::StatusDisplay,
    led_matrix::ws2812_pio::PioStrip,
    pattern::{ButtonPresses, PATTERNS},
};
use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::{i2c, pwm};
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(_spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());
    info!(
        "BitDogLab wiring: LEDs GPIO{} buttons GPIO{}/GPIO{} OLED SDA GPIO{} SCL GPIO{} buzzer GPIO{}",
        LED_PIN, BUTTON_A_PIN, BUTTON_B_PIN, I2C_SDA_PIN, I2C_SCL_PIN, BUZZER_PIN
    );

    let strip = PioStrip::claim(Some(p.PIO0), Some(p.PIO1), p.PIN_7)?;

    let mut button_a = Button::new(p.PIN_5, PressedTo::Ground);
    let mut button_b = Button::new(p.PIN_6, PressedTo::Ground);

    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQUENCY_HZ;
    let bus = i2c::I2c::new_blocking(p.I2C1, p.PIN_15, p.PIN_14, i2c_config);
    let display = StatusDisplay::new(bus, DISPLAY_ADDRESS)?;

    let buzzer = pwm::Pwm::new_output_b(p.PWM_SLICE2, p.PIN_21, pwm::Config::default());
    let audio = PwmAudio::new(buzzer, &CHIME);

    let mut app = App::new(&PATTERNS, strip, display, audio);
    info!("BitDogLab patterns: {} loaded", PATTERNS.len());

    loop {
        let presses = ButtonPresses {
            previous: button_a.poll_press(),
            next: button_b.poll_press(),
        };
        let report = app.step(presses).await?;
        if report.changed {
            info!("pattern {}/{}", report.pattern_index + 1, PATTERNS.len());
        }
        Timer::after(LOOP_PERIOD).await;
    }
}
