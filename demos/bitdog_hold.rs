//! Hold A for a heart, hold B for bars; neither or both leaves the matrix dark.
#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::convert::Infallible;

use bitdog_matrix::{
    Result,
    app::HoldApp,
    board::{BUTTON_A_PIN, BUTTON_B_PIN, LED_PIN, LOOP_PERIOD},
    button::{Button, PressedTo},
    led_matrix::ws2812_pio::PioStrip,
    pattern::SIMPLE_PATTERNS,
};
use defmt::info;
use embassy_executor::Spawner;
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
        "BitDogLab hold mode: LEDs GPIO{} buttons GPIO{}/GPIO{}",
        LED_PIN, BUTTON_A_PIN, BUTTON_B_PIN
    );

    let strip = PioStrip::claim(Some(p.PIO0), Some(p.PIO1), p.PIN_7)?;
    let button_a = Button::new(p.PIN_5, PressedTo::Ground);
    let button_b = Button::new(p.PIN_6, PressedTo::Ground);

    let mut app = HoldApp::new(&SIMPLE_PATTERNS, strip);
    let mut last_shown = None;

    loop {
        let shown = app.step(button_a.is_pressed(), button_b.is_pressed()).await?;
        if shown != last_shown {
            info!("showing {:?}", shown);
            last_shown = shown;
        }
        Timer::after(LOOP_PERIOD).await;
    }
}
