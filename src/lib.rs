//! Firmware building blocks for the BitDogLab board (Raspberry Pi Pico W, RP2040).
//!
//! - [`led_matrix`]: the 5×5 WS2812 matrix, its serpentine wiring and the PIO driver.
//! - [`pattern`]: the pattern tables and the two-button selector.
//! - [`button`]: debounced push-buttons.
//! - [`display`]: the SSD1306 status display.
//! - [`audio`]: a looping sample on the PWM buzzer.
//! - [`app`]: the control loops the firmware binaries in `demos/` run.
//!
//! # Glossary
//!
//! - **PIO ([Programmable I/O](https://medium.com/data-science/nine-pico-pio-wats-with-rust-part-1-9d062067dc25)):** the RP2040 has 2 blocks of 4 state machines.
//! - **PWM ([Pulse Width Modulation](https://en.wikipedia.org/wiki/Pulse-width_modulation)) Slices:** 8 slices (& 16 channels). These "slices"
//!   are unrelated to Rust slices.
//! - **Physical index:** position of an LED along its data chain.
//! - **Logical coordinate:** `(x, y)` as seen from the front, `(0, 0)` top left.
#![cfg_attr(not(feature = "host"), no_std)]
#![cfg_attr(not(feature = "host"), no_main)]
#![allow(async_fn_in_trait, reason = "single-threaded embedded")]

// Compile-time checks: a board is needed unless testing with the host feature
#[cfg(all(not(feature = "pico1"), not(feature = "host")))]
compile_error!("Must enable the board feature 'pico1' (or 'host' for tests)");

#[cfg(all(feature = "pico1", feature = "host"))]
compile_error!("Cannot enable both 'pico1' and 'host'; use --no-default-features for firmware");

#[cfg(all(not(feature = "arm"), not(feature = "host")))]
compile_error!("Must enable the architecture feature 'arm'");

pub mod app;
pub mod audio;
pub mod board;
pub mod button;
pub mod display;
mod error;
pub mod led_matrix;
pub mod pattern;
#[cfg(feature = "host")]
pub mod to_png;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
