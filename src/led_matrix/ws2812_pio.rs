//! WS2812 [`PixelSink`] driven by a CPU-fed PIO state machine, one byte per FIFO word.
//!
//! See [`PioStrip::claim`] for the PIO0-then-PIO1 claim order.

use defmt::info;
use embassy_rp::Peri;
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::peripherals::{PIO0, PIO1};
use embassy_rp::pio::program::{Assembler, JmpCondition, OutDestination, SetDestination, SideSet};
use embassy_rp::pio::{
    Common, Config, FifoJoin, Instance, LoadedProgram, Pio, PioPin, ShiftConfig, ShiftDirection,
    StateMachine,
};
use embassy_time::{Duration, Timer};
use fixed::types::U24F8;

use super::{BYTE_TIME, PixelSink};
use super::claim::{Claimed, claim_unused};
use crate::Result;

// Bit timing in PIO cycles: T1 high, T2 high-for-one / low-for-zero, T3 low.
const T1: u8 = 2;
const T2: u8 = 5;
const T3: u8 = 3;
const CYCLES_PER_BIT: u32 = (T1 + T2 + T3) as u32;
const WS2812_KHZ: u32 = 800;

// Each FIFO word carries one colour byte in its top 8 bits.
const BITS_PER_WORD: u8 = 8;
const BYTE_SHIFT: u32 = 24;

::embassy_rp::bind_interrupts! {
    struct Pio0Irqs {
        PIO0_IRQ_0 => ::embassy_rp::pio::InterruptHandler<PIO0>;
    }
}

::embassy_rp::bind_interrupts! {
    struct Pio1Irqs {
        PIO1_IRQ_0 => ::embassy_rp::pio::InterruptHandler<PIO1>;
    }
}

fn load_ws2812_program<'d, PIO: Instance>(common: &mut Common<'d, PIO>) -> LoadedProgram<'d, PIO> {
    let side_set = SideSet::new(false, 1, false);
    let mut assembler: Assembler<32> = Assembler::new_with_side_set(side_set);

    let mut wrap_target = assembler.label();
    let mut wrap_source = assembler.label();
    let mut do_zero = assembler.label();
    assembler.set_with_side_set(SetDestination::PINDIRS, 1, 0);
    assembler.bind(&mut wrap_target);
    assembler.out_with_delay_and_side_set(OutDestination::X, 1, T3 - 1, 0);
    assembler.jmp_with_delay_and_side_set(JmpCondition::XIsZero, &mut do_zero, T1 - 1, 1);
    assembler.jmp_with_delay_and_side_set(JmpCondition::Always, &mut wrap_target, T2 - 1, 1);
    assembler.bind(&mut do_zero);
    assembler.nop_with_delay_and_side_set(T2 - 1, 0);
    assembler.bind(&mut wrap_source);

    let program = assembler.assemble_with_wrap(wrap_source, wrap_target);
    common.load_program(&program)
}

/// One PIO state machine streaming bytes, MSB first, at the WS2812 bit rate.
pub struct Ws2812Bytes<'d, P: Instance, const S: usize> {
    // Holds the loaded program for as long as the state machine runs.
    _common: Common<'d, P>,
    sm: StateMachine<'d, P, S>,
}

impl<'d, P: Instance, const S: usize> Ws2812Bytes<'d, P, S> {
    /// Load the program and start `sm` on `pin`.
    pub fn new(
        mut common: Common<'d, P>,
        mut sm: StateMachine<'d, P, S>,
        pin: Peri<'d, impl PioPin>,
    ) -> Self {
        let program = load_ws2812_program(&mut common);
        let out_pin = common.make_pio_pin(pin);

        let mut cfg = Config::default();
        cfg.set_out_pins(&[&out_pin]);
        cfg.set_set_pins(&[&out_pin]);
        cfg.use_program(&program, &[&out_pin]);

        let clock_freq = U24F8::from_num(clk_sys_freq() / 1000);
        let bit_freq = U24F8::from_num(WS2812_KHZ) * CYCLES_PER_BIT;
        cfg.clock_divider = clock_freq / bit_freq;

        cfg.fifo_join = FifoJoin::TxOnly;
        cfg.shift_out = ShiftConfig {
            auto_fill: true,
            threshold: BITS_PER_WORD,
            direction: ShiftDirection::Left,
        };

        sm.set_config(&cfg);
        sm.set_enable(true);

        Self {
            _common: common,
            sm,
        }
    }
}

impl<P: Instance, const S: usize> PixelSink for Ws2812Bytes<'_, P, S> {
    async fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.sm.tx().wait_push(u32::from(byte) << BYTE_SHIFT).await;
        Ok(())
    }

    async fn latch(&mut self, reset: Duration) -> Result<()> {
        // An empty FIFO still leaves the last word in the output shift register.
        while !self.sm.tx().empty() {
            Timer::after_micros(1).await;
        }
        Timer::after(BYTE_TIME + reset).await;
        Ok(())
    }
}

/// The LED strip on whichever PIO block was free.
pub enum PioStrip<'d> {
    /// Running on PIO0, state machine 0.
    Pio0(Ws2812Bytes<'d, PIO0, 0>),
    /// Running on PIO1, state machine 0.
    Pio1(Ws2812Bytes<'d, PIO1, 0>),
}

impl<'d> PioStrip<'d> {
    /// Start the strip on PIO0 if given, else on PIO1.
    ///
    /// Pass `None` for a PIO block the application already uses elsewhere.
    ///
    /// # Errors
    ///
    /// [`Error::ResourceExhausted`](crate::Error::ResourceExhausted) when both are `None`.
    pub fn claim(
        pio0: Option<Peri<'d, PIO0>>,
        pio1: Option<Peri<'d, PIO1>>,
        pin: Peri<'d, impl PioPin>,
    ) -> Result<Self> {
        let strip = match claim_unused(pio0, pio1)? {
            Claimed::Preferred(pio0) => {
                let Pio { common, sm0, .. } = Pio::new(pio0, Pio0Irqs);
                info!("LED strip on PIO0 SM0");
                Self::Pio0(Ws2812Bytes::new(common, sm0, pin))
            }
            Claimed::Fallback(pio1) => {
                let Pio { common, sm0, .. } = Pio::new(pio1, Pio1Irqs);
                info!("LED strip on PIO1 SM0");
                Self::Pio1(Ws2812Bytes::new(common, sm0, pin))
            }
        };
        Ok(strip)
    }
}

impl PixelSink for PioStrip<'_> {
    async fn write_byte(&mut self, byte: u8) -> Result<()> {
        match self {
            Self::Pio0(strip) => strip.write_byte(byte).await,
            Self::Pio1(strip) => strip.write_byte(byte).await,
        }
    }

    async fn latch(&mut self, reset: Duration) -> Result<()> {
        match self {
            Self::Pio0(strip) => strip.latch(reset).await,
            Self::Pio1(strip) => strip.latch(reset).await,
        }
    }
}
