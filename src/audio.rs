//! A short looping sample on the BitDogLab buzzer.
//!
//! [`SampleCursor`] walks an 8-bit PCM sample one chunk at a time; the control loop plays one
//! chunk per iteration through an [`AudioChunks`] player, so audio never blocks the buttons
//! for more than a chunk.

use crate::Result;

/// Samples per second of [`CHIME`] and of the PWM player.
pub const SAMPLE_RATE_HZ: u32 = 8_000;
/// Samples played per control-loop iteration.
pub const CHUNK_LEN: usize = 64;
/// Length of [`CHIME`] in samples (quarter of a second).
pub const CHIME_LEN: usize = 2_000;

/// PWM level for silence.
pub const MIDPOINT: u8 = 128;

/// Two square-wave tones, 1 kHz then 500 Hz, at half amplitude around [`MIDPOINT`].
pub static CHIME: [u8; CHIME_LEN] = square_tones();

const fn square_tones() -> [u8; CHIME_LEN] {
    const HIGH: u8 = MIDPOINT + 48;
    const LOW: u8 = MIDPOINT - 48;
    let mut samples = [MIDPOINT; CHIME_LEN];
    let mut index = 0;
    while index < CHIME_LEN {
        // 8 samples per period at 8 kHz is 1 kHz; 16 is 500 Hz. Each tone starts in phase.
        let (period, offset) = if index < CHIME_LEN / 2 {
            (8, index)
        } else {
            (16, index - CHIME_LEN / 2)
        };
        samples[index] = if offset % period < period / 2 { HIGH } else { LOW };
        index += 1;
    }
    samples
}

/// Something that plays audio a slice at a time.
pub trait AudioChunks {
    /// Play the next chunk of the current sample, waiting until it has been output.
    ///
    /// # Errors
    ///
    /// Output failures of the player.
    async fn play_next_chunk(&mut self) -> Result<()>;
}

impl<A: AudioChunks> AudioChunks for &mut A {
    async fn play_next_chunk(&mut self) -> Result<()> {
        (**self).play_next_chunk().await
    }
}

/// Position in a looping sample.
///
/// ```rust
/// use bitdog_matrix::audio::SampleCursor;
///
/// static SAMPLE: [u8; 5] = [1, 2, 3, 4, 5];
/// let mut cursor = SampleCursor::<2>::new(&SAMPLE);
/// assert_eq!(cursor.next_chunk(), &[1, 2]);
/// assert_eq!(cursor.next_chunk(), &[3, 4]);
/// assert_eq!(cursor.next_chunk(), &[5]);
/// assert_eq!(cursor.next_chunk(), &[1, 2]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct SampleCursor<const CHUNK: usize = CHUNK_LEN> {
    sample: &'static [u8],
    position: usize,
}

impl<const CHUNK: usize> SampleCursor<CHUNK> {
    /// Start at the beginning of `sample`.
    #[must_use]
    pub const fn new(sample: &'static [u8]) -> Self {
        Self {
            sample,
            position: 0,
        }
    }

    /// Offset of the next chunk.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Up to `CHUNK` samples; the last chunk may be shorter. After it the cursor wraps.
    /// An empty sample yields empty chunks.
    pub fn next_chunk(&mut self) -> &'static [u8] {
        let sample = self.sample;
        let start = self.position;
        let end = sample.len().min(start + CHUNK);
        self.position = if end >= sample.len() { 0 } else { end };
        sample.get(start..end).unwrap_or(&[])
    }
}

#[cfg(not(feature = "host"))]
pub use hardware::PwmAudio;

#[cfg(not(feature = "host"))]
mod hardware {
    use defmt::info;
    use embassy_rp::clocks::clk_sys_freq;
    use embassy_rp::pwm::{Config, Pwm};
    use embassy_time::{Duration, Timer};

    use super::{AudioChunks, CHUNK_LEN, MIDPOINT, SAMPLE_RATE_HZ, SampleCursor};
    use crate::Result;

    /// PWM counter wraps after 256 ticks, so a sample byte is the compare value as is.
    const TOP: u16 = 255;

    /// Plays a looping sample on PWM channel B by writing one compare value per sample period.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # #![no_std]
    /// # #![no_main]
    /// use bitdog_matrix::audio::{AudioChunks, CHIME, PwmAudio};
    /// use embassy_rp::pwm::{Config, Pwm};
    /// # #[panic_handler]
    /// # fn panic(_info: &core::panic::PanicInfo) -> ! { loop {} }
    ///
    /// async fn example(p: embassy_rp::Peripherals) -> bitdog_matrix::Result<()> {
    ///     let pwm = Pwm::new_output_b(p.PWM_SLICE2, p.PIN_21, Config::default());
    ///     let mut audio = PwmAudio::new(pwm, &CHIME);
    ///     loop {
    ///         audio.play_next_chunk().await?;
    ///     }
    /// }
    /// ```
    pub struct PwmAudio<'d> {
        pwm: Pwm<'d>,
        cfg: Config, // kept so every compare update reuses the divider
        cursor: SampleCursor<CHUNK_LEN>,
        sample_period: Duration,
    }

    impl<'d> PwmAudio<'d> {
        /// Configure the slice for 8-bit output and start silent.
        #[must_use]
        pub fn new(mut pwm: Pwm<'d>, sample: &'static [u8]) -> Self {
            let mut cfg = Config::default();
            cfg.top = TOP;
            cfg.compare_b = u16::from(MIDPOINT);
            pwm.set_config(&cfg);
            info!(
                "audio clk={}Hz top={} rate={}Hz len={}",
                clk_sys_freq(),
                TOP,
                SAMPLE_RATE_HZ,
                sample.len()
            );
            Self {
                pwm,
                cfg,
                cursor: SampleCursor::new(sample),
                sample_period: Duration::from_hz(u64::from(SAMPLE_RATE_HZ)),
            }
        }
    }

    impl AudioChunks for PwmAudio<'_> {
        async fn play_next_chunk(&mut self) -> Result<()> {
            for &level in self.cursor.next_chunk() {
                self.cfg.compare_b = u16::from(level);
                self.pwm.set_config(&self.cfg);
                Timer::after(self.sample_period).await;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chime_is_two_square_tones() {
        assert_eq!(CHIME[0], MIDPOINT + 48);
        assert_eq!(CHIME[4], MIDPOINT - 48);
        assert_eq!(CHIME[8], MIDPOINT + 48);
        let second = CHIME_LEN / 2;
        assert_eq!(CHIME[second - 1], MIDPOINT - 48);
        assert_eq!(CHIME[second], MIDPOINT + 48);
        assert_eq!(CHIME[second + 7], MIDPOINT + 48);
        assert_eq!(CHIME[second + 8], MIDPOINT - 48);
        assert_eq!(CHIME[second + 16], MIDPOINT + 48);
    }

    #[test]
    fn cursor_covers_the_whole_sample_then_wraps() {
        let mut cursor = SampleCursor::<CHUNK_LEN>::new(&CHIME);
        let mut played = 0;
        while played < CHIME_LEN {
            played += cursor.next_chunk().len();
        }
        assert_eq!(played, CHIME_LEN);
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.next_chunk(), &CHIME[..CHUNK_LEN]);
    }

    #[test]
    fn empty_sample_yields_empty_chunks() {
        let mut cursor = SampleCursor::<4>::new(&[]);
        assert!(cursor.next_chunk().is_empty());
        assert!(cursor.next_chunk().is_empty());
    }
}
