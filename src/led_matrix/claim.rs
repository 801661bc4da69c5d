//! Pick the first free hardware channel for the LED strip.
//!
//! The RP2040 has two PIO blocks. The strip prefers PIO0 and falls back to PIO1 when the
//! application has already handed PIO0 to something else. Having neither is fatal at startup.

use crate::{Error, Result};

/// Which of the two candidate resources was claimed.
#[derive(Debug, PartialEq, Eq)]
pub enum Claimed<A, B> {
    /// The preferred resource was free.
    Preferred(A),
    /// The preferred resource was taken; the fallback was used.
    Fallback(B),
}

/// Claim `preferred` if present, otherwise `fallback`.
///
/// # Errors
///
/// [`Error::ResourceExhausted`] when both are `None`.
///
/// ```rust
/// use bitdog_matrix::led_matrix::claim::{Claimed, claim_unused};
///
/// assert_eq!(claim_unused(Some("pio0"), Some("pio1")), Ok(Claimed::Preferred("pio0")));
/// assert_eq!(claim_unused(None::<&str>, Some("pio1")), Ok(Claimed::Fallback("pio1")));
/// assert!(claim_unused(None::<&str>, None::<&str>).is_err());
/// ```
pub fn claim_unused<A, B>(preferred: Option<A>, fallback: Option<B>) -> Result<Claimed<A, B>> {
    match (preferred, fallback) {
        (Some(first), _) => Ok(Claimed::Preferred(first)),
        (None, Some(second)) => Ok(Claimed::Fallback(second)),
        (None, None) => Err(Error::ResourceExhausted),
    }
}
