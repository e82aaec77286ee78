//! # Simulated latency for mocked responses.
//!
//! A handler answers instantly, which no real server does. [`ResponseDelay`]
//! lets mocked responses take time the way live traffic would:
//!
//! - [`ResponseDelay::None`]: answer immediately (the default)
//! - [`ResponseDelay::Fixed`]: a configured pause
//! - [`ResponseDelay::Realistic`]: a random pause in the range a typical
//!   server round-trip falls into
//!
//! Applied only on the mocked path, before `response:mocked` fires; bypass
//! responses already carry real network latency.

use std::time::Duration;

use rand::Rng;

/// Latency policy for mocked responses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseDelay {
    /// No artificial latency.
    None,
    /// Exactly the given pause.
    Fixed(Duration),
    /// A random pause in
    /// [`REALISTIC_MIN`](Self::REALISTIC_MIN)..=[`REALISTIC_MAX`](Self::REALISTIC_MAX).
    Realistic,
}

impl Default for ResponseDelay {
    fn default() -> Self {
        ResponseDelay::None
    }
}

impl ResponseDelay {
    /// Lower bound of the realistic range.
    pub const REALISTIC_MIN: Duration = Duration::from_millis(100);
    /// Upper bound of the realistic range.
    pub const REALISTIC_MAX: Duration = Duration::from_millis(400);

    /// Samples the pause to apply, `None` when there is nothing to wait for.
    pub fn sample(&self) -> Option<Duration> {
        match self {
            ResponseDelay::None => None,
            ResponseDelay::Fixed(d) if d.is_zero() => None,
            ResponseDelay::Fixed(d) => Some(*d),
            ResponseDelay::Realistic => {
                let mut rng = rand::rng();
                let min = Self::REALISTIC_MIN.as_millis() as u64;
                let max = Self::REALISTIC_MAX.as_millis() as u64;
                Some(Duration::from_millis(rng.random_range(min..=max)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_and_zero_sample_nothing() {
        assert_eq!(ResponseDelay::None.sample(), None);
        assert_eq!(ResponseDelay::Fixed(Duration::ZERO).sample(), None);
    }

    #[test]
    fn test_fixed_samples_exactly() {
        let delay = ResponseDelay::Fixed(Duration::from_millis(250));
        assert_eq!(delay.sample(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_realistic_stays_in_bounds() {
        for _ in 0..200 {
            let sampled = ResponseDelay::Realistic.sample().expect("always pauses");
            assert!(
                sampled >= ResponseDelay::REALISTIC_MIN && sampled <= ResponseDelay::REALISTIC_MAX,
                "sampled {sampled:?} outside the realistic range"
            );
        }
    }
}
