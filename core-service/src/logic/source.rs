//! Sensor Sources
//!
//! Synthetic sensor generation, isolated behind a trait so batch runs can be
//! replayed with fixed vectors.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{EngineError, EngineResult};
use crate::logic::round2;
use crate::logic::sensors::{SensorChannel, SensorReadings, SensorVector};

/// Batch mode draws whole numbers in [10, 95)
const BATCH_MIN: u32 = 10;
const BATCH_MAX: u32 = 95;

/// Live mode draws uniform values in [10, 90], rounded to 2dp
const LIVE_MIN: f64 = 10.0;
const LIVE_MAX: f64 = 90.0;

pub trait SensorSource: Send {
    /// Next synthetic reading (always valid)
    fn next_vector(&mut self) -> SensorVector;
}

// ============================================================================
// RANDOM SOURCE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingMode {
    /// Integer readings, used for batch demonstrations
    Batch,
    /// Two-decimal readings, used for simulated live feeds
    Live,
}

pub struct RandomSource {
    rng: StdRng,
    mode: SamplingMode,
}

impl RandomSource {
    pub fn new(mode: SamplingMode) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            mode,
        }
    }

    /// Reproducible sequence
    pub fn seeded(mode: SamplingMode, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            mode,
        }
    }

    /// Seeded when a seed is configured, entropy otherwise
    pub fn from_seed(mode: SamplingMode, seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(mode, seed),
            None => Self::new(mode),
        }
    }

    fn draw(&mut self) -> f64 {
        match self.mode {
            SamplingMode::Batch => self.rng.gen_range(BATCH_MIN..BATCH_MAX) as f64,
            SamplingMode::Live => round2(self.rng.gen_range(LIVE_MIN..=LIVE_MAX)),
        }
    }
}

impl SensorSource for RandomSource {
    fn next_vector(&mut self) -> SensorVector {
        let mut readings = SensorReadings::default();
        for channel in SensorChannel::ALL {
            readings.set(channel, self.draw());
        }
        // every draw is inside [10, 95)
        SensorVector::from_trusted(readings)
    }
}

// ============================================================================
// FIXED SOURCE
// ============================================================================

/// Cycles through a fixed list of vectors (tests, replays)
#[derive(Debug, Clone)]
pub struct FixedSource {
    vectors: Vec<SensorVector>,
    next: usize,
}

impl FixedSource {
    /// An empty list has nothing to replay
    pub fn new(vectors: Vec<SensorVector>) -> EngineResult<Self> {
        if vectors.is_empty() {
            return Err(EngineError::EmptySource);
        }
        Ok(Self { vectors, next: 0 })
    }

    pub fn repeat(vector: SensorVector) -> Self {
        Self {
            vectors: vec![vector],
            next: 0,
        }
    }
}

impl SensorSource for FixedSource {
    fn next_vector(&mut self) -> SensorVector {
        let vector = self.vectors[self.next];
        self.next = (self.next + 1) % self.vectors.len();
        vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_mode_whole_numbers_in_range() {
        let mut source = RandomSource::seeded(SamplingMode::Batch, 42);
        for _ in 0..100 {
            for v in source.next_vector().values() {
                assert!((10.0..95.0).contains(&v));
                assert_eq!(v.fract(), 0.0);
            }
        }
    }

    #[test]
    fn test_live_mode_two_decimals() {
        let mut source = RandomSource::seeded(SamplingMode::Live, 7);
        for _ in 0..100 {
            for v in source.next_vector().values() {
                assert!((10.0..=90.0).contains(&v));
                assert_eq!(round2(v), v);
            }
        }
    }

    #[test]
    fn test_seeded_sources_repeat() {
        let mut a = RandomSource::seeded(SamplingMode::Batch, 99);
        let mut b = RandomSource::seeded(SamplingMode::Batch, 99);
        for _ in 0..10 {
            assert_eq!(a.next_vector(), b.next_vector());
        }
    }

    #[test]
    fn test_fixed_source_cycles() {
        let low = SensorVector::new(SensorReadings::uniform(10.0)).unwrap();
        let high = SensorVector::new(SensorReadings::uniform(90.0)).unwrap();
        let mut source = FixedSource::new(vec![low, high]).unwrap();

        assert_eq!(source.next_vector(), low);
        assert_eq!(source.next_vector(), high);
        assert_eq!(source.next_vector(), low);
    }

    #[test]
    fn test_fixed_source_rejects_empty_list() {
        assert!(matches!(FixedSource::new(Vec::new()), Err(EngineError::EmptySource)));
        assert_eq!(EngineError::EmptySource.kind(), "configuration_error");
    }
}
