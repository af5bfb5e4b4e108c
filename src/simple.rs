//! Equal-weight averaging over a fixed circular buffer.

use alloc::{boxed::Box, vec::Vec};

use crate::{
    config::{is_valid_capacity, Algorithm, Config},
    AveragedBuffer, CreateError, Sample,
};

/// Averaged buffer that weights every retained sample equally.
///
/// Samples are written in a circle, so once the buffer is full each push
/// replaces the oldest sample and the average becomes a moving average over
/// the last `capacity` values.
pub struct SimpleAveragedBuffer {
    samples: Box<[Sample]>,
    idx: usize,
    full: bool,
}

impl SimpleAveragedBuffer {
    /// Creates an empty buffer as described by `config`.
    ///
    /// The configuration is validated here as well, so constructing a buffer
    /// directly obeys the same rules as going through
    /// [`create`](crate::create).
    pub fn new(config: &Config<'_>) -> Result<Self, CreateError> {
        if config.algorithm != Algorithm::Simple {
            return Err(CreateError::UnimplementedAlgorithm);
        }
        if !is_valid_capacity(config.capacity) {
            return Err(CreateError::InvalidCapacity);
        }

        let mut samples = Vec::new();
        if samples.try_reserve_exact(config.capacity).is_err() {
            warn!("failed to allocate {} sample slots", config.capacity);
            return Err(CreateError::OutOfMemory);
        }
        samples.resize(config.capacity, 0);

        Ok(Self {
            samples: samples.into_boxed_slice(),
            idx: 0,
            full: false,
        })
    }

    /// Retained samples, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = Sample> + Clone + '_ {
        let oldest = if self.full { self.idx } else { 0 };
        (oldest..self.samples.len())
            .chain(0..oldest)
            .map(|i| self.samples[i])
            .take(self.len())
    }

    fn retained(&self) -> &[Sample] {
        if self.full {
            &self.samples
        } else {
            // Until the first wraparound the write cursor only moves forward,
            // so the retained samples are exactly the prefix before it.
            &self.samples[..self.idx]
        }
    }
}

impl AveragedBuffer for SimpleAveragedBuffer {
    #[inline(always)]
    fn capacity(&self) -> usize {
        self.samples.len()
    }

    fn len(&self) -> usize {
        if self.full {
            self.samples.len()
        } else {
            self.idx
        }
    }

    fn clear(&mut self) {
        self.samples.fill(0);
        self.idx = 0;
        self.full = false;
    }

    fn push(&mut self, sample: Sample) {
        self.samples[self.idx] = sample;
        self.idx = (self.idx + 1) % self.samples.len();
        if self.idx == 0 {
            self.full = true;
        }
    }

    fn average(&self) -> Sample {
        let count = self.len();
        if count == 0 {
            return 0;
        }

        // Each entry is divided before accumulation. Summing first would
        // round differently and could overflow the sample type.
        self.retained()
            .iter()
            .map(|sample| sample / count as Sample)
            .sum()
    }
}
