//! Fixed-capacity sample buffers with pluggable averaging.
//!
//! A buffer is described by a [`Config`] and created through [`create`],
//! which picks the implementation for the configured [`Algorithm`]. Callers
//! interact with every variant through the [`AveragedBuffer`] trait, so the
//! algorithm backing an instance never leaks into the call sites. Storage is
//! allocated once at construction and never grows.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

#[macro_use]
mod fmt;

pub mod config;
pub mod simple;

use alloc::boxed::Box;

pub use config::{is_valid_capacity, Algorithm, Config, MAX_CAPACITY};
pub use simple::SimpleAveragedBuffer;

/// Sample type stored and averaged by every buffer variant.
pub type Sample = i32;

/// Reasons buffer construction can be refused.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CreateError {
    /// The selected algorithm has no implementation.
    UnimplementedAlgorithm,
    /// The requested capacity is zero or not below [`MAX_CAPACITY`].
    InvalidCapacity,
    /// The sample storage could not be allocated.
    OutOfMemory,
}

/// Capability set shared by all averaging algorithms.
///
/// Implementations own a fixed amount of sample storage. Pushing into a full
/// buffer overwrites the oldest sample.
pub trait AveragedBuffer {
    /// Number of samples the buffer retains.
    fn capacity(&self) -> usize;

    /// Number of samples currently contributing to the average.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Discards all samples and returns the buffer to its initial state.
    fn clear(&mut self);

    /// Adds a sample, replacing the oldest one once the buffer is full.
    fn push(&mut self, sample: Sample);

    /// Average of the retained samples, `0` while the buffer is empty.
    fn average(&self) -> Sample;
}

/// Creates the buffer described by `config`.
///
/// Fails without leaving anything allocated if the configuration names an
/// unimplemented algorithm, if the capacity is out of range, or if the
/// sample storage cannot be allocated.
pub fn create(config: &Config<'_>) -> Result<Box<dyn AveragedBuffer>, CreateError> {
    if !is_valid_capacity(config.capacity) {
        warn!("rejecting buffer capacity {}", config.capacity);
        return Err(CreateError::InvalidCapacity);
    }

    match config.algorithm {
        Algorithm::Simple => {
            let buffer = SimpleAveragedBuffer::new(config)?;
            debug!("created simple averaged buffer, capacity {}", config.capacity);
            Ok(Box::new(buffer))
        }
        Algorithm::Weighted => {
            warn!("weighted averaging is not implemented");
            Err(CreateError::UnimplementedAlgorithm)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn created_buffer_is_usable_through_the_trait() {
        let mut buffer = create(&Config::simple(4)).unwrap();

        assert_eq!(buffer.capacity(), 4);
        assert!(buffer.is_empty());

        buffer.push(100);
        buffer.push(200);

        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.average(), 150);

        buffer.clear();
        assert!(buffer.is_empty());
    }

    #[test]
    fn create_rejects_weighted_averaging() {
        let config = Config {
            algorithm: Algorithm::Weighted,
            capacity: 4,
            parameter: None,
        };

        assert_eq!(create(&config).err(), Some(CreateError::UnimplementedAlgorithm));
    }

    #[test]
    fn create_rejects_zero_capacity() {
        assert_eq!(
            create(&Config::simple(0)).err(),
            Some(CreateError::InvalidCapacity)
        );
    }

    #[test]
    fn create_rejects_capacity_at_the_limit() {
        assert_eq!(
            create(&Config::simple(MAX_CAPACITY)).err(),
            Some(CreateError::InvalidCapacity)
        );
    }

    #[test]
    fn create_accepts_boundary_capacities() {
        assert!(create(&Config::simple(1)).is_ok());
        assert!(create(&Config::simple(MAX_CAPACITY - 1)).is_ok());
    }
}
