//! Configuration for segment sizing.
//!
//! - [`BufferConfig`] - Minimum segment capacity and the segment size used
//!   when filling from a reader
//!
//! # Example
//!
//! ```
//! use chainbuf::{BufferConfig, ChainBuffer};
//!
//! // Larger segments for a bulk-transfer socket
//! let config = BufferConfig::new(4096, 64 * 1024)?;
//! let buffer = ChainBuffer::with_config(config)?;
//! assert!(buffer.is_empty());
//!
//! # Ok::<(), chainbuf::BufferError>(())
//! ```

use crate::error::BufferError;

/// Default minimum segment capacity (512 bytes).
pub const DEFAULT_MIN_SEGMENT_SIZE: usize = 512;

/// Default capacity of segments allocated while reading (4 KiB).
pub const DEFAULT_READ_SEGMENT_SIZE: usize = 4 * 1024;

/// Configuration for segment allocation.
///
/// Every segment has a power-of-two capacity that is at least
/// `min_segment_size`. When a fill from a reader finds no free space at the
/// tail, it allocates a segment of at least `read_segment_size`.
///
/// # Size Constraints
///
/// - Both sizes are non-zero
/// - `min_segment_size` is a power of 2
/// - `min_segment_size <= read_segment_size`
///
/// # Example
///
/// ```
/// use chainbuf::BufferConfig;
///
/// let config = BufferConfig::default()
///     .with_min_segment_size(1024)
///     .with_read_segment_size(16 * 1024);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferConfig {
    /// Smallest capacity any segment is allocated with.
    min_segment_size: usize,

    /// Capacity requested for segments allocated by reader fills.
    read_segment_size: usize,
}

impl BufferConfig {
    /// Creates a new configuration with the given segment sizes.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidConfig`] if:
    /// - Either size is zero
    /// - `min_segment_size` is not a power of 2
    /// - `read_segment_size < min_segment_size`
    ///
    /// # Example
    ///
    /// ```
    /// use chainbuf::BufferConfig;
    ///
    /// let config = BufferConfig::new(512, 4096)?;
    /// assert_eq!(config.min_segment_size(), 512);
    /// # Ok::<(), chainbuf::BufferError>(())
    /// ```
    pub fn new(min_segment_size: usize, read_segment_size: usize) -> Result<Self, BufferError> {
        if min_segment_size == 0 || read_segment_size == 0 {
            return Err(BufferError::InvalidConfig {
                message: "segment sizes must be non-zero",
            });
        }

        if !min_segment_size.is_power_of_two() {
            return Err(BufferError::InvalidConfig {
                message: "min_segment_size must be a power of 2",
            });
        }

        if read_segment_size < min_segment_size {
            return Err(BufferError::InvalidConfig {
                message: "read_segment_size cannot be smaller than min_segment_size",
            });
        }

        Ok(Self {
            min_segment_size,
            read_segment_size,
        })
    }

    /// Sets the minimum segment capacity.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`BufferConfig::validate`] to check it.
    pub fn with_min_segment_size(mut self, size: usize) -> Self {
        self.min_segment_size = size;
        self
    }

    /// Sets the capacity requested for segments allocated by reader fills.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`BufferConfig::validate`] to check it.
    pub fn with_read_segment_size(mut self, size: usize) -> Self {
        self.read_segment_size = size;
        self
    }

    /// Returns the minimum segment capacity.
    pub fn min_segment_size(&self) -> usize {
        self.min_segment_size
    }

    /// Returns the capacity requested for reader-fill segments.
    pub fn read_segment_size(&self) -> usize {
        self.read_segment_size
    }

    /// Validates the current configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use chainbuf::BufferConfig;
    ///
    /// let config = BufferConfig::default().with_min_segment_size(500);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), BufferError> {
        Self::new(self.min_segment_size, self.read_segment_size).map(|_| ())
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            min_segment_size: DEFAULT_MIN_SEGMENT_SIZE,
            read_segment_size: DEFAULT_READ_SEGMENT_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BufferConfig::default();
        assert_eq!(config.min_segment_size(), DEFAULT_MIN_SEGMENT_SIZE);
        assert_eq!(config.read_segment_size(), DEFAULT_READ_SEGMENT_SIZE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = BufferConfig::default()
            .with_min_segment_size(1024)
            .with_read_segment_size(8192);

        assert_eq!(config.min_segment_size(), 1024);
        assert_eq!(config.read_segment_size(), 8192);
    }

    #[test]
    fn test_invalid_config_zero_size() {
        assert!(BufferConfig::new(0, 4096).is_err());
        assert!(BufferConfig::new(512, 0).is_err());
    }

    #[test]
    fn test_invalid_config_not_power_of_two() {
        let result = BufferConfig::new(600, 4096);
        assert!(matches!(result, Err(BufferError::InvalidConfig { .. })));
    }

    #[test]
    fn test_invalid_config_read_smaller_than_min() {
        assert!(BufferConfig::new(4096, 512).is_err());
    }

    #[test]
    fn test_read_segment_need_not_be_power_of_two() {
        // Rounded up at allocation time
        assert!(BufferConfig::new(512, 3000).is_ok());
    }
}
