//! Error types for chainbuf.

use std::fmt;
use std::io;

/// Errors that can occur while filling or flushing a buffer.
///
/// Would-block and end-of-file are not errors: a fill reports them through
/// [`FillOutcome`](crate::FillOutcome), and interrupted calls are retried.
#[derive(Debug)]
pub enum BufferError {
    /// The reader or writer failed with something other than
    /// would-block, not-connected or interrupted.
    Io(io::Error),

    /// A segment (or the formatting temporary) could not be allocated.
    OutOfMemory {
        /// The allocation size that failed.
        capacity: usize,
        /// Bytes of the request that were not stored.
        ///
        /// For an unbounded fill this is `0`.
        unwritten: usize,
    },

    /// A `Display` implementation returned an error while formatting.
    Format,

    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::Io(e) => write!(f, "io error: {}", e),
            BufferError::OutOfMemory {
                capacity,
                unwritten,
            } => {
                write!(
                    f,
                    "out of memory: failed to allocate {} bytes ({} bytes unwritten)",
                    capacity, unwritten
                )
            }
            BufferError::Format => write!(f, "formatter error"),
            BufferError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
        }
    }
}

impl std::error::Error for BufferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BufferError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for BufferError {
    fn from(e: io::Error) -> Self {
        BufferError::Io(e)
    }
}

impl From<BufferError> for io::Error {
    fn from(e: BufferError) -> Self {
        match e {
            BufferError::Io(e) => e,
            BufferError::OutOfMemory { .. } => io::Error::new(io::ErrorKind::OutOfMemory, e),
            BufferError::Format => io::Error::other(e),
            BufferError::InvalidConfig { .. } => io::Error::new(io::ErrorKind::InvalidInput, e),
        }
    }
}
