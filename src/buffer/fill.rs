//! Filling the buffer from a non-blocking reader.

use std::io::{ErrorKind, Read};

use tracing::{debug, trace};

use super::ChainBuffer;
use crate::error::BufferError;

/// Result of a fill from a reader.
///
/// A fill that stopped because the reader would block reports `eof: false`
/// with however many bytes were available, possibly zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillOutcome {
    /// Bytes appended to the buffer by this call.
    pub read: usize,
    /// The reader reported end-of-file.
    pub eof: bool,
}

impl ChainBuffer {
    /// Appends bytes read from `reader` until `limit` bytes have been read,
    /// the reader would block, or it reaches end-of-file.
    ///
    /// `None` means no limit. The reader is expected to be non-blocking
    /// (a socket with `set_nonblocking(true)`, for example); a blocking
    /// reader makes an unbounded fill run until end-of-file.
    ///
    /// Each iteration reads directly into the free space of the tail
    /// segment, compacting it or allocating a new segment as needed.
    ///
    /// - `Interrupted` is retried
    /// - `WouldBlock` and `NotConnected` stop the fill without an error
    /// - a zero-length read sets [`FillOutcome::eof`]
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Io`] for any other read error and
    /// [`BufferError::OutOfMemory`] if a segment cannot be allocated. Bytes
    /// read before the failure stay in the buffer.
    ///
    /// # Example
    ///
    /// ```
    /// use chainbuf::ChainBuffer;
    /// use std::io::Cursor;
    ///
    /// let mut buffer = ChainBuffer::new();
    /// let outcome = buffer.add_from_reader(&mut Cursor::new(b"ping"), None)?;
    /// assert_eq!(outcome.read, 4);
    /// assert!(outcome.eof);
    /// # Ok::<(), chainbuf::BufferError>(())
    /// ```
    pub fn add_from_reader<R: Read + ?Sized>(
        &mut self,
        reader: &mut R,
        limit: Option<usize>,
    ) -> Result<FillOutcome, BufferError> {
        let requested = limit.unwrap_or(usize::MAX);
        let mut remaining = requested;
        let mut eof = false;

        while remaining > 0 {
            let unwritten = if limit.is_some() { remaining } else { 0 };
            let segment = self.reserve_tail(remaining, unwritten)?;
            let want = remaining.min(segment.free_len());

            match reader.read(&mut segment.spare_mut()[..want]) {
                Ok(0) => {
                    eof = true;
                    break;
                }
                Ok(n) => {
                    self.commit_tail(n);
                    remaining -= n;
                }
                Err(e) => match e.kind() {
                    ErrorKind::Interrupted => continue,
                    ErrorKind::WouldBlock | ErrorKind::NotConnected => {
                        trace!(kind = ?e.kind(), "reader not ready");
                        break;
                    }
                    _ => {
                        debug!(error = %e, read = requested - remaining, "read failed");
                        return Err(BufferError::Io(e));
                    }
                },
            }
        }

        let read = requested - remaining;
        trace!(read, eof, buffered = self.len, "fill finished");
        Ok(FillOutcome { read, eof })
    }
}
