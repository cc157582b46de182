//! Writing queued bytes out to a non-blocking writer.

use std::io::{ErrorKind, Write};

use tracing::{debug, trace};

use super::ChainBuffer;
use crate::error::BufferError;

impl ChainBuffer {
    /// Writes bytes from the front of the buffer to `writer`, draining
    /// whatever it accepts.
    ///
    /// Stops after `limit` bytes (`None` for no limit), when the buffer is
    /// empty, or when the writer would block. Returns the number of bytes
    /// written and drained.
    ///
    /// - `Interrupted` is retried
    /// - `WouldBlock` and `NotConnected` stop without an error
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Io`] for any other write error, including
    /// `WriteZero` when the writer accepts nothing. Bytes written before the
    /// failure are already drained.
    ///
    /// # Example
    ///
    /// ```
    /// use chainbuf::ChainBuffer;
    ///
    /// let mut buffer = ChainBuffer::new();
    /// buffer.add_str("PING\r\n")?;
    ///
    /// let mut wire = Vec::new();
    /// assert_eq!(buffer.write_to(&mut wire, None)?, 6);
    /// assert_eq!(wire, b"PING\r\n");
    /// assert!(buffer.is_empty());
    /// # Ok::<(), chainbuf::BufferError>(())
    /// ```
    pub fn write_to<W: Write + ?Sized>(
        &mut self,
        writer: &mut W,
        limit: Option<usize>,
    ) -> Result<usize, BufferError> {
        let mut remaining = limit.unwrap_or(usize::MAX).min(self.len);
        let mut written = 0;

        while remaining > 0 {
            let chunk = self.head_content();
            let want = chunk.len().min(remaining);

            match writer.write(&chunk[..want]) {
                Ok(0) => {
                    debug!(written, "writer accepted no bytes");
                    return Err(BufferError::Io(ErrorKind::WriteZero.into()));
                }
                Ok(n) => {
                    self.drain(n);
                    written += n;
                    remaining -= n;
                }
                Err(e) => match e.kind() {
                    ErrorKind::Interrupted => continue,
                    ErrorKind::WouldBlock | ErrorKind::NotConnected => {
                        trace!(kind = ?e.kind(), "writer not ready");
                        break;
                    }
                    _ => {
                        debug!(error = %e, written, "write failed");
                        return Err(BufferError::Io(e));
                    }
                },
            }
        }

        trace!(written, buffered = self.len, "flush finished");
        Ok(written)
    }
}
