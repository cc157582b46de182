//! Async counterpart of [`ChainBuffer::add_from_reader`].

use std::future::Future;
use std::io::ErrorKind;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::future::FusedFuture;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;
use tracing::{debug, trace};

use crate::buffer::{ChainBuffer, FillOutcome};
use crate::error::BufferError;

pin_project! {
    /// Future that appends bytes read from an async reader.
    ///
    /// Created by [`ChainBuffer::add_from_async_reader`]. Resolves once
    /// `limit` bytes have been read, the reader reports end-of-file, or the
    /// reader is pending after at least one byte was read.
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct Fill<'a, R> {
        buffer: &'a mut ChainBuffer,
        #[pin]
        reader: R,
        limit: Option<usize>,
        remaining: usize,
        read: usize,
        done: bool,
    }
}

impl<R: AsyncRead> Future for Fill<'_, R> {
    type Output = Result<FillOutcome, BufferError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();
        let mut eof = false;

        while *this.remaining > 0 {
            let unwritten = if this.limit.is_some() {
                *this.remaining
            } else {
                0
            };
            let segment = match this.buffer.reserve_tail(*this.remaining, unwritten) {
                Ok(segment) => segment,
                Err(e) => {
                    *this.done = true;
                    return Poll::Ready(Err(e));
                }
            };
            let want = (*this.remaining).min(segment.free_len());

            match this
                .reader
                .as_mut()
                .poll_read(cx, &mut segment.spare_mut()[..want])
            {
                Poll::Pending if *this.read == 0 => return Poll::Pending,
                Poll::Pending => break,
                Poll::Ready(Ok(0)) => {
                    eof = true;
                    break;
                }
                Poll::Ready(Ok(n)) => {
                    this.buffer.commit_tail(n);
                    *this.read += n;
                    *this.remaining -= n;
                }
                Poll::Ready(Err(e)) => match e.kind() {
                    ErrorKind::Interrupted => continue,
                    ErrorKind::WouldBlock | ErrorKind::NotConnected => break,
                    _ => {
                        debug!(error = %e, read = *this.read, "async read failed");
                        *this.done = true;
                        return Poll::Ready(Err(BufferError::Io(e)));
                    }
                },
            }
        }

        *this.done = true;
        trace!(read = *this.read, eof, "async fill finished");
        Poll::Ready(Ok(FillOutcome {
            read: *this.read,
            eof,
        }))
    }
}

impl<R: AsyncRead> FusedFuture for Fill<'_, R> {
    fn is_terminated(&self) -> bool {
        self.done
    }
}

impl ChainBuffer {
    /// Appends bytes read from an async reader.
    ///
    /// Same loop as [`ChainBuffer::add_from_reader`]; a pending reader
    /// stands in for would-block. Pass `&mut reader` to keep ownership of an
    /// `Unpin` reader.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use chainbuf::ChainBuffer;
    /// use futures_io::AsyncRead;
    ///
    /// async fn pump<R: AsyncRead + Unpin>(reader: &mut R) -> Result<(), chainbuf::BufferError> {
    ///     let mut buffer = ChainBuffer::new();
    ///     loop {
    ///         let outcome = buffer.add_from_async_reader(&mut *reader, None).await?;
    ///         if outcome.eof {
    ///             return Ok(());
    ///         }
    ///     }
    /// }
    /// ```
    pub fn add_from_async_reader<R: AsyncRead>(
        &mut self,
        reader: R,
        limit: Option<usize>,
    ) -> Fill<'_, R> {
        Fill {
            buffer: self,
            reader,
            limit,
            remaining: limit.unwrap_or(usize::MAX),
            read: 0,
            done: false,
        }
    }
}
