//! Async counterpart of [`ChainBuffer::write_to`].

use std::future::Future;
use std::io::ErrorKind;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::future::FusedFuture;
use futures_io::AsyncWrite;
use pin_project_lite::pin_project;
use tracing::{debug, trace};

use crate::buffer::ChainBuffer;
use crate::error::BufferError;

pin_project! {
    /// Future that writes queued bytes to an async writer.
    ///
    /// Created by [`ChainBuffer::write_to_async`]. Resolves to the number of
    /// bytes written and drained.
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct Flush<'a, W> {
        buffer: &'a mut ChainBuffer,
        #[pin]
        writer: W,
        remaining: usize,
        written: usize,
        done: bool,
    }
}

impl<W: AsyncWrite> Future for Flush<'_, W> {
    type Output = Result<usize, BufferError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        while *this.remaining > 0 {
            let chunk = this.buffer.head_content();
            let want = chunk.len().min(*this.remaining);

            match this.writer.as_mut().poll_write(cx, &chunk[..want]) {
                Poll::Pending if *this.written == 0 => return Poll::Pending,
                Poll::Pending => break,
                Poll::Ready(Ok(0)) => {
                    *this.done = true;
                    return Poll::Ready(Err(BufferError::Io(ErrorKind::WriteZero.into())));
                }
                Poll::Ready(Ok(n)) => {
                    this.buffer.drain(n);
                    *this.written += n;
                    *this.remaining -= n;
                }
                Poll::Ready(Err(e)) => match e.kind() {
                    ErrorKind::Interrupted => continue,
                    ErrorKind::WouldBlock | ErrorKind::NotConnected => break,
                    _ => {
                        debug!(error = %e, written = *this.written, "async write failed");
                        *this.done = true;
                        return Poll::Ready(Err(BufferError::Io(e)));
                    }
                },
            }
        }

        *this.done = true;
        trace!(written = *this.written, "async flush finished");
        Poll::Ready(Ok(*this.written))
    }
}

impl<W: AsyncWrite> FusedFuture for Flush<'_, W> {
    fn is_terminated(&self) -> bool {
        self.done
    }
}

impl ChainBuffer {
    /// Writes queued bytes to an async writer, draining what it accepts.
    ///
    /// Same loop as [`ChainBuffer::write_to`]; a pending writer stands in for
    /// would-block once at least one byte was written.
    pub fn write_to_async<W: AsyncWrite>(
        &mut self,
        writer: W,
        limit: Option<usize>,
    ) -> Flush<'_, W> {
        let remaining = limit.unwrap_or(usize::MAX).min(self.len());
        Flush {
            buffer: self,
            writer,
            remaining,
            written: 0,
            done: false,
        }
    }
}
