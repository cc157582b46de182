//! chainbuf
//!
//! Growable, segmented byte buffer for non-blocking I/O.
//!
//! `chainbuf` stages the bytes of one connection direction. It is designed
//! as the small transport primitive beneath a socket or proxy layer:
//!
//! - accumulate bytes read from a non-blocking descriptor
//! - queue bytes to be written out
//! - consume a prefix cheaply, without moving what remains
//!
//! The crate intentionally:
//! - does NOT open, configure or close descriptors
//! - does NOT manage concurrency (one owner per buffer)
//! - does NOT frame protocols or apply flow control
//!
//! Storage is a chain of power-of-two segments. Appends write into the tail
//! segment and spill into a new one; drains free head segments as they
//! empty; a segment's live bytes are compacted in place when that avoids
//! growing the chain.
//!
//! # Sync
//!
//! ```no_run
//! use std::net::TcpStream;
//! use chainbuf::{BufferError, ChainBuffer};
//!
//! fn main() -> Result<(), BufferError> {
//!     let mut stream = TcpStream::connect("127.0.0.1:8080")?;
//!     stream.set_nonblocking(true)?;
//!
//!     let mut inbound = ChainBuffer::new();
//!     let outcome = inbound.add_from_reader(&mut stream, None)?;
//!     if let Some(end) = inbound.find_str("\r\n") {
//!         let mut line = vec![0u8; end + 2];
//!         inbound.remove(&mut line);
//!     }
//!     if outcome.eof {
//!         println!("peer closed, {} bytes left", inbound.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use chainbuf::ChainBuffer;
//! use futures_io::{AsyncRead, AsyncWrite};
//!
//! async fn echo<S: AsyncRead + AsyncWrite + Unpin>(mut stream: S) -> Result<(), chainbuf::BufferError> {
//!     let mut buffer = ChainBuffer::new();
//!     loop {
//!         let outcome = buffer.add_from_async_reader(&mut stream, None).await?;
//!         buffer.write_to_async(&mut stream, None).await?;
//!         if outcome.eof {
//!             return Ok(());
//!         }
//!     }
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod buffer;
mod config;
mod error;

mod segment; // internal segment storage

#[cfg(feature = "async-io")]
mod async_io;

//
// Public surface (intentionally tiny)
//

pub use buffer::{ChainBuffer, FillOutcome};
pub use config::{BufferConfig, DEFAULT_MIN_SEGMENT_SIZE, DEFAULT_READ_SEGMENT_SIZE};
pub use error::BufferError;

#[cfg(feature = "async-io")]
pub use async_io::{Fill, Flush};
