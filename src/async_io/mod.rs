//! Async fill and flush for non-blocking I/O.
//!
//! This module mirrors [`ChainBuffer::add_from_reader`] and
//! [`ChainBuffer::write_to`] on top of the `futures-io` traits, making it
//! runtime-agnostic and compatible with tokio (through `tokio_util::compat`),
//! async-std, smol, and other async runtimes.
//!
//! - [`Fill`] - Future returned by [`ChainBuffer::add_from_async_reader`]
//! - [`Flush`] - Future returned by [`ChainBuffer::write_to_async`]
//!
//! A pending reader or writer plays the role of would-block: once some bytes
//! have moved the future completes with them, otherwise it stays pending.
//!
//! This module requires the `async-io` feature to be enabled.
//!
//! [`ChainBuffer::add_from_reader`]: crate::ChainBuffer::add_from_reader
//! [`ChainBuffer::write_to`]: crate::ChainBuffer::write_to
//! [`ChainBuffer::add_from_async_reader`]: crate::ChainBuffer::add_from_async_reader
//! [`ChainBuffer::write_to_async`]: crate::ChainBuffer::write_to_async

mod fill;
mod flush;

pub use fill::Fill;
pub use flush::Flush;
