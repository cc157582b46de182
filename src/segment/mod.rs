//! Fixed-capacity storage blocks that make up a buffer chain.
//!
//! This module is an implementation detail and not part of the public API.
//! A [`Segment`] owns one power-of-two sized allocation split into three
//! regions:
//!
//! ```text
//! 0        data            tail      capacity
//! +---------+---------------+---------+
//! | drained |    content    |  free   |
//! +---------+---------------+---------+
//! ```

mod block;

pub(crate) use block::Segment;
