//! The segmented buffer - [`ChainBuffer`].
//!
//! A `ChainBuffer` is one logical byte stream stored as an ordered chain of
//! fixed-capacity segments:
//!
//! ```text
//! +---------+---------+---------+
//! | segment | segment | segment |   head ... tail
//! +---------+---------+---------+
//! ```
//!
//! - Appends only ever write into the tail segment, spilling into a newly
//!   allocated segment when it is full
//! - Drains only ever consume from the head segment, freeing segments as
//!   they empty
//! - Before a write, the tail segment may be compacted in place to reclaim
//!   drained space instead of growing the chain
//!
//! # Example
//!
//! ```
//! use chainbuf::ChainBuffer;
//!
//! let mut buffer = ChainBuffer::new();
//! buffer.add(b"hello")?;
//! buffer.add(b" world")?;
//!
//! let mut dest = [0u8; 11];
//! assert_eq!(buffer.remove(&mut dest), 11);
//! assert_eq!(&dest, b"hello world");
//! # Ok::<(), chainbuf::BufferError>(())
//! ```

mod fill;
mod flush;
mod format;
mod search;
mod traits;

pub use fill::FillOutcome;

use std::collections::VecDeque;
use std::fmt;

use tracing::{trace, warn};

use crate::config::BufferConfig;
use crate::error::BufferError;
use crate::segment::Segment;

/// A growable byte buffer made of a chain of segments.
///
/// Appending is amortized O(1) regardless of write sizes, and consuming a
/// prefix never copies the remaining bytes. Segments that become fully
/// drained are freed immediately.
///
/// The buffer is not synchronized. It is meant to be owned by a single
/// connection that appends inbound data and consumes it in order.
///
/// # Length
///
/// The logical length is tracked eagerly, so [`ChainBuffer::len`] is O(1).
///
/// # Example
///
/// ```
/// use chainbuf::ChainBuffer;
///
/// let mut buffer = ChainBuffer::new();
/// buffer.add(b"hello")?;
/// buffer.drain(2);
///
/// let mut dest = [0u8; 3];
/// buffer.remove(&mut dest);
/// assert_eq!(&dest, b"llo");
/// # Ok::<(), chainbuf::BufferError>(())
/// ```
#[derive(Debug, Default)]
pub struct ChainBuffer {
    segments: VecDeque<Segment>,
    len: usize,
    config: BufferConfig,
}

impl ChainBuffer {
    /// Creates an empty buffer with the default configuration.
    ///
    /// No memory is allocated until the first append.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidConfig`] if `config` does not validate.
    pub fn with_config(config: BufferConfig) -> Result<Self, BufferError> {
        config.validate()?;
        Ok(Self {
            segments: VecDeque::new(),
            len: 0,
            config,
        })
    }

    /// Returns the configuration this buffer allocates with.
    pub fn config(&self) -> &BufferConfig {
        &self.config
    }

    /// Number of readable bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if there are no readable bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of segments currently allocated.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Total allocated storage across all segments, in bytes.
    pub fn capacity(&self) -> usize {
        self.segments.iter().map(Segment::capacity).sum()
    }

    /// Iterates over the readable bytes one segment at a time, in order.
    ///
    /// ```
    /// use chainbuf::ChainBuffer;
    ///
    /// let mut buffer = ChainBuffer::new();
    /// buffer.add(&[1u8; 600])?;
    /// buffer.add(&[2u8; 600])?;
    ///
    /// let total: usize = buffer.chunks().map(<[u8]>::len).sum();
    /// assert_eq!(total, 1200);
    /// # Ok::<(), chainbuf::BufferError>(())
    /// ```
    pub fn chunks(&self) -> impl Iterator<Item = &[u8]> {
        self.segments.iter().map(Segment::content)
    }

    /// Copies the readable bytes into a new vector without consuming them.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len);
        for chunk in self.chunks() {
            out.extend_from_slice(chunk);
        }
        out
    }

    /// Frees every segment.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.len = 0;
    }

    /// Appends `data` to the end of the buffer.
    ///
    /// The tail segment is compacted first if that reclaims enough room.
    /// Whatever does not fit goes into one newly allocated segment sized for
    /// the remainder.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfMemory`] if the new segment cannot be
    /// allocated. Bytes that already fit into the tail segment stay in the
    /// buffer; `unwritten` counts the ones that did not.
    pub fn add(&mut self, data: &[u8]) -> Result<(), BufferError> {
        let mut src = data;

        if let Some(tail) = self.segments.back_mut() {
            if tail.should_compact(src.len()) {
                let moved = tail.compact();
                trace!(moved, "compacted tail segment");
            }

            let written = tail.write(src);
            self.len += written;
            src = &src[written..];
        }

        if src.is_empty() {
            return Ok(());
        }

        let mut segment = self.allocate_segment(src.len(), src.len())?;
        let written = segment.write(src);
        debug_assert_eq!(written, src.len());
        self.segments.push_back(segment);
        self.len += written;

        Ok(())
    }

    /// Appends the UTF-8 bytes of `s`.
    pub fn add_str(&mut self, s: &str) -> Result<(), BufferError> {
        self.add(s.as_bytes())
    }

    /// Renders `args` into a temporary string and appends it.
    ///
    /// Returns the number of bytes appended.
    ///
    /// ```
    /// use chainbuf::ChainBuffer;
    ///
    /// let mut buffer = ChainBuffer::new();
    /// let n = buffer.add_fmt(format_args!("{} {}\r\n", "GET", "/index.html"))?;
    /// assert_eq!(n, 17);
    /// assert_eq!(buffer.len(), 17);
    /// # Ok::<(), chainbuf::BufferError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfMemory`] if the temporary or a segment
    /// cannot be allocated, and [`BufferError::Format`] if a formatting
    /// trait implementation fails.
    pub fn add_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<usize, BufferError> {
        let rendered = format::render(args)?;
        self.add_str(&rendered)?;
        Ok(rendered.len())
    }

    /// Discards up to `len` bytes from the front of the buffer.
    ///
    /// Segments that become empty are freed. Draining more than
    /// [`ChainBuffer::len`] empties the buffer.
    pub fn drain(&mut self, len: usize) {
        let mut len = len;

        while len > 0 {
            let Some(head) = self.segments.front_mut() else {
                break;
            };

            let content = head.content_len();
            if len < content {
                head.consume(len);
                self.len -= len;
                return;
            }

            len -= content;
            self.len -= content;
            self.segments.pop_front();
        }
    }

    /// Moves bytes from the front of the buffer into `dest`.
    ///
    /// Returns the number of bytes copied, which is less than `dest.len()`
    /// only if the buffer held fewer bytes.
    pub fn remove(&mut self, dest: &mut [u8]) -> usize {
        let mut copied = 0;

        while copied < dest.len() {
            let content = self.head_content();
            if content.is_empty() {
                break;
            }

            let n = content.len().min(dest.len() - copied);
            dest[copied..copied + n].copy_from_slice(&content[..n]);
            copied += n;
            self.drain(n);
        }

        copied
    }

    /// Readable bytes of the head segment, or an empty slice.
    #[inline]
    pub(crate) fn head_content(&self) -> &[u8] {
        self.segments
            .front()
            .map(Segment::content)
            .unwrap_or_default()
    }

    /// Returns a tail segment with free space, for a read of up to `budget`
    /// bytes.
    ///
    /// The current tail is compacted if warranted. A segment of at least
    /// `read_segment_size` is appended if the tail has no free space.
    pub(crate) fn reserve_tail(
        &mut self,
        budget: usize,
        unwritten: usize,
    ) -> Result<&mut Segment, BufferError> {
        let needs_segment = self.segments.back_mut().is_none_or(|tail| {
            if tail.should_compact(budget) {
                let moved = tail.compact();
                trace!(moved, "compacted tail segment");
            }
            tail.free_len() == 0
        });

        if needs_segment {
            let segment = self.allocate_segment(self.config.read_segment_size(), unwritten)?;
            self.segments.push_back(segment);
        }

        // The branch above leaves a tail with free space in every case
        self.segments
            .back_mut()
            .ok_or(BufferError::OutOfMemory {
                capacity: self.config.read_segment_size(),
                unwritten,
            })
    }

    /// Marks `n` bytes of the tail segment's spare region as content.
    pub(crate) fn commit_tail(&mut self, n: usize) {
        if let Some(tail) = self.segments.back_mut() {
            tail.commit(n);
            self.len += n;
        }
    }

    fn allocate_segment(&self, min_len: usize, unwritten: usize) -> Result<Segment, BufferError> {
        let Some(capacity) = Segment::capacity_for(min_len, self.config.min_segment_size()) else {
            warn!(min_len, unwritten, "segment size overflows usize");
            return Err(BufferError::OutOfMemory {
                capacity: min_len,
                unwritten,
            });
        };

        match Segment::with_capacity(capacity) {
            Ok(segment) => {
                trace!(
                    capacity,
                    segments = self.segments.len() + 1,
                    "allocated segment"
                );
                Ok(segment)
            }
            Err(_) => {
                warn!(capacity, unwritten, "segment allocation failed");
                Err(BufferError::OutOfMemory {
                    capacity,
                    unwritten,
                })
            }
        }
    }
}
