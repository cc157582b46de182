//! Segment storage, growth policy and compaction.

use std::collections::TryReserveError;
use std::fmt;

/// Content shorter than this is relocated early when it sits behind a large
/// drained prefix.
const SMALL_CONTENT: usize = 32;

/// One block of the chain.
///
/// Invariant: `data <= tail <= storage.len()`.
pub(crate) struct Segment {
    storage: Box<[u8]>,
    data: usize,
    tail: usize,
}

impl Segment {
    /// Returns the capacity for a segment that must hold `min_len` bytes.
    ///
    /// This is the smallest power of two that is at least both `min_len` and
    /// `min_capacity`. Returns `None` if that would overflow `usize`.
    pub(crate) fn capacity_for(min_len: usize, min_capacity: usize) -> Option<usize> {
        min_len.max(min_capacity).checked_next_power_of_two()
    }

    /// Allocates an empty segment of exactly `capacity` bytes.
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        let mut storage = Vec::new();
        storage.try_reserve_exact(capacity)?;
        storage.resize(capacity, 0);

        Ok(Self {
            storage: storage.into_boxed_slice(),
            data: 0,
            tail: 0,
        })
    }

    /// Total size of the storage region.
    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.storage.len()
    }

    #[inline]
    pub(crate) fn drained_len(&self) -> usize {
        self.data
    }

    #[inline]
    pub(crate) fn content_len(&self) -> usize {
        self.tail - self.data
    }

    #[inline]
    pub(crate) fn free_len(&self) -> usize {
        self.storage.len() - self.tail
    }

    /// The unconsumed bytes of this segment.
    #[inline]
    pub(crate) fn content(&self) -> &[u8] {
        &self.storage[self.data..self.tail]
    }

    /// The writable region after the content.
    ///
    /// Bytes written here become content only after [`Segment::commit`].
    #[inline]
    pub(crate) fn spare_mut(&mut self) -> &mut [u8] {
        &mut self.storage[self.tail..]
    }

    /// Marks `n` bytes of the spare region as content.
    #[inline]
    pub(crate) fn commit(&mut self, n: usize) {
        debug_assert!(n <= self.free_len());
        self.tail += n;
    }

    /// Discards `n` bytes from the front of the content.
    #[inline]
    pub(crate) fn consume(&mut self, n: usize) {
        debug_assert!(n <= self.content_len());
        self.data += n;
    }

    /// Copies as much of `src` as fits into the free region.
    ///
    /// Returns the number of bytes copied.
    pub(crate) fn write(&mut self, src: &[u8]) -> usize {
        let n = src.len().min(self.free_len());
        self.storage[self.tail..self.tail + n].copy_from_slice(&src[..n]);
        self.tail += n;
        n
    }

    /// Decides whether the content should move to the start of the storage
    /// before `len` more bytes are written.
    pub(crate) fn should_compact(&self, len: usize) -> bool {
        if self.data == 0 {
            return false;
        }

        let capacity = self.capacity();
        let drained = self.drained_len();

        // More than half of the storage is wasted
        if drained > capacity / 2 {
            return true;
        }

        // A small remainder pinned behind a large drained prefix
        if self.content_len() < SMALL_CONTENT && drained > capacity / 4 {
            return true;
        }

        self.free_len() < len
    }

    /// Moves the content to the start of the storage.
    ///
    /// Returns the number of bytes moved.
    pub(crate) fn compact(&mut self) -> usize {
        let len = self.content_len();
        self.storage.copy_within(self.data..self.tail, 0);
        self.data = 0;
        self.tail = len;
        len
    }
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Segment")
            .field("capacity", &self.capacity())
            .field("data", &self.data)
            .field("tail", &self.tail)
            .finish()
    }
}
