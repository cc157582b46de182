//! Random access and substring search over the logical byte stream.

use super::ChainBuffer;

impl ChainBuffer {
    /// Returns the byte at logical offset `index`, or `None` if out of range.
    ///
    /// ```
    /// use chainbuf::ChainBuffer;
    ///
    /// let mut buffer = ChainBuffer::new();
    /// buffer.add(b"hello")?;
    /// buffer.drain(1);
    /// assert_eq!(buffer.byte_at(0), Some(b'e'));
    /// assert_eq!(buffer.byte_at(4), None);
    /// # Ok::<(), chainbuf::BufferError>(())
    /// ```
    pub fn byte_at(&self, index: usize) -> Option<u8> {
        if index >= self.len {
            return None;
        }

        let mut offset = index;
        for chunk in self.chunks() {
            if offset < chunk.len() {
                return Some(chunk[offset]);
            }
            offset -= chunk.len();
        }
        None
    }

    /// Returns the logical offset of the first occurrence of `needle`.
    ///
    /// Matches may span segment boundaries. An empty needle matches at 0.
    pub fn find(&self, needle: &[u8]) -> Option<usize> {
        let Some(&first) = needle.first() else {
            return Some(0);
        };
        if needle.len() > self.len {
            return None;
        }

        let last_start = self.len - needle.len();
        let mut base = 0;

        for (index, segment) in self.segments.iter().enumerate() {
            let content = segment.content();

            for (offset, &byte) in content.iter().enumerate() {
                if base + offset > last_start {
                    return None;
                }
                if byte == first && self.matches_at(index, offset, needle) {
                    return Some(base + offset);
                }
            }

            base += content.len();
        }

        None
    }

    /// Like [`ChainBuffer::find`], for UTF-8 text.
    ///
    /// ```
    /// use chainbuf::ChainBuffer;
    ///
    /// let mut buffer = ChainBuffer::new();
    /// buffer.add_str("HTTP/1.1 200 OK\r\nHost: a\r\n\r\n")?;
    /// assert_eq!(buffer.find_str("\r\n\r\n"), Some(24));
    /// assert_eq!(buffer.find_str("404"), None);
    /// # Ok::<(), chainbuf::BufferError>(())
    /// ```
    pub fn find_str(&self, needle: &str) -> Option<usize> {
        self.find(needle.as_bytes())
    }

    /// Compares `needle` against the stream starting at `offset` within the
    /// content of segment `index`.
    fn matches_at(&self, index: usize, offset: usize, needle: &[u8]) -> bool {
        let mut rest = needle;
        let mut offset = offset;

        for segment in self.segments.range(index..) {
            let content = &segment.content()[offset..];
            let n = content.len().min(rest.len());
            if content[..n] != rest[..n] {
                return false;
            }

            rest = &rest[n..];
            if rest.is_empty() {
                return true;
            }
            offset = 0;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use crate::ChainBuffer;

    fn split_buffer() -> ChainBuffer {
        // 512 bytes in the first segment, the rest in a second one
        let mut buffer = ChainBuffer::new();
        let mut first = vec![b'.'; 508];
        first.extend_from_slice(b"abcd");
        buffer.add(&first).unwrap();
        buffer.add(b"efgh").unwrap();
        assert_eq!(buffer.segment_count(), 2);
        buffer
    }

    #[test]
    fn test_byte_at_across_segments() {
        let buffer = split_buffer();
        assert_eq!(buffer.byte_at(0), Some(b'.'));
        assert_eq!(buffer.byte_at(511), Some(b'd'));
        assert_eq!(buffer.byte_at(512), Some(b'e'));
        assert_eq!(buffer.byte_at(515), Some(b'h'));
        assert_eq!(buffer.byte_at(516), None);
    }

    #[test]
    fn test_find_spanning_boundary() {
        let buffer = split_buffer();
        assert_eq!(buffer.find(b"cdef"), Some(510));
        assert_eq!(buffer.find(b"abcdefgh"), Some(508));
        assert_eq!(buffer.find(b"efgh"), Some(512));
    }

    #[test]
    fn test_find_missing() {
        let buffer = split_buffer();
        assert_eq!(buffer.find(b"efghi"), None);
        assert_eq!(buffer.find(b"dx"), None);
    }

    #[test]
    fn test_find_after_drain() {
        let mut buffer = ChainBuffer::new();
        buffer.add_str("one two one").unwrap();
        buffer.drain(1);
        assert_eq!(buffer.find_str("one"), Some(7));
    }

    #[test]
    fn test_find_partial_match_then_real_one() {
        let mut buffer = ChainBuffer::new();
        buffer.add_str("aab").unwrap();
        assert_eq!(buffer.find_str("ab"), Some(1));
    }

    #[test]
    fn test_find_empty() {
        let buffer = ChainBuffer::new();
        assert_eq!(buffer.find(b""), Some(0));
        assert_eq!(buffer.find(b"x"), None);
    }
}
