//! Standard trait surfaces: `bytes::Buf`, `std::io` and `core::fmt`.

use std::fmt;
use std::io::{self, BufRead, IoSlice, Read, Write};

use bytes::Buf;

use super::ChainBuffer;
use crate::error::BufferError;

impl Buf for ChainBuffer {
    #[inline]
    fn remaining(&self) -> usize {
        self.len
    }

    #[inline]
    fn chunk(&self) -> &[u8] {
        self.head_content()
    }

    fn chunks_vectored<'a>(&'a self, dst: &mut [IoSlice<'a>]) -> usize {
        let mut filled = 0;
        for (slot, chunk) in dst.iter_mut().zip(self.chunks().filter(|c| !c.is_empty())) {
            *slot = IoSlice::new(chunk);
            filled += 1;
        }
        filled
    }

    fn advance(&mut self, cnt: usize) {
        assert!(
            cnt <= self.len,
            "cannot advance past `remaining`: {} <= {}",
            cnt,
            self.len
        );
        self.drain(cnt);
    }
}

impl Read for ChainBuffer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.remove(buf))
    }
}

impl BufRead for ChainBuffer {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Ok(self.head_content())
    }

    fn consume(&mut self, amt: usize) {
        self.drain(amt);
    }
}

impl Write for ChainBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.add(buf) {
            Ok(()) => Ok(buf.len()),
            // Report the part that made it in; the caller retries the rest
            Err(BufferError::OutOfMemory { unwritten, .. }) if unwritten < buf.len() => {
                Ok(buf.len() - unwritten)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Write for ChainBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.add_str(s).map_err(|_| fmt::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buf_walks_segments() {
        let mut buffer = ChainBuffer::new();
        buffer.add(&[1u8; 512]).unwrap();
        buffer.add(&[2u8; 10]).unwrap();

        assert_eq!(buffer.remaining(), 522);
        assert_eq!(buffer.chunk().len(), 512);

        buffer.advance(510);
        assert_eq!(buffer.get_u16(), 0x0101);
        assert_eq!(buffer.chunk(), &[2u8; 10]);
    }

    #[test]
    fn test_buf_copy_to_bytes() {
        let mut buffer = ChainBuffer::new();
        buffer.add(b"hello world").unwrap();

        let hello = buffer.copy_to_bytes(5);
        assert_eq!(&hello[..], b"hello");
        assert_eq!(buffer.len(), 6);
    }

    #[test]
    fn test_chunks_vectored() {
        let mut buffer = ChainBuffer::new();
        buffer.add(&[1u8; 512]).unwrap();
        buffer.add(&[2u8; 20]).unwrap();

        let mut slices = [IoSlice::new(&[]); 4];
        assert_eq!(buffer.chunks_vectored(&mut slices), 2);
        assert_eq!(slices[0].len(), 512);
        assert_eq!(slices[1].len(), 20);

        let mut one = [IoSlice::new(&[]); 1];
        assert_eq!(buffer.chunks_vectored(&mut one), 1);
    }

    #[test]
    #[should_panic]
    fn test_advance_past_end_panics() {
        let mut buffer = ChainBuffer::new();
        buffer.add(b"ab").unwrap();
        buffer.advance(3);
    }

    #[test]
    fn test_io_read_write() {
        let mut buffer = ChainBuffer::new();
        buffer.write_all(b"line one\nline two\n").unwrap();

        let mut line = String::new();
        buffer.read_line(&mut line).unwrap();
        assert_eq!(line, "line one\n");

        let mut rest = Vec::new();
        buffer.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, b"line two\n");
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_fmt_write() {
        let mut buffer = ChainBuffer::new();
        // io::Write is also in scope here, so pick the fmt one explicitly
        fmt::Write::write_fmt(&mut buffer, format_args!("{}={}", "key", 42)).unwrap();
        assert_eq!(buffer.to_vec(), b"key=42");
    }

    #[test]
    fn test_io_write_out_of_memory_maps_kind() {
        let mut buffer =
            ChainBuffer::with_config(crate::buffer::tests::unallocatable_config()).unwrap();

        let err = Write::write(&mut buffer, b"hello").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::OutOfMemory);
        assert!(buffer.is_empty());

        assert!(fmt::Write::write_str(&mut buffer, "hello").is_err());
    }
}
