//! snare-cursor: Positionable byte source for the request parser
//!
//! The connection layer owns the receive buffer; the parser only borrows it
//! through [`ByteCursor`] for the duration of one parse attempt.
//!
//! ## Features
//! - Absolute indexed access, independent of the read position
//! - Substring search from the current position (`memchr::memmem`)
//! - Text and raw reads that advance the position
//! - Reads copy out, so results never alias the caller's buffer
//!
//! ## Example
//! ```
//! use snare_cursor::{ByteCursor, SliceCursor};
//!
//! let mut cursor = SliceCursor::new(b"GET / HTTP/1.1\r\n\r\n");
//! assert_eq!(cursor.find(b"\r\n\r\n"), Some(14));
//!
//! let line = cursor.read_text(3);
//! assert_eq!(line, "GET");
//! assert_eq!(cursor.position(), 3);
//! ```

use bytes::Bytes;
use memchr::memmem;

/// Random-access, positionable byte source
pub trait ByteCursor {
    /// Total number of bytes in the buffer
    fn len(&self) -> usize;

    /// Current read position
    fn position(&self) -> usize;

    /// Move the read position (clamped to `len()`)
    fn set_position(&mut self, position: usize);

    /// Byte at an absolute index
    fn byte_at(&self, index: usize) -> Option<u8>;

    /// Offset of `needle` relative to the current position
    fn find(&self, needle: &[u8]) -> Option<usize>;

    /// Read up to `len` bytes as text, replacing invalid UTF-8
    fn read_text(&mut self, len: usize) -> String;

    /// Copy up to `len` bytes into an owned buffer
    fn read_bytes(&mut self, len: usize) -> Bytes;

    /// Whether the buffer holds no bytes
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes between the position and the end of the buffer
    fn remaining(&self) -> usize {
        self.len().saturating_sub(self.position())
    }
}

/// [`ByteCursor`] over a borrowed slice
#[derive(Debug, Clone)]
pub struct SliceCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> SliceCursor<'a> {
    /// Create a cursor positioned at offset 0
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// The whole underlying buffer
    pub fn get_ref(&self) -> &'a [u8] {
        self.buf
    }

    /// Unread part of the buffer
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    fn take(&mut self, len: usize) -> &'a [u8] {
        let end = self.pos + len.min(self.remaining());
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        slice
    }
}

impl ByteCursor for SliceCursor<'_> {
    #[inline]
    fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    fn set_position(&mut self, position: usize) {
        self.pos = position.min(self.buf.len());
    }

    #[inline]
    fn byte_at(&self, index: usize) -> Option<u8> {
        self.buf.get(index).copied()
    }

    fn find(&self, needle: &[u8]) -> Option<usize> {
        memmem::find(self.rest(), needle)
    }

    fn read_text(&mut self, len: usize) -> String {
        String::from_utf8_lossy(self.take(len)).into_owned()
    }

    fn read_bytes(&mut self, len: usize) -> Bytes {
        Bytes::copy_from_slice(self.take(len))
    }
}
