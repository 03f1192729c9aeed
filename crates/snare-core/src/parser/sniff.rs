//! Protocol sniffing
//!
//! Cheap check run before any grammar work: does the buffer start like a
//! request line, and has the whole header block arrived yet?

use smallvec::SmallVec;
use snare_cursor::ByteCursor;

use super::method::{is_token_prefix, MAX_TOKEN_LEN};

/// End-of-header marker
pub const DOUBLE_CRLF: &[u8] = b"\r\n\r\n";

/// Result of sniffing a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sniff {
    /// Does not start with a method token
    NotHttp,
    /// Starts like HTTP, header block not terminated yet
    Partial,
    /// Header block present; `len` includes the trailing CRLFCRLF
    Header { len: usize },
}

/// Sniff the buffer behind `cursor`. Leaves the position at 0.
pub fn sniff<C: ByteCursor + ?Sized>(cursor: &mut C) -> Sniff {
    let window = cursor.len().min(MAX_TOKEN_LEN + 1);
    let token_len = (0..window)
        .find(|&i| cursor.byte_at(i) == Some(b' '))
        .unwrap_or(window);

    let token: SmallVec<[u8; MAX_TOKEN_LEN + 1]> =
        (0..token_len).filter_map(|i| cursor.byte_at(i)).collect();
    if !is_token_prefix(&token) {
        return Sniff::NotHttp;
    }

    cursor.set_position(0);
    match cursor.find(DOUBLE_CRLF) {
        Some(index) => Sniff::Header { len: index + DOUBLE_CRLF.len() },
        None => Sniff::Partial,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snare_cursor::SliceCursor;

    fn run(buf: &[u8]) -> Sniff {
        sniff(&mut SliceCursor::new(buf))
    }

    #[test]
    fn test_complete_header() {
        assert_eq!(run(b"GET / HTTP/1.1\r\n\r\n"), Sniff::Header { len: 18 });
        assert_eq!(
            run(b"POST /x HTTP/1.1\r\nHost: a\r\n\r\nbody"),
            Sniff::Header { len: 29 }
        );
    }

    #[test]
    fn test_partial_header() {
        assert_eq!(run(b"GET / HTTP/1.1\r\nHost: a\r\n"), Sniff::Partial);
        assert_eq!(run(b"GE"), Sniff::Partial);
        assert_eq!(run(b""), Sniff::Partial);
    }

    #[test]
    fn test_case_insensitive_token() {
        assert_eq!(run(b"get / HTTP/1.1\r\n"), Sniff::Partial);
        assert_eq!(run(b"oPtIoNs * HTTP/1.1\r\n"), Sniff::Partial);
    }

    #[test]
    fn test_not_http() {
        assert_eq!(run(b"HELLO world\r\n\r\n"), Sniff::NotHttp);
        assert_eq!(run(b"\x16\x03\x01\x02\x00"), Sniff::NotHttp);
        assert_eq!(run(b"SSH-2.0-OpenSSH_9.0\r\n"), Sniff::NotHttp);
    }

    #[test]
    fn test_token_without_space_in_window() {
        // Eight bytes, no space: longer than any method
        assert_eq!(run(b"GETGETGET / HTTP/1.1\r\n\r\n"), Sniff::NotHttp);
        // Shorter than the window and still a prefix
        assert_eq!(run(b"DELE"), Sniff::Partial);
    }

    #[test]
    fn test_recognized_but_unsupported_token() {
        assert_eq!(run(b"PATCH /x HTTP/1.1\r\n\r\n"), Sniff::Header { len: 21 });
    }
}
