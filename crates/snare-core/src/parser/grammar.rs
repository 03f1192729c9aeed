//! Header block grammar
//!
//! ```text
//! request-line  = method SP request-target SP "HTTP/1.1" CRLF
//! header-line   = field-name ":" SP field-value CRLF
//! terminator    = CRLF
//! ```
//!
//! The block handed in always ends with the first CRLFCRLF of the buffer, so
//! splitting on CRLF yields exactly the request line and the header lines.

use memchr::memmem;
use smallvec::SmallVec;

const VERSION: &[u8] = b"HTTP/1.1";

/// Matched request line and raw header pairs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHead {
    /// Method token as sent (case preserved)
    pub method: String,
    /// Request target, usually origin-form (`/path?query`)
    pub target: String,
    /// Header fields in arrival order
    pub fields: SmallVec<[(String, String); 16]>,
}

/// Match a complete header block. `None` on any grammar violation.
pub fn match_head(block: &[u8]) -> Option<RequestHead> {
    let body = block.strip_suffix(b"\r\n\r\n")?;
    let mut lines = memmem::find_iter(body, b"\r\n")
        .chain(std::iter::once(body.len()))
        .scan(0, |start, end| {
            let line = &body[*start..end];
            *start = end + 2;
            Some(line)
        });

    let (method, target) = match_request_line(lines.next()?)?;

    let mut fields = SmallVec::new();
    for line in lines {
        fields.push(match_field(line)?);
    }

    Some(RequestHead { method, target, fields })
}

fn match_request_line(line: &[u8]) -> Option<(String, String)> {
    let mut parts = line.split(|&b| b == b' ');
    let method = parts.next()?;
    let target = parts.next()?;
    let version = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    if !is_token(method) || !is_token(target) || !version.eq_ignore_ascii_case(VERSION) {
        return None;
    }

    Some((text(method), text(target)))
}

fn match_field(line: &[u8]) -> Option<(String, String)> {
    let colon = memchr::memchr(b':', line)?;
    let name = &line[..colon];
    let value = line[colon + 1..].strip_prefix(b" ")?;

    if name.is_empty() || name.iter().any(|&b| b == b'\r' || b == b'\n') {
        return None;
    }
    if value.iter().any(|&b| b == b'\r' || b == b'\n') {
        return None;
    }

    Some((text(name), text(value)))
}

/// Non-empty run without whitespace
fn is_token(bytes: &[u8]) -> bool {
    !bytes.is_empty() && !bytes.iter().any(u8::is_ascii_whitespace)
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_line_only() {
        let head = match_head(b"GET /index.html HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(head.method, "GET");
        assert_eq!(head.target, "/index.html");
        assert!(head.fields.is_empty());
    }

    #[test]
    fn test_headers_in_order() {
        let head = match_head(
            b"post /submit?x=1 http/1.1\r\nHost: example.com\r\nX-Empty: \r\nAccept: */*\r\n\r\n",
        )
        .unwrap();
        assert_eq!(head.method, "post");
        assert_eq!(head.target, "/submit?x=1");
        assert_eq!(
            head.fields.to_vec(),
            vec![
                ("Host".to_string(), "example.com".to_string()),
                ("X-Empty".to_string(), String::new()),
                ("Accept".to_string(), "*/*".to_string()),
            ]
        );
    }

    #[test]
    fn test_value_keeps_colons_and_extra_space() {
        let head = match_head(b"GET / HTTP/1.1\r\nHost: localhost:8080\r\nX-Pad:   a\r\n\r\n").unwrap();
        assert_eq!(head.fields[0].1, "localhost:8080");
        assert_eq!(head.fields[1].1, "  a");
    }

    #[test]
    fn test_wrong_version() {
        assert!(match_head(b"GET / HTTP/1.0\r\n\r\n").is_none());
        assert!(match_head(b"GET / HTTP/2\r\n\r\n").is_none());
        assert!(match_head(b"GET /\r\n\r\n").is_none());
    }

    #[test]
    fn test_malformed_request_line() {
        assert!(match_head(b"GET  / HTTP/1.1\r\n\r\n").is_none());
        assert!(match_head(b"GET / HTTP/1.1 extra\r\n\r\n").is_none());
        assert!(match_head(b"GET /a\tb HTTP/1.1\r\n\r\n").is_none());
        assert!(match_head(b" GET / HTTP/1.1\r\n\r\n").is_none());
    }

    #[test]
    fn test_malformed_fields() {
        // No space after the colon
        assert!(match_head(b"GET / HTTP/1.1\r\nHost:a\r\n\r\n").is_none());
        // No colon
        assert!(match_head(b"GET / HTTP/1.1\r\nHost a\r\n\r\n").is_none());
        // Empty name
        assert!(match_head(b"GET / HTTP/1.1\r\n: a\r\n\r\n").is_none());
        // Bare LF inside a line
        assert!(match_head(b"GET / HTTP/1.1\r\nA: b\nC: d\r\n\r\n").is_none());
    }

    #[test]
    fn test_requires_terminator() {
        assert!(match_head(b"GET / HTTP/1.1\r\n").is_none());
    }
}
