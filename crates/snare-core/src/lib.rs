//! snare-core: Incremental HTTP/1.1 request decoder
//!
//! Turns the raw, possibly partial receive buffer of a TCP connection into a
//! structured request, or reports that more bytes are needed, or that the
//! bytes are not HTTP at all.
//!
//! ## Pipeline
//! 1. Sniff the method token and locate the end of the header block
//! 2. Match the header block against the HTTP/1.1 request grammar
//! 3. Gate on the declared `Content-Length`
//! 4. Decode url-encoded or multipart form bodies
//!
//! ## Example
//! ```
//! use snare_core::{parse, ConnectionInfo, ParseOutcome};
//! use snare_cursor::SliceCursor;
//!
//! let conn = ConnectionInfo::new(
//!     "127.0.0.1:8080".parse().unwrap(),
//!     "10.0.0.2:50000".parse().unwrap(),
//! );
//!
//! let buf = b"GET /search?q=rust HTTP/1.1\r\nHost: example.com\r\n\r\n";
//! match parse(&conn, &mut SliceCursor::new(buf)).unwrap() {
//!     ParseOutcome::Parsed { request, consumed } => {
//!         assert_eq!(request.path, "/search");
//!         assert_eq!(request.query("q"), Some("rust"));
//!         assert_eq!(request.url.to_string(), "http://example.com/search?q=rust");
//!         assert_eq!(consumed, buf.len());
//!     }
//!     other => panic!("unexpected outcome: {:?}", other),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod form;
pub mod headers;
pub mod multipart;
pub mod parser;
pub mod request;

// Re-exports
pub use config::ParserConfig;
pub use error::{Error, Result};
pub use form::Params;
pub use headers::Headers;
pub use multipart::{FormKind, HttpFile, PartHeader};
pub use parser::{parse, Method, ParseOutcome, Parser};
pub use request::{Connection, ConnectionInfo, HttpRequest};

pub use snare_cursor::{ByteCursor, SliceCursor};
