//! Request decoding entry point
//!
//! The parser is a pure function of `(connection, buffer)`: it keeps no state
//! between calls. A caller that receives [`ParseOutcome::Incomplete`] appends
//! more bytes and parses the whole buffer again from offset 0.

mod grammar;
mod method;
mod sniff;

pub use grammar::{match_head, RequestHead};
pub use method::{Method, MAX_TOKEN_LEN, RECOGNIZED_TOKENS};
pub use sniff::{sniff, Sniff, DOUBLE_CRLF};

use bytes::Bytes;
use log::{debug, trace};
use snare_cursor::ByteCursor;

use crate::config::ParserConfig;
use crate::form::Params;
use crate::headers::Headers;
use crate::multipart::{decode_multipart, decode_urlencoded, FormKind};
use crate::request::{rebuild_url, Connection, HttpRequest};
use crate::{Error, Result};

/// Result of one parse attempt
#[derive(Debug)]
pub enum ParseOutcome {
    /// The buffer is not an HTTP/1.1 request
    NotHttp,
    /// Looks like HTTP; header block or body not fully received
    Incomplete,
    /// A complete request occupying the first `consumed` bytes
    Parsed {
        request: Box<HttpRequest>,
        consumed: usize,
    },
}

impl ParseOutcome {
    pub fn is_not_http(&self) -> bool {
        matches!(self, ParseOutcome::NotHttp)
    }

    pub fn is_incomplete(&self) -> bool {
        matches!(self, ParseOutcome::Incomplete)
    }

    /// The parsed request and its length, if complete
    pub fn into_parsed(self) -> Option<(HttpRequest, usize)> {
        match self {
            ParseOutcome::Parsed { request, consumed } => Some((*request, consumed)),
            _ => None,
        }
    }
}

/// HTTP/1.1 request parser
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse the request at the start of the cursor's buffer.
    ///
    /// The cursor is reset to 0 first. On [`ParseOutcome::Parsed`] it is left
    /// at `consumed`, the start of any pipelined request; otherwise at 0.
    pub fn parse<C, S>(&self, conn: &S, cursor: &mut C) -> Result<ParseOutcome>
    where
        C: ByteCursor + ?Sized,
        S: Connection + ?Sized,
    {
        cursor.set_position(0);
        let outcome = self.parse_at_start(conn, cursor);
        if !matches!(outcome, Ok(ParseOutcome::Parsed { .. })) {
            cursor.set_position(0);
        }
        outcome
    }

    fn parse_at_start<C, S>(&self, conn: &S, cursor: &mut C) -> Result<ParseOutcome>
    where
        C: ByteCursor + ?Sized,
        S: Connection + ?Sized,
    {
        let header_len = match sniff(cursor) {
            Sniff::NotHttp => {
                trace!("sniff: not http");
                return Ok(ParseOutcome::NotHttp);
            }
            Sniff::Partial => {
                self.check_header_size(cursor.len())?;
                trace!("sniff: header incomplete after {} bytes", cursor.len());
                return Ok(ParseOutcome::Incomplete);
            }
            Sniff::Header { len } => len,
        };
        self.check_header_size(header_len)?;

        cursor.set_position(0);
        let block = cursor.read_bytes(header_len);
        let Some(head) = match_head(&block) else {
            debug!("header block does not match HTTP/1.1 grammar");
            return Ok(ParseOutcome::NotHttp);
        };

        let method = Method::from_token(&head.method).map_err(|err| {
            debug!("rejecting method {:?}", head.method);
            err
        })?;
        let headers: Headers = head.fields.into_iter().collect();

        let Some(url) = rebuild_url(conn, &headers, &head.target)? else {
            debug!("request target {:?} is not a valid url", head.target);
            return Ok(ParseOutcome::NotHttp);
        };
        let path = url.path().to_string();
        let query = url.query().map(Params::parse).unwrap_or_default();

        let content_length = match method {
            Method::Get => 0,
            _ => headers.content_length(),
        };
        if let Some(limit) = self.config.max_body_size {
            if content_length > limit {
                return Err(Error::BodyTooLarge { size: content_length, limit });
            }
        }
        if cursor.len() - header_len < content_length {
            trace!(
                "body incomplete: {} of {} bytes",
                cursor.len() - header_len,
                content_length
            );
            return Ok(ParseOutcome::Incomplete);
        }

        let (body, form, files) = match method {
            Method::Get => (Bytes::new(), Params::new(), Vec::new()),
            _ => {
                let body = cursor.read_bytes(content_length);
                let (form, files) = match FormKind::from_content_type(headers.content_type()) {
                    FormKind::UrlEncoded => (decode_urlencoded(&body), Vec::new()),
                    FormKind::Multipart { boundary } => decode_multipart(&body, &boundary),
                    FormKind::Other => (Params::new(), Vec::new()),
                };
                (body, form, files)
            }
        };

        let consumed = header_len + content_length;
        cursor.set_position(consumed);
        trace!("parsed {} {} ({} bytes)", method, path, consumed);

        Ok(ParseOutcome::Parsed {
            request: Box::new(HttpRequest {
                local_addr: conn.local_addr(),
                remote_addr: conn.remote_addr(),
                method,
                url,
                path,
                query,
                headers,
                body,
                form,
                files,
            }),
            consumed,
        })
    }

    fn check_header_size(&self, size: usize) -> Result<()> {
        match self.config.max_header_size {
            Some(limit) if size > limit => Err(Error::HeaderTooLarge { size, limit }),
            _ => Ok(()),
        }
    }
}

/// Parse with the default (unlimited) configuration
pub fn parse<C, S>(conn: &S, cursor: &mut C) -> Result<ParseOutcome>
where
    C: ByteCursor + ?Sized,
    S: Connection + ?Sized,
{
    Parser::default().parse(conn, cursor)
}
