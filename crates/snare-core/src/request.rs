//! HTTP Request types

use bytes::Bytes;
use http::Uri;
use std::net::SocketAddr;

use crate::form::Params;
use crate::headers::Headers;
use crate::multipart::{FormKind, HttpFile};
use crate::parser::Method;
use crate::{Error, Result};

/// Longest absolute URL `http::Uri` accepts
pub const MAX_URI_LEN: usize = u16::MAX as usize - 1;

/// Connection metadata the parser stamps onto each request
pub trait Connection {
    fn local_addr(&self) -> SocketAddr;
    fn remote_addr(&self) -> SocketAddr;
    /// Whether the transport is TLS
    fn is_secure(&self) -> bool;
}

/// Plain connection metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionInfo {
    pub local_addr: SocketAddr,
    pub remote_addr: SocketAddr,
    pub secure: bool,
}

impl ConnectionInfo {
    pub fn new(local_addr: SocketAddr, remote_addr: SocketAddr) -> Self {
        Self {
            local_addr,
            remote_addr,
            secure: false,
        }
    }

    /// Mark the connection as TLS
    pub fn secure(mut self) -> Self {
        self.secure = true;
        self
    }
}

impl Connection for ConnectionInfo {
    fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    fn remote_addr(&self) -> SocketAddr {
        self.remote_addr
    }

    fn is_secure(&self) -> bool {
        self.secure
    }
}

/// Decoded HTTP request. Owns all of its data; nothing borrows the input
/// buffer.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub local_addr: SocketAddr,
    pub remote_addr: SocketAddr,
    /// HTTP method
    pub method: Method,
    /// Absolute URL rebuilt from scheme, host and request target
    pub url: Uri,
    /// Request path (without query string)
    pub path: String,
    /// Decoded query string parameters
    pub query: Params,
    pub headers: Headers,
    /// Raw body bytes (empty for GET)
    pub body: Bytes,
    /// Decoded form fields (empty for GET)
    pub form: Params,
    /// Uploaded files (empty for GET)
    pub files: Vec<HttpFile>,
}

impl HttpRequest {
    /// Get a header value (case-insensitive, first match)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.content_type()
    }

    pub fn content_length(&self) -> usize {
        self.headers.content_length()
    }

    /// Body is `application/x-www-form-urlencoded`
    pub fn is_form_urlencoded(&self) -> bool {
        FormKind::from_content_type(self.content_type()) == FormKind::UrlEncoded
    }

    /// Boundary of a `multipart/form-data` body
    pub fn multipart_boundary(&self) -> Option<String> {
        match FormKind::from_content_type(self.content_type()) {
            FormKind::Multipart { boundary } => Some(boundary),
            _ => None,
        }
    }

    pub fn query(&self, name: &str) -> Option<&str> {
        self.query.get(name)
    }

    pub fn form(&self, name: &str) -> Option<&str> {
        self.form.get(name)
    }

    /// First uploaded file for a form field
    pub fn file(&self, name: &str) -> Option<&HttpFile> {
        self.files.iter().find(|f| f.name == name)
    }

    /// Query parameter, falling back to the form field of the same name
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query(name).or_else(|| self.form(name))
    }

    pub fn is_secure(&self) -> bool {
        self.url.scheme_str() == Some("https")
    }
}

/// Build the absolute URL for a request target.
///
/// `Ok(None)` when the target cannot form a URI at all.
pub(crate) fn rebuild_url<C: Connection + ?Sized>(
    conn: &C,
    headers: &Headers,
    target: &str,
) -> Result<Option<Uri>> {
    let scheme = if conn.is_secure() { "https" } else { "http" };
    let host = match headers.host() {
        Some(host) if host.contains(['/', '?', '#']) => {
            return Err(Error::InvalidHost(host.to_string()));
        }
        Some(host) => host.to_string(),
        None => conn.local_addr().to_string(),
    };

    let url = format!("{scheme}://{host}{target}");
    if url.len() >= MAX_URI_LEN {
        return Err(Error::UriTooLong { size: url.len(), limit: MAX_URI_LEN });
    }
    Ok(url.parse().ok())
}
