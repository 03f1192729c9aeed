//! HTTP Method enum
//!
//! The verbs the server implements, plus the wider token table the sniffer
//! uses to tell HTTP-shaped input from garbage.

use crate::{Error, Result};

/// HTTP Method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Method {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
    Head = 4,
    Options = 5,
    Trace = 6,
}

/// Method tokens recognized as HTTP while sniffing.
///
/// Superset of the supported methods: `PATCH` and `CONNECT` are valid HTTP
/// but not implemented, so they reach the grammar stage and fail with
/// [`Error::UnsupportedMethod`] instead of being reported as not-HTTP.
pub const RECOGNIZED_TOKENS: &[&str] = &[
    "GET", "POST", "PUT", "DELETE", "HEAD", "OPTIONS", "TRACE", "PATCH", "CONNECT",
];

/// Length of the longest recognized token
pub const MAX_TOKEN_LEN: usize = 7;

impl Method {
    pub const ALL: [Method; 7] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Delete,
        Method::Head,
        Method::Options,
        Method::Trace,
    ];

    /// Parse a method token (case-insensitive)
    pub fn from_token(token: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(token))
            .ok_or_else(|| Error::UnsupportedMethod(token.to_string()))
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Trace => "TRACE",
        }
    }
}

/// Whether `candidate` is a case-insensitive prefix of a recognized token
pub(crate) fn is_token_prefix(candidate: &[u8]) -> bool {
    RECOGNIZED_TOKENS.iter().any(|token| {
        token.len() >= candidate.len()
            && token.as_bytes()[..candidate.len()].eq_ignore_ascii_case(candidate)
    })
}

impl std::str::FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_token(s)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
