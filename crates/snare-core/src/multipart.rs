//! Form body decoding
//!
//! `application/x-www-form-urlencoded` bodies become [`Params`];
//! `multipart/form-data` bodies are split on their boundary into text fields
//! and [`HttpFile`]s. Part payloads are binary-safe: boundaries are located by
//! byte search, never by decoding the body as text.

use bytes::Bytes;
use log::{trace, warn};
use snare_cursor::{ByteCursor, SliceCursor};

use crate::form::{url_decode, Params};
use crate::parser::DOUBLE_CRLF;

/// Closing delimiter suffix that follows the last boundary
const CLOSE_SUFFIX: &[u8] = b"--\r\n";

/// How a request body should be decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormKind {
    UrlEncoded,
    Multipart { boundary: String },
    Other,
}

impl FormKind {
    /// Classify a `Content-Type` value
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let Some(content_type) = content_type else {
            return FormKind::Other;
        };

        let mut params = content_type.split(';');
        let main = params.next().unwrap_or("").trim();

        if main.eq_ignore_ascii_case("application/x-www-form-urlencoded") {
            return FormKind::UrlEncoded;
        }
        if !main.eq_ignore_ascii_case("multipart/form-data") {
            return FormKind::Other;
        }

        params
            .filter_map(|p| p.split_once('='))
            .find(|(k, _)| k.trim().eq_ignore_ascii_case("boundary"))
            .map(|(_, v)| v.trim().trim_matches('"'))
            .filter(|b| !b.is_empty())
            .map(|b| FormKind::Multipart { boundary: b.to_string() })
            .unwrap_or(FormKind::Other)
    }
}

/// Uploaded file extracted from a multipart body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpFile {
    /// Form field name
    pub name: String,
    /// Client-supplied filename
    pub filename: String,
    /// Declared content type of the part
    pub content_type: Option<String>,
    /// Raw payload
    pub data: Bytes,
}

impl HttpFile {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Extension of the filename, without the dot
    pub fn extension(&self) -> Option<&str> {
        self.filename
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty() && !ext.contains(['/', '\\']))
    }
}

/// Header block of one multipart part
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartHeader {
    pub name: String,
    pub filename: Option<String>,
    pub content_type: Option<String>,
}

impl PartHeader {
    /// Parse the header lines of a part
    pub fn parse(text: &str) -> Self {
        let mut header = PartHeader::default();

        for line in text.split("\r\n") {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            if key.eq_ignore_ascii_case("Content-Disposition") {
                for (param, arg) in disposition_params(value) {
                    if param.eq_ignore_ascii_case("name") {
                        header.name = arg;
                    } else if param.eq_ignore_ascii_case("filename") {
                        header.filename = Some(arg);
                    }
                }
            } else if key.eq_ignore_ascii_case("Content-Type") && !value.is_empty() {
                header.content_type = Some(value.to_string());
            }
        }

        header
    }

    /// A part is a file iff it carries a filename
    pub fn is_file(&self) -> bool {
        self.filename.is_some()
    }
}

/// `key=value` parameters after the disposition type. Quoted values may
/// contain `;` and backslash escapes.
fn disposition_params(value: &str) -> Vec<(String, String)> {
    let mut params = Vec::new();
    let mut rest = match value.split_once(';') {
        Some((_, rest)) => rest,
        None => return params,
    };

    loop {
        rest = rest.trim_start_matches([' ', '\t', ';']);
        if rest.is_empty() {
            break;
        }

        let Some(eq) = rest.find('=') else {
            break;
        };
        let key = rest[..eq].trim().to_string();
        rest = rest[eq + 1..].trim_start();

        if let Some(quoted) = rest.strip_prefix('"') {
            let mut arg = String::new();
            let mut chars = quoted.char_indices();
            let mut end = quoted.len();
            while let Some((i, c)) = chars.next() {
                match c {
                    '\\' => {
                        if let Some((_, escaped)) = chars.next() {
                            arg.push(escaped);
                        }
                    }
                    '"' => {
                        end = i + 1;
                        break;
                    }
                    _ => arg.push(c),
                }
            }
            params.push((key, arg));
            rest = &quoted[end..];
        } else {
            let end = rest.find(';').unwrap_or(rest.len());
            params.push((key, rest[..end].trim().to_string()));
            rest = &rest[end..];
        }
    }

    params
}

/// Decode `application/x-www-form-urlencoded` body bytes
pub fn decode_urlencoded(body: &[u8]) -> Params {
    Params::parse(&String::from_utf8_lossy(body))
}

/// Decode a `multipart/form-data` body.
///
/// Scanning stops quietly at the first malformed part (missing header
/// terminator or missing next boundary); parts decoded before it are kept.
pub fn decode_multipart(body: &[u8], boundary: &str) -> (Params, Vec<HttpFile>) {
    let mut form = Params::new();
    let mut files = Vec::new();

    if body.len() < boundary.len() {
        return (form, files);
    }

    let opening = format!("--{boundary}");
    let delimiter = format!("\r\n--{boundary}");
    let delimiter = delimiter.as_bytes();

    let mut cursor = SliceCursor::new(body);
    let Some(start) = cursor.find(opening.as_bytes()) else {
        warn!("multipart body has no opening boundary");
        return (form, files);
    };
    cursor.set_position(start + opening.len());

    let end = body.len().saturating_sub(CLOSE_SUFFIX.len());
    while cursor.position() < end {
        let Some(head_len) = cursor.find(DOUBLE_CRLF).map(|i| i + DOUBLE_CRLF.len()) else {
            warn!("multipart part at offset {} has no header terminator", cursor.position());
            break;
        };
        let head = PartHeader::parse(&cursor.read_text(head_len));

        let Some(data_len) = cursor.find(delimiter) else {
            warn!("multipart part {:?} has no closing boundary", head.name);
            break;
        };
        let data = cursor.read_bytes(data_len);
        trace!("multipart part {:?}: {} bytes", head.name, data.len());

        match head.filename {
            Some(filename) => files.push(HttpFile {
                name: head.name,
                filename,
                content_type: head.content_type,
                data,
            }),
            None => form.add(head.name, url_decode(&data)),
        }

        cursor.set_position(cursor.position() + delimiter.len());
    }

    (form, files)
}
