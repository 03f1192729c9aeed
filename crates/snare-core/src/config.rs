//! Parser limits
//!
//! Both limits are off by default, so a default parser accepts any header
//! or body size and waits for however many bytes are declared.

/// Parser configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum header block size in bytes (including the CRLFCRLF)
    pub max_header_size: Option<usize>,
    /// Maximum declared Content-Length in bytes
    pub max_body_size: Option<usize>,
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the header block size
    pub fn max_header_size(mut self, size: usize) -> Self {
        self.max_header_size = Some(size);
        self
    }

    /// Limit the declared body size
    pub fn max_body_size(mut self, size: usize) -> Self {
        self.max_body_size = Some(size);
        self
    }
}

/// Parse size from string (e.g., "10mb", "1gb", "500kb", "64")
pub fn parse_size(s: &str) -> Option<usize> {
    let s = s.trim().to_lowercase();

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix("gb") {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("mb") {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("kb") {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix('b') {
        (n, 1)
    } else {
        (s.as_str(), 1)
    };

    let num: usize = num_str.trim().parse().ok()?;
    num.checked_mul(multiplier)
}
