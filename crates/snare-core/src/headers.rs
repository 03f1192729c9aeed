//! Request header collection
//!
//! Ordered, case-insensitive multimap. When a name repeats, [`Headers::get`]
//! returns the first occurrence; [`Headers::get_all`] returns all of them.

use smallvec::SmallVec;
use std::str::FromStr;

/// Request headers (stack-allocated for small header counts)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: SmallVec<[(String, String); 16]>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header, keeping earlier values with the same name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// First value for `name` (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `name`, in arrival order
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Parse the first value for `name`; `None` if absent or unparsable
    pub fn parse<T: FromStr>(&self, name: &str) -> Option<T> {
        self.get(name).and_then(|v| v.trim().parse().ok())
    }

    /// Parse the first value for `name`, falling back to `default`
    pub fn parse_or<T: FromStr>(&self, name: &str, default: T) -> T {
        self.parse(name).unwrap_or(default)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Declared body length; absent or unparsable counts as 0
    pub fn content_length(&self) -> usize {
        self.parse_or("Content-Length", 0)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.get("Content-Type")
    }

    /// Host header, ignoring an empty value
    pub fn host(&self) -> Option<&str> {
        self.get("Host").filter(|h| !h.is_empty())
    }
}

impl FromIterator<(String, String)> for Headers {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type", "application/json");
        headers.insert("X-Tag", "one");
        headers.insert("x-tag", "two");
        headers.insert("Content-Length", " 42 ");
        headers
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let headers = sample();
        assert_eq!(headers.get("content-type"), Some("application/json"));
        assert_eq!(headers.get("CONTENT-TYPE"), Some("application/json"));
        assert!(headers.contains("x-TAG"));
        assert!(!headers.contains("Accept"));
    }

    #[test]
    fn test_first_duplicate_wins() {
        let headers = sample();
        assert_eq!(headers.get("X-Tag"), Some("one"));
        assert_eq!(headers.get_all("X-TAG").collect::<Vec<_>>(), vec!["one", "two"]);
    }

    #[test]
    fn test_typed_access() {
        let headers = sample();
        assert_eq!(headers.parse::<u64>("Content-Length"), Some(42));
        assert_eq!(headers.parse::<u64>("Content-Type"), None);
        assert_eq!(headers.parse::<u64>("Missing"), None);
        assert_eq!(headers.parse_or::<i32>("Missing", -1), -1);
        assert_eq!(headers.content_length(), 42);
    }

    #[test]
    fn test_content_length_defaults_to_zero() {
        let mut headers = Headers::new();
        assert_eq!(headers.content_length(), 0);
        headers.insert("Content-Length", "-5");
        assert_eq!(headers.content_length(), 0);
    }

    #[test]
    fn test_order_preserved() {
        let headers = sample();
        let names: Vec<_> = headers.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["Content-Type", "X-Tag", "x-tag", "Content-Length"]);
        assert_eq!(headers.len(), 4);
    }

    #[test]
    fn test_empty_host_ignored() {
        let mut headers = Headers::new();
        headers.insert("Host", "");
        assert_eq!(headers.host(), None);

        let headers: Headers = vec![("host".to_string(), "example.com".to_string())]
            .into_iter()
            .collect();
        assert_eq!(headers.host(), Some("example.com"));
    }
}
