//! Query string and form parameters

use percent_encoding::percent_decode;

/// Ordered name/value bag. Names may repeat; lookups ignore ASCII case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `a=1&b=2` pairs with URL decoding (`+` is a space)
    ///
    /// # Example
    /// ```
    /// use snare_core::Params;
    ///
    /// let params = Params::parse("name=J%C3%BCrgen&tag=a&tag=b+c");
    /// assert_eq!(params.get("name"), Some("Jürgen"));
    /// assert_eq!(params.get_all("tag").collect::<Vec<_>>(), vec!["a", "b c"]);
    /// ```
    pub fn parse(input: &str) -> Self {
        form_urlencoded::parse(input.as_bytes())
            .into_owned()
            .collect()
    }

    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    /// First value for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `name`, in arrival order
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Serialize as `application/x-www-form-urlencoded`
    pub fn to_urlencoded(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

impl FromIterator<(String, String)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

/// URL-decode raw bytes as UTF-8 (`+` is a space, `%XX` escapes)
pub fn url_decode(bytes: &[u8]) -> String {
    let spaced: Vec<u8> = bytes
        .iter()
        .map(|&b| if b == b'+' { b' ' } else { b })
        .collect();
    percent_decode(&spaced).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_order_and_duplicates() {
        let params = Params::parse("b=2&a=1&b=3");
        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("b", "2"), ("a", "1"), ("b", "3")]);
        assert_eq!(params.get("b"), Some("2"));
        assert_eq!(params.get_all("b").collect::<Vec<_>>(), vec!["2", "3"]);
    }

    #[test]
    fn test_parse_decodes() {
        let params = Params::parse("q=hello+world&path=%2Fa%2Fb&empty=&flag");
        assert_eq!(params.get("q"), Some("hello world"));
        assert_eq!(params.get("path"), Some("/a/b"));
        assert_eq!(params.get("empty"), Some(""));
        assert_eq!(params.get("flag"), Some(""));
    }

    #[test]
    fn test_parse_empty() {
        assert!(Params::parse("").is_empty());
    }

    #[test]
    fn test_lookup_ignores_case() {
        let params = Params::parse("Token=abc");
        assert_eq!(params.get("token"), Some("abc"));
        assert!(params.contains("TOKEN"));
    }

    #[test]
    fn test_urlencoded_round_trip() {
        let mut params = Params::new();
        params.add("name", "Ada Lovelace");
        params.add("note", "a&b=c");
        params.add("name", "Grace");
        params.add("emoji", "✓");

        let encoded = params.to_urlencoded();
        assert_eq!(Params::parse(&encoded), params);
    }

    #[test]
    fn test_url_decode() {
        assert_eq!(url_decode(b"a+b%20c"), "a b c");
        assert_eq!(url_decode(b"100%"), "100%");
        assert_eq!(url_decode(b"%E2%9C%93"), "✓");
        assert_eq!(url_decode(b"plain"), "plain");
    }
}
