//! Ordered query parameters with omit-when-absent semantics.

use std::fmt;

/// Ordered `key=value` pairs for a single request.
///
/// Optional values go through [`QueryParams::push_opt`], which drops `None`
/// and empty strings so the key never reaches the wire. The service treats
/// `date=` differently from a missing `date`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Push only when a non-empty value is present.
    pub fn push_opt<V: ToString>(&mut self, key: impl Into<String>, value: Option<V>) {
        if let Some(value) = value {
            let value = value.to_string();
            if !value.is_empty() {
                self.pairs.push((key.into(), value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
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

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }
}

impl fmt::Display for QueryParams {
    /// Percent-encoded `k=v&k=v`, in insertion order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(
                f,
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_empty_optionals_are_dropped() {
        let mut params = QueryParams::new();
        params.push("force", "leicestershire");
        params.push_opt("date", None::<&str>);
        params.push_opt("category", Some(""));
        assert_eq!(params.len(), 1);
        assert!(!params.contains_key("date"));
        assert!(!params.contains_key("category"));
        assert_eq!(params.to_string(), "force=leicestershire");
    }

    #[test]
    fn present_optionals_keep_insertion_order() {
        let mut params = QueryParams::new();
        params.push("lat", "52.629729");
        params.push("lng", "-1.131592");
        params.push_opt("date", Some("2022-02"));
        assert_eq!(params.to_string(), "lat=52.629729&lng=-1.131592&date=2022-02");
    }

    #[test]
    fn values_are_percent_encoded() {
        let mut params = QueryParams::new();
        params.push("poly", "52.268,0.543:52.794,0.238");
        assert_eq!(params.to_string(), "poly=52.268%2C0.543%3A52.794%2C0.238");
    }

    #[test]
    fn empty_params_render_empty() {
        assert_eq!(QueryParams::new().to_string(), "");
        assert!(QueryParams::new().is_empty());
    }
}
