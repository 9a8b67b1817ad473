//! Query parameter set sent to the list-fetch collaborator.

use serde::ser::{Serialize, SerializeSeq, Serializer};

/// Key carrying the trimmed search term.
pub const SEARCH_KEY: &str = "search";
/// Key carrying the stringified category identifier.
pub const CATEGORY_KEY: &str = "category_id";

/// Ordered `key=value` pairs for a list request.
///
/// Keys keep insertion order and a pair with an empty value is never
/// stored, so serializing this never emits `search=` or `category_id=`.
/// It serializes as a sequence of `(key, value)` tuples, the shape HTTP
/// clients accept for URL query strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// An empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair, skipping it when `value` is empty.
    pub fn with(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    /// Append a pair, skipping it when `value` is empty. Returns whether the
    /// pair was stored.
    pub fn push(&mut self, key: &'static str, value: impl Into<String>) -> bool {
        let value = value.into();
        if value.is_empty() {
            return false;
        }
        self.pairs.push((key, value));
        true
    }

    /// Value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The `search` value, if present.
    pub fn search(&self) -> Option<&str> {
        self.get(SEARCH_KEY)
    }

    /// The `category_id` value, if present.
    pub fn category_id(&self) -> Option<&str> {
        self.get(CATEGORY_KEY)
    }

    /// Iterate pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.pairs.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl Serialize for QueryParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.pairs.len()))?;
        for (key, value) in &self.pairs {
            seq.serialize_element(&(key, value))?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_are_never_stored() {
        let params = QueryParams::new().with(SEARCH_KEY, "").with(CATEGORY_KEY, "");
        assert!(params.is_empty());
    }

    #[test]
    fn keys_keep_insertion_order() {
        let params = QueryParams::new()
            .with(SEARCH_KEY, "cats")
            .with(CATEGORY_KEY, "3");
        let keys: Vec<_> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["search", "category_id"]);
        assert_eq!(params.search(), Some("cats"));
        assert_eq!(params.category_id(), Some("3"));
    }

    #[test]
    fn serializes_as_pair_sequence() {
        let params = QueryParams::new()
            .with(SEARCH_KEY, "two words")
            .with(CATEGORY_KEY, "7");
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(
            value,
            serde_json::json!([["search", "two words"], ["category_id", "7"]])
        );
    }
}
