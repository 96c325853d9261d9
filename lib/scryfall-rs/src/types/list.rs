use crate::{
    CardIdentifier,
    ObjectKind,
};
use std::collections::HashMap;
use url::Url;

/// A possibly paginated list of api objects
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct List<T> {
    /// Always `list`
    pub object: ObjectKind,

    /// The objects in this page
    pub data: Vec<T>,

    /// Whether there is a page after this one
    #[serde(default)]
    pub has_more: bool,

    /// The uri of the next page, if there is one
    pub next_page: Option<Url>,

    /// The total number of cards across all pages, if this is a card list
    pub total_cards: Option<u64>,

    /// Non-fatal issues the api found with the request
    #[serde(default)]
    pub warnings: Vec<String>,

    /// Identifiers that did not match a card.
    ///
    /// Only sent by the collection endpoint.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub not_found: Vec<CardIdentifier>,

    /// Unknown data
    #[serde(flatten)]
    pub unknown: HashMap<String, serde_json::Value>,
}

impl<T> List<T> {
    /// Make a new, empty, single page list.
    pub fn new() -> Self {
        Self {
            object: ObjectKind::List,
            data: Vec::new(),
            has_more: false,
            next_page: None,
            total_cards: None,
            warnings: Vec::new(),
            not_found: Vec::new(),
            unknown: HashMap::new(),
        }
    }

    /// Append the next page to this one.
    ///
    /// Data, warnings and not-found identifiers are appended in order.
    /// The pagination state is taken from `other`.
    pub fn merge(&mut self, other: List<T>) {
        self.data.extend(other.data);
        for warning in other.warnings {
            if !self.warnings.contains(&warning) {
                self.warnings.push(warning);
            }
        }
        self.not_found.extend(other.not_found);
        self.has_more = other.has_more;
        self.next_page = other.next_page;
        self.total_cards = other.total_cards.or(self.total_cards);
    }

    /// The number of objects in this page
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether this page is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn merge_pages() {
        let mut first: List<u32> = serde_json::from_str(
            r#"{
                "object": "list",
                "data": [1, 2],
                "has_more": true,
                "next_page": "https://api.scryfall.com/cards/search?page=2&q=c",
                "total_cards": 3,
                "warnings": ["a"]
            }"#,
        )
        .unwrap();
        let second: List<u32> = serde_json::from_str(
            r#"{
                "object": "list",
                "data": [3],
                "has_more": false,
                "warnings": ["a", "b"]
            }"#,
        )
        .unwrap();

        first.merge(second);

        assert_eq!(first.data, [1, 2, 3]);
        assert!(!first.has_more);
        assert!(first.next_page.is_none());
        assert_eq!(first.total_cards, Some(3));
        assert_eq!(first.warnings, ["a", "b"]);
    }
}
