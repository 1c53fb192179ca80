use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ListError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u64);
    };
}

id_newtype!(RowId);

/// A single list entry. Identity is exact text equality; there are no ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Item(String);

impl Item {
    pub fn new(text: impl Into<String>) -> Result<Self, ListError> {
        let text = text.into();
        if text.is_empty() {
            return Err(ListError::EmptyInput);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring match. An empty query matches everything.
    pub fn matches_filter(&self, query: &str) -> bool {
        self.0.to_lowercase().contains(&query.to_lowercase())
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Item {
    type Error = ListError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Item> for String {
    fn from(value: Item) -> Self {
        value.0
    }
}

impl PartialEq<str> for Item {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Item {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Insertion-ordered items, persisted as a whole.
pub type ItemCollection = Vec<Item>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_text() {
        assert_eq!(Item::new(""), Err(ListError::EmptyInput));
    }

    #[test]
    fn whitespace_is_not_empty() {
        assert_eq!(Item::new(" ").expect("item").as_str(), " ");
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let item = Item::new("Eggs").expect("item");
        assert!(item.matches_filter("egg"));
        assert!(item.matches_filter("GS"));
        assert!(item.matches_filter(""));
        assert!(!item.matches_filter("milk"));
    }

    #[test]
    fn serializes_as_plain_json_string() {
        let items = vec![Item::new("Milk").expect("item"), Item::new("Eggs").expect("item")];
        let json = serde_json::to_string(&items).expect("serialize");
        assert_eq!(json, r#"["Milk","Eggs"]"#);
    }

    #[test]
    fn refuses_to_deserialize_empty_entries() {
        let parsed = serde_json::from_str::<ItemCollection>(r#"["Milk",""]"#);
        assert!(parsed.is_err());
    }
}
