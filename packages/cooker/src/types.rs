//! Core data types for cooked records.
//!
//! Everything here serializes to the JSON shape consumers expect: leaves
//! become arrays, branches become objects, line records become objects with
//! `name`, `description`, `startYr` and `endYr` keys.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Fields of one record, keyed by field tag name, in document order.
pub type FieldMap = IndexMap<String, FieldValue>;

/// All cooked records, keyed by record code, in document order.
///
/// A code that is replaced keeps the position of its first occurrence.
pub type RecordMap = IndexMap<String, FieldMap>;

/// One structured line of a leaf's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRecord {
    /// Normalized name (lowercase, `_` for punctuation, `|` between aliases).
    pub name: String,

    /// Free-text description from a `[DESCR ...]` attribute or comment.
    pub description: String,

    /// Start of the validity interval (YYYYMMDD), or empty.
    #[serde(rename = "startYr")]
    pub start_yr: String,

    /// End of the validity interval (YYYYMMDD), or empty.
    #[serde(rename = "endYr")]
    pub end_yr: String,
}

impl LineRecord {
    /// Create a new line record.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        start_yr: impl Into<String>,
        end_yr: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            start_yr: start_yr.into(),
            end_yr: end_yr.into(),
        }
    }
}

/// Content extracted from a leaf node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LeafValue {
    /// Normalized tokens (token mode).
    Tokens(Vec<String>),
    /// Structured line records (record mode).
    Records(Vec<LineRecord>),
    /// Trimmed, non-blank raw lines (line mode).
    ///
    /// Serializes like [`LeafValue::Tokens`]; a string array always
    /// deserializes as `Tokens`.
    Lines(Vec<String>),
}

impl LeafValue {
    /// Number of tokens or records.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Tokens(tokens) => tokens.len(),
            Self::Records(records) => records.len(),
            Self::Lines(lines) => lines.len(),
        }
    }

    /// Whether the leaf produced nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Value of a field: free text (leaf) or further nested fields (branch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Extracted content of a single-child node.
    Leaf(LeafValue),
    /// Nested fields of a node with zero or several children.
    Branch(FieldMap),
}

impl FieldValue {
    /// Get the leaf content, if this is a leaf.
    #[must_use]
    pub fn as_leaf(&self) -> Option<&LeafValue> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Branch(_) => None,
        }
    }

    /// Get the nested fields, if this is a branch.
    #[must_use]
    pub fn as_branch(&self) -> Option<&FieldMap> {
        match self {
            Self::Leaf(_) => None,
            Self::Branch(fields) => Some(fields),
        }
    }

    /// Get the line records of a record-mode leaf.
    #[must_use]
    pub fn records(&self) -> Option<&[LineRecord]> {
        match self {
            Self::Leaf(LeafValue::Records(records)) => Some(records),
            _ => None,
        }
    }

    /// Get the tokens of a token-mode leaf.
    #[must_use]
    pub fn tokens(&self) -> Option<&[String]> {
        match self {
            Self::Leaf(LeafValue::Tokens(tokens)) => Some(tokens),
            _ => None,
        }
    }

    /// Get the lines of a line-mode leaf.
    #[must_use]
    pub fn lines(&self) -> Option<&[String]> {
        match self {
            Self::Leaf(LeafValue::Lines(lines)) => Some(lines),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_line_record_json_keys() {
        let record = LineRecord::new("foo", "", "19900101", "20200101");
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(
            value,
            json!({
                "name": "foo",
                "description": "",
                "startYr": "19900101",
                "endYr": "20200101"
            })
        );
    }

    #[test]
    fn test_field_value_serializes_untagged() {
        let mut nested = FieldMap::new();
        nested.insert(
            "short".to_string(),
            FieldValue::Leaf(LeafValue::Tokens(vec!["nl".to_string()])),
        );
        nested.insert("empty".to_string(), FieldValue::Branch(FieldMap::new()));
        let value = serde_json::to_value(FieldValue::Branch(nested)).unwrap();

        assert_eq!(value, json!({"empty": {}, "short": ["nl"]}));
    }

    #[test]
    fn test_accessors() {
        let leaf = FieldValue::Leaf(LeafValue::Records(vec![LineRecord::new("a", "", "", "")]));
        assert!(leaf.as_leaf().is_some());
        assert!(leaf.as_branch().is_none());
        assert_eq!(leaf.records().map(<[_]>::len), Some(1));
        assert!(leaf.tokens().is_none());

        let branch = FieldValue::Branch(FieldMap::new());
        assert!(branch.as_leaf().is_none());
        assert!(branch.as_branch().is_some_and(IndexMap::is_empty));
    }

    #[test]
    fn test_field_order_is_insertion_order() {
        let mut fields = FieldMap::new();
        for tag in ["zeta", "alpha", "mid"] {
            fields.insert(tag.to_string(), FieldValue::Branch(FieldMap::new()));
        }
        let value = serde_json::to_string(&FieldValue::Branch(fields)).unwrap();
        assert_eq!(value, r#"{"zeta":{},"alpha":{},"mid":{}}"#);
    }

    #[test]
    fn test_lines_serialize_as_strings() {
        let value = FieldValue::Leaf(LeafValue::Lines(vec!["FOO [X]".to_string()]));
        assert_eq!(serde_json::to_value(&value).unwrap(), json!(["FOO [X]"]));
        assert_eq!(value.lines().map(<[_]>::len), Some(1));
        assert!(value.tokens().is_none());
    }

    #[test]
    fn test_leaf_len() {
        assert!(LeafValue::Tokens(Vec::new()).is_empty());
        assert_eq!(LeafValue::Tokens(vec!["a".into(), "a".into()]).len(), 2);
    }
}
