//! Nested translation documents and flattening into dot-joined keys

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Flat `key -> text` table for one language
pub type FlatTable = HashMap<String, String>;

/// A nested translation document.
///
/// Object nodes become [`TranslationNode::Branch`]; everything else
/// (strings, numbers, booleans, null, arrays) is stringified into a
/// [`TranslationNode::Leaf`] at construction time, so flattening only has
/// two cases to handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationNode {
    /// Object node keyed by path segment
    Branch(BTreeMap<String, TranslationNode>),
    /// Scalar leaf holding its string form
    Leaf(String),
}

impl TranslationNode {
    /// An empty object node
    pub fn empty() -> Self {
        Self::Branch(BTreeMap::new())
    }

    /// Build a branch from `(segment, node)` pairs
    pub fn branch<K, N, I>(entries: I) -> Self
    where
        K: Into<String>,
        N: Into<TranslationNode>,
        I: IntoIterator<Item = (K, N)>,
    {
        Self::Branch(entries.into_iter().map(|(k, n)| (k.into(), n.into())).collect())
    }

    /// Flatten into dot-joined keys.
    ///
    /// A root leaf has no path and contributes nothing; so does any branch
    /// without leaf descendants.
    pub fn flatten(&self) -> FlatTable {
        let mut out = FlatTable::new();
        if let Self::Branch(children) = self {
            flatten_into(children, "", &mut out);
        }
        out
    }

    /// Number of leaves under this node
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Branch(children) => children.values().map(Self::leaf_count).sum(),
        }
    }
}

fn flatten_into(children: &BTreeMap<String, TranslationNode>, prefix: &str, out: &mut FlatTable) {
    for (segment, node) in children {
        let key = if prefix.is_empty() {
            segment.clone()
        } else {
            format!("{prefix}.{segment}")
        };

        match node {
            TranslationNode::Branch(grandchildren) => flatten_into(grandchildren, &key, out),
            TranslationNode::Leaf(text) => {
                out.insert(key, text.clone());
            }
        }
    }
}

/// String form of a non-object JSON value.
///
/// `null` reads as `"null"`. Arrays join their items with `,`, and an object
/// inside an array is written as compact JSON.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(scalar_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

impl From<Value> for TranslationNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Branch(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect()),
            other => Self::Leaf(scalar_text(&other)),
        }
    }
}

impl From<&str> for TranslationNode {
    fn from(text: &str) -> Self {
        Self::Leaf(text.to_string())
    }
}

impl From<String> for TranslationNode {
    fn from(text: String) -> Self {
        Self::Leaf(text)
    }
}

impl From<i64> for TranslationNode {
    fn from(n: i64) -> Self {
        Self::Leaf(n.to_string())
    }
}

impl From<f64> for TranslationNode {
    fn from(n: f64) -> Self {
        Self::Leaf(n.to_string())
    }
}

impl From<bool> for TranslationNode {
    fn from(b: bool) -> Self {
        Self::Leaf(b.to_string())
    }
}

impl From<FlatTable> for TranslationNode {
    fn from(table: FlatTable) -> Self {
        Self::Branch(table.into_iter().map(|(k, v)| (k, Self::Leaf(v))).collect())
    }
}

impl Default for TranslationNode {
    fn default() -> Self {
        Self::empty()
    }
}

// Any self-describing format (JSON, YAML, TOML) goes through `serde_json::Value`.
impl<'de> Deserialize<'de> for TranslationNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from)
    }
}

impl Serialize for TranslationNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Branch(children) => children.serialize(serializer),
            Self::Leaf(text) => serializer.serialize_str(text),
        }
    }
}
