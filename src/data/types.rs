//! Relationship data types
//!
//! Raw records as read from JSON, the node table, and the cleaned
//! string-typed triples consumed by the graph builder.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Columns every relationship record is expected to carry, in canonical order
pub const REQUIRED_COLUMNS: [&str; 5] = ["head", "head_type", "relation", "tail", "tail_type"];

/// Placeholder used for missing entity types
pub const UNKNOWN_TYPE: &str = "Unknown";

/// One relationship row before cleaning.
///
/// Each field holds the original JSON scalar; JSON `null` and missing keys
/// are both represented as `None`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    pub head: Option<Value>,
    pub head_type: Option<Value>,
    pub relation: Option<Value>,
    pub tail: Option<Value>,
    pub tail_type: Option<Value>,
}

impl Record {
    /// Build a record from a JSON object, ignoring unrelated keys
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let field = |name: &str| object.get(name).filter(|v| !v.is_null()).cloned();
        Self {
            head: field("head"),
            head_type: field("head_type"),
            relation: field("relation"),
            tail: field("tail"),
            tail_type: field("tail_type"),
        }
    }

    /// Convenience constructor used by tests and the graph-format loader
    pub fn new(head: &str, head_type: &str, relation: &str, tail: &str, tail_type: &str) -> Self {
        Self {
            head: Some(Value::from(head)),
            head_type: Some(Value::from(head_type)),
            relation: Some(Value::from(relation)),
            tail: Some(Value::from(tail)),
            tail_type: Some(Value::from(tail_type)),
        }
    }
}

/// Entry of the optional node table (graph-format input)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeInfo {
    /// Node identifier
    pub id: String,
    /// Entity type, if the source declared one
    pub entity_type: Option<String>,
    /// Free-form attributes carried through for reporting
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl NodeInfo {
    /// Create a node-table entry
    pub fn new(id: impl Into<String>, entity_type: Option<&str>) -> Self {
        Self {
            id: id.into(),
            entity_type: entity_type.map(str::to_string),
            attributes: Map::new(),
        }
    }
}

/// Everything read from one input source
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Human readable source name (usually the path)
    pub source: String,
    /// Relationship rows
    pub records: Vec<Record>,
    /// Union of keys seen across all record objects
    pub columns: BTreeSet<String>,
    /// Node table keyed by id
    pub nodes: BTreeMap<String, NodeInfo>,
}

impl Dataset {
    /// Required columns absent from every record
    pub fn missing_columns(&self) -> Vec<String> {
        REQUIRED_COLUMNS
            .iter()
            .filter(|c| !self.columns.contains(**c))
            .map(|c| c.to_string())
            .collect()
    }

    /// True when neither records nor nodes were loaded
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.nodes.is_empty()
    }
}

/// A cleaned relationship: every field present and string-typed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub head: String,
    pub head_type: String,
    pub relation: String,
    pub tail: String,
    pub tail_type: String,
}

impl Triple {
    pub fn new(head: &str, head_type: &str, relation: &str, tail: &str, tail_type: &str) -> Self {
        Self {
            head: head.to_string(),
            head_type: head_type.to_string(),
            relation: relation.to_string(),
            tail: tail.to_string(),
            tail_type: tail_type.to_string(),
        }
    }
}

/// Render a JSON scalar the way it should appear as an entity name
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
