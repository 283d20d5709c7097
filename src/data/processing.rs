//! Validation, cleaning and normalization of relationship records

use std::collections::{BTreeMap, HashSet};

use serde_json::Value;
use tracing::{debug, warn};

use super::errors::DataError;
use super::types::{value_to_string, Dataset, NodeInfo, Record, Triple, UNKNOWN_TYPE};

/// Check that a dataset can be turned into a graph.
///
/// Node-only datasets are accepted; a dataset with records must declare all
/// required columns somewhere.
pub fn validate_data(dataset: &Dataset) -> Result<(), DataError> {
    if dataset.is_empty() {
        warn!(source = %dataset.source, "Input data is empty");
        return Err(DataError::NoData);
    }

    if dataset.records.is_empty() {
        return Ok(());
    }

    let missing = dataset.missing_columns();
    if !missing.is_empty() {
        warn!(source = %dataset.source, ?missing, "Data is missing required columns");
        return Err(DataError::MissingColumns(missing));
    }

    Ok(())
}

/// Drop incomplete rows, fill missing types and remove duplicates.
///
/// Rows lacking `head`, `relation` or `tail` (absent or `null`) are
/// dropped; empty strings are kept. Missing types become `"Unknown"`. The first occurrence of each
/// duplicate row is kept.
pub fn clean_data(records: &[Record]) -> Vec<Triple> {
    let mut seen = HashSet::new();
    let mut cleaned = Vec::with_capacity(records.len());
    let mut dropped_incomplete = 0usize;

    for record in records {
        let (Some(head), Some(relation), Some(tail)) = (
            essential(&record.head),
            essential(&record.relation),
            essential(&record.tail),
        ) else {
            dropped_incomplete += 1;
            continue;
        };

        let triple = Triple {
            head,
            head_type: type_or_unknown(&record.head_type),
            relation,
            tail,
            tail_type: type_or_unknown(&record.tail_type),
        };

        if seen.insert(triple.clone()) {
            cleaned.push(triple);
        }
    }

    debug!(
        input = records.len(),
        kept = cleaned.len(),
        dropped_incomplete,
        "Cleaned relationship records"
    );
    cleaned
}

/// Lowercase and trim entity names and types; relations are left as-is
pub fn normalize_entities(triples: Vec<Triple>) -> Vec<Triple> {
    triples
        .into_iter()
        .map(|t| Triple {
            head: normalize(&t.head),
            head_type: normalize(&t.head_type),
            relation: t.relation,
            tail: normalize(&t.tail),
            tail_type: normalize(&t.tail_type),
        })
        .collect()
}

/// Apply entity normalization to a node table so it lines up with normalized edges
pub fn normalize_nodes(nodes: BTreeMap<String, NodeInfo>) -> BTreeMap<String, NodeInfo> {
    let mut normalized = BTreeMap::new();
    for (_, mut info) in nodes {
        info.id = normalize(&info.id);
        info.entity_type = info.entity_type.as_deref().map(normalize);
        if info.id.is_empty() {
            continue;
        }
        normalized.entry(info.id.clone()).or_insert(info);
    }
    normalized
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

fn essential(value: &Option<Value>) -> Option<String> {
    value.as_ref().map(value_to_string)
}

fn type_or_unknown(value: &Option<Value>) -> String {
    value
        .as_ref()
        .map(value_to_string)
        .unwrap_or_else(|| UNKNOWN_TYPE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        Record::from_object(value.as_object().unwrap())
    }

    #[test]
    fn test_validate_empty_dataset() {
        assert_eq!(validate_data(&Dataset::default()), Err(DataError::NoData));
    }

    #[test]
    fn test_validate_node_only_dataset() {
        let mut dataset = Dataset::default();
        dataset.nodes.insert("a".into(), NodeInfo::new("a", None));
        assert!(validate_data(&dataset).is_ok());
    }

    #[test]
    fn test_validate_missing_columns() {
        let mut dataset = Dataset::default();
        dataset.records.push(record(json!({"head": "a", "tail": "b"})));
        dataset.columns.extend(["head".to_string(), "tail".to_string()]);

        let err = validate_data(&dataset).unwrap_err();
        assert_eq!(
            err,
            DataError::MissingColumns(vec![
                "head_type".into(),
                "relation".into(),
                "tail_type".into()
            ])
        );
    }

    #[test]
    fn test_clean_drops_incomplete_rows() {
        let records = vec![
            record(json!({"head": "a", "relation": "r", "tail": "b"})),
            record(json!({"head": null, "relation": "r", "tail": "b"})),
            record(json!({"head": "a", "tail": "b"})),
        ];
        let cleaned = clean_data(&records);
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].head, "a");
    }

    #[test]
    fn test_clean_keeps_blank_strings() {
        let records = vec![
            Record::new("", "Person", "knows", "Bob", "Person"),
            record(json!({"head": "a", "relation": "  ", "tail": "b"})),
        ];
        let cleaned = clean_data(&records);
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned[0].head, "");
        assert_eq!(cleaned[1].relation, "  ");
    }

    #[test]
    fn test_clean_fills_unknown_types() {
        let records = vec![record(json!({"head": "a", "relation": "r", "tail": "b", "tail_type": "Place"}))];
        let cleaned = clean_data(&records);
        assert_eq!(cleaned[0].head_type, "Unknown");
        assert_eq!(cleaned[0].tail_type, "Place");
    }

    #[test]
    fn test_clean_stringifies_scalars() {
        let records = vec![record(json!({"head": 1, "relation": true, "tail": 2.5}))];
        let cleaned = clean_data(&records);
        assert_eq!(cleaned[0].head, "1");
        assert_eq!(cleaned[0].relation, "true");
        assert_eq!(cleaned[0].tail, "2.5");
    }

    #[test]
    fn test_clean_removes_duplicates_keeping_order() {
        let records = vec![
            Record::new("b", "t", "r", "c", "t"),
            Record::new("a", "t", "r", "b", "t"),
            Record::new("b", "t", "r", "c", "t"),
        ];
        let cleaned = clean_data(&records);
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned[0].head, "b");
        assert_eq!(cleaned[1].head, "a");
    }

    #[test]
    fn test_normalize_lowercases_entities_not_relation() {
        let triples = vec![Triple::new(" Alice ", "Person", "Works_At", "ACME", " Organization")];
        let normalized = normalize_entities(triples);
        assert_eq!(
            normalized[0],
            Triple::new("alice", "person", "Works_At", "acme", "organization")
        );
    }

    #[test]
    fn test_normalize_keeps_case_variants_as_separate_rows() {
        let triples = vec![
            Triple::new("Alice", "person", "knows", "bob", "person"),
            Triple::new("alice", "person", "knows", "bob", "person"),
        ];
        assert_eq!(normalize_entities(triples).len(), 2);
    }

    #[test]
    fn test_normalize_nodes() {
        let mut nodes = BTreeMap::new();
        nodes.insert(" Alice".to_string(), NodeInfo::new(" Alice", Some("Person")));
        nodes.insert("  ".to_string(), NodeInfo::new("  ", None));
        let normalized = normalize_nodes(nodes);
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized["alice"].entity_type.as_deref(), Some("person"));
    }
}
