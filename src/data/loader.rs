//! JSON loader
//!
//! Reads relationship data from disk. Two document shapes are accepted:
//!
//! - a list of records `[{"head", "head_type", "relation", "tail", "tail_type"}, ...]`
//! - a graph document `{"nodes": [{"id", "type"}], "edges": [{"from", "to", "label"}]}`

use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::errors::DataError;
use super::types::{value_to_string, Dataset, NodeInfo, Record, REQUIRED_COLUMNS};

/// Load a dataset from a JSON file
pub fn load_json_data(path: &Path) -> Result<Dataset, DataError> {
    if !path.exists() {
        return Err(DataError::NotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(DataError::NotAFile(path.to_path_buf()));
    }

    let source = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|e| DataError::Io {
        source_name: source.clone(),
        message: e.to_string(),
    })?;
    let content = String::from_utf8(bytes).map_err(|_| DataError::Encoding(source.clone()))?;

    parse_json_data(&content, &source)
}

/// Parse a dataset from JSON text; `source` names the origin in messages
pub fn parse_json_data(content: &str, source: &str) -> Result<Dataset, DataError> {
    if content.trim().is_empty() {
        return Err(DataError::EmptyInput(source.to_string()));
    }

    let value: Value = serde_json::from_str(content).map_err(|e| DataError::Parse {
        source_name: source.to_string(),
        message: e.to_string(),
    })?;

    let dataset = match value {
        Value::Array(items) => parse_records(items, source),
        Value::Object(object) if object.contains_key("nodes") || object.contains_key("edges") => {
            parse_graph_document(&object, source)
        }
        _ => return Err(DataError::NotARecordList(source.to_string())),
    };

    let missing = dataset.missing_columns();
    if !dataset.records.is_empty() && !missing.is_empty() {
        warn!(
            source,
            ?missing,
            "Data is missing one or more expected columns: {:?}",
            REQUIRED_COLUMNS
        );
    }
    debug!(
        source,
        records = dataset.records.len(),
        nodes = dataset.nodes.len(),
        "Loaded dataset"
    );

    Ok(dataset)
}

fn parse_records(items: Vec<Value>, source: &str) -> Dataset {
    let mut dataset = Dataset {
        source: source.to_string(),
        ..Default::default()
    };

    for (index, item) in items.into_iter().enumerate() {
        match item {
            Value::Object(object) => {
                dataset.columns.extend(object.keys().cloned());
                dataset.records.push(Record::from_object(&object));
            }
            other => warn!(source, index, kind = %json_kind(&other), "Skipping non-object record"),
        }
    }

    dataset
}

fn parse_graph_document(object: &Map<String, Value>, source: &str) -> Dataset {
    let mut dataset = Dataset {
        source: source.to_string(),
        ..Default::default()
    };

    for item in array_field(object, "nodes") {
        match node_info_from_value(item) {
            Some(info) => {
                dataset.nodes.insert(info.id.clone(), info);
            }
            None => warn!(source, "Skipping node without an 'id'"),
        }
    }

    for item in array_field(object, "edges") {
        let Some(edge) = item.as_object() else {
            warn!(source, kind = %json_kind(item), "Skipping non-object edge");
            continue;
        };
        let from = edge.get("from").filter(|v| !v.is_null());
        let to = edge.get("to").filter(|v| !v.is_null());
        let label = edge
            .get("label")
            .or_else(|| edge.get("relation"))
            .filter(|v| !v.is_null());

        let head_type = endpoint_type(&dataset, from);
        let tail_type = endpoint_type(&dataset, to);

        dataset.records.push(Record {
            head: from.cloned(),
            head_type,
            relation: label.cloned(),
            tail: to.cloned(),
            tail_type,
        });
    }

    if !dataset.records.is_empty() {
        dataset
            .columns
            .extend(REQUIRED_COLUMNS.iter().map(|c| c.to_string()));
    }

    dataset
}

fn endpoint_type(dataset: &Dataset, endpoint: Option<&Value>) -> Option<Value> {
    let id = value_to_string(endpoint?);
    dataset
        .nodes
        .get(&id)
        .and_then(|info| info.entity_type.clone())
        .map(Value::from)
}

fn node_info_from_value(value: &Value) -> Option<NodeInfo> {
    let object = value.as_object()?;
    let id = object.get("id").filter(|v| !v.is_null()).map(value_to_string)?;

    let attributes = object
        .get("attributes")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    let entity_type = object
        .get("type")
        .or_else(|| object.get("entity_type"))
        .or_else(|| attributes.get("type"))
        .filter(|v| !v.is_null())
        .map(value_to_string);

    Some(NodeInfo {
        id,
        entity_type,
        attributes,
    })
}

fn array_field<'a>(object: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    object
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
