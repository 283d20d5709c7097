//! Relationship Data Module
//!
//! Loading and preprocessing of knowledge-graph input:
//!
//! - `loader`: JSON records or nodes/edges documents from disk
//! - `processing`: validation, cleaning and entity normalization
//! - `types`: raw records, node table, cleaned triples

pub mod errors;
pub mod loader;
pub mod processing;
pub mod types;

pub use errors::DataError;
pub use loader::{load_json_data, parse_json_data};
pub use processing::{clean_data, normalize_entities, normalize_nodes, validate_data};
pub use types::{Dataset, NodeInfo, Record, Triple, REQUIRED_COLUMNS, UNKNOWN_TYPE};
