//! Data loading errors
//!
//! Error types for reading and validating relationship data.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or validating input data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("File not found at path: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Path is not a file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("Failed to read {source_name}: {message}")]
    Io {
        source_name: String,
        message: String,
    },

    #[error("Content of {0} is not valid UTF-8")]
    Encoding(String),

    #[error("Empty content from data source: {0}")]
    EmptyInput(String),

    #[error("Error parsing JSON from {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    #[error("JSON data from {0} is not a list of records or a nodes/edges document")]
    NotARecordList(String),

    #[error("Data is missing the following required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("No nodes or edges were found in the data")]
    NoData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_message_lists_names() {
        let err = DataError::MissingColumns(vec!["relation".into(), "tail".into()]);
        assert_eq!(
            err.to_string(),
            "Data is missing the following required columns: relation, tail"
        );
    }

    #[test]
    fn test_not_found_message_contains_path() {
        let err = DataError::NotFound(PathBuf::from("assets/missing.json"));
        assert!(err.to_string().contains("assets/missing.json"));
    }
}
