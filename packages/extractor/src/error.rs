//! Error types for the extractor.
//!
//! Three kinds of failure are surfaced to callers: file access (missing,
//! unreadable, or undecodable input), XML parsing (input that cannot be
//! salvaged even by the recovery pass), and extraction (a fault that escapes
//! element scope). Missing attributes, missing child elements, and empty text
//! are not errors; they reduce the result set and are logged instead.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the extractor library.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// Input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Input path exists but is not a regular file.
    #[error("Path is not a regular file: {0}")]
    NotAFile(PathBuf),

    /// IO error while reading the input file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No candidate encoding could decode the file bytes.
    #[error("Could not decode {path} with any supported encoding (tried: {tried})")]
    Undecodable { path: PathBuf, tried: String },

    /// XML parsing failed, even after the recovery pass.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// JSON serialization of the result list failed.
    #[error("JSON serialization failed: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// Unexpected fault while inspecting an identifier element.
    ///
    /// Element-local faults are caught, logged, and skipped by the extraction
    /// engine; this variant reaches callers only when a fault escapes element
    /// scope.
    #[error("Failed to extract doc-number from {context}: {message}")]
    Extraction { context: String, message: String },
}

/// Result type alias for extractor operations.
pub type Result<T> = std::result::Result<T, ExtractorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_display() {
        let err = ExtractorError::FileNotFound(PathBuf::from("/tmp/missing.xml"));
        assert!(err.to_string().contains("File not found"));
        assert!(err.to_string().contains("missing.xml"));
    }

    #[test]
    fn test_undecodable_display() {
        let err = ExtractorError::Undecodable {
            path: PathBuf::from("input.xml"),
            tried: "utf-8, utf-16, latin-1, windows-1252".to_string(),
        };
        assert!(err.to_string().contains("input.xml"));
        assert!(err.to_string().contains("utf-16"));
    }

    #[test]
    fn test_extraction_display() {
        let err = ExtractorError::Extraction {
            context: "document-id".to_string(),
            message: "boom".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to extract doc-number from document-id: boom"
        );
    }
}
