//! Core data types for the extractor.

/// One extracted identifier: a doc-number together with the priority derived
/// from its normalized load-source.
///
/// Records exist only for document-id elements that yielded a non-empty
/// doc-number; "no data here" outcomes produce no record at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocNumberRecord {
    /// The extracted identifier string, whitespace-trimmed, never empty.
    pub doc_number: String,

    /// Sort priority derived from the load-source (lower sorts first).
    pub priority: u8,

    /// Normalized load-source the record came from (e.g., "epo").
    pub load_source: String,
}
