//! Extraction engine: walks the parsed tree and produces the ordered
//! doc-number list.
//!
//! Partial failure never aborts a file: a document-id missing its
//! load-source attribute, missing its doc-number child, or carrying only
//! whitespace contributes no record and is logged, while the remaining
//! elements are still processed. Only file access and parse failures are
//! fatal for the call.

use std::path::Path;

use roxmltree::{Document, Node};

use crate::config::{normalize_load_source, source_priority};
use crate::error::Result;
use crate::loader::{load_xml, parse_document};
use crate::types::DocNumberRecord;
use crate::xml::{direct_text, find_by_local_name, normalized_attribute};

/// Outer grouping element holding identifier elements.
const APPLICATION_REFERENCE_TAG: &str = "application-reference";

/// Inner identifier element bearing the load-source attribute.
const DOCUMENT_ID_TAG: &str = "document-id";

/// Child element whose text is the identifier we extract.
const DOC_NUMBER_TAG: &str = "doc-number";

/// Extract all doc-number values from a patent XML file in priority order.
///
/// Results are sorted ascending by `(priority, doc-number)`: epo/docdb
/// records first, then patent-office, then unrecognized sources; ties within
/// a priority class are broken lexicographically for determinism, not by
/// document order.
///
/// # Arguments
/// * `path` - Path to the XML file
///
/// # Returns
/// Doc-number strings in priority order; empty when the file holds no
/// extractable records (that is not an error)
///
/// # Errors
/// File access failures, undecodable bytes, and unsalvageable XML are fatal;
/// per-element problems are skipped with a diagnostic instead.
pub fn extract_doc_numbers(path: &Path) -> Result<Vec<String>> {
    tracing::info!(path = %path.display(), "Extracting doc-numbers");

    let xml = load_xml(path)?;
    let doc = parse_document(&xml)?;
    let mut records = extract_records(&doc);

    if records.is_empty() {
        tracing::warn!(path = %path.display(), "No doc-number values found");
        return Ok(Vec::new());
    }

    records.sort_by(|a, b| {
        (a.priority, a.doc_number.as_str()).cmp(&(b.priority, b.doc_number.as_str()))
    });

    let doc_numbers: Vec<String> = records.into_iter().map(|r| r.doc_number).collect();
    tracing::info!(count = doc_numbers.len(), "Extraction complete");
    Ok(doc_numbers)
}

/// Collect unsorted records from every application-reference group.
pub fn extract_records(doc: &Document<'_>) -> Vec<DocNumberRecord> {
    let root = doc.root_element();

    let groups = find_by_local_name(root, APPLICATION_REFERENCE_TAG);
    tracing::debug!(count = groups.len(), "Found application-reference element(s)");
    if groups.is_empty() {
        tracing::warn!("No application-reference elements found");
        return Vec::new();
    }

    let mut records = Vec::new();
    for group in groups {
        let document_ids = find_by_local_name(group, DOCUMENT_ID_TAG);
        tracing::debug!(
            count = document_ids.len(),
            "Found document-id element(s) in application-reference"
        );

        for document_id in document_ids {
            match extract_record(document_id) {
                Ok(Some(record)) => {
                    tracing::debug!(
                        doc_number = %record.doc_number,
                        priority = record.priority,
                        load_source = %record.load_source,
                        "Extracted doc-number"
                    );
                    records.push(record);
                }
                Ok(None) => {}
                Err(e) => {
                    // Element-local fault: skip this record, keep the file.
                    tracing::error!(error = %e, "Skipping document-id after extraction failure");
                }
            }
        }
    }

    records
}

/// Attempt single-record extraction from one document-id element.
///
/// `Ok(None)` means "no data here": a missing load-source attribute, missing
/// doc-number child, or empty text content. These are expected in real-world
/// corpora and shrink the result set by design.
fn extract_record(document_id: Node<'_, '_>) -> Result<Option<DocNumberRecord>> {
    let Some(load_source) = normalized_attribute(document_id, "load-source") else {
        tracing::warn!("document-id element missing load-source attribute, skipping");
        return Ok(None);
    };

    let Some(doc_number_elem) = find_by_local_name(document_id, DOC_NUMBER_TAG)
        .into_iter()
        .next()
    else {
        tracing::warn!(%load_source, "document-id element missing doc-number child, skipping");
        return Ok(None);
    };

    let doc_number = direct_text(doc_number_elem);
    if doc_number.is_empty() {
        tracing::warn!(%load_source, "doc-number element has empty text content, skipping");
        return Ok(None);
    }

    let load_source = normalize_load_source(&load_source);
    let priority = source_priority(&load_source);

    Ok(Some(DocNumberRecord {
        doc_number,
        priority,
        load_source,
    }))
}
