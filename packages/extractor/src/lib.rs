//! Patent Extractor - Extract doc-number identifiers from patent XML.
//!
//! This crate extracts "doc-number" values from semi-structured XML documents
//! describing patent applications. Records are ordered by data-source
//! priority: `epo`/`docdb` sources first, then `patent-office` (in its three
//! spelling variants), then anything else. Malformed markup, legacy
//! encodings, and inconsistently-cased attributes are tolerated.
//!
//! # Example
//!
//! ```
//! use patent_extractor::config::{normalize_load_source, source_priority};
//!
//! // docdb is treated as epo, the highest-priority source
//! assert_eq!(normalize_load_source("docdb"), "epo");
//! assert_eq!(source_priority("docdb"), 0);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Encoding candidates and source priority tables
//! - [`types`]: Core data types ([`DocNumberRecord`])
//! - [`error`]: Error types and Result alias
//! - [`loader`]: File reading, encoding detection, recovering XML parse
//! - [`xml`]: Namespace-agnostic element discovery and attribute lookup
//! - [`extractor`]: Extraction engine and priority sorting
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod loader;
pub mod types;
pub mod xml;

// Re-export main entry point
pub use extractor::extract_doc_numbers;

// Re-export commonly used items
pub use error::{ExtractorError, Result};
pub use types::DocNumberRecord;
