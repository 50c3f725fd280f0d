//! Configuration tables for the extractor.
//!
//! The candidate-encoding list, source-synonym table, and priority table are
//! plain ordered data so that new encodings or synonyms can be added without
//! touching control flow.

/// Candidate text encodings for input files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateEncoding {
    Utf8,
    /// BOM-sniffed endianness, little-endian when no BOM is present.
    Utf16,
    Latin1,
    Windows1252,
}

impl CandidateEncoding {
    /// Human-readable encoding label for diagnostics.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf16 => "utf-16",
            Self::Latin1 => "latin-1",
            Self::Windows1252 => "windows-1252",
        }
    }
}

/// Ordered candidate encodings; the first that decodes without error wins.
///
/// Order is part of the loader contract: earlier entries are preferred.
/// Latin-1 accepts every byte sequence, so Windows-1252 is unreachable in
/// practice; it stays on the list to keep the documented fallback order
/// explicit.
pub const ENCODING_CANDIDATES: &[CandidateEncoding] = &[
    CandidateEncoding::Utf8,
    CandidateEncoding::Utf16,
    CandidateEncoding::Latin1,
    CandidateEncoding::Windows1252,
];

/// Synonym table mapping normalized load-source spellings to canonical names.
pub const SOURCE_SYNONYMS: &[(&str, &str)] = &[
    ("epo", "epo"),
    ("docdb", "epo"),
    ("patent-office", "patent-office"),
    ("patent_office", "patent-office"),
    ("patentoffice", "patent-office"),
];

/// Priority table: canonical source name to priority (lower sorts first).
pub const SOURCE_PRIORITIES: &[(&str, u8)] = &[("epo", 0), ("patent-office", 1)];

/// Priority assigned to sources not present in [`SOURCE_PRIORITIES`].
pub const DEFAULT_PRIORITY: u8 = 99;

/// Normalize a load-source value to its canonical format name.
///
/// Lowercases, trims whitespace, and maps through the synonym table; values
/// with no synonym entry pass through unchanged.
///
/// # Examples
/// ```
/// use patent_extractor::config::normalize_load_source;
///
/// assert_eq!(normalize_load_source("DOCDB"), "epo");
/// assert_eq!(normalize_load_source(" patent_office "), "patent-office");
/// assert_eq!(normalize_load_source("uspto"), "uspto");
/// ```
#[must_use]
pub fn normalize_load_source(load_source: &str) -> String {
    let normalized = load_source.trim().to_lowercase();
    SOURCE_SYNONYMS
        .iter()
        .find(|(spelling, _)| *spelling == normalized)
        .map(|(_, canonical)| (*canonical).to_string())
        .unwrap_or(normalized)
}

/// Get the priority for a load-source value (lower = higher priority).
///
/// The value is normalized first, so synonyms share a priority.
///
/// # Examples
/// ```
/// use patent_extractor::config::source_priority;
///
/// assert_eq!(source_priority("epo"), 0);
/// assert_eq!(source_priority("docdb"), 0);
/// assert_eq!(source_priority("patentoffice"), 1);
/// assert_eq!(source_priority("something-else"), 99);
/// ```
#[must_use]
pub fn source_priority(load_source: &str) -> u8 {
    let normalized = normalize_load_source(load_source);
    SOURCE_PRIORITIES
        .iter()
        .find(|(name, _)| *name == normalized)
        .map(|(_, priority)| *priority)
        .unwrap_or(DEFAULT_PRIORITY)
}
