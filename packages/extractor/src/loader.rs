//! Document loading: encoding detection and recovering XML parse.
//!
//! Input files come from mixed upstream systems and are not guaranteed to be
//! UTF-8 or even well-formed. The loader decodes against a fixed ordered list
//! of candidate encodings, then parses strictly; when the strict parse fails
//! it runs an event-level salvage pass that rebalances mismatched tags and
//! drops unparseable fragments, so partially broken files still yield their
//! well-formed records.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use quick_xml::events::{BytesEnd, Event};
use quick_xml::{Reader, Writer};
use roxmltree::{Document, ParsingOptions};

use crate::config::{CandidateEncoding, ENCODING_CANDIDATES};
use crate::error::{ExtractorError, Result};

/// Parse options shared by the loader's validation parse and the engine's
/// tree parse: DTD tolerance (patent XML commonly carries a DOCTYPE) and no
/// node-count ceiling.
fn parse_options<'a>() -> ParsingOptions<'a> {
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;
    options.nodes_limit = u32::MAX;
    options
}

/// Parse XML text into a document tree.
///
/// # Arguments
/// * `text` - XML text, normally produced by [`load_xml`]
///
/// # Returns
/// The parsed document, or `ExtractorError::XmlParse` on failure
pub fn parse_document(text: &str) -> Result<Document<'_>> {
    Ok(Document::parse_with_options(text, parse_options())?)
}

/// Load an XML file, returning text that is guaranteed to parse.
///
/// Reads the file as raw bytes, decodes with the first candidate encoding
/// that accepts the bytes (see [`ENCODING_CANDIDATES`]; order matters), and
/// validates the result with a strict parse. Malformed markup goes through
/// the salvage pass before being rejected.
///
/// # Arguments
/// * `path` - Path to the XML file
///
/// # Returns
/// Decoded (and possibly repaired) XML text
///
/// # Errors
/// * `FileNotFound` / `NotAFile` / `Io` / `Undecodable` - file access failures
/// * `XmlParse` - markup that cannot be salvaged
pub fn load_xml(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ExtractorError::FileNotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(ExtractorError::NotAFile(path.to_path_buf()));
    }

    let bytes = fs::read(path)?;
    let text = decode_with_candidates(&bytes).ok_or_else(|| ExtractorError::Undecodable {
        path: path.to_path_buf(),
        tried: ENCODING_CANDIDATES
            .iter()
            .map(|e| e.label())
            .collect::<Vec<_>>()
            .join(", "),
    })?;

    // A BOM survives strict decoding; roxmltree has no use for it.
    let text = text.trim_start_matches('\u{feff}').to_string();

    let strict_error = match Document::parse_with_options(&text, parse_options()) {
        Ok(_) => return Ok(text),
        Err(e) => e,
    };

    tracing::warn!(
        path = %path.display(),
        error = %strict_error,
        "Strict XML parse failed, attempting recovery"
    );

    if let Some(repaired) = repair_xml(&text) {
        if Document::parse_with_options(&repaired, parse_options()).is_ok() {
            tracing::warn!(path = %path.display(), "Recovered a usable tree from malformed XML");
            return Ok(repaired);
        }
    }

    Err(ExtractorError::XmlParse(strict_error))
}

/// Decode bytes with the first candidate encoding that accepts them.
fn decode_with_candidates(bytes: &[u8]) -> Option<String> {
    for &candidate in ENCODING_CANDIDATES {
        match decode_bytes(bytes, candidate) {
            Some(text) => {
                tracing::debug!(encoding = candidate.label(), "Decoded input file");
                return Some(text);
            }
            None => {
                tracing::debug!(
                    encoding = candidate.label(),
                    "Decode failed, trying next candidate"
                );
            }
        }
    }
    None
}

/// Strictly decode bytes with one candidate encoding.
fn decode_bytes(bytes: &[u8], encoding: CandidateEncoding) -> Option<String> {
    match encoding {
        CandidateEncoding::Utf8 => encoding_rs::UTF_8
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(Cow::into_owned),
        CandidateEncoding::Utf16 => {
            let (encoding, payload) = match bytes {
                [0xFF, 0xFE, rest @ ..] => (encoding_rs::UTF_16LE, rest),
                [0xFE, 0xFF, rest @ ..] => (encoding_rs::UTF_16BE, rest),
                _ => (encoding_rs::UTF_16LE, bytes),
            };
            encoding
                .decode_without_bom_handling_and_without_replacement(payload)
                .map(Cow::into_owned)
        }
        // Latin-1 maps every byte, so this decode cannot fail.
        CandidateEncoding::Latin1 => Some(encoding_rs::mem::decode_latin1(bytes).into_owned()),
        CandidateEncoding::Windows1252 => encoding_rs::WINDOWS_1252
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(Cow::into_owned),
    }
}

/// Rebuild a well-formed document from malformed markup, best effort.
///
/// Reads the input as a lenient event stream and re-serializes it with a
/// balanced tag stack: mismatched end tags close any elements left dangling
/// inside them, end tags with no matching start are dropped, and an
/// unparseable fragment truncates the stream at that point. Elements still
/// open at the end are closed.
fn repair_xml(text: &str) -> Option<String> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().check_end_names = false;

    let mut writer = Writer::new(Vec::new());
    let mut open: Vec<String> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                open.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                writer.write_event(Event::Start(e)).ok()?;
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if let Some(pos) = open.iter().rposition(|tag| *tag == name) {
                    // Close elements left dangling inside this one.
                    while open.len() > pos + 1 {
                        if let Some(dangling) = open.pop() {
                            writer.write_event(Event::End(BytesEnd::new(dangling))).ok()?;
                        }
                    }
                    open.pop();
                    writer.write_event(Event::End(e)).ok()?;
                }
                // End tag with no matching start: dropped.
            }
            Ok(Event::Eof) => break,
            Ok(event) => {
                writer.write_event(event).ok()?;
            }
            // Unparseable fragment: keep whatever was salvaged so far.
            Err(e) => {
                tracing::debug!(error = %e, "Truncating event stream at unparseable fragment");
                break;
            }
        }
    }

    while let Some(tag) = open.pop() {
        writer.write_event(Event::End(BytesEnd::new(tag))).ok()?;
    }

    String::from_utf8(writer.into_inner()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_temp(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    #[test]
    fn test_load_xml_utf8() {
        let file = write_temp("<root><a>x</a></root>".as_bytes());
        let text = load_xml(file.path()).unwrap();
        assert!(text.contains("<a>x</a>"));
    }

    #[test]
    fn test_load_xml_utf8_bom_stripped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"<root/>");
        let file = write_temp(&bytes);
        let text = load_xml(file.path()).unwrap();
        assert!(text.starts_with("<root"));
    }

    #[test]
    fn test_load_xml_utf16_le() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "<root><a>x</a></root>".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let file = write_temp(&bytes);
        let text = load_xml(file.path()).unwrap();
        assert!(text.contains("<a>x</a>"));
    }

    #[test]
    fn test_load_xml_utf16_be() {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in "<root/>".encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        let file = write_temp(&bytes);
        assert!(load_xml(file.path()).is_ok());
    }

    #[test]
    fn test_load_xml_latin1_fallback() {
        // 0xE9 is 'é' in Latin-1 and invalid as a UTF-8 start byte. The odd
        // byte count also rules out the UTF-16 candidate, which would accept
        // any even-length byte sequence without surrogates.
        let file = write_temp(b"<root><a>caf\xE9</a></root>\n");
        let text = load_xml(file.path()).unwrap();
        assert!(text.contains("caf\u{e9}"));
    }

    #[test]
    fn test_load_xml_missing_file() {
        let err = load_xml(Path::new("/nonexistent/input.xml")).unwrap_err();
        assert!(matches!(err, ExtractorError::FileNotFound(_)));
    }

    #[test]
    fn test_load_xml_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_xml(dir.path()).unwrap_err();
        assert!(matches!(err, ExtractorError::NotAFile(_)));
    }

    #[test]
    fn test_load_xml_repairs_missing_end_tag() {
        let file = write_temp(b"<root><a><b>kept</b></root>");
        let text = load_xml(file.path()).unwrap();
        let doc = parse_document(&text).unwrap();
        let kept = doc.descendants().find(|n| n.has_tag_name("b")).unwrap();
        assert_eq!(kept.text(), Some("kept"));
    }

    #[test]
    fn test_load_xml_rejects_hopeless_input() {
        let file = write_temp(b"not xml at all, no tags");
        let err = load_xml(file.path()).unwrap_err();
        assert!(matches!(err, ExtractorError::XmlParse(_)));
    }

    #[test]
    fn test_repair_drops_orphan_end_tag() {
        let repaired = repair_xml("<root><a>x</a></b></root>").unwrap();
        assert!(Document::parse(&repaired).is_ok());
    }

    #[test]
    fn test_repair_closes_open_elements_at_eof() {
        let repaired = repair_xml("<root><a>x").unwrap();
        let doc = Document::parse(&repaired).unwrap();
        assert_eq!(doc.root_element().tag_name().name(), "root");
    }

    #[test]
    fn test_parse_document_allows_dtd() {
        let xml = "<!DOCTYPE root SYSTEM \"root.dtd\"><root/>";
        assert!(parse_document(xml).is_ok());
    }
}
