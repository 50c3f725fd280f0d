//! XML utilities: namespace-agnostic element discovery and attribute
//! normalization.
//!
//! Source documents apply namespace prefixes inconsistently to otherwise
//! identical schemas, so lookups here compare local names (the tag name with
//! any namespace URI stripped) rather than qualified names. A purely
//! qualified-name lookup would silently miss records.

use roxmltree::Node;

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use patent_extractor::xml::local_name;
///
/// let xml = r#"<p:root xmlns:p="http://example.com"><p:child/></p:root>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(local_name(doc.root_element()), "root");
/// ```
#[must_use]
pub fn local_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Find all descendant elements matching a local tag name.
///
/// Collects matches in two passes and de-duplicates by element identity,
/// preserving document order of first discovery: first elements whose
/// qualified name matches directly (no namespace), then a full-subtree walk
/// comparing local names. The starting element itself is excluded.
///
/// Never fails; returns an empty vector when nothing matches.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use patent_extractor::xml::find_by_local_name;
///
/// let xml = r#"<root xmlns:p="http://example.com">
///     <item/><p:item/><other/>
/// </root>"#;
/// let doc = Document::parse(xml).unwrap();
/// let items = find_by_local_name(doc.root_element(), "item");
/// assert_eq!(items.len(), 2);
/// ```
#[must_use]
pub fn find_by_local_name<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Vec<Node<'a, 'input>> {
    let mut results: Vec<Node<'a, 'input>> = Vec::new();
    let mut seen: Vec<roxmltree::NodeId> = Vec::new();

    // Pass 1: direct qualified-name match (documents without namespaces).
    for elem in node.descendants().filter(|n| {
        n.id() != node.id()
            && n.is_element()
            && n.tag_name().namespace().is_none()
            && n.tag_name().name() == tag
    }) {
        seen.push(elem.id());
        results.push(elem);
    }

    // Pass 2: local-name match regardless of namespace.
    for elem in node
        .descendants()
        .filter(|n| n.id() != node.id() && n.is_element() && local_name(*n) == tag)
    {
        if !seen.contains(&elem.id()) {
            seen.push(elem.id());
            results.push(elem);
        }
    }

    results
}

/// Canonical form of an attribute name: lowercase, `-` collapsed to `_`.
fn canonical_attr_key(name: &str) -> String {
    name.to_lowercase().replace('-', "_")
}

/// Look up an attribute with case- and separator-insensitive name matching.
///
/// `LOAD-SOURCE`, `load_source`, and `Load-Source` all resolve to the same
/// attribute. The value is returned trimmed and lowercased.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use patent_extractor::xml::normalized_attribute;
///
/// let xml = r#"<document-id LOAD_SOURCE=" DocDB "/>"#;
/// let doc = Document::parse(xml).unwrap();
/// let value = normalized_attribute(doc.root_element(), "load-source");
/// assert_eq!(value.as_deref(), Some("docdb"));
/// ```
#[must_use]
pub fn normalized_attribute(node: Node<'_, '_>, name: &str) -> Option<String> {
    let wanted = canonical_attr_key(name);
    node.attributes()
        .find(|attr| canonical_attr_key(attr.name()) == wanted)
        .map(|attr| attr.value().trim().to_lowercase())
}

/// Get the element's direct text content, trimmed.
///
/// Only the text node immediately inside the element counts; descendant text
/// is not collected.
#[must_use]
pub fn direct_text(node: Node<'_, '_>) -> String {
    node.text()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}
