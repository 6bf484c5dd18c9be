//! Minimal XML node extraction.
//!
//! This is deliberately not a conformant XML parser. It reproduces the
//! regex-based tag search that amateur radio tools have used against the QRZ
//! XML interface for years: find the first `<tag ...>text</tag>` pair in a
//! blob of text and hand back the attributes and inner text. Callers depend
//! on the first-match behavior, so the limitations below are kept rather than
//! fixed.
//!
//! Limitations:
//!
//! 1. Only elements with both a start and an end tag are handled. A
//!    self-closing `<foo/>` never satisfies [`find`].
//! 2. Nested same-named tags are not disambiguated; the inner text stops at
//!    the nearest closing tag.
//! 3. XML comments are not skipped. Tag-like text inside a comment will be
//!    matched.

use once_cell::sync::Lazy;
use regex::Regex;

/// A named, tag-delimited region of text extracted from a blob.
///
/// Produced fresh on every [`find`] call; plain value type with no ties back
/// to the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    /// The tag name that matched.
    pub name: String,
    /// Everything between the tag name and the closing `>`, verbatim.
    /// Attributes are not split into key/value pairs.
    pub attributes: String,
    /// Inner content with leading/trailing whitespace trimmed. Nested tags
    /// are left in place.
    pub text: String,
}

/// Matches a bare opening tag: name plus a lazy attribute run up to `>`.
static OPEN_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<(\w+)\s*(.*?)>").expect("open tag pattern"));

/// Find the first `<tag ...>text</tag>` pair in `content`.
///
/// Matching is exact and case-sensitive; `find("call", ..)` will not match a
/// `<callsign>` element. The inner text is matched non-greedily with `.`
/// spanning newlines, so the nearest closing tag wins. Returns `None` when
/// the tag is absent, unclosed, or only present in self-closing form —
/// malformed input never panics, it just fails to match.
pub fn find(tag: &str, content: &str) -> Option<XmlNode> {
    let escaped = regex::escape(tag);
    let pattern = format!(r"(?s)<({0})\b\s*(.*?)>(.*?)</{0}>", escaped);
    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(content)?;
    Some(XmlNode {
        name: caps[1].to_string(),
        attributes: caps[2].to_string(),
        text: caps[3].trim().to_string(),
    })
}

/// List every opening tag name in `content`, in first-appearance order.
///
/// There is no requirement that a reported tag ever closes, and duplicates
/// are included. The scan resumes immediately after each matched name, and a
/// self-closing `<foo/>` is reported like any other opening tag. Used to
/// discover a record's field set before targeted extraction with [`find`].
pub fn element_names(content: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = content;
    while let Some(caps) = OPEN_TAG.captures(rest) {
        let name = caps.get(1).expect("group 1 always participates");
        names.push(name.as_str().to_string());
        rest = &rest[name.end()..];
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    // Sample taken from the QRZ XML Interface specification.
    // https://www.qrz.com/XML/current_spec.html
    const NODE_QRZ: &str = r#"<?xml version="1.0" ?>
<QRZDatabase version="1.33">
  <Callsign>
    <call>AA7BQ</call>
    <fname>FRED L</fname>
    <name>LLOYD</name>
    <addr1>8711 E PINNACLE PEAK RD 193</addr1>
    <addr2>SCOTTSDALE</addr2>
    <state>AZ</state>
    <zip>85255</zip>
    <GMTOffset>-7</GMTOffset>
  </Callsign>
  <Session>
    <Key>2331uf894c4bd29f3923f3bacf02c532d7bd9</Key>
    <Count>123</Count>
    <SubExp>Wed Jan 1 12:34:03 2013</SubExp>
    <GMTime>Sun Nov 16 04:13:46 2012</GMTime>
  </Session>
</QRZDatabase>"#;

    #[test]
    fn test_root_node_attributes() {
        let node = find("QRZDatabase", NODE_QRZ).unwrap();
        assert_eq!(node.name, "QRZDatabase");
        assert_eq!(node.attributes, r#"version="1.33""#);
    }

    #[test]
    fn test_simple_tag_with_attributes() {
        let node = find("tag", r#"<tag a="1">text</tag>"#).unwrap();
        assert_eq!(node.attributes, r#"a="1""#);
        assert_eq!(node.text, "text");
    }

    #[test]
    fn test_callsign_fields() {
        let callsign = find("Callsign", NODE_QRZ).unwrap();

        let call = find("call", &callsign.text).unwrap();
        assert_eq!(call.name, "call");
        assert_eq!(call.attributes, "");
        assert_eq!(call.text, "AA7BQ");

        assert_eq!(find("fname", &callsign.text).unwrap().text, "FRED L");
        assert_eq!(find("name", &callsign.text).unwrap().text, "LLOYD");
        assert_eq!(
            find("addr1", &callsign.text).unwrap().text,
            "8711 E PINNACLE PEAK RD 193"
        );
        assert_eq!(find("GMTOffset", &callsign.text).unwrap().text, "-7");
    }

    #[test]
    fn test_session_key_round_trip() {
        let session = find("Session", NODE_QRZ).unwrap();
        assert_eq!(
            find("Key", &session.text).unwrap().text,
            "2331uf894c4bd29f3923f3bacf02c532d7bd9"
        );
    }

    #[test]
    fn test_case_sensitive() {
        let callsign = find("Callsign", NODE_QRZ).unwrap();
        assert!(find("CALL", &callsign.text).is_none());
    }

    #[test]
    fn test_no_prefix_match() {
        // "call" must not match a <callsign> element.
        assert!(find("call", "<callsign>AA7BQ</callsign>").is_none());
        assert!(find("call", "<call>AA7BQ</call>").is_some());
    }

    #[test]
    fn test_session_elements_not_in_callsign() {
        let callsign = find("Callsign", NODE_QRZ).unwrap();
        assert!(find("Session", &callsign.text).is_none());
        assert!(find("Key", &callsign.text).is_none());
    }

    #[test]
    fn test_absent_tag_returns_none() {
        assert!(find("missing", NODE_QRZ).is_none());
        assert!(find("anything", "").is_none());
    }

    #[test]
    fn test_missing_closing_tag() {
        assert!(find("foo", "<foo>never closed").is_none());
    }

    #[test]
    fn test_self_closing_never_matches() {
        assert!(find("foo", "<foo/>").is_none());
        assert!(find("foo", r#"<foo bar="1"/>"#).is_none());
    }

    #[test]
    fn test_first_occurrence_wins() {
        let node = find("t", "<t>one</t><t>two</t>").unwrap();
        assert_eq!(node.text, "one");
    }

    #[test]
    fn test_nested_same_name_stops_at_nearest_close() {
        // Documented limitation: nested same-named tags are not
        // disambiguated, the nearest closing tag terminates the match.
        let node = find("t", "<t>a<t>b</t>c</t>").unwrap();
        assert_eq!(node.text, "a<t>b");
    }

    #[test]
    fn test_multiline_text() {
        let node = find("t", "<t>\n  line one\n  line two\n</t>").unwrap();
        assert_eq!(node.text, "line one\n  line two");
    }

    #[test]
    fn test_element_names_order_and_duplicates() {
        let names = element_names("<a/><b><a></a></b>");
        assert_eq!(names, vec!["a", "b", "a"]);
    }

    #[test]
    fn test_element_names_callsign_fixture() {
        let callsign = find("Callsign", NODE_QRZ).unwrap();
        let names = element_names(&callsign.text);
        assert_eq!(
            names,
            vec!["call", "fname", "name", "addr1", "addr2", "state", "zip", "GMTOffset"]
        );
    }

    #[test]
    fn test_element_names_empty_input() {
        assert!(element_names("").is_empty());
        assert!(element_names("no tags here").is_empty());
    }
}
