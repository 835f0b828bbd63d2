//! `key: value` extraction from heading lines.

use std::sync::LazyLock;

use regex::Regex;

/// Matches `#`..`####`, whitespace, then `key: value`. The key stops at the first colon.
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#{1,4}\s+(?P<key>.*?):\s*(?P<value>.*)$").expect("header regex")
});

/// A `key: value` pair read from a heading line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderField {
    /// Lowercased, trimmed key.
    pub key: String,
    /// Trimmed value (may be empty).
    pub value: String,
}

/// Parse a heading line of depth 1 to 4 into a [`HeaderField`].
///
/// Returns `None` when the line is not a heading, has no colon, or the key is
/// blank after trimming.
pub fn parse_header(line: &str) -> Option<HeaderField> {
    let caps = HEADER_RE.captures(line)?;
    let key = caps["key"].trim().to_lowercase();
    if key.is_empty() {
        return None;
    }
    Some(HeaderField {
        key,
        value: caps["value"].trim().to_string(),
    })
}

/// Read the template name from a document header line (`# template: <name>`).
pub fn template_name(line: &str) -> Option<String> {
    parse_header(line)
        .filter(|field| field.key == "template")
        .map(|field| field.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(key: &str, value: &str) -> Option<HeaderField> {
        Some(HeaderField {
            key: key.into(),
            value: value.into(),
        })
    }

    #[test]
    fn parses_every_depth() {
        assert_eq!(
            parse_header("# template: multiple_roles_bullets"),
            field("template", "multiple_roles_bullets")
        );
        assert_eq!(parse_header("## title: Staff Engineer"), field("title", "Staff Engineer"));
        assert_eq!(parse_header("### start: Jan 2020"), field("start", "Jan 2020"));
        assert_eq!(parse_header("#### end: Present"), field("end", "Present"));
    }

    #[test]
    fn key_is_lowercased_and_trimmed() {
        assert_eq!(parse_header("### Title : Engineer  "), field("title", "Engineer"));
    }

    #[test]
    fn key_stops_at_first_colon() {
        assert_eq!(parse_header("### start: 09:00"), field("start", "09:00"));
    }

    #[test]
    fn empty_value_is_allowed() {
        assert_eq!(parse_header("#### tags:"), field("tags", ""));
    }

    #[test]
    fn rejects_non_matching_lines() {
        assert_eq!(parse_header("### Project Atlas"), None);
        assert_eq!(parse_header("##### deep: heading"), None);
        assert_eq!(parse_header("title: no heading"), None);
        assert_eq!(parse_header("##title: no space"), None);
        assert_eq!(parse_header("### : blank key"), None);
    }

    #[test]
    fn template_name_requires_template_key() {
        assert_eq!(
            template_name("# template: project_based_paras").as_deref(),
            Some("project_based_paras")
        );
        assert_eq!(template_name("# Template: bogus").as_deref(), Some("bogus"));
        assert_eq!(template_name("# kind: project_based_paras"), None);
        assert_eq!(template_name("## title: Engineer"), None);
    }
}
