//! Line classification for experience files.
//!
//! Every line falls into exactly one [`LineKind`]. Classification is ordered:
//! blank and document-header lines first, then role headers, sub-headers, tag
//! continuations, and finally plain body text.

/// Heading depth recognised by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    /// `# ...`, the document/template header.
    Document,
    /// `## ...`, starts a role or project block.
    Role,
    /// `### ...` or `#### ...`, a field or a nested item.
    Sub,
}

/// Classification of one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    DocumentHeader,
    /// Role header containing a colon.
    RoleHeader(&'a str),
    /// Sub-header containing a colon (`### start: 2020`).
    SubHeaderField(&'a str),
    /// Sub-header without a colon (`#### Project Atlas`).
    SubHeaderPlain(&'a str),
    /// Entry under an open `tags:` sub-header.
    TagContinuation(&'a str),
    Body(&'a str),
}

/// Determine the heading level of `line`, if any.
///
/// The leading `#` run must be followed by whitespace; runs longer than four
/// are not headings.
pub fn heading_level(line: &str) -> Option<HeadingLevel> {
    let depth = line.bytes().take_while(|b| *b == b'#').count();
    if depth == 0 || !line[depth..].starts_with(char::is_whitespace) {
        return None;
    }
    match depth {
        1 => Some(HeadingLevel::Document),
        2 => Some(HeadingLevel::Role),
        3 | 4 => Some(HeadingLevel::Sub),
        _ => None,
    }
}

/// Classify `line` given the currently active sub-header key.
pub fn classify<'a>(line: &'a str, current_key: Option<&str>) -> LineKind<'a> {
    if line.trim().is_empty() {
        return LineKind::Blank;
    }

    let has_colon = line.contains(':');
    match heading_level(line) {
        Some(HeadingLevel::Document) => return LineKind::DocumentHeader,
        Some(HeadingLevel::Role) if has_colon => return LineKind::RoleHeader(line),
        Some(HeadingLevel::Sub) if has_colon => return LineKind::SubHeaderField(line),
        Some(HeadingLevel::Sub) => return LineKind::SubHeaderPlain(line),
        _ => {}
    }

    if current_key == Some("tags") {
        LineKind::TagContinuation(line)
    } else {
        LineKind::Body(line)
    }
}
