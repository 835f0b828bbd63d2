//! Contact file parser.
//!
//! Flat grammar, no headings:
//! - `key: value` at column 0 starts a field
//! - an indented `Text: <description>` line describes the last link field
//!
//! `name` stays a plain string; every other key becomes a link entry.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

use resumemd_shared::{ContactEntry, ContactInfo};

/// Matches `key: value` with a word-character key at the start of the line.
static FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+):\s*(.*)$").expect("contact field regex"));

/// Matches an indented `Text: description` line.
static TEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+Text:\s*(.*)$").expect("contact text regex"));

/// Parse the contents of a contact file. Lines matching neither pattern are ignored.
#[instrument(skip_all)]
pub fn parse_contact(content: &str) -> ContactInfo {
    let mut contact = ContactInfo::new();
    let mut active: Option<String> = None;

    for line in content.lines() {
        if let Some(caps) = FIELD_RE.captures(line) {
            let key = caps[1].to_string();
            let value = caps[2].trim().to_string();
            if key == "name" {
                contact.insert(key, ContactEntry::Plain(value));
            } else {
                contact.insert(key.clone(), ContactEntry::link(value));
                active = Some(key);
            }
            continue;
        }

        let Some(caps) = TEXT_RE.captures(line) else {
            continue;
        };
        let Some(key) = active.as_deref() else {
            debug!("description line without an active field");
            continue;
        };
        if let Some(ContactEntry::Link { description, .. }) = contact.get_mut(key) {
            *description = caps[1].trim().to_string();
        }
    }

    debug!(fields = contact.len(), "parsed contact info");
    contact
}
