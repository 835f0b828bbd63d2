//! Output data model: the `ResumeDocument` written as JSON.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Contact
// ---------------------------------------------------------------------------

/// A single contact field.
///
/// `name` is stored as a plain string; every other field carries a link and
/// an optional human-readable description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContactEntry {
    /// `{ "link": ..., "description": ... }`
    Link { link: String, description: String },
    /// Plain string value.
    Plain(String),
}

impl ContactEntry {
    /// Create a link entry with an empty description.
    pub fn link(value: impl Into<String>) -> Self {
        Self::Link {
            link: value.into(),
            description: String::new(),
        }
    }
}

/// Contact fields in file order.
pub type ContactInfo = IndexMap<String, ContactEntry>;

// ---------------------------------------------------------------------------
// Experience
// ---------------------------------------------------------------------------

/// Body of a nested project sub-record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectContent {
    /// Paragraph templates keep a single string.
    Paragraph(String),
    /// Bullet templates keep one entry per line.
    Bullets(Vec<String>),
}

/// A project nested under a role, opened by a plain sub-header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub project_title: String,
    pub experience_content: ProjectContent,
}

/// The `experience_content` of a record; shape depends on the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExperienceContent {
    /// Flat bullet lines directly under the role.
    Bullets(Vec<String>),
    /// Nested project sub-records.
    Projects(Vec<ProjectEntry>),
}

impl ExperienceContent {
    /// Number of bullets or projects held.
    pub fn len(&self) -> usize {
        match self {
            Self::Bullets(items) => items.len(),
            Self::Projects(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One role or project block parsed from an experience file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    /// Company, derived from the file name unless a header overrides it.
    pub company: String,
    pub title: String,
    pub start: String,
    pub end: String,
    pub experience_content: ExperienceContent,
    /// Present only when the block declared a `tags:` sub-header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Any other `key: value` sub-header, kept at the top level of the record.
    #[serde(flatten)]
    pub extra: IndexMap<String, String>,
}

impl ResumeRecord {
    /// Create an empty record for `company` with the given content container.
    pub fn new(company: impl Into<String>, experience_content: ExperienceContent) -> Self {
        Self {
            company: company.into(),
            title: String::new(),
            start: String::new(),
            end: String::new(),
            experience_content,
            tags: None,
            extra: IndexMap::new(),
        }
    }

    /// Merge a scalar `key: value` sub-header into the record.
    ///
    /// Named fields are overwritten; `experience_content` and `tags` are
    /// structural and never set from a scalar.
    pub fn set_field(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match key {
            "company" => self.company = value,
            "title" => self.title = value,
            "start" => self.start = value,
            "end" => self.end = value,
            "experience_content" | "tags" => {
                tracing::debug!(key, "ignoring scalar value for structural field");
            }
            _ => {
                self.extra.insert(key.to_string(), value);
            }
        }
    }

    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// The persisted artifact: contact info plus every experience record in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub contact: ContactInfo,
    pub experience: Vec<ResumeRecord>,
}
