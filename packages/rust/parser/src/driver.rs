//! Shared line-driven state machine.
//!
//! [`ResumeParser::step`] consumes one line and returns the next [`ParseState`];
//! the state is threaded explicitly so each transition can be inspected in
//! isolation. [`ResumeParser::parse`] folds a whole file and flushes the final record.

use tracing::{instrument, trace};

use resumemd_shared::{ParseOptions, ResumeRecord};

use crate::classify::{LineKind, classify};
use crate::header::parse_header;
use crate::strategy::Strategy;

/// Parser state carried between lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseState {
    /// The record currently being filled.
    pub record: ResumeRecord,
    /// Key of the most recent `key: value` sub-header, cleared by body lines.
    pub current_key: Option<String>,
    /// Records already flushed, in file order.
    pub output: Vec<ResumeRecord>,
}

/// A strategy bound to a company, ready to parse one file.
#[derive(Debug, Clone)]
pub struct ResumeParser {
    strategy: Strategy,
    company: String,
    options: ParseOptions,
}

impl ResumeParser {
    /// Create a parser with default [`ParseOptions`].
    pub fn new(strategy: Strategy, company: impl Into<String>) -> Self {
        Self::with_options(strategy, company, ParseOptions::default())
    }

    pub fn with_options(
        strategy: Strategy,
        company: impl Into<String>,
        options: ParseOptions,
    ) -> Self {
        Self {
            strategy,
            company: company.into(),
            options,
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// State before the first line: an untitled record and no active key.
    pub fn initial_state(&self) -> ParseState {
        ParseState {
            record: ResumeRecord::new(self.company.as_str(), self.strategy.empty_content()),
            current_key: None,
            output: Vec::new(),
        }
    }

    /// Apply one line to `state`.
    pub fn step(&self, mut state: ParseState, line: &str) -> ParseState {
        let kind = classify(line, state.current_key.as_deref());
        trace!(?kind, "classified line");

        match kind {
            LineKind::Blank | LineKind::DocumentHeader => state,
            LineKind::RoleHeader(line) => {
                self.strategy
                    .begin_new_item(state, line, &self.company, &self.options)
            }
            LineKind::SubHeaderField(line) => {
                let Some(field) = parse_header(line) else {
                    return state;
                };
                if field.key == "tags" {
                    state.record.tags = Some(Vec::new());
                } else {
                    state.record.set_field(&field.key, field.value);
                }
                state.current_key = Some(field.key);
                state
            }
            LineKind::SubHeaderPlain(line) => {
                let mut state = self.strategy.handle_line(state, line, true);
                state.current_key = None;
                state
            }
            LineKind::TagContinuation(line) => {
                state
                    .record
                    .tags
                    .get_or_insert_with(Vec::new)
                    .push(tag_value(line));
                state
            }
            LineKind::Body(line) => {
                state.current_key = None;
                self.strategy.handle_line(state, line, false)
            }
        }
    }

    /// Close out a parse: the open record is kept only if it has a title.
    pub fn finish(&self, state: ParseState) -> Vec<ResumeRecord> {
        let ParseState {
            record, mut output, ..
        } = state;
        if record.has_title() {
            output.push(record);
        }
        output
    }

    /// Parse every line of one experience file.
    #[instrument(skip_all, fields(template = %self.strategy, company = %self.company))]
    pub fn parse<'a, I>(&self, lines: I) -> Vec<ResumeRecord>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let state = lines
            .into_iter()
            .fold(self.initial_state(), |state, line| self.step(state, line));
        let records = self.finish(state);
        trace!(count = records.len(), "parse complete");
        records
    }

    /// Parse a whole file's contents.
    pub fn parse_str(&self, content: &str) -> Vec<ResumeRecord> {
        self.parse(content.lines())
    }
}

/// Tag entry with one leading `-` bullet marker and surrounding whitespace removed.
fn tag_value(line: &str) -> String {
    let trimmed = line.trim();
    trimmed.strip_prefix('-').unwrap_or(trimmed).trim().to_string()
}
