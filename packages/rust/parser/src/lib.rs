//! Markdown-to-record parsing engine.
//!
//! Experience files declare a template on their first line (`# template: <name>`).
//! The template selects a [`Strategy`]; every strategy shares the same line
//! classifier and driver and differs only in how a new block begins and how a
//! body line attaches to the open record.
//!
//! The contact file uses a separate flat grammar, see [`parse_contact`].

mod classify;
mod contact;
mod driver;
mod header;
mod strategy;

pub use classify::{HeadingLevel, LineKind, classify, heading_level};
pub use contact::parse_contact;
pub use driver::{ParseState, ResumeParser};
pub use header::{HeaderField, parse_header, template_name};
pub use strategy::{Strategy, StrategyFactory};
