//! Shared types, error model, and configuration for resumemd.
//!
//! This crate is the foundation depended on by all other resumemd crates.
//! It provides:
//! - [`ResumeError`], the unified error type
//! - Output data model ([`ResumeDocument`], [`ResumeRecord`], [`ContactEntry`])
//! - Configuration ([`AppConfig`], [`ParseOptions`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, ParseOptions, ParsingConfig, PathsConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from,
};
pub use error::{ResumeError, Result};
pub use types::{
    ContactEntry, ContactInfo, ExperienceContent, ProjectContent, ProjectEntry, ResumeDocument,
    ResumeRecord,
};
