//! Run orchestration for resumemd.
//!
//! Ties the contact parser and the experience strategies together into a
//! single run: list and order the experience files, parse each one, merge
//! the records, and persist the resulting `ResumeDocument`.

pub mod files;
pub mod processor;

pub use files::{check_inputs, company_from_filename, order_prefix, sorted_experience_files};
pub use processor::{
    FileOutcome, ProcessResult, ProcessorConfig, ProgressReporter, ResumeProcessor, SilentProgress,
    SkipReason,
};
