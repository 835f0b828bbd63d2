//! End-to-end run: contact file + experience files → `ResumeDocument` → JSON.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, info, instrument, warn};

use resumemd_parser::{StrategyFactory, parse_contact, template_name};
use resumemd_shared::{
    AppConfig, ContactInfo, ParseOptions, ResumeDocument, ResumeError, ResumeRecord, Result,
};

use crate::files::{company_from_filename, sorted_experience_files};

/// Inputs, output, and parsing options for one run.
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    /// Contact file path.
    pub contact_file: PathBuf,
    /// Directory of numbered experience files.
    pub experience_dir: PathBuf,
    /// JSON output path.
    pub output_file: PathBuf,
    /// Options handed to every strategy.
    pub options: ParseOptions,
}

impl From<&AppConfig> for ProcessorConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            contact_file: config.paths.contact_file.clone(),
            experience_dir: config.paths.experience_dir.clone(),
            output_file: config.paths.output_file.clone(),
            options: ParseOptions::from(config),
        }
    }
}

/// Result of a full run.
#[derive(Debug)]
pub struct ProcessResult {
    /// The document that was written.
    pub document: ResumeDocument,
    /// Experience files that produced records (possibly zero).
    pub files_parsed: usize,
    /// Experience files skipped (missing header, vanished).
    pub files_skipped: usize,
    /// Where the document was written.
    pub output_path: PathBuf,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Why an experience file contributed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// First line is not `# template: <name>`.
    MissingHeader,
    /// Listed, but gone by the time it was read.
    Vanished,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingHeader => f.write_str("missing template header"),
            Self::Vanished => f.write_str("file does not exist"),
        }
    }
}

/// Outcome of processing one experience file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Parsed(Vec<ResumeRecord>),
    Skipped(SkipReason),
}

/// Progress callback for reporting run status.
pub trait ProgressReporter {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after an experience file is parsed.
    fn file_parsed(&self, file_name: &str, records: usize, current: usize, total: usize);
    /// Called when an experience file is skipped.
    fn file_skipped(&self, file_name: &str, reason: SkipReason);
    /// Called when the run completes.
    fn done(&self, result: &ProcessResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn file_parsed(&self, _file_name: &str, _records: usize, _current: usize, _total: usize) {}
    fn file_skipped(&self, _file_name: &str, _reason: SkipReason) {}
    fn done(&self, _result: &ProcessResult) {}
}

/// Orchestrates parsing and persistence.
#[derive(Debug, Clone)]
pub struct ResumeProcessor {
    config: ProcessorConfig,
    factory: StrategyFactory,
}

impl ResumeProcessor {
    pub fn new(config: ProcessorConfig) -> Self {
        let factory = StrategyFactory::new(config.options);
        Self { config, factory }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Parse everything and write the document.
    ///
    /// 1. Parse the contact file
    /// 2. Parse each experience file in order-prefix order
    /// 3. Write the JSON document
    ///
    /// An unknown template or a non-numeric file prefix aborts the run; files
    /// without a template header are skipped.
    #[instrument(skip_all, fields(dir = %self.config.experience_dir.display()))]
    pub fn process(&self, progress: &dyn ProgressReporter) -> Result<ProcessResult> {
        let start = Instant::now();

        progress.phase("Reading contact info");
        let contact = self.parse_contact_file()?;

        progress.phase("Parsing experience files");
        let files = sorted_experience_files(&self.config.experience_dir)?;
        let total = files.len();
        let mut experience = Vec::new();
        let mut files_parsed = 0;
        let mut files_skipped = 0;

        for (i, file_name) in files.iter().enumerate() {
            match self.parse_experience_file(file_name)? {
                FileOutcome::Parsed(records) => {
                    progress.file_parsed(file_name, records.len(), i + 1, total);
                    files_parsed += 1;
                    experience.extend(records);
                }
                FileOutcome::Skipped(reason) => {
                    progress.file_skipped(file_name, reason);
                    files_skipped += 1;
                }
            }
        }

        let document = ResumeDocument {
            contact,
            experience,
        };

        progress.phase("Writing output");
        self.store(&document)?;

        let result = ProcessResult {
            document,
            files_parsed,
            files_skipped,
            output_path: self.config.output_file.clone(),
            elapsed: start.elapsed(),
        };

        info!(
            records = result.document.experience.len(),
            files_parsed,
            files_skipped,
            output = %result.output_path.display(),
            "resume processed"
        );
        progress.done(&result);

        Ok(result)
    }

    /// Parse the configured contact file.
    pub fn parse_contact_file(&self) -> Result<ContactInfo> {
        let path = &self.config.contact_file;
        let content = std::fs::read_to_string(path).map_err(|e| ResumeError::io(path, e))?;
        Ok(parse_contact(&content))
    }

    /// Parse one experience file from the configured directory.
    #[instrument(skip(self))]
    pub fn parse_experience_file(&self, file_name: &str) -> Result<FileOutcome> {
        let path = self.config.experience_dir.join(file_name);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "file does not exist, skipping");
                return Ok(FileOutcome::Skipped(SkipReason::Vanished));
            }
            Err(e) => return Err(ResumeError::io(&path, e)),
        };

        let Some(template) = content.lines().next().and_then(template_name) else {
            warn!(file = file_name, "skipping file due to missing template header");
            return Ok(FileOutcome::Skipped(SkipReason::MissingHeader));
        };

        let company = company_from_filename(file_name);
        let parser = self
            .factory
            .get_parser(&template, &company)
            .inspect_err(|e| warn!(file = file_name, error = %e, "cannot parse file"))?;
        let records = parser.parse_str(&content);

        debug!(file = file_name, %template, records = records.len(), "parsed experience file");
        Ok(FileOutcome::Parsed(records))
    }

    /// Write `document` to the output path as 2-space indented JSON, overwriting.
    pub fn store(&self, document: &ResumeDocument) -> Result<()> {
        write_json(&self.config.output_file, document)
    }

    /// Load a previously written document. Returns `None` if the output file is absent.
    pub fn load_stored(&self) -> Result<Option<ResumeDocument>> {
        let path = &self.config.output_file;
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no stored document");
                return Ok(None);
            }
            Err(e) => return Err(ResumeError::io(path, e)),
        };

        serde_json::from_str(&content).map(Some).map_err(|e| {
            ResumeError::Serialization(format!("invalid stored document {}: {e}", path.display()))
        })
    }
}

/// Write a JSON file (pretty-printed).
fn write_json<T: serde::Serialize>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| ResumeError::Serialization(format!("JSON serialization failed: {e}")))?;
    std::fs::write(path, json).map_err(|e| ResumeError::io(path, e))?;
    debug!(path = %path.display(), "wrote JSON file");
    Ok(())
}
