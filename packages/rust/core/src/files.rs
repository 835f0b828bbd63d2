//! Experience directory listing, ordering, and input checks.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use resumemd_shared::{ResumeError, Result};

use crate::processor::ProcessorConfig;

/// Order prefix or `.md` suffix, stripped to derive the company name.
static COMPANY_STRIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+_|\.md$").expect("company regex"));

/// Derive the company from `<digits>_<company>.md`.
pub fn company_from_filename(file_name: &str) -> String {
    COMPANY_STRIP_RE.replace_all(file_name, "").into_owned()
}

/// Numeric order prefix of `<digits>_<company>.md`.
pub fn order_prefix(file_name: &str) -> Result<u64> {
    let prefix = file_name.split('_').next().unwrap_or_default();
    prefix.parse().map_err(|_| ResumeError::InvalidFileName {
        name: file_name.to_string(),
    })
}

/// Names of the `.md` files in `dir`, sorted by numeric order prefix.
///
/// A file without a numeric prefix fails the whole listing.
pub fn sorted_experience_files(dir: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(dir).map_err(|e| ResumeError::io(dir, e))?;

    let mut files: Vec<(u64, String)> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ResumeError::io(dir, e))?;
        let Ok(name) = entry.file_name().into_string() else {
            warn!(path = %entry.path().display(), "skipping non UTF-8 file name");
            continue;
        };
        if !name.ends_with(".md") || !entry.path().is_file() {
            continue;
        }
        files.push((order_prefix(&name)?, name));
    }

    files.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    debug!(dir = %dir.display(), count = files.len(), "listed experience files");

    Ok(files.into_iter().map(|(_, name)| name).collect())
}

/// List every required input that is missing, as display strings.
///
/// The contact file must exist, and the experience directory must hold at
/// least one `.md` file.
pub fn check_inputs(config: &ProcessorConfig) -> Vec<String> {
    let mut missing = Vec::new();

    if !config.contact_file.is_file() {
        missing.push(config.contact_file.display().to_string());
    }

    let has_markdown = std::fs::read_dir(&config.experience_dir)
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok())
                .any(|entry| {
                    entry.path().is_file()
                        && entry.file_name().to_string_lossy().ends_with(".md")
                })
        })
        .unwrap_or(false);
    if !has_markdown {
        missing.push(config.experience_dir.join("*.md").display().to_string());
    }

    missing
}
