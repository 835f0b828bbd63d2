//! Application configuration for resumemd.
//!
//! User config lives at `~/.resumemd/resumemd.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ResumeError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "resumemd.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".resumemd";

// ---------------------------------------------------------------------------
// Config structs (matching resumemd.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Input and output locations.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Parsing behaviour.
    #[serde(default)]
    pub parsing: ParsingConfig,
}

/// `[paths]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Contact file in `key: value` + indented `Text:` format.
    #[serde(default = "default_contact_file")]
    pub contact_file: PathBuf,

    /// Directory holding the numbered `<digits>_<company>.md` files.
    #[serde(default = "default_experience_dir")]
    pub experience_dir: PathBuf,

    /// Where the resulting JSON document is written.
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            contact_file: default_contact_file(),
            experience_dir: default_experience_dir(),
            output_file: default_output_file(),
        }
    }
}

fn default_contact_file() -> PathBuf {
    Path::new("info").join("contact.md")
}
fn default_experience_dir() -> PathBuf {
    PathBuf::from("experience")
}
fn default_output_file() -> PathBuf {
    PathBuf::from("resume_data.json")
}

/// `[parsing]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsingConfig {
    /// Flush the open record whenever a new role header starts, for every template.
    ///
    /// When `false`, the project-based templates only keep the record that is
    /// open at end of input.
    #[serde(default = "default_true")]
    pub flush_on_new_item: bool,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            flush_on_new_item: true,
        }
    }
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Parse options (runtime, handed to the parsing engine)
// ---------------------------------------------------------------------------

/// Runtime parsing options, derived from the `[parsing]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// See [`ParsingConfig::flush_on_new_item`].
    pub flush_on_new_item: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            flush_on_new_item: true,
        }
    }
}

impl From<&AppConfig> for ParseOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            flush_on_new_item: config.parsing.flush_on_new_item,
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.resumemd/`).
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| ResumeError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.resumemd/resumemd.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ResumeError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| ResumeError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| ResumeError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| ResumeError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ResumeError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("experience_dir"));
        assert!(toml_str.contains("flush_on_new_item = true"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.paths.output_file, PathBuf::from("resume_data.json"));
        assert_eq!(parsed.paths.contact_file, Path::new("info").join("contact.md"));
        assert!(parsed.parsing.flush_on_new_item);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[paths]
output_file = "/tmp/out.json"

[parsing]
flush_on_new_item = false
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.paths.output_file, PathBuf::from("/tmp/out.json"));
        assert_eq!(config.paths.experience_dir, PathBuf::from("experience"));
        assert!(!config.parsing.flush_on_new_item);
    }

    #[test]
    fn parse_options_from_app_config() {
        let mut app = AppConfig::default();
        assert!(ParseOptions::from(&app).flush_on_new_item);

        app.parsing.flush_on_new_item = false;
        assert!(!ParseOptions::from(&app).flush_on_new_item);
    }

    #[test]
    fn load_config_from_missing_file_is_io_error() {
        let err = load_config_from(Path::new("/nonexistent/resumemd.toml")).unwrap_err();
        assert!(err.is_not_found());
    }
}
