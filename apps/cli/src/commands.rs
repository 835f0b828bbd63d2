//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use resumemd_core::{
    ProcessResult, ProcessorConfig, ProgressReporter, ResumeProcessor, SkipReason, check_inputs,
};
use resumemd_shared::{
    AppConfig, ContactEntry, ResumeDocument, ResumeError, init_config, load_config,
    load_config_from,
};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// resumemd: turn work-history markdown into resume JSON.
#[derive(Parser)]
#[command(
    name = "resumemd",
    version,
    about = "Process resume markdown files to JSON.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Path to output JSON file (overrides the configured output file).
    #[arg(short, long, env = "RESUMEMD_OUTPUT", global = true)]
    pub output: Option<PathBuf>,

    /// Config file to use instead of ~/.resumemd/resumemd.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Without a subcommand, the resume is built.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Parse the contact and experience files and write the JSON document (default).
    Build,

    /// Summarize the previously written JSON document.
    Show,

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Crates whose events are shown by default.
const LOG_TARGETS: [&str; 4] = ["resumemd", "resumemd_core", "resumemd_parser", "resumemd_shared"];

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let output = cli.output;
    let config_path = cli.config;
    match cli.command.unwrap_or(Command::Build) {
        Command::Build => cmd_build(config_path, output),
        Command::Show => cmd_show(config_path, output),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(config_path),
        },
    }
}

/// Load the config from `--config` if given, else the default location.
fn resolve_config(path: Option<PathBuf>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => load_config_from(&path)?,
        None => load_config()?,
    };
    Ok(config)
}

/// Processor config with the `--output` override applied.
fn processor_config(
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<ProcessorConfig> {
    let app = resolve_config(config_path)?;
    let mut config = ProcessorConfig::from(&app);
    if let Some(output) = output {
        config.output_file = output;
    }
    Ok(config)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_build(config_path: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let config = processor_config(config_path, output)?;

    let missing = check_inputs(&config);
    if !missing.is_empty() {
        eprintln!("[ERROR] The following required files or directories are missing or empty:");
        for path in &missing {
            eprintln!("  - {path}");
        }
        eprintln!("\nPopulate them before running resumemd.");
        return Err(ResumeError::MissingInputs { missing }.into());
    }

    info!(
        contact = %config.contact_file.display(),
        experience = %config.experience_dir.display(),
        output = %config.output_file.display(),
        "building resume"
    );

    let reporter = CliProgress::new();
    let result = process_with(config, &reporter)?;

    println!();
    println!("  Resume written!");
    println!("  Records: {}", result.document.experience.len());
    println!("  Parsed:  {}", result.files_parsed);
    println!("  Skipped: {}", result.files_skipped);
    println!("  Path:    {}", result.output_path.display());
    println!("  Time:    {:.2}s", result.elapsed.as_secs_f64());
    println!();

    Ok(())
}

/// Run the processor, clearing the spinner whether or not the run succeeds.
fn process_with(config: ProcessorConfig, reporter: &CliProgress) -> Result<ProcessResult> {
    let result = ResumeProcessor::new(config)
        .process(reporter)
        .inspect_err(|_| reporter.finish())?;
    Ok(result)
}

fn cmd_show(config_path: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let config = processor_config(config_path, output)?;
    let output_file = config.output_file.clone();

    let document = ResumeProcessor::new(config).load_stored()?.ok_or_else(|| {
        eyre!(
            "no resume found at '{}'; run `resumemd` first",
            output_file.display()
        )
    })?;

    print_document(&document);
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: Option<PathBuf>) -> Result<()> {
    let config = resolve_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

/// Print a human-readable summary of a stored document.
fn print_document(document: &ResumeDocument) {
    println!("Contact");
    for (key, entry) in &document.contact {
        match entry {
            ContactEntry::Plain(value) => println!("  {key}: {value}"),
            ContactEntry::Link { link, description } if description.is_empty() => {
                println!("  {key}: {link}")
            }
            ContactEntry::Link { link, description } => {
                println!("  {key}: {link} ({description})")
            }
        }
    }

    println!();
    println!("Experience ({} records)", document.experience.len());
    for record in &document.experience {
        let dates = match (record.start.as_str(), record.end.as_str()) {
            ("", "") => String::new(),
            (start, end) => format!(" [{start} - {end}]"),
        };
        println!(
            "  {} | {}{dates}: {} items",
            record.company,
            record.title,
            record.experience_content.len()
        );
    }
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(
                style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
            );
        }
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self::with_bar(spinner)
    }

    fn with_bar(spinner: ProgressBar) -> Self {
        Self { spinner }
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn file_parsed(&self, file_name: &str, records: usize, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Parsed [{current}/{total}] {file_name} ({records} records)"));
    }

    // The skip itself is already logged as a warning by the processor.
    fn file_skipped(&self, file_name: &str, reason: SkipReason) {
        self.spinner
            .set_message(format!("Skipped {file_name} ({reason})"));
    }

    fn done(&self, _result: &ProcessResult) {
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_build() {
        let cli = Cli::try_parse_from(["resumemd", "-o", "out.json"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.output, Some(PathBuf::from("out.json")));
    }

    fn scratch_config(template: &str) -> (PathBuf, ProcessorConfig) {
        let root = std::env::temp_dir().join(format!("resumemd-cli-{}", uuid::Uuid::now_v7()));
        let experience_dir = root.join("experience");
        std::fs::create_dir_all(&experience_dir).unwrap();
        std::fs::write(root.join("contact.md"), "name: Jane\n").unwrap();
        std::fs::write(
            experience_dir.join("01_Acme.md"),
            format!("# template: {template}\n## title: Dev\n- Work\n"),
        )
        .unwrap();
        let config = ProcessorConfig {
            contact_file: root.join("contact.md"),
            experience_dir,
            output_file: root.join("out.json"),
            options: Default::default(),
        };
        (root, config)
    }

    #[test]
    fn failed_build_clears_the_spinner() {
        let (root, config) = scratch_config("bogus");
        let reporter = CliProgress::with_bar(ProgressBar::hidden());

        assert!(process_with(config, &reporter).is_err());
        assert!(reporter.spinner.is_finished());

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn successful_build_clears_the_spinner() {
        let (root, config) = scratch_config("multiple_roles_bullets");
        let reporter = CliProgress::with_bar(ProgressBar::hidden());

        let result = process_with(config, &reporter).unwrap();
        assert_eq!(result.document.experience.len(), 1);
        assert!(reporter.spinner.is_finished());

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn skipped_files_update_the_spinner_message() {
        let reporter = CliProgress::with_bar(ProgressBar::hidden());
        reporter.file_skipped("10_Scratch.md", SkipReason::MissingHeader);
        assert_eq!(
            reporter.spinner.message(),
            "Skipped 10_Scratch.md (missing template header)"
        );
    }

    #[test]
    fn output_flag_is_global() {
        let cli = Cli::try_parse_from(["resumemd", "show", "--output", "stored.json"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Show)));
        assert_eq!(cli.output, Some(PathBuf::from("stored.json")));
    }
}
