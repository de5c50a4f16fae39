// pricelist CLI - aggregate supplier price lists, search them by price per unit

mod exit_codes;
mod query;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use pricelist_config::{ConfigError, Settings};
use pricelist_engine::{search, Catalog};
use pricelist_io::{export_report, load_catalog, BadFilePolicy, ExportError, LoadError};

use exit_codes::{export_exit_code, load_exit_code, EXIT_CONFIG, EXIT_DATA, EXIT_ERROR, EXIT_IO, EXIT_SUCCESS};
use query::{export_message, write_results, QueryLoop, SearchHit};

#[derive(Parser)]
#[command(name = "pricelist")]
#[command(about = "Aggregate CSV price lists and rank products by price per unit")]
#[command(version)]
#[command(after_help = "\
Ranking is price / weight. A record with no price column ranks 0 and is
listed first; a record with no weight column counts as weight 1.

Without a command, starts an interactive search. Type 'exit' to write the
HTML report and quit.

Examples:
  pricelist --dir ./prices
  pricelist --dir ./prices search молоко
  pricelist --dir ./prices search сыр --json
  pricelist --dir ./prices --output report.html export")]
struct Cli {
    /// Directory containing *.csv price lists
    #[arg(long, short = 'd', global = true)]
    dir: Option<PathBuf>,

    /// HTML report destination
    #[arg(long, short = 'o', global = true)]
    output: Option<PathBuf>,

    /// Config file (default: <config dir>/pricelist/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// What to do with a price list that cannot be loaded
    #[arg(long, value_enum, global = true)]
    on_bad_file: Option<BadFileArg>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search product names once and print ranked matches
    Search {
        /// Name fragment (case-insensitive)
        term: String,

        /// Output JSON instead of numbered lines
        #[arg(long)]
        json: bool,
    },

    /// Write the HTML report and exit
    Export,
}

#[derive(Clone, Copy, ValueEnum)]
enum BadFileArg {
    Skip,
    Abort,
}

impl From<BadFileArg> for BadFilePolicy {
    fn from(arg: BadFileArg) -> Self {
        match arg {
            BadFileArg::Skip => BadFilePolicy::Skip,
            BadFileArg::Abort => BadFilePolicy::Abort,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

/// stderr logger; `RUST_LOG` overrides the default `warn` level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut settings = Settings::load(cli.config.as_deref()).map_err(CliError::config)?;
    if let Some(dir) = cli.dir {
        settings.source_dir = dir;
    }
    if let Some(output) = cli.output {
        settings.output_path = output;
    }
    if let Some(policy) = cli.on_bad_file {
        settings.on_bad_file = policy.into();
    }

    let catalog = load(&settings)?;

    match cli.command {
        None => {
            let stdin = io::stdin();
            QueryLoop::new(&catalog, &settings.output_path).run(stdin.lock(), io::stdout().lock())
        }
        Some(Commands::Search { term, json }) => cmd_search(&catalog, &term, json),
        Some(Commands::Export) => cmd_export(&catalog, &settings),
    }
}

fn load(settings: &Settings) -> Result<Catalog, CliError> {
    let mapping = settings.field_mapping().map_err(CliError::config)?;
    let (catalog, report) = load_catalog(&settings.source_dir, &mapping, settings.on_bad_file)
        .map_err(|e| CliError::load(e, settings))?;

    if !report.skipped.is_empty() {
        log::warn!(
            "{} of {} price list(s) skipped",
            report.skipped.len(),
            report.skipped.len() + report.loaded.len(),
        );
    }
    Ok(catalog)
}

// ============================================================================
// search / export
// ============================================================================

fn cmd_search(catalog: &Catalog, term: &str, json: bool) -> Result<(), CliError> {
    let hits = search::find(catalog, term).map_err(|e| CliError::data(e.to_string()))?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if json {
        let rows: Vec<SearchHit> = hits
            .iter()
            .enumerate()
            .map(|(idx, hit)| SearchHit::from_ranked(idx + 1, hit))
            .collect();
        let json_str = serde_json::to_string_pretty(&rows)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
        writeln!(handle, "{json_str}").map_err(CliError::output)?;
    } else {
        write_results(&mut handle, term, &hits).map_err(CliError::output)?;
    }

    Ok(())
}

fn cmd_export(catalog: &Catalog, settings: &Settings) -> Result<(), CliError> {
    let outcome = export_report(catalog, &settings.output_path).map_err(CliError::export)?;
    println!("{}", export_message(&outcome));
    Ok(())
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn general(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn data(msg: impl Into<String>) -> Self {
        Self { code: EXIT_DATA, message: msg.into(), hint: None }
    }

    pub fn config(err: ConfigError) -> Self {
        let hint = match &err {
            ConfigError::Read { .. } | ConfigError::Parse(_) => {
                Some(format!("default config location: {}", Settings::config_path().display()))
            }
            ConfigError::Validation(_) => None,
        };
        Self { code: EXIT_CONFIG, message: err.to_string(), hint }
    }

    pub fn load(err: LoadError, settings: &Settings) -> Self {
        let hint = match &err {
            LoadError::SourceDir { .. } => {
                Some("pass --dir or set source_dir in the config file".to_string())
            }
            _ if err.is_per_file() && settings.on_bad_file == BadFilePolicy::Abort => {
                Some("use --on-bad-file skip to load the remaining files".to_string())
            }
            _ => None,
        };
        Self { code: load_exit_code(&err), message: err.to_string(), hint }
    }

    pub fn export(err: ExportError) -> Self {
        let hint = match &err {
            ExportError::Io { .. } => Some("the report directory must already exist".to_string()),
            ExportError::Rank(_) => None,
        };
        Self { code: export_exit_code(&err), message: err.to_string(), hint }
    }

    /// Failure writing to the terminal.
    pub fn output(err: io::Error) -> Self {
        Self::io(format!("cannot write output: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn abort_settings() -> Settings {
        Settings { on_bad_file: BadFilePolicy::Abort, ..Settings::default() }
    }

    #[test]
    fn load_hint_for_missing_directory() {
        let err = LoadError::SourceDir { path: PathBuf::from("files"), message: "not found".into() };
        let cli_err = CliError::load(err, &abort_settings());
        assert_eq!(cli_err.code, EXIT_CONFIG);
        assert!(cli_err.hint.unwrap().contains("--dir"));
    }

    #[test]
    fn load_hint_for_aborted_file() {
        let err = LoadError::Encoding { file: "b.csv".into(), valid_up_to: 0 };
        let cli_err = CliError::load(err, &abort_settings());
        assert_eq!(cli_err.code, EXIT_CONFIG);
        assert!(cli_err.message.contains("b.csv"));
        assert!(cli_err.hint.unwrap().contains("--on-bad-file skip"));
    }

    #[test]
    fn no_policy_hint_under_skip() {
        let err = LoadError::Csv { file: "c.csv".into(), message: "bad quote".into() };
        assert!(CliError::load(err, &Settings::default()).hint.is_none());
    }
}
