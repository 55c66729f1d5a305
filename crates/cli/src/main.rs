// selstat - headless selection statistics over CSV/TSV tables
// Replays drag gestures through the same controller a host UI would drive.

mod exit_codes;
mod table;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use selstat_config::store::load_or;
use selstat_config::{FileStore, Messages, Settings};
use selstat_core::memory::MemoryTables;
use selstat_engine::{InteractionController, KeyInput, KeyOutcome, Modifiers, StatsResult};

use exit_codes::{EXIT_ERROR, EXIT_IO, EXIT_NOTHING_SELECTED, EXIT_PARSE, EXIT_SUCCESS, EXIT_USAGE};
use table::Gesture;

#[derive(Parser)]
#[command(name = "selstat")]
#[command(about = "Sum, average and count of the numbers in a table selection")]
#[command(version)]
struct Cli {
    /// Settings file (defaults to the platform config location)
    #[arg(long, global = true, env = "SELSTAT_SETTINGS")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct SelectionArgs {
    /// CSV or TSV file holding the table
    file: PathBuf,

    /// First drag, in A1 notation (anchor:corner)
    #[arg(long, short = 'r')]
    range: String,

    /// Additional Ctrl+drag. Repeatable.
    #[arg(long, value_name = "RANGE")]
    add: Vec<String>,

    /// Field delimiter (default: tab for .tsv, comma otherwise)
    #[arg(long)]
    delimiter: Option<char>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print statistics for a selection
    #[command(after_help = "\
Examples:
  selstat stats prices.csv --range B2:B20
  selstat stats prices.csv --range A1:B2 --add C3 --json
  selstat stats report.tsv --range C2:C9 --strict --locale de-DE")]
    Stats {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Only count bare numbers
        #[arg(long)]
        strict: bool,

        /// Locale used to format numbers (e.g. en-US, de-DE)
        #[arg(long)]
        locale: Option<String>,

        /// Localized labels (flat map or messages.json)
        #[arg(long, value_name = "PATH")]
        messages: Option<PathBuf>,

        /// Emit JSON instead of the status line
        #[arg(long)]
        json: bool,
    },

    /// Print the selection as tab-separated text
    Copy {
        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Show the effective settings
    Config {
        /// Print the settings file path instead
        #[arg(long)]
        path: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings_path = cli.settings.clone();

    let result = match cli.command {
        Commands::Stats { selection, strict, locale, messages, json } => {
            cmd_stats(settings_path.as_deref(), selection, strict, locale, messages, json)
        }
        Commands::Copy { selection } => cmd_copy(settings_path.as_deref(), selection),
        Commands::Config { path } => cmd_config(settings_path.as_deref(), path),
    };

    match result {
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

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self { code: EXIT_PARSE, message: msg.into(), hint: None }
    }

    pub fn nothing_selected(msg: impl Into<String>) -> Self {
        Self { code: EXIT_NOTHING_SELECTED, message: msg.into(), hint: None }
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

fn settings_store(path: Option<&Path>) -> FileStore {
    match path {
        Some(path) => FileStore::new(path),
        None => FileStore::default_location(),
    }
}

/// Settings from the store; an unreadable file is reported, not ignored.
fn load_settings(path: Option<&Path>) -> Result<Settings, CliError> {
    let store = settings_store(path);
    match path {
        Some(_) => selstat_config::SettingsStore::load(&store)
            .map_err(|e| CliError::io(e.to_string()).with_hint("fix or remove the settings file")),
        // The user-level file is best effort, like the desktop hosts.
        None => Ok(load_or(&store, &Settings::default())),
    }
}

/// Load the table, build a controller and replay the requested drags.
fn run_selection(
    settings: Settings,
    messages: Messages,
    args: &SelectionArgs,
) -> Result<InteractionController<MemoryTables>, CliError> {
    let mut gestures = vec![Gesture::parse(&args.range, false)?];
    for extra in &args.add {
        gestures.push(Gesture::parse(extra, true)?);
    }

    let delimiter = table::resolve_delimiter(&args.file, args.delimiter)?;
    let (tables, table_id) = table::load_table(&args.file, delimiter)?;

    let mut ctl = InteractionController::new(tables, settings).with_messages(messages);
    if !ctl.is_attached() {
        return Err(CliError::nothing_selected("selection handling is disabled")
            .with_hint("set \"enabled\": true in the settings file"));
    }

    table::replay(&mut ctl, table_id, &gestures)?;
    Ok(ctl)
}

// ============================================================================
// stats
// ============================================================================

fn cmd_stats(
    settings_path: Option<&Path>,
    selection: SelectionArgs,
    strict: bool,
    locale: Option<String>,
    messages_path: Option<PathBuf>,
    json: bool,
) -> Result<(), CliError> {
    let mut settings = load_settings(settings_path)?;
    if strict {
        settings.strict_mode = true;
    }
    if let Some(locale) = locale {
        settings.locale = locale;
    }

    let messages = match messages_path {
        Some(path) => Messages::load_from(&path).map_err(|e| CliError::io(e.to_string()))?,
        None => Messages::default(),
    };

    let ctl = run_selection(settings, messages, &selection)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if json {
        let value = match ctl.last_stats() {
            StatsResult::Empty => serde_json::json!({
                "empty": true,
                "cells": ctl.model().len(),
            }),
            StatsResult::Numeric(stats) => serde_json::json!({
                "sum": stats.sum,
                "average": stats.average,
                "count": stats.count,
                "cells": ctl.model().len(),
            }),
        };
        let text = serde_json::to_string(&value).map_err(|e| CliError::other(e.to_string()))?;
        writeln!(out, "{}", text).map_err(|e| CliError::io(e.to_string()))?;
        return Ok(());
    }

    let line = ctl.status_line().unwrap_or_else(|| "No numeric cells".to_string());
    writeln!(out, "{}", line).map_err(|e| CliError::io(e.to_string()))
}

// ============================================================================
// copy
// ============================================================================

fn cmd_copy(settings_path: Option<&Path>, selection: SelectionArgs) -> Result<(), CliError> {
    let settings = load_settings(settings_path)?;
    let mut ctl = run_selection(settings, Messages::default(), &selection)?;

    if !ctl.settings().smart_copy {
        return Err(CliError::nothing_selected("smart copy is disabled")
            .with_hint("set \"smartCopy\": true in the settings file"));
    }

    match ctl.key_down(&KeyInput::new("c", Modifiers::CTRL)) {
        KeyOutcome::Copied(text) => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            writeln!(out, "{}", text).map_err(|e| CliError::io(e.to_string()))
        }
        KeyOutcome::Ignored => Err(CliError::nothing_selected("selection is empty")),
    }
}

// ============================================================================
// config
// ============================================================================

fn cmd_config(settings_path: Option<&Path>, show_path: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if show_path {
        let store = settings_store(settings_path);
        return writeln!(out, "{}", store.path().display()).map_err(|e| CliError::io(e.to_string()));
    }

    let settings = load_settings(settings_path)?;
    let json = serde_json::to_string_pretty(&settings).map_err(|e| CliError::other(e.to_string()))?;
    writeln!(out, "{}", json).map_err(|e| CliError::io(e.to_string()))
}
