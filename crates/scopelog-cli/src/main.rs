//! scopelog CLI - Inspect and edit dynamic log level configuration.
//!
//! Commands:
//! - `explain` - Show how a log call would be resolved
//! - `candidates` - Print the name prefixes consulted for a logger
//! - `store` - Read and write the persistent configuration store
//!
//! Exit codes: `explain` exits 0 when the call would be emitted and 1 when it
//! would be suppressed. Every command exits 2 on errors.

#![forbid(unsafe_code)]

use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use console::style;
use serde_json::json;

use scopelog_console::detection::plain_requested;
use scopelog_core::{
    DEFAULT_STORAGE_KEY, EnvProvider, FileStore, LevelMap, LevelMapError, LevelResolver,
    MemoryStore, ProviderChain, Severity, StoreError, candidates, default_severity,
};

/// scopelog CLI - Explain and configure hierarchical log levels.
#[derive(Parser)]
#[command(name = "scopelog")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Explain whether a call would be emitted.
    ///
    /// Runs the same resolution a logger performs, against the persistent
    /// store and the environment, and prints the deciding rule.
    Explain {
        /// Dot-delimited logger name.
        name: String,

        /// Severity of the call (log, debug, info, warn, error, fatal).
        level: Severity,

        /// Global level (default: the `loglevel` environment variable, else log).
        #[arg(long)]
        global: Option<Severity>,

        /// The logger's own default level (default: same as the global default).
        #[arg(long = "default")]
        default_level: Option<Severity>,

        /// Storage key holding the level map.
        #[arg(long, short = 'k', default_value = DEFAULT_STORAGE_KEY)]
        key: String,

        /// Persistent store file (default: the platform config dir).
        #[arg(long, short = 's')]
        store: Option<PathBuf>,

        /// Level map JSON consulted before the store, as a session value.
        #[arg(long, short = 'c')]
        config: Option<String>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the candidate prefixes for a logger name, longest first.
    Candidates {
        /// Dot-delimited logger name.
        name: String,
    },

    /// Read and write the persistent store.
    Store {
        #[command(subcommand)]
        action: StoreAction,

        /// Persistent store file (default: the platform config dir).
        #[arg(long, short = 's', global = true)]
        store: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum StoreAction {
    /// Print the value stored under a key.
    Get {
        /// Storage key.
        key: String,
    },

    /// Store a level map under a key.
    ///
    /// The value must be a JSON object of logger name prefixes to integer
    /// ranks, e.g. '{"app": 0, "app.db": 300}'.
    Set {
        /// Storage key.
        key: String,

        /// Level map JSON.
        value: String,
    },

    /// Remove a key.
    Remove {
        /// Storage key.
        key: String,
    },

    /// List every stored key and value.
    List,
}

/// Errors reported by CLI commands.
#[derive(Debug)]
enum CliError {
    Store(StoreError),
    InvalidMap(LevelMapError),
    MissingKey(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(e) => write!(f, "{e}"),
            Self::InvalidMap(e) => write!(f, "{e}"),
            Self::MissingKey(key) => write!(f, "no value stored under '{key}'"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            Self::InvalidMap(e) => Some(e),
            Self::MissingKey(_) => None,
        }
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<LevelMapError> for CliError {
    fn from(err: LevelMapError) -> Self {
        Self::InvalidMap(err)
    }
}

type CliResult<T> = Result<T, CliError>;

/// Exit code for command errors; 1 is reserved for "disabled".
const ERROR_EXIT: u8 = 2;

fn main() -> ExitCode {
    if plain_requested() {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Explain {
            name,
            level,
            global,
            default_level,
            key,
            store,
            config,
            json,
        } => cmd_explain(&ExplainArgs {
            name,
            level,
            global: global.unwrap_or_else(default_severity),
            default_level: default_level.unwrap_or_else(default_severity),
            key,
            store,
            config,
            json,
        }),
        Commands::Candidates { name } => {
            cmd_candidates(&name);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Store { action, store } => {
            open_store(store).and_then(|file| cmd_store(&file, action))
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e}", style("Error:").for_stderr().red().bold());
            ExitCode::from(ERROR_EXIT)
        }
    }
}

fn open_store(path: Option<PathBuf>) -> CliResult<FileStore> {
    match path {
        Some(path) => Ok(FileStore::new(path)),
        None => Ok(FileStore::at_default_location()?),
    }
}

struct ExplainArgs {
    name: String,
    level: Severity,
    global: Severity,
    default_level: Severity,
    key: String,
    store: Option<PathBuf>,
    config: Option<String>,
    json: bool,
}

fn cmd_explain(args: &ExplainArgs) -> CliResult<ExitCode> {
    let session = MemoryStore::new();
    if let Some(config) = &args.config {
        session.set(args.key.clone(), config.clone());
    }

    let mut chain = ProviderChain::new().with(session);
    if let Some(path) = args.store.clone().or_else(FileStore::default_path) {
        chain.push(Arc::new(FileStore::new(path)));
    }
    chain.push(Arc::new(EnvProvider));
    let source = chain.locate(&args.key).map(|found| found.provider);

    let resolver = LevelResolver::new(chain);
    let resolution = resolver.resolve(
        &args.name,
        args.level,
        args.global,
        args.default_level,
        &args.key,
    );
    let enabled = resolution.is_enabled();

    if args.json {
        let out = json!({
            "name": args.name,
            "level": args.level.as_str(),
            "enabled": enabled,
            "reason": resolution.to_string(),
            "source": source,
        });
        println!("{out}");
    } else {
        let verdict = if enabled {
            style(resolution.to_string()).green()
        } else {
            style(resolution.to_string()).yellow()
        };
        println!("{} {} {verdict}", style(&args.name).cyan().bold(), args.level);
        if let Some(source) = source {
            println!("  {} {source}", style("config from:").dim());
        }
    }

    Ok(if enabled {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_candidates(name: &str) {
    for candidate in candidates(name) {
        println!("{candidate}");
    }
}

fn cmd_store(store: &FileStore, action: StoreAction) -> CliResult<ExitCode> {
    match action {
        StoreAction::Get { key } => {
            let entries = store.entries()?;
            let value = entries.get(&key).ok_or(CliError::MissingKey(key))?;
            println!("{value}");
        }
        StoreAction::Set { key, value } => {
            let map = LevelMap::parse(&value)?;
            store.set(&key, &value)?;
            println!(
                "{} {key} ({} entries) in {}",
                style("Stored").green().bold(),
                map.len(),
                store.path().display()
            );
            for (name, threshold) in map.iter() {
                println!("  {name} >= {threshold}");
            }
        }
        StoreAction::Remove { key } => {
            if store.remove(&key)?.is_none() {
                return Err(CliError::MissingKey(key));
            }
            println!("{} {key}", style("Removed").green().bold());
        }
        StoreAction::List => {
            for (key, value) in store.entries()? {
                println!("{key} = {value}");
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
