// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod commands;
mod helpers;

use std::path::{Path, PathBuf};
use std::process::ExitCode as ProcessExitCode;

use clap::{error::ErrorKind, ArgAction, Parser, Subcommand};
use storefront_core::{
    env_bool, env_non_empty, ExitCode, MachineError, ENV_STOREFRONT_LOG_JSON,
    ENV_STOREFRONT_LOG_LEVEL,
};
use storefront_store::StoreError;
use storefront_sync::SyncError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const STOREFRONT_HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
Usage: {usage}

Options:
{options}

Commands:
{subcommands}
{after-help}";

#[derive(Parser)]
#[command(name = "storefront", version)]
#[command(about = "Storefront catalog sync and rendering")]
#[command(help_template = STOREFRONT_HELP_TEMPLATE)]
#[command(
    after_help = "Environment:\n  SHOPIER_API_TOKEN         Bearer credential for the product API (required by sync)\n  STOREFRONT_CATALOG_PATH   Catalog Store file (default products.js)\n  STOREFRONT_ON_ITEM_ERROR  abort | skip\n  STOREFRONT_LOG_LEVEL      Log verbosity override\n  STOREFRONT_LOG_JSON       Emit JSON logs on stderr"
)]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(long, global = true, default_value_t = false)]
    quiet: bool,
    #[arg(long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Refresh the Catalog Store from the product API (default).
    Sync,
    /// Check a Catalog Store file.
    Validate { path: Option<PathBuf> },
    /// Render the initial storefront to an HTML fragment.
    Render {
        #[arg(long)]
        catalog: Option<PathBuf>,
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Clone, Copy)]
struct LogFlags {
    quiet: bool,
    verbose: u8,
}

#[derive(Clone, Copy)]
pub(crate) struct OutputMode {
    pub(crate) json: bool,
}

pub fn main_entry() -> ProcessExitCode {
    let wants_json = std::env::args().any(|arg| arg == "--json");
    match run() {
        Ok(()) => ProcessExitCode::from(ExitCode::Success as u8),
        Err(err) => {
            emit_error(&err, wants_json);
            ProcessExitCode::from(err.exit_code as u8)
        }
    }
}

fn run() -> Result<(), CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{err}");
                return Ok(());
            }
            _ => {
                return Err(CliError {
                    exit_code: ExitCode::Usage,
                    machine: MachineError::new("usage_error", "invalid command line arguments")
                        .with_detail("error", &err.to_string()),
                });
            }
        },
    };
    init_tracing(LogFlags {
        quiet: cli.quiet,
        verbose: cli.verbose,
    });
    let output_mode = OutputMode { json: cli.json };

    match cli.command.unwrap_or(Commands::Sync) {
        Commands::Sync => commands::run_sync(output_mode),
        Commands::Validate { path } => commands::run_validate(path, output_mode),
        Commands::Render { catalog, out } => commands::run_render(catalog, out, output_mode),
    }
}

fn init_tracing(flags: LogFlags) {
    let filter = if flags.quiet {
        EnvFilter::new("error")
    } else if flags.verbose >= 2 {
        EnvFilter::new("trace")
    } else if flags.verbose == 1 {
        EnvFilter::new("debug")
    } else if let Some(level) = env_non_empty(ENV_STOREFRONT_LOG_LEVEL) {
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let registry = tracing_subscriber::registry().with(filter);
    let _ = if env_bool(ENV_STOREFRONT_LOG_JSON, false) {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
}

pub(crate) struct CliError {
    exit_code: ExitCode,
    machine: MachineError,
}

impl CliError {
    pub(crate) fn failure(code: &str, message: &str) -> Self {
        Self {
            exit_code: ExitCode::Failure,
            machine: MachineError::new(code, message),
        }
    }

    pub(crate) fn internal(message: String) -> Self {
        Self::failure("internal_error", &message)
    }

    pub(crate) fn at_path(mut self, path: &Path) -> Self {
        self.machine = self.machine.with_detail("path", &path.display().to_string());
        self
    }
}

impl From<SyncError> for CliError {
    fn from(err: SyncError) -> Self {
        Self::failure(err.code.as_str(), &err.message)
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        Self::failure(err.code.as_str(), &err.message)
    }
}

fn emit_error(error: &CliError, machine_json: bool) {
    if machine_json {
        match serde_json::to_string(&error.machine) {
            Ok(payload) => eprintln!("{payload}"),
            Err(_) => eprintln!(
                "{{\"code\":\"internal_error\",\"message\":\"failed to encode structured error\",\"details\":{{}}}}"
            ),
        }
    } else {
        eprintln!("{}", error.machine);
    }
}
