//! m64p-catalog CLI
//!
//! Inspect N64 ROM headers and game databases, and check or normalize
//! Mupen64Plus ROM catalogs.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::LevelFilter;

mod commands;
mod error;
mod settings;

use commands::config::{run_config_path, run_config_show};
use commands::dat::{run_mame, run_nointro};
use commands::header::run_header;
use commands::ini::{run_ini_check, run_ini_normalize};
use error::CliError;

#[derive(Parser)]
#[command(name = "m64p-catalog")]
#[command(about = "Build and inspect Mupen64Plus ROM catalogs", long_about = None)]
struct Cli {
    /// Settings file (defaults to ~/.config/m64p-catalog/settings.toml)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the cartridge header of .z64 files (directories are scanned)
    Header {
        /// ROM files or directories containing .z64 files
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the entries of a MAME software list
    Mame {
        /// Software list XML file (e.g. n64.xml)
        path: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the entries of a No-Intro datafile
    Nointro {
        /// No-Intro XML datafile
        path: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check or rewrite a mupen64plus.ini catalog
    Ini {
        #[command(subcommand)]
        action: IniAction,
    },

    /// Inspect the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum IniAction {
    /// Parse a catalog and report entry count and warnings
    Check {
        path: PathBuf,
    },

    /// Re-write a catalog in canonical (sorted) form
    Normalize {
        path: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the settings file path
    Path,

    /// Show the effective settings
    Show,
}

fn main() {
    let cli = Cli::parse();
    // Keep stdout clean when it carries the normalized catalog.
    let target = match &cli.command {
        Commands::Ini {
            action: IniAction::Normalize { output: None, .. },
        } => env_logger::Target::Stderr,
        _ => env_logger::Target::Stdout,
    };
    init_logging(cli.verbose, cli.quiet, target);

    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings_path = settings::resolve_settings_path(cli.settings);

    match cli.command {
        Commands::Header { paths, json } => run_header(&paths, json),
        Commands::Mame { path, json } => run_mame(&path, json),
        Commands::Nointro { path, json } => run_nointro(&path, json),
        Commands::Ini { action } => match action {
            IniAction::Check { path } => run_ini_check(&path),
            IniAction::Normalize { path, output } => {
                let settings = settings::load_settings(&settings_path)?;
                run_ini_normalize(&path, output.as_deref(), &settings)
            }
        },
        Commands::Config { action } => match action {
            ConfigAction::Path => {
                run_config_path(&settings_path);
                Ok(())
            }
            ConfigAction::Show => run_config_show(&settings_path),
        },
    }
}

/// Route `log` output to `target`. Info lines are printed bare since they are
/// the command output; other levels carry a level prefix.
fn init_logging(verbose: bool, quiet: bool, target: env_logger::Target) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(target)
        .format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            other => writeln!(
                buf,
                "{}: {}",
                other.as_str().to_lowercase(),
                record.args()
            ),
        })
        .init();
}
