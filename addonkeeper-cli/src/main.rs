//! addonkeeper CLI - Command-line interface
//!
//! Sorts downloaded Minecraft Bedrock add-ons into the world's pack folders
//! and keeps the pack index files in sync.

mod commands;
mod error;

use clap::{Parser, Subcommand};

use commands::common::{GlobalArgs, RoleArg, Session};
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "addonkeeper")]
#[command(version, about = "Install and index Minecraft Bedrock add-on packs", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract archives, rebuild both indexes, and audit (default)
    Run,

    /// Extract and install archives from the intake folder only
    Extract,

    /// Rebuild the pack index files from the installed folders
    Scan {
        /// Only scan this pack type
        #[arg(long, value_enum)]
        role: Option<RoleArg>,
    },

    /// List installed pack folders and flag those without manifest.json
    Audit,

    /// Write a default addonkeeper.ini into the root directory
    Init {
        /// Replace an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = dispatch(cli) {
        e.exit();
    }
}

fn dispatch(cli: Cli) -> Result<(), CliError> {
    let command = cli.command.unwrap_or(Commands::Run);

    if let Commands::Init { force } = command {
        return commands::init::run(&cli.global, force);
    }

    let session = Session::load(&cli.global)?;
    let _logging = session.init_logging(cli.global.verbose)?;
    tracing::info!(root = %session.root.display(), "addonkeeper started");

    match command {
        Commands::Run => commands::run::run(&session),
        Commands::Extract => commands::extract::run(&session).map(|_| ()),
        Commands::Scan { role } => commands::scan::run(&session, role.map(Into::into)).map(|_| ()),
        Commands::Audit => commands::audit::run(&session).map(|_| ()),
        Commands::Init { .. } => Ok(()),
    }
}
