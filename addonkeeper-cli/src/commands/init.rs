//! Init command - write a default configuration file.

use console::style;

use addonkeeper::config::ConfigFile;

use super::common::GlobalArgs;
use crate::error::CliError;

/// Run the init command.
///
/// Decision flags given on the command line are written into the file.
pub fn run(args: &GlobalArgs, force: bool) -> Result<(), CliError> {
    let path = args.config_path();
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "'{}' already exists (use --force to replace it)",
            path.display()
        )));
    }

    let mut config = ConfigFile::default();
    args.apply(&mut config);
    config.save_to(&path)?;

    println!("{} {}", style("Wrote").green(), path.display());
    println!();
    println!("Edit this file to customize addonkeeper settings.");
    println!("CLI arguments override config file values when specified.");
    Ok(())
}
