//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use addonkeeper::config::ConfigFileError;
use addonkeeper::manager::ManagerError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// An interactive question could not be asked or answered
    Prompt(String),
    /// Add-on manager failure
    Manager(ManagerError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Manager(ManagerError::IndexWriteFailed { .. }) => {
                eprintln!();
                eprintln!("The previous index file was left untouched.");
                eprintln!("Check that the world directory is writable and try again.");
            }
            CliError::Config(_) => {
                eprintln!();
                eprintln!("Run 'addonkeeper init --force' to write a fresh configuration file.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Prompt(msg) => write!(f, "Prompt failed: {}", msg),
            CliError::Manager(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Manager(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ManagerError> for CliError {
    fn from(e: ManagerError) -> Self {
        CliError::Manager(e)
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}
