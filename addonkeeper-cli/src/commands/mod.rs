//! CLI command implementations.
//!
//! # Command Modules
//!
//! - [`run`] - Full workflow (default)
//! - [`extract`] - Install archives from the intake folder
//! - [`scan`] - Rebuild pack indexes
//! - [`audit`] - Flag folders without `manifest.json`
//! - [`init`] - Write a default configuration file

pub mod audit;
pub mod common;
pub mod extract;
pub mod init;
pub mod output;
pub mod prompts;
pub mod run;
pub mod scan;
