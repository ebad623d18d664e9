//! addonkeeper - Minecraft Bedrock add-on pack manager
//!
//! This library sorts `.mcaddon` / `.mcpack` archives into behavior and
//! resource pack directories and keeps a per-role index of the installed
//! packs in sync with what is on disk.
//!
//! - [`pack`] - Domain types: roles, classifier rules, manifests, indexes
//! - [`manager`] - Intake, relocation, conflict handling, scanning, audit
//! - [`config`] - Optional `addonkeeper.ini` configuration
//! - [`logging`] - `tracing` subscriber setup with a log file

pub mod config;
pub mod logging;
pub mod manager;
pub mod pack;
