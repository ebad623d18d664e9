//! Common types and utilities shared across CLI commands.

use std::path::PathBuf;

use addonkeeper::config::{config_file_path, ConfigFile, ConflictSetting, UnknownRoleSetting};
use addonkeeper::logging::{init_logging, LoggingGuard};
use addonkeeper::manager::{ConflictDecision, ManagerConfig};
use addonkeeper::pack::{Classifier, PackRole};
use clap::{Args, ValueEnum};

use super::prompts::CliDecisions;
use crate::error::CliError;

/// Options accepted by every subcommand.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// World directory holding the add-on folders (default: current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Config file (default: <root>/addonkeeper.ini)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// What to do with packs whose type cannot be detected
    #[arg(long, value_enum, global = true)]
    pub on_unknown: Option<UnknownRoleArg>,

    /// What to do when a pack folder already exists
    #[arg(long, value_enum, global = true)]
    pub on_conflict: Option<ConflictArg>,

    /// Log debug details to the log file
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// Root directory, defaulting to the current directory.
    pub fn root(&self) -> PathBuf {
        self.root.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Config file path, explicit or inside the root.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| config_file_path(&self.root()))
    }

    /// Overlay the decision flags onto a loaded config. CLI wins.
    pub fn apply(&self, config: &mut ConfigFile) {
        if let Some(arg) = self.on_unknown {
            config.decisions.unknown_role = arg.into();
        }
        if let Some(arg) = self.on_conflict {
            config.decisions.on_conflict = arg.into();
        }
    }
}

/// `--on-unknown` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnknownRoleArg {
    /// Ask for each pack
    Prompt,
    /// Leave the pack out
    Skip,
    /// Install as a behavior pack
    Behavior,
    /// Install as a resource pack
    Resource,
}

impl From<UnknownRoleArg> for UnknownRoleSetting {
    fn from(arg: UnknownRoleArg) -> Self {
        match arg {
            UnknownRoleArg::Prompt => UnknownRoleSetting::Prompt,
            UnknownRoleArg::Skip => UnknownRoleSetting::Skip,
            UnknownRoleArg::Behavior => UnknownRoleSetting::Assign(PackRole::Behavior),
            UnknownRoleArg::Resource => UnknownRoleSetting::Assign(PackRole::Resource),
        }
    }
}

/// `--on-conflict` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConflictArg {
    /// Ask for each conflict
    Prompt,
    /// Keep the existing folder
    Skip,
    /// Replace the existing folder
    Overwrite,
    /// Install under a new `name_N` folder
    Rename,
}

impl From<ConflictArg> for ConflictSetting {
    fn from(arg: ConflictArg) -> Self {
        match arg {
            ConflictArg::Prompt => ConflictSetting::Prompt,
            ConflictArg::Skip => ConflictSetting::Fixed(ConflictDecision::Skip),
            ConflictArg::Overwrite => ConflictSetting::Fixed(ConflictDecision::Overwrite),
            ConflictArg::Rename => ConflictSetting::Fixed(ConflictDecision::Rename),
        }
    }
}

/// Pack role selection for CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    Behavior,
    Resource,
}

impl From<RoleArg> for PackRole {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Behavior => PackRole::Behavior,
            RoleArg::Resource => PackRole::Resource,
        }
    }
}

/// Resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct Session {
    /// World directory.
    pub root: PathBuf,
    /// Config file merged with CLI overrides.
    pub config: ConfigFile,
    /// Resolved directory layout.
    pub layout: ManagerConfig,
}

impl Session {
    /// Load the config file (if any) and apply CLI overrides.
    pub fn load(args: &GlobalArgs) -> Result<Self, CliError> {
        let root = args.root();
        if !root.is_dir() {
            return Err(CliError::Config(format!(
                "root directory '{}' does not exist",
                root.display()
            )));
        }

        let mut config = ConfigFile::load_from(&args.config_path())?;
        args.apply(&mut config);
        let layout = config.layout(&root);

        Ok(Self {
            root,
            config,
            layout,
        })
    }

    /// Start logging to the configured log file.
    pub fn init_logging(&self, verbose: bool) -> Result<LoggingGuard, CliError> {
        let log_dir = self.config.log_dir(&self.root);
        init_logging(&log_dir, &self.config.logging.file, verbose)
            .map_err(|e| CliError::LoggingInit(e.to_string()))
    }

    /// Classifier with the configured priority.
    pub fn classifier(&self) -> Classifier {
        self.config.classifier()
    }

    /// Decision provider honoring the configured policies.
    pub fn decisions(&self) -> CliDecisions {
        CliDecisions::new(self.config.decisions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_flags_override_config() {
        let mut config = ConfigFile::default();
        config.decisions.on_conflict = ConflictSetting::Fixed(ConflictDecision::Rename);

        let args = GlobalArgs {
            on_unknown: Some(UnknownRoleArg::Resource),
            ..Default::default()
        };
        args.apply(&mut config);

        assert_eq!(
            config.decisions.unknown_role,
            UnknownRoleSetting::Assign(PackRole::Resource)
        );
        // untouched when the flag is absent
        assert_eq!(
            config.decisions.on_conflict,
            ConflictSetting::Fixed(ConflictDecision::Rename)
        );
    }

    #[test]
    fn test_session_reads_config_from_root() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("addonkeeper.ini"),
            "[paths]\nintake_dir = inbox\n[decisions]\non_conflict = overwrite\n",
        )
        .unwrap();

        let args = GlobalArgs {
            root: Some(temp.path().to_path_buf()),
            on_conflict: Some(ConflictArg::Skip),
            ..Default::default()
        };
        let session = Session::load(&args).unwrap();

        assert_eq!(session.layout.intake_dir, temp.path().join("inbox"));
        assert_eq!(
            session.config.decisions.on_conflict,
            ConflictSetting::Fixed(ConflictDecision::Skip)
        );
    }

    #[test]
    fn test_missing_root_is_config_error() {
        let temp = TempDir::new().unwrap();
        let args = GlobalArgs {
            root: Some(temp.path().join("missing")),
            ..Default::default()
        };
        assert!(matches!(Session::load(&args), Err(CliError::Config(_))));
    }
}
