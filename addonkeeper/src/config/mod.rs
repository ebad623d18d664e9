//! User configuration read from `addonkeeper.ini`.
//!
//! The file is optional. A missing file means defaults, and every key is
//! optional within its section.
//!
//! # Example
//!
//! ```
//! use addonkeeper::config::ConfigFile;
//! use addonkeeper::pack::PackRole;
//! use std::path::Path;
//!
//! let config = ConfigFile::default();
//! let layout = config.layout(Path::new("/srv/world"));
//! assert_eq!(
//!     layout.role_dir(PackRole::Behavior),
//!     Path::new("/srv/world/behavior_packs")
//! );
//! ```

mod file;
mod parser;
mod settings;
mod writer;

pub use file::{config_file_path, ConfigFileError, CONFIG_FILE_NAME};
pub use parser::{parse_conflict, parse_unknown_role};
pub use settings::{
    ClassifierSettings, ConfigFile, ConflictSetting, DecisionSettings, LoggingSettings,
    PathsSettings, UnknownRoleSetting,
};
