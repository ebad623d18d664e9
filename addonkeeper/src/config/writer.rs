//! INI serialization: `ConfigFile` → commented INI string.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to the commented INI text written by `save_to`.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let paths = &config.paths;
    format!(
        r#"[paths]
; Relative paths resolve against the add-on root directory.
; Drop .mcaddon / .mcpack files here
intake_dir = {}
; Extraction scratch area, removed after every run
scratch_dir = {}
behavior_dir = {}
resource_dir = {}
; Index files rewritten on every scan
behavior_index = {}
resource_index = {}

[classifier]
; Role that wins when a folder name matches both rule sets: behavior | resource
priority = {}

[decisions]
; Packs whose role cannot be inferred from the folder name:
;   prompt   - ask for each pack
;   skip     - leave them in the scratch area (discarded)
;   behavior - install as behavior packs
;   resource - install as resource packs
unknown_role = {}
; Destination folder already exists: prompt | skip | overwrite | rename
on_conflict = {}

[logging]
directory = {}
file = {}
"#,
        path_to_string(&paths.intake_dir),
        path_to_string(&paths.scratch_dir),
        path_to_string(&paths.behavior_dir),
        path_to_string(&paths.resource_dir),
        path_to_string(&paths.behavior_index),
        path_to_string(&paths.resource_index),
        config.classifier.priority,
        config.decisions.unknown_role,
        config.decisions.on_conflict,
        path_to_string(&config.logging.directory),
        config.logging.file,
    )
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::{ConflictSetting, UnknownRoleSetting};
    use crate::manager::ConflictDecision;
    use crate::pack::PackRole;

    #[test]
    fn test_default_output_has_all_sections() {
        let text = to_config_string(&ConfigFile::default());
        for section in ["[paths]", "[classifier]", "[decisions]", "[logging]"] {
            assert!(text.contains(section), "missing {}", section);
        }
        assert!(text.contains("intake_dir = downloaded_addons"));
        assert!(text.contains("unknown_role = prompt"));
    }

    #[test]
    fn test_writes_fixed_decisions() {
        let mut config = ConfigFile::default();
        config.decisions.unknown_role = UnknownRoleSetting::Assign(PackRole::Resource);
        config.decisions.on_conflict = ConflictSetting::Fixed(ConflictDecision::Overwrite);

        let text = to_config_string(&config);
        assert!(text.contains("unknown_role = resource"));
        assert!(text.contains("on_conflict = overwrite"));
    }
}
