//! Interactive answers for the relocation engine.
//!
//! Questions are only asked when the configured policy is `prompt`. When no
//! terminal is attached, or the prompt fails, the pack is skipped.

use std::path::Path;

use console::style;
use dialoguer::{theme::ColorfulTheme, Select};
use tracing::warn;

use addonkeeper::config::{ConflictSetting, DecisionSettings};
use addonkeeper::manager::{ConflictDecision, DecisionProvider};
use addonkeeper::pack::PackRole;

use crate::error::CliError;

const ROLE_CHOICES: [&str; 3] = ["Behavior pack", "Resource pack", "Skip this pack"];
const CONFLICT_CHOICES: [&str; 3] = [
    "Overwrite the existing folder",
    "Skip (keep the existing folder)",
    "Rename (install next to it)",
];

/// [`DecisionProvider`] backed by config policies and `dialoguer` prompts.
pub struct CliDecisions {
    settings: DecisionSettings,
    theme: ColorfulTheme,
}

impl CliDecisions {
    pub fn new(settings: DecisionSettings) -> Self {
        Self {
            settings,
            theme: ColorfulTheme::default(),
        }
    }

    fn prompt_role(&self, folder_name: &str) -> Result<Option<PackRole>, CliError> {
        ensure_terminal()?;
        println!(
            "{} Could not detect the pack type of '{}'",
            style("?").yellow().bold(),
            style(folder_name).bold()
        );
        let selection = Select::with_theme(&self.theme)
            .with_prompt("Install it as")
            .items(&ROLE_CHOICES)
            .default(2)
            .interact()
            .map_err(|e| CliError::Prompt(e.to_string()))?;

        Ok(match selection {
            0 => Some(PackRole::Behavior),
            1 => Some(PackRole::Resource),
            _ => None,
        })
    }

    fn prompt_conflict(
        &self,
        folder_name: &str,
        destination: &Path,
    ) -> Result<ConflictDecision, CliError> {
        ensure_terminal()?;
        println!(
            "{} '{}' already exists in {}",
            style("!").yellow().bold(),
            style(folder_name).bold(),
            destination.display()
        );
        let selection = Select::with_theme(&self.theme)
            .with_prompt("What should happen")
            .items(&CONFLICT_CHOICES)
            .default(1)
            .interact()
            .map_err(|e| CliError::Prompt(e.to_string()))?;

        Ok(match selection {
            0 => ConflictDecision::Overwrite,
            2 => ConflictDecision::Rename,
            _ => ConflictDecision::Skip,
        })
    }
}

impl DecisionProvider for CliDecisions {
    fn choose_role(&mut self, folder_name: &str) -> Option<PackRole> {
        if let Some(answer) = self.settings.unknown_role.fixed() {
            return answer;
        }
        self.prompt_role(folder_name).unwrap_or_else(|e| {
            warn!(folder = %folder_name, error = %e, "role prompt failed, skipping pack");
            println!("{}", skip_notice(folder_name, &e));
            None
        })
    }

    fn resolve_conflict(&mut self, folder_name: &str, destination: &Path) -> ConflictDecision {
        if let ConflictSetting::Fixed(decision) = self.settings.on_conflict {
            return decision;
        }
        self.prompt_conflict(folder_name, destination)
            .unwrap_or_else(|e| {
                warn!(folder = %folder_name, error = %e, "conflict prompt failed, keeping existing");
                println!("{}", skip_notice(folder_name, &e));
                ConflictDecision::Skip
            })
    }
}

/// Line shown when a question could not be asked.
fn skip_notice(folder_name: &str, error: &CliError) -> String {
    let reason = match error {
        CliError::Prompt(reason) => reason.clone(),
        other => other.to_string(),
    };
    format!(
        "  {} {}: cannot ask ({})",
        style("[SKIP]").yellow().bold(),
        folder_name,
        reason
    )
}

fn ensure_terminal() -> Result<(), CliError> {
    if console::user_attended_stderr() {
        Ok(())
    } else {
        Err(CliError::Prompt("no terminal attached".to_string()))
    }
}
