//! Non-interactive [`DecisionProvider`] implementations.
//!
//! - [`PolicyDecisions`] answers every question the same way.
//! - [`ScriptedDecisions`] answers from per-folder maps and falls back to a
//!   policy for anything not listed.
//!
//! The interactive prompt provider lives in the CLI crate.

use std::collections::HashMap;
use std::path::Path;

use crate::pack::PackRole;

use super::conflict::ConflictDecision;
use super::traits::DecisionProvider;

/// Fixed answers for every decision point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyDecisions {
    /// Role for unclassified packs; `None` skips them.
    pub unknown_role: Option<PackRole>,
    /// Action for occupied destinations.
    pub on_conflict: ConflictDecision,
}

impl Default for PolicyDecisions {
    /// Skip anything that would need a human.
    fn default() -> Self {
        Self {
            unknown_role: None,
            on_conflict: ConflictDecision::Skip,
        }
    }
}

impl PolicyDecisions {
    /// Create a policy.
    pub fn new(unknown_role: Option<PackRole>, on_conflict: ConflictDecision) -> Self {
        Self {
            unknown_role,
            on_conflict,
        }
    }
}

impl DecisionProvider for PolicyDecisions {
    fn choose_role(&mut self, _folder_name: &str) -> Option<PackRole> {
        self.unknown_role
    }

    fn resolve_conflict(&mut self, _folder_name: &str, _destination: &Path) -> ConflictDecision {
        self.on_conflict
    }
}

/// Pre-supplied answers keyed by folder name.
///
/// Every question is recorded, which makes the provider useful for
/// asserting what the relocation engine asked.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecisions {
    roles: HashMap<String, Option<PackRole>>,
    conflicts: HashMap<String, ConflictDecision>,
    fallback: PolicyDecisions,
    role_questions: Vec<String>,
    conflict_questions: Vec<String>,
}

impl ScriptedDecisions {
    /// Create an empty script with the given fallback policy.
    pub fn new(fallback: PolicyDecisions) -> Self {
        Self {
            fallback,
            ..Default::default()
        }
    }

    /// Answer the role question for `folder_name` (`None` = skip).
    pub fn with_role(mut self, folder_name: impl Into<String>, role: Option<PackRole>) -> Self {
        self.roles.insert(folder_name.into(), role);
        self
    }

    /// Answer the conflict question for `folder_name`.
    pub fn with_conflict(
        mut self,
        folder_name: impl Into<String>,
        decision: ConflictDecision,
    ) -> Self {
        self.conflicts.insert(folder_name.into(), decision);
        self
    }

    /// Folder names the role question was asked for, in order.
    pub fn role_questions(&self) -> &[String] {
        &self.role_questions
    }

    /// Folder names the conflict question was asked for, in order.
    pub fn conflict_questions(&self) -> &[String] {
        &self.conflict_questions
    }
}

impl DecisionProvider for ScriptedDecisions {
    fn choose_role(&mut self, folder_name: &str) -> Option<PackRole> {
        self.role_questions.push(folder_name.to_string());
        match self.roles.get(folder_name) {
            Some(answer) => *answer,
            None => self.fallback.choose_role(folder_name),
        }
    }

    fn resolve_conflict(&mut self, folder_name: &str, destination: &Path) -> ConflictDecision {
        self.conflict_questions.push(folder_name.to_string());
        match self.conflicts.get(folder_name) {
            Some(decision) => *decision,
            None => self.fallback.resolve_conflict(folder_name, destination),
        }
    }
}
