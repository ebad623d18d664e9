//! Folder-name based pack role detection.
//!
//! Add-on authors usually mark pack folders with a suffix such as `" BP"`,
//! `"_RP"` or `"-Behavior Pack"`. The classifier holds an ordered table of
//! `(role, pattern)` rules and returns the role of the first rule whose
//! pattern matches the end of the folder name.
//!
//! Detection is a heuristic: a name like `"Castle"` carries no marker and
//! classifies as unknown, so callers must supply a fallback. Names that end
//! in a bare `b` or `r` (e.g. `"Web"`) are also picked up by the single-letter
//! forms, which is accepted behaviour.
//!
//! # Example
//!
//! ```
//! use addonkeeper::pack::{Classifier, PackRole};
//!
//! let classifier = Classifier::default();
//! assert_eq!(classifier.classify("Castle_BP"), Some(PackRole::Behavior));
//! assert_eq!(classifier.classify("Castle RP"), Some(PackRole::Resource));
//! assert_eq!(classifier.classify("Castle"), None);
//! ```

use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};
use thiserror::Error;

use super::types::PackRole;

/// Default rule table, checked top to bottom.
///
/// Each pattern is matched case-insensitively against the end of the name and
/// allows one optional separator (whitespace, `_` or `-`) before the marker.
pub const DEFAULT_RULES: &[(PackRole, &str)] = &[
    (PackRole::Behavior, r"[\s_-]?(BP|BH|Behavior\s*Pack|B)$"),
    (PackRole::Resource, r"[\s_-]?(RP|RS|Resource\s*Pack|R)$"),
];

/// Error building a classifier from a custom rule table.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// A rule pattern failed to compile.
    #[error("invalid pattern for {role} rule '{pattern}': {source}")]
    InvalidPattern {
        role: PackRole,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A single compiled classification rule.
#[derive(Debug, Clone)]
pub struct ClassifierRule {
    role: PackRole,
    pattern: Regex,
}

impl ClassifierRule {
    /// Compile a rule. Patterns are always case-insensitive.
    pub fn new(role: PackRole, pattern: &str) -> Result<Self, ClassifierError> {
        let pattern = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| ClassifierError::InvalidPattern {
                role,
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self { role, pattern })
    }

    /// Role assigned when this rule matches.
    pub fn role(&self) -> PackRole {
        self.role
    }

    /// Check whether the rule matches a folder name.
    pub fn matches(&self, folder_name: &str) -> bool {
        self.pattern.is_match(folder_name)
    }
}

/// Ordered rule table mapping folder names to pack roles.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<ClassifierRule>,
}

fn default_rules() -> &'static [ClassifierRule] {
    static RULES: OnceLock<Vec<ClassifierRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        DEFAULT_RULES
            .iter()
            .map(|(role, pattern)| ClassifierRule::new(*role, pattern).expect("valid pack pattern"))
            .collect()
    })
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            rules: default_rules().to_vec(),
        }
    }
}

impl Classifier {
    /// Build a classifier from a custom rule table.
    ///
    /// Rules are tried in the given order; the first match wins.
    pub fn new<'a, I>(rules: I) -> Result<Self, ClassifierError>
    where
        I: IntoIterator<Item = (PackRole, &'a str)>,
    {
        let rules = rules
            .into_iter()
            .map(|(role, pattern)| ClassifierRule::new(role, pattern))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Move all rules for `role` ahead of the others.
    ///
    /// This changes the tie-break when a name matches rules of both roles.
    /// The relative order of rules within each role is kept.
    pub fn with_priority(mut self, role: PackRole) -> Self {
        // stable sort keeps per-role order
        self.rules.sort_by_key(|rule| rule.role != role);
        self
    }

    /// The compiled rules in evaluation order.
    pub fn rules(&self) -> &[ClassifierRule] {
        &self.rules
    }

    /// Detect the role of a pack folder from its name.
    ///
    /// Returns `None` when no rule matches.
    pub fn classify(&self, folder_name: &str) -> Option<PackRole> {
        self.rules
            .iter()
            .find(|rule| rule.matches(folder_name))
            .map(ClassifierRule::role)
    }
}

/// Classify a folder name with the default rule table.
pub fn classify(folder_name: &str) -> Option<PackRole> {
    default_rules()
        .iter()
        .find(|rule| rule.matches(folder_name))
        .map(ClassifierRule::role)
}
