//! Required-field validation over the merged settings tree.
//!
//! Every rule is evaluated; nothing short-circuits. A deploy with three
//! missing fields reports three errors in one pass, so the operator fixes
//! the manifest once instead of replaying the failure per field.

use std::fmt;

use crate::settings::SettingsTree;

/// A single failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Section the rule inspected, e.g. `info`.
    pub section: String,
    /// Key the rule inspected, e.g. `listen_port`.
    pub key: String,
    /// Human-readable explanation shown to the operator.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "settings.{}.{} must be set: {}",
            self.section, self.key, self.message
        )
    }
}

/// Fields the daemon refuses to start without.
const REQUIRED: &[(&str, &str, &str)] = &[
    (
        "info",
        "listen_port",
        "the mint has no port to listen on",
    ),
    (
        "ln",
        "ln_backend",
        "a Lightning backend must be selected",
    ),
    (
        "database",
        "engine",
        "a database engine must be selected",
    ),
];

/// Run all rules against `tree` and return every violation.
///
/// An empty result means the tree passes. Callers are expected to run this
/// against the *merged* tree (defaults + overrides) before any side effect.
pub fn validate(tree: &SettingsTree) -> Vec<ValidationError> {
    REQUIRED
        .iter()
        .filter(|(section, key, _)| tree.get(section, key).is_none())
        .map(|(section, key, message)| ValidationError {
            section: (*section).to_string(),
            key: (*key).to_string(),
            message: (*message).to_string(),
        })
        .collect()
}
