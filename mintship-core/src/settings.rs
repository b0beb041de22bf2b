//! The daemon settings tree — section → key → TOML value.
//!
//! The tree is what gets rendered to the daemon's `config.toml`. Top-level
//! keys are section names; every section value must be a table (enforced at
//! render time, not here). `BTreeMap` backing means iteration order, and
//! therefore rendered output, is stable across runs.
//!
//! Defaults are an explicit two-step construction: [`SettingsTree::defaults`]
//! builds the built-in tree, then [`SettingsTree::merged_over_defaults`]
//! deep-merges the operator's overrides on top. Tables merge recursively;
//! scalars and arrays replace.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use toml::Value;

/// Section name → section contents, as supplied in the manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsTree(pub BTreeMap<String, Value>);

impl SettingsTree {
    /// The built-in default tree.
    ///
    /// Minimal on purpose: only `info.listen_host`. The fields the
    /// validator checks (`info.listen_port`, `ln.ln_backend`,
    /// `database.engine`) are never defaulted; an operator must state them.
    pub fn defaults() -> Self {
        let mut info = toml::map::Map::new();
        info.insert(
            "listen_host".to_string(),
            Value::String("127.0.0.1".to_string()),
        );

        let mut tree = BTreeMap::new();
        tree.insert("info".to_string(), Value::Table(info));
        SettingsTree(tree)
    }

    /// Deep-merge `self` over the built-in defaults and return the result.
    pub fn merged_over_defaults(&self) -> Self {
        let mut base = SettingsTree::defaults();
        for (section, value) in &self.0 {
            match base.0.entry(section.clone()) {
                std::collections::btree_map::Entry::Occupied(mut slot) => {
                    merge_value(slot.get_mut(), value.clone());
                }
                std::collections::btree_map::Entry::Vacant(slot) => {
                    slot.insert(value.clone());
                }
            }
        }
        base
    }

    /// Look up `section.key`. Returns `None` when the section is absent,
    /// is not a table, or lacks the key.
    pub fn get(&self, section: &str, key: &str) -> Option<&Value> {
        self.0.get(section)?.as_table()?.get(key)
    }

    /// `info.listen_port`, when present and an integer in `u16` range.
    pub fn listen_port(&self) -> Option<u16> {
        let port = self.get("info", "listen_port")?.as_integer()?;
        u16::try_from(port).ok()
    }

    /// `info.listen_host`, when present and a string.
    pub fn listen_host(&self) -> Option<&str> {
        self.get("info", "listen_host")?.as_str()
    }
}

/// Recursive merge: tables merge key-by-key, everything else replaces.
fn merge_value(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.entry(key) {
                    toml::map::Entry::Occupied(mut slot) => merge_value(slot.get_mut(), value),
                    toml::map::Entry::Vacant(slot) => {
                        slot.insert(value);
                    }
                }
            }
        }
        (slot, overlay) => *slot = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_from_toml(s: &str) -> SettingsTree {
        SettingsTree(toml::from_str(s).expect("parse test tree"))
    }

    #[test]
    fn defaults_contain_listen_host_only() {
        let defaults = SettingsTree::defaults();
        assert_eq!(defaults.listen_host(), Some("127.0.0.1"));
        assert_eq!(defaults.listen_port(), None);
        assert!(defaults.get("ln", "ln_backend").is_none());
        assert!(defaults.get("database", "engine").is_none());
    }

    #[test]
    fn merge_keeps_defaults_for_untouched_keys() {
        let user = tree_from_toml("[info]\nlisten_port = 3338\n");
        let merged = user.merged_over_defaults();
        assert_eq!(merged.listen_host(), Some("127.0.0.1"));
        assert_eq!(merged.listen_port(), Some(3338));
    }

    #[test]
    fn merge_replaces_scalars() {
        let user = tree_from_toml("[info]\nlisten_host = \"0.0.0.0\"\n");
        let merged = user.merged_over_defaults();
        assert_eq!(merged.listen_host(), Some("0.0.0.0"));
    }

    #[test]
    fn merge_recurses_into_nested_tables() {
        let mut base = toml::from_str::<Value>(
            "[outer]\n[outer.inner]\na = 1\nb = 2\n",
        )
        .unwrap();
        let overlay = toml::from_str::<Value>(
            "[outer]\n[outer.inner]\nb = 3\nc = 4\n",
        )
        .unwrap();
        merge_value(&mut base, overlay);
        let inner = base
            .get("outer")
            .and_then(|v| v.get("inner"))
            .and_then(Value::as_table)
            .expect("inner table");
        assert_eq!(inner.get("a").and_then(Value::as_integer), Some(1));
        assert_eq!(inner.get("b").and_then(Value::as_integer), Some(3));
        assert_eq!(inner.get("c").and_then(Value::as_integer), Some(4));
    }

    #[test]
    fn merge_adds_new_sections() {
        let user = tree_from_toml("[database]\nengine = \"sqlite\"\n");
        let merged = user.merged_over_defaults();
        assert_eq!(
            merged.get("database", "engine").and_then(Value::as_str),
            Some("sqlite")
        );
    }

    #[test]
    fn listen_port_out_of_range_is_none() {
        let user = tree_from_toml("[info]\nlisten_port = 700000\n");
        assert_eq!(user.listen_port(), None);
    }

    #[test]
    fn get_on_non_table_section_is_none() {
        let mut tree = BTreeMap::new();
        tree.insert("info".to_string(), Value::Integer(1));
        let tree = SettingsTree(tree);
        assert!(tree.get("info", "listen_port").is_none());
    }
}
