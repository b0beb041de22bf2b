//! Settings tree → daemon `config.toml`.

use mintship_core::settings::SettingsTree;

use crate::error::RenderError;

const HEADER: &str = "# cdk-mintd configuration managed by mintship. Manual edits are overwritten on deploy.\n\n";

/// Render the merged settings tree to the daemon's TOML config.
///
/// Output is deterministic: the tree is BTreeMap-backed, so identical input
/// renders byte-identically. The writer relies on that to skip unchanged
/// files, and the deploy to skip needless restarts.
pub fn render_config(tree: &SettingsTree) -> Result<String, RenderError> {
    for (section, value) in &tree.0 {
        if !value.is_table() {
            return Err(RenderError::SectionNotTable {
                section: section.clone(),
            });
        }
    }
    let body = toml::to_string(tree)?;
    Ok(format!("{HEADER}{body}"))
}
