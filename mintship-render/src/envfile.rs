//! Environment map → `NAME=VALUE` file consumed via `EnvironmentFile=`.

use std::collections::BTreeMap;

/// Render one `NAME=VALUE` line per entry, in sorted name order.
///
/// Values are written verbatim: no quoting, no escaping. A value containing
/// an embedded newline therefore corrupts the file; callers own that
/// constraint.
pub fn render_env_file(env: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    for (name, value) in env {
        out.push_str(name);
        out.push('=');
        out.push_str(value);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_entries_become_two_lines_in_order() {
        let mut env = BTreeMap::new();
        env.insert("B".to_string(), "2".to_string());
        env.insert("A".to_string(), "1".to_string());
        let rendered = render_env_file(&env);
        assert_eq!(rendered, "A=1\nB=2\n");
        assert_eq!(rendered.lines().collect::<Vec<_>>(), vec!["A=1", "B=2"]);
    }

    #[test]
    fn empty_map_renders_empty_string() {
        assert_eq!(render_env_file(&BTreeMap::new()), "");
    }

    #[test]
    fn values_are_verbatim() {
        let mut env = BTreeMap::new();
        env.insert(
            "CDK_MINTD_LN_BACKEND".to_string(),
            "cln rpc=path with spaces".to_string(),
        );
        let rendered = render_env_file(&env);
        assert_eq!(rendered, "CDK_MINTD_LN_BACKEND=cln rpc=path with spaces\n");
    }
}
