//! Optional firewall opening for the mint's listen port.

use std::process::Command;

use crate::error::SupervisorError;

/// Accept inbound TCP on `port`.
///
/// Idempotent: the rule is checked (`-C`) before it is appended (`-A`), so
/// repeated deploys do not stack duplicate rules.
pub fn open_tcp_port(port: u16) -> Result<(), SupervisorError> {
    if rule_present(port)? {
        tracing::debug!("firewall rule for tcp/{port} already present");
        return Ok(());
    }
    tracing::info!("opening firewall for tcp/{port}");
    let args = rule_args("-A", port);
    let output = Command::new("iptables")
        .args(&args)
        .output()
        .map_err(|e| SupervisorError::Firewall(format!("failed to run iptables: {e}")))?;
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    Err(SupervisorError::Firewall(format!(
        "iptables {} failed (status {}): {stderr}",
        args.join(" "),
        output.status
    )))
}

fn rule_present(port: u16) -> Result<bool, SupervisorError> {
    let output = Command::new("iptables")
        .args(rule_args("-C", port))
        .output()
        .map_err(|e| SupervisorError::Firewall(format!("failed to run iptables: {e}")))?;
    Ok(output.status.success())
}

fn rule_args(action: &str, port: u16) -> Vec<String> {
    vec![
        action.to_string(),
        "INPUT".to_string(),
        "-p".to_string(),
        "tcp".to_string(),
        "--dport".to_string(),
        port.to_string(),
        "-j".to_string(),
        "ACCEPT".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_targets_the_listen_port() {
        let args = rule_args("-A", 3338);
        assert_eq!(
            args,
            vec!["-A", "INPUT", "-p", "tcp", "--dport", "3338", "-j", "ACCEPT"]
        );
    }

    #[test]
    fn check_and_append_differ_only_in_action() {
        let mut check = rule_args("-C", 8085);
        let append = rule_args("-A", 8085);
        check[0] = "-A".to_string();
        assert_eq!(check, append);
    }
}
