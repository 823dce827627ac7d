use crate::ports::outbound::{PackageRemover, RemovalReport, RemovalStatus};
use crate::shared::Result;
use std::collections::{BTreeMap, BTreeSet};
use std::process::Command;
use tracing::{debug, info, warn};

const STILL_INSTALLED: &str = "still installed after dnf remove";

/// DnfPackageRemover adapter removing packages with dnf
///
/// All packages go into one transaction first. dnf rolls the whole
/// transaction back when any package fails, so on failure the packages that
/// are still installed are retried one at a time. Every package is then
/// checked with `rpm -q`, so a partially failed run shows exactly which
/// packages are still installed.
pub struct DnfPackageRemover {
    use_sudo: bool,
    dnf: Vec<String>,
    rpm: Vec<String>,
}

impl DnfPackageRemover {
    pub fn new(use_sudo: bool) -> Self {
        Self {
            use_sudo,
            dnf: vec!["dnf".to_string()],
            rpm: vec!["rpm".to_string()],
        }
    }

    #[cfg(test)]
    fn with_commands(use_sudo: bool, dnf: &[&str], rpm: &[&str]) -> Self {
        Self {
            use_sudo,
            dnf: dnf.iter().map(|s| s.to_string()).collect(),
            rpm: rpm.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Program and arguments of a removal transaction.
    /// `sudo -n` never prompts, so a missing sudo rule fails instead of hanging.
    fn removal_command<'a>(&self, packages: impl IntoIterator<Item = &'a String>) -> (String, Vec<String>) {
        let mut command: Vec<String> = Vec::new();
        if self.use_sudo {
            command.extend(["sudo".to_string(), "-n".to_string()]);
        }
        command.extend(self.dnf.iter().cloned());
        command.extend(["remove".to_string(), "-y".to_string()]);
        command.extend(packages.into_iter().cloned());

        let program = command.remove(0);
        (program, command)
    }

    /// Runs one dnf transaction; the error is the per-package failure reason
    fn run_transaction<'a>(
        &self,
        packages: impl IntoIterator<Item = &'a String>,
    ) -> std::result::Result<(), String> {
        let (program, args) = self.removal_command(packages);
        info!(command = %program, args = ?args, "removing end-of-life packages");

        let output = Command::new(&program)
            .args(&args)
            .output()
            .map_err(|e| format!("Failed to run {}: {}", program, e))?;

        if output.status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        warn!(status = %output.status, stderr = %stderr, "dnf remove failed");
        Err(format!("dnf remove exited with {}: {}", output.status, stderr))
    }

    fn is_installed(&self, package: &str) -> std::result::Result<bool, String> {
        let (program, base_args) = self
            .rpm
            .split_first()
            .ok_or_else(|| "no rpm command configured".to_string())?;
        let status = Command::new(program)
            .args(base_args)
            .args(["-q", "--quiet", package])
            .status()
            .map_err(|e| format!("Failed to run rpm -q {}: {}", package, e))?;
        Ok(status.success())
    }
}

impl PackageRemover for DnfPackageRemover {
    fn remove(&self, packages: &BTreeSet<String>) -> Result<RemovalReport> {
        let transaction = self.run_transaction(packages);

        let mut retry_errors: BTreeMap<&str, String> = BTreeMap::new();
        if transaction.is_err() {
            for package in packages {
                if matches!(self.is_installed(package), Ok(true)) {
                    debug!(package = %package, "retrying removal on its own");
                    if let Err(reason) = self.run_transaction(std::iter::once(package)) {
                        retry_errors.insert(package.as_str(), reason);
                    }
                }
            }
        }

        let mut report = RemovalReport::default();
        for package in packages {
            let status = match self.is_installed(package) {
                Ok(false) => RemovalStatus::Removed,
                Ok(true) => RemovalStatus::Failed {
                    reason: retry_errors
                        .get(package.as_str())
                        .cloned()
                        .or_else(|| transaction.clone().err())
                        .unwrap_or_else(|| STILL_INSTALLED.to_string()),
                },
                Err(reason) => RemovalStatus::Failed { reason },
            };
            debug!(package = %package, status = ?status, "verified removal");
            report.outcomes.push((package.clone(), status));
        }

        Ok(report)
    }
}
