//! Analyzer license probe.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::user_config_dir;
use crate::errors::Result;
use crate::process::{ExecutionContext, Invocation, ProcessRunner};

pub const LICENSE_FILE_NAME: &str = "PVS-Studio.lic";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseStatus {
    Valid,
    Expired,
}

impl LicenseStatus {
    /// Interpret the output of `--license-info`
    pub fn from_output(output: &str) -> Self {
        if output.contains("expired") {
            Self::Expired
        } else {
            Self::Valid
        }
    }

    pub fn is_valid(self) -> bool {
        self == Self::Valid
    }
}

/// `~/.config/PVS-Studio/PVS-Studio.lic`
pub fn default_license_file() -> Option<PathBuf> {
    user_config_dir().map(|dir| dir.join(LICENSE_FILE_NAME))
}

pub fn license_invocation(cli: &str, license_file: &Path) -> Invocation {
    Invocation::new("License", cli)
        .arg("--license-info")
        .path_arg(license_file)
}

/// Ask the analyzer CLI about `license_file`
pub fn probe<W: Write>(
    runner: &mut ProcessRunner<W>,
    cli: &str,
    license_file: &Path,
    ctx: &ExecutionContext,
) -> Result<LicenseStatus> {
    let output = runner.capture(&license_invocation(cli, license_file), ctx)?;
    let status = LicenseStatus::from_output(&output);
    log::debug!("License {}: {:?}", license_file.display(), status);
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_output() {
        assert_eq!(
            LicenseStatus::from_output("License type: Team\nExpires: 2030-01-01\n"),
            LicenseStatus::Valid
        );
        assert_eq!(
            LicenseStatus::from_output("Your license has expired on 2020-01-01"),
            LicenseStatus::Expired
        );
    }

    #[test]
    fn test_license_invocation() {
        let inv = license_invocation("pvs-studio", Path::new("/home/u/PVS-Studio.lic"));
        assert_eq!(
            inv.command_line(),
            "pvs-studio --license-info /home/u/PVS-Studio.lic"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_probe_with_expired_output() {
        let temp = tempfile::TempDir::new().unwrap();
        let script = temp.path().join("fake-cli");
        std::fs::write(&script, "#!/bin/sh\necho 'License expired'\n").unwrap();
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        }

        let mut runner = ProcessRunner::new(Vec::new());
        let status = probe(
            &mut runner,
            script.to_str().unwrap(),
            Path::new("/nonexistent.lic"),
            &ExecutionContext::enter(temp.path()),
        )
        .unwrap();
        assert_eq!(status, LicenseStatus::Expired);
    }
}
