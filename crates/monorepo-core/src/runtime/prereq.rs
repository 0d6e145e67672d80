//! Probing for external binaries required by a backend choice
//!
//! Some backend frameworks need a globally installed tool before their
//! scripts can do anything useful (composer for Laravel, django-admin for
//! Django). The probe runs before scaffolding that backend; a missing
//! binary aborts the whole run.

use anyhow::Result;
use std::process::Command;

/// A required external binary with user-facing remediation info
#[derive(Debug, Clone)]
pub struct BinaryPrereq {
    /// Name of the binary looked up on PATH (e.g., "composer")
    pub binary: &'static str,
    /// Display name for user-facing messages
    pub display_name: &'static str,
    /// Remediation message shown when the binary is missing
    pub remedy: &'static str,
    /// URL to the framework's installation docs
    pub docs_url: &'static str,
}

impl BinaryPrereq {
    /// Check if the binary is available on PATH
    pub fn is_installed(&self) -> bool {
        Command::new("sh")
            .arg("-c")
            .arg(format!("command -v {}", self.binary))
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    /// Get the installed binary's version (if it reports one)
    pub fn get_version(&self) -> Option<String> {
        Command::new(self.binary)
            .arg("--version")
            .output()
            .ok()
            .and_then(|output| {
                if output.status.success() {
                    String::from_utf8(output.stdout)
                        .ok()
                        .map(|s| s.lines().next().unwrap_or("").trim().to_string())
                } else {
                    None
                }
            })
    }

    /// Open the framework's installation docs in the default browser
    pub fn open_docs(&self) -> Result<()> {
        open::that(self.docs_url)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prereq(binary: &'static str) -> BinaryPrereq {
        BinaryPrereq {
            binary,
            display_name: "Test",
            remedy: "install it",
            docs_url: "https://example.com",
        }
    }

    #[test]
    fn test_missing_binary_not_installed() {
        assert!(!prereq("definitely-not-a-real-binary-xyz").is_installed());
    }

    #[test]
    fn test_present_binary_installed() {
        // sh is a safe bet on any platform this tool targets
        assert!(prereq("sh").is_installed());
    }

    #[test]
    fn test_missing_binary_has_no_version() {
        assert_eq!(prereq("definitely-not-a-real-binary-xyz").get_version(), None);
    }
}
