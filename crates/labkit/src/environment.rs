//! Execution Environment: per-invocation state handed to every step.

use std::path::PathBuf;

use crate::config::{self, Layout, Settings};
use crate::error::Result;

/// Effective identity of the running process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub euid: u32,
}

impl Identity {
    /// Identity of the current process.
    #[cfg(unix)]
    #[allow(unsafe_code)]
    pub fn current() -> Self {
        // SAFETY: geteuid has no preconditions and cannot fail.
        let euid = unsafe { libc::geteuid() };
        Self { euid }
    }

    #[cfg(not(unix))]
    pub fn current() -> Self {
        Self { euid: u32::MAX }
    }

    /// Root identity.
    pub fn root() -> Self {
        Self { euid: 0 }
    }

    /// An ordinary user identity.
    pub fn user(euid: u32) -> Self {
        Self { euid }
    }

    /// Whether the process already holds elevated rights.
    pub fn is_elevated(&self) -> bool {
        self.euid == 0
    }
}

/// Transient state for one invocation. Never persisted.
#[derive(Debug, Clone)]
pub struct Environment {
    pub layout: Layout,
    pub settings: Settings,
    pub identity: Identity,
}

impl Environment {
    /// Build an environment rooted at `root`, loading `labstrap.toml` if present.
    pub fn new(root: impl Into<PathBuf>, identity: Identity) -> Result<Self> {
        let root = root.into();
        let settings = Settings::load(&root)?;
        let layout = Layout::new(root, &settings.files);
        Ok(Self {
            layout,
            settings,
            identity,
        })
    }

    /// Environment for the running executable and process identity.
    pub fn detect() -> Result<Self> {
        Self::new(config::current_root()?, Identity::current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_identity_elevation() {
        assert!(Identity::root().is_elevated());
        assert!(!Identity::user(1000).is_elevated());
    }

    #[test]
    fn test_environment_uses_config_file_names() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(config::CONFIG_FILE),
            "[files]\nplaybook = \"lab.yml\"\n",
        )
        .unwrap();

        let env = Environment::new(tmp.path(), Identity::user(1000)).unwrap();
        assert_eq!(env.layout.root, tmp.path());
        assert_eq!(env.layout.playbook, tmp.path().join("lab.yml"));
        assert_eq!(env.layout.inventory, tmp.path().join("inventory.ini"));
    }
}
