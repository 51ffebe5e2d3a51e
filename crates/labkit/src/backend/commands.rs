//! Typed builders for the external programs the pipeline drives.

use std::fmt;
use std::path::{Path, PathBuf};

use super::Invocation;
use crate::config::Settings;
use crate::environment::Environment;

/// Privilege-escalation mechanism (`sudo`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Escalation {
    pub program: String,
}

impl Escalation {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            program: settings.escalation.program.clone(),
        }
    }

    /// Validate and cache credentials so later calls do not prompt.
    pub fn validate(&self) -> Invocation {
        Invocation::new(&self.program).arg("-v")
    }
}

/// System package manager (`apt-get`).
///
/// Calls are prefixed with the escalation program unless the process is
/// already elevated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManager {
    program: String,
    escalation: Option<String>,
}

impl PackageManager {
    pub fn new(escalation: Option<String>) -> Self {
        Self {
            program: "apt-get".to_string(),
            escalation,
        }
    }

    /// Package manager for `env`, escalating only when not already root.
    pub fn for_env(env: &Environment) -> Self {
        let escalation =
            (!env.identity.is_elevated()).then(|| env.settings.escalation.program.clone());
        Self::new(escalation)
    }

    /// Refresh the package index.
    pub fn refresh(&self) -> Invocation {
        Invocation::new(&self.program)
            .arg("update")
            .escalated(self.escalation.as_deref())
    }

    /// Install `packages` non-interactively in one call.
    pub fn install(&self, packages: &[String]) -> Invocation {
        Invocation::new(&self.program)
            .args(["install", "-y"])
            .args(packages.iter().cloned())
            .escalated(self.escalation.as_deref())
    }
}

/// Where the declared dependency set comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencySource {
    /// A manifest file listing every dependency.
    Manifest(PathBuf),
    /// A single literal identifier.
    Identifier(String),
}

impl fmt::Display for DependencySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manifest(path) => write!(f, "{}", path.display()),
            Self::Identifier(id) => write!(f, "{id}"),
        }
    }
}

/// Provisioning engine sub-commands (`ansible-galaxy`, `ansible-playbook`).
///
/// Both run as the invoking user from the orchestrator root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Engine {
    galaxy: String,
    playbook: String,
    root: PathBuf,
}

impl Engine {
    pub fn for_env(env: &Environment) -> Self {
        Self {
            galaxy: env.settings.engine.galaxy.clone(),
            playbook: env.settings.engine.playbook.clone(),
            root: env.layout.root.clone(),
        }
    }

    /// Install the dependency set in a single call.
    pub fn install_dependencies(&self, source: &DependencySource) -> Invocation {
        let inv = Invocation::new(&self.galaxy).args(["collection", "install"]);
        let inv = match source {
            DependencySource::Manifest(path) => inv.arg("-r").path_arg(path),
            DependencySource::Identifier(id) => inv.arg(id.as_str()),
        };
        inv.current_dir(&self.root)
    }

    /// Apply the Entry-Point Descriptor to the Inventory Descriptor's hosts.
    pub fn run(&self, inventory: &Path, playbook: &Path) -> Invocation {
        Invocation::new(&self.playbook)
            .arg("-i")
            .path_arg(inventory)
            .path_arg(playbook)
            .current_dir(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Layout;
    use crate::environment::Identity;

    fn env(identity: Identity) -> Environment {
        let settings = Settings::default();
        Environment {
            layout: Layout::new("/lab", &settings.files),
            settings,
            identity,
        }
    }

    #[test]
    fn test_escalation_validate() {
        let esc = Escalation::from_settings(&Settings::default());
        assert_eq!(esc.validate().to_string(), "sudo -v");
    }

    #[test]
    fn test_package_manager_escalates_for_user() {
        let pm = PackageManager::for_env(&env(Identity::user(1000)));
        assert_eq!(pm.refresh().to_string(), "sudo apt-get update");
        assert_eq!(
            pm.install(&["git".to_string(), "ansible".to_string()]).to_string(),
            "sudo apt-get install -y git ansible"
        );
    }

    #[test]
    fn test_package_manager_direct_for_root() {
        let pm = PackageManager::for_env(&env(Identity::root()));
        assert_eq!(pm.refresh().to_string(), "apt-get update");
    }

    #[test]
    fn test_engine_install_from_manifest() {
        let engine = Engine::for_env(&env(Identity::user(1000)));
        let inv = engine.install_dependencies(&DependencySource::Manifest(PathBuf::from(
            "/lab/requirements.yml",
        )));
        assert_eq!(
            inv.to_string(),
            "ansible-galaxy collection install -r /lab/requirements.yml"
        );
        assert_eq!(inv.cwd, Some(PathBuf::from("/lab")));
    }

    #[test]
    fn test_engine_install_identifier() {
        let engine = Engine::for_env(&env(Identity::user(1000)));
        let source = DependencySource::Identifier("kubernetes.core".to_string());
        let inv = engine.install_dependencies(&source);
        assert_eq!(inv.to_string(), "ansible-galaxy collection install kubernetes.core");
    }

    #[test]
    fn test_engine_run_is_never_escalated() {
        let engine = Engine::for_env(&env(Identity::user(1000)));
        let inv = engine.run(Path::new("/lab/inventory.ini"), Path::new("/lab/site.yml"));
        assert_eq!(inv.program, "ansible-playbook");
        assert_eq!(inv.args, vec!["-i", "/lab/inventory.ini", "/lab/site.yml"]);
    }
}
