//! Artifact Validator: descriptors must exist before the engine runs.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::environment::Environment;
use crate::error::{Error, Result};
use crate::report;

/// Required descriptor files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    /// Entry-Point Descriptor (ordered roles per host group).
    Playbook,
    /// Inventory Descriptor (host groups and connection parameters).
    Inventory,
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Playbook => write!(f, "playbook"),
            Self::Inventory => write!(f, "inventory"),
        }
    }
}

/// Check both descriptors. The error names every missing one.
pub fn validate_artifacts(env: &Environment) -> Result<()> {
    let required = [
        (Artifact::Playbook, &env.layout.playbook),
        (Artifact::Inventory, &env.layout.inventory),
    ];

    let mut missing: Vec<(Artifact, PathBuf)> = Vec::new();
    for (artifact, path) in required {
        if path.is_file() {
            report::info(&format!("Found {artifact}: {}", path.display()));
        } else {
            missing.push((artifact, path.clone()));
        }
    }

    if !missing.is_empty() {
        return Err(Error::MissingArtifacts(missing));
    }

    check_inventory_groups(&env.layout.inventory);
    Ok(())
}

/// Warn when an INI inventory declares no host group. Never fatal.
fn check_inventory_groups(inventory: &Path) {
    let is_ini = inventory
        .extension()
        .is_some_and(|ext| ext == "ini" || ext == "cfg")
        || inventory.extension().is_none();
    if !is_ini {
        return;
    }

    match fs::read_to_string(inventory) {
        Ok(content) if ini_host_groups(&content).is_empty() => {
            report::warn(&format!(
                "{} declares no host groups; the playbook will match no hosts",
                inventory.display()
            ));
        }
        Ok(content) => {
            log::debug!("inventory groups: {:?}", ini_host_groups(&content));
        }
        Err(e) => log::debug!("could not read {}: {e}", inventory.display()),
    }
}

/// Host group names declared by `[group]` headers, skipping `:vars` and
/// `:children` sections. Trailing `#` or `;` comments are ignored.
pub fn ini_host_groups(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| line.split(['#', ';']).next())
        .map(str::trim)
        .filter_map(|line| line.strip_prefix('[')?.strip_suffix(']'))
        .map(str::trim)
        .filter(|name| !name.is_empty() && !name.contains(':'))
        .map(ToString::to_string)
        .collect()
}
