//! Settings and self-relative file layout.
//!
//! All inputs are resolved against the orchestrator root, which is derived
//! from the location of the running executable and never from the caller's
//! working directory. An optional `labstrap.toml` in the root overrides the
//! defaults below.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Optional config file name, looked up in the orchestrator root.
pub const CONFIG_FILE: &str = "labstrap.toml";

/// Default Entry-Point Descriptor.
pub const DEFAULT_PLAYBOOK: &str = "site.yml";

/// Default Inventory Descriptor.
pub const DEFAULT_INVENTORY: &str = "inventory.ini";

/// Default Manifest.
pub const DEFAULT_MANIFEST: &str = "requirements.yml";

/// Collection installed when no Manifest is present.
pub const DEFAULT_DEPENDENCY: &str = "kubernetes.core";

// ============================================================================
// Settings
// ============================================================================

/// Everything `labstrap.toml` can override.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub files: FileSettings,
    pub packages: PackageSettings,
    pub engine: EngineSettings,
    pub escalation: EscalationSettings,
    pub logging: LoggingSettings,
}

/// Descriptor and manifest file names, relative to the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    pub manifest: String,
    pub inventory: String,
    pub playbook: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            manifest: DEFAULT_MANIFEST.to_string(),
            inventory: DEFAULT_INVENTORY.to_string(),
            playbook: DEFAULT_PLAYBOOK.to_string(),
        }
    }
}

/// System packages installed when the engine is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageSettings {
    /// Runtime, package manager, venv tool and auxiliary tooling.
    pub base: Vec<String>,
    /// The orchestration engine package itself.
    pub engine: String,
}

impl Default for PackageSettings {
    fn default() -> Self {
        Self {
            base: ["python3", "python3-pip", "python3-venv", "git", "curl"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            engine: "ansible".to_string(),
        }
    }
}

impl PackageSettings {
    /// Base packages followed by the engine package, in install order.
    pub fn install_set(&self) -> Vec<String> {
        let mut all = self.base.clone();
        if !all.contains(&self.engine) {
            all.push(self.engine.clone());
        }
        all
    }
}

/// Engine executables and the fallback dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Executables that must all resolve for the engine to count as installed.
    pub probes: Vec<String>,
    /// Dependency-installer sub-command.
    pub galaxy: String,
    /// Run sub-command.
    pub playbook: String,
    /// Installed when the Manifest is absent.
    pub default_dependency: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            probes: vec!["ansible".to_string(), "ansible-playbook".to_string()],
            galaxy: "ansible-galaxy".to_string(),
            playbook: "ansible-playbook".to_string(),
            default_dependency: DEFAULT_DEPENDENCY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscalationSettings {
    pub program: String,
}

impl Default for EscalationSettings {
    fn default() -> Self {
        Self {
            program: "sudo".to_string(),
        }
    }
}

/// Diagnostic log level (`error`, `warn`, `info`, `debug`, `trace`, `off`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl LoggingSettings {
    /// Parsed level; `Warn` if the string is not a level name.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Warn)
    }
}

impl Settings {
    /// Load `labstrap.toml` from `root`, falling back to defaults when absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| Error::ConfigRead {
            path: path.clone(),
            source,
        })?;
        let settings: Self = toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.clone(),
            source,
        })?;
        settings.check().map_err(|message| Error::ConfigInvalid { path, message })?;
        Ok(settings)
    }

    /// Reject values that parse but would break the pipeline.
    fn check(&self) -> std::result::Result<(), String> {
        if self.engine.probes.iter().all(|p| p.trim().is_empty()) {
            return Err("[engine] probes must name at least one executable".to_string());
        }
        if self.escalation.program.trim().is_empty() {
            return Err("[escalation] program must not be empty".to_string());
        }
        if self.logging.level.parse::<log::LevelFilter>().is_err() {
            return Err(format!("[logging] level `{}` is not a log level", self.logging.level));
        }
        Ok(())
    }
}

// ============================================================================
// Layout
// ============================================================================

/// Absolute paths of every file the pipeline reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub root: PathBuf,
    pub manifest: PathBuf,
    pub inventory: PathBuf,
    pub playbook: PathBuf,
}

impl Layout {
    /// Resolve file names from `files` against `root`.
    pub fn new(root: impl Into<PathBuf>, files: &FileSettings) -> Self {
        let root = root.into();
        Self {
            manifest: root.join(&files.manifest),
            inventory: root.join(&files.inventory),
            playbook: root.join(&files.playbook),
            root,
        }
    }
}

/// Find the orchestrator root for an executable living in `exe_dir`.
///
/// Walks up from `exe_dir` to the first directory holding either the config
/// file or the default Entry-Point Descriptor; falls back to `exe_dir`.
pub fn find_root(exe_dir: &Path) -> PathBuf {
    find_root_within(exe_dir, None)
}

/// Like [`find_root`], but never looks above `stop_at` when given.
pub fn find_root_within(exe_dir: &Path, stop_at: Option<&Path>) -> PathBuf {
    for dir in exe_dir.ancestors() {
        if dir.join(CONFIG_FILE).is_file() || dir.join(DEFAULT_PLAYBOOK).is_file() {
            return dir.to_path_buf();
        }
        if stop_at == Some(dir) {
            break;
        }
    }
    exe_dir.to_path_buf()
}

/// Orchestrator root of the running executable.
pub fn current_root() -> Result<PathBuf> {
    let exe = std::env::current_exe()
        .and_then(fs::canonicalize)
        .map_err(Error::SelfLocation)?;
    let exe_dir = exe.parent().unwrap_or(Path::new("/"));
    Ok(find_root(exe_dir))
}
