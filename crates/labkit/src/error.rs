//! Error types for the bootstrap pipeline.
//!
//! Every failure aborts the remaining sequence. Errors are categorized so
//! the binary can map them to a distinguishable exit status and print
//! actionable advice.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::validate::Artifact;

/// Result type alias for bootstrap operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Exit status for a missing escalation mechanism (`EX_UNAVAILABLE`).
pub const EXIT_ENVIRONMENT: i32 = 69;
/// Exit status for missing descriptor files (`EX_NOINPUT`).
pub const EXIT_MISSING_ARTIFACT: i32 = 66;
/// Exit status for an unreadable or malformed config file (`EX_CONFIG`).
pub const EXIT_CONFIG: i32 = 78;
/// Exit status when an external program could not be started at all.
pub const EXIT_SPAWN: i32 = 127;

/// Categories of bootstrap errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The host lacks something we cannot install ourselves.
    Environment,
    /// A package manager or dependency install call failed.
    Install,
    /// A required descriptor file is absent.
    MissingArtifact,
    /// The provisioning engine returned non-zero.
    EngineExecution,
    /// The optional config file could not be used.
    Config,
    /// Other/unknown errors.
    Other,
}

impl ErrorCategory {
    /// Get a user-friendly description of this error category.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Environment => "Host environment is missing a requirement",
            Self::Install => "Installation failed",
            Self::MissingArtifact => "Required file is missing",
            Self::EngineExecution => "Provisioning run failed",
            Self::Config => "Invalid configuration",
            Self::Other => "Unexpected error",
        }
    }

    /// Get actionable advice for resolving this error category.
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Environment => "Install sudo or re-run as root",
            Self::Install => {
                "Fix the package manager error above and re-run; completed steps are skipped"
            }
            Self::MissingArtifact => "Restore the file next to the labstrap executable and re-run",
            Self::EngineExecution => "See the ansible-playbook output above for the failing task",
            Self::Config => "Fix or remove labstrap.toml",
            Self::Other => "Check the error details for more information",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Errors that can occur while bootstrapping.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Not elevated and no escalation mechanism on PATH.
    #[error("not running as root and `{program}` was not found on PATH")]
    EscalationUnavailable {
        /// Escalation program that was probed.
        program: String,
    },

    /// The escalation mechanism refused to pre-authorize.
    #[error("`{program} -v` failed with status {code}")]
    EscalationRefused {
        /// Escalation program.
        program: String,
        /// Exit status of the validation call.
        code: i32,
    },

    /// A package manager or dependency-installer call returned non-zero.
    #[error("{step} failed: `{command}` exited with status {code}")]
    InstallFailed {
        /// Pipeline step that issued the command.
        step: &'static str,
        /// Rendered command line.
        command: String,
        /// Exit status of the command.
        code: i32,
    },

    /// One or more descriptor files do not exist.
    #[error("{}", missing_message(.0))]
    MissingArtifacts(Vec<(Artifact, PathBuf)>),

    /// The provisioning engine returned non-zero.
    #[error("`{command}` exited with status {code}")]
    EngineFailed {
        /// Rendered command line.
        command: String,
        /// Exit status of the engine, propagated verbatim.
        code: i32,
    },

    /// An external program could not be started.
    #[error("failed to execute `{command}`: {source}")]
    Spawn {
        /// Rendered command line.
        command: String,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Config file exists but could not be read.
    #[error("could not read {path}: {source}")]
    ConfigRead {
        /// Config file path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Config file is not valid TOML for [`crate::config::Settings`].
    #[error("invalid config {path}: {source}")]
    ConfigParse {
        /// Config file path.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Config file parsed but holds an unusable value.
    #[error("invalid config {path}: {message}")]
    ConfigInvalid {
        /// Config file path.
        path: PathBuf,
        /// What is wrong with it.
        message: String,
    },

    /// The running executable could not be located.
    #[error("could not locate the labstrap executable: {0}")]
    SelfLocation(#[source] io::Error),
}

fn missing_message(missing: &[(Artifact, PathBuf)]) -> String {
    let parts: Vec<String> = missing
        .iter()
        .map(|(artifact, path)| format!("{} not found at {}", artifact, path.display()))
        .collect();
    parts.join("; ")
}

impl Error {
    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::EscalationUnavailable { .. } | Error::EscalationRefused { .. } => {
                ErrorCategory::Environment
            }
            Error::InstallFailed { .. } => ErrorCategory::Install,
            Error::MissingArtifacts(_) => ErrorCategory::MissingArtifact,
            Error::EngineFailed { .. } => ErrorCategory::EngineExecution,
            Error::ConfigRead { .. } | Error::ConfigParse { .. } | Error::ConfigInvalid { .. } => {
                ErrorCategory::Config
            }
            Error::Spawn { .. } | Error::SelfLocation(_) => ErrorCategory::Other,
        }
    }

    /// Process exit status for this error.
    ///
    /// Engine and install failures propagate the child's own status.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::EscalationUnavailable { .. } | Error::EscalationRefused { .. } => {
                EXIT_ENVIRONMENT
            }
            Error::InstallFailed { code, .. } | Error::EngineFailed { code, .. } => {
                if *code == 0 { 1 } else { *code }
            }
            Error::MissingArtifacts(_) => EXIT_MISSING_ARTIFACT,
            Error::ConfigRead { .. } | Error::ConfigParse { .. } | Error::ConfigInvalid { .. } => {
                EXIT_CONFIG
            }
            Error::Spawn { .. } => EXIT_SPAWN,
            Error::SelfLocation(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_match_taxonomy() {
        let err = Error::EscalationUnavailable {
            program: "sudo".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Environment);

        let err = Error::InstallFailed {
            step: "package install",
            command: "apt-get install -y ansible".to_string(),
            code: 100,
        };
        assert_eq!(err.category(), ErrorCategory::Install);

        let err = Error::MissingArtifacts(vec![(
            Artifact::Inventory,
            PathBuf::from("/lab/inventory.ini"),
        )]);
        assert_eq!(err.category(), ErrorCategory::MissingArtifact);

        let err = Error::EngineFailed {
            command: "ansible-playbook".to_string(),
            code: 2,
        };
        assert_eq!(err.category(), ErrorCategory::EngineExecution);
    }

    #[test]
    fn test_exit_codes_are_distinguishable() {
        let env = Error::EscalationUnavailable {
            program: "sudo".to_string(),
        };
        let missing =
            Error::MissingArtifacts(vec![(Artifact::Playbook, PathBuf::from("/lab/site.yml"))]);
        assert_eq!(env.exit_code(), EXIT_ENVIRONMENT);
        assert_eq!(missing.exit_code(), EXIT_MISSING_ARTIFACT);
        assert_ne!(env.exit_code(), missing.exit_code());
    }

    #[test]
    fn test_engine_status_propagated_verbatim() {
        let err = Error::EngineFailed {
            command: "ansible-playbook -i inventory.ini site.yml".to_string(),
            code: 4,
        };
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_install_status_never_zero() {
        let err = Error::InstallFailed {
            step: "package index refresh",
            command: "apt-get update".to_string(),
            code: 0,
        };
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_missing_message_names_every_path() {
        let err = Error::MissingArtifacts(vec![
            (Artifact::Playbook, PathBuf::from("/lab/site.yml")),
            (Artifact::Inventory, PathBuf::from("/lab/inventory.ini")),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("/lab/site.yml"));
        assert!(msg.contains("/lab/inventory.ini"));
    }
}
