//! External collaborators behind a single "execute and return status" seam.
//!
//! Every external program the pipeline touches (escalation mechanism,
//! package manager, provisioning engine) is described as an [`Invocation`]
//! built by the typed helpers in [`commands`], then handed to a [`Runner`].
//!
//! # Testing
//!
//! Use [`MockRunner`] to record invocations without touching the host:
//!
//! ```
//! use labkit::backend::{Invocation, MockRunner, Runner};
//!
//! let mock = MockRunner::new();
//! mock.fail_on("apt-get update", 100);
//!
//! let code = mock.execute(&Invocation::new("apt-get").arg("update")).unwrap();
//! assert_eq!(code, 100);
//! assert_eq!(mock.commands(), vec!["apt-get update"]);
//! ```

pub mod commands;
pub mod system;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::Result;

pub use commands::{DependencySource, Engine, Escalation, PackageManager};
pub use system::SystemRunner;

/// A fully described external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    /// Start describing a call to `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append a path argument.
    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy().into_owned())
    }

    /// Run from `dir` instead of the inherited working directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Prefix with `escalation` (e.g. `sudo`) when one is given.
    pub fn escalated(self, escalation: Option<&str>) -> Self {
        match escalation {
            Some(program) => {
                let mut args = Vec::with_capacity(self.args.len() + 1);
                args.push(self.program);
                args.extend(self.args);
                Self {
                    program: program.to_string(),
                    args,
                    cwd: self.cwd,
                }
            }
            None => self,
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Executes an [`Invocation`] synchronously and returns its exit status.
///
/// A non-zero status is not an error at this layer; only failing to start
/// the program is.
pub trait Runner {
    fn execute(&self, invocation: &Invocation) -> Result<i32>;
}

/// Runner that records invocations instead of executing them.
#[derive(Debug, Clone, Default)]
pub struct MockRunner {
    calls: Arc<Mutex<Vec<Invocation>>>,
    failures: Arc<Mutex<Vec<(String, i32)>>>,
}

impl MockRunner {
    /// Create a runner where every command succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `code` for any command whose rendered line contains `pattern`.
    pub fn fail_on(&self, pattern: &str, code: i32) {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((pattern.to_string(), code));
    }

    /// Every invocation so far, in order.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Rendered command lines so far, in order.
    pub fn commands(&self) -> Vec<String> {
        self.calls().iter().map(ToString::to_string).collect()
    }

    /// Number of recorded commands whose rendered line contains `pattern`.
    pub fn count_matching(&self, pattern: &str) -> usize {
        self.commands().iter().filter(|c| c.contains(pattern)).count()
    }
}

impl Runner for MockRunner {
    fn execute(&self, invocation: &Invocation) -> Result<i32> {
        let line = invocation.to_string();
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(invocation.clone());

        let failures = self.failures.lock().unwrap_or_else(PoisonError::into_inner);
        let code = failures
            .iter()
            .find(|(pattern, _)| line.contains(pattern.as_str()))
            .map_or(0, |(_, code)| *code);
        Ok(code)
    }
}
