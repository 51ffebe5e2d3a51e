//! # labkit
//!
//! Bootstrap a host into a state where Ansible can provision a small
//! Kubernetes lab, then run the playbook exactly once.
//!
//! The sequence is strictly ordered and fail-fast:
//!
//! 1. [`installer`] installs base packages and the engine unless already present
//!    (acquiring privilege through [`privilege`] first)
//! 2. [`fetcher`] installs the collections listed in the manifest, or a single
//!    default collection when there is none
//! 3. [`validate`] checks that the playbook and inventory exist
//! 4. [`orchestrator`] runs the playbook and surfaces its exit status
//!
//! ## Example
//!
//! ```no_run
//! use labkit::{Environment, Orchestrator};
//! use labkit::backend::SystemRunner;
//! use labkit::probe::PathResolver;
//!
//! let env = Environment::detect()?;
//! Orchestrator::new(&env, &PathResolver, &SystemRunner).run()?;
//! # Ok::<(), labkit::Error>(())
//! ```
//!
//! ## Substitution
//!
//! Host lookups go through [`probe::Resolver`] and every external program
//! through [`backend::Runner`]. Tests use [`probe::MockResolver`] and
//! [`backend::MockRunner`] so nothing on the host is touched.

#![warn(clippy::all)]

pub mod backend;
pub mod config;
pub mod environment;
pub mod error;
pub mod fetcher;
pub mod installer;
pub mod orchestrator;
pub mod privilege;
pub mod probe;
pub mod report;
pub mod validate;

pub use config::{Layout, Settings};
pub use environment::{Environment, Identity};
pub use error::{Error, ErrorCategory, Result};
pub use orchestrator::Orchestrator;
