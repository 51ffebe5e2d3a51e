//! Run Orchestrator: the fail-fast bootstrap sequence.
//!
//! 1. Dependency Installer
//! 2. Dependency-Set Fetcher
//! 3. Artifact Validator
//! 4. Provisioning engine run
//!
//! Each step gates the next. The engine's exit status is surfaced
//! unchanged.

use colored::Colorize;

use crate::backend::{Engine, Runner};
use crate::environment::Environment;
use crate::error::{Error, Result};
use crate::probe::Resolver;
use crate::{fetcher, installer, report, validate};

const TOTAL_STEPS: usize = 4;

/// Hint printed after a successful run.
const NEXT_STEPS: &[(&str, &str)] = &[
    ("kubectl get nodes -o wide", "cluster nodes"),
    ("kubectl get pods -A", "workloads in every namespace"),
    ("k3d cluster list", "local clusters"),
];

/// One bootstrap invocation wired to its collaborators.
pub struct Orchestrator<'a> {
    env: &'a Environment,
    resolver: &'a dyn Resolver,
    runner: &'a dyn Runner,
}

impl<'a> Orchestrator<'a> {
    pub fn new(env: &'a Environment, resolver: &'a dyn Resolver, runner: &'a dyn Runner) -> Self {
        Self { env, resolver, runner }
    }

    /// Run every step in order, stopping at the first failure.
    ///
    /// Returns `Ok(())` only when the engine exits 0; a non-zero engine
    /// status becomes [`Error::EngineFailed`] carrying that status.
    pub fn run(&self) -> Result<()> {
        report::step(1, TOTAL_STEPS, "Orchestration engine");
        installer::ensure_engine_installed(self.env, self.resolver, self.runner)?;

        report::step(2, TOTAL_STEPS, "Collections");
        fetcher::install_declared_dependencies(self.env, self.runner)?;

        report::step(3, TOTAL_STEPS, "Descriptors");
        validate::validate_artifacts(self.env)?;

        report::step(4, TOTAL_STEPS, "Provisioning");
        let layout = &self.env.layout;
        let invocation = Engine::for_env(self.env).run(&layout.inventory, &layout.playbook);
        report::info(&format!("Running {invocation}"));
        let code = self.runner.execute(&invocation)?;
        if code != 0 {
            return Err(Error::EngineFailed {
                command: invocation.to_string(),
                code,
            });
        }

        report::success("Lab provisioned");
        print_next_steps();
        Ok(())
    }
}

fn print_next_steps() {
    println!();
    println!("{}", "Next steps".cyan().bold());
    for (cmd, what) in NEXT_STEPS {
        println!("  {} {:<28} {}", "$".dimmed(), cmd.bold(), what.dimmed());
    }
}
