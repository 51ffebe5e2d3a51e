//! Dependency Installer: base packages plus the orchestration engine.

use crate::backend::{Invocation, PackageManager, Runner};
use crate::environment::Environment;
use crate::error::{Error, Result};
use crate::privilege;
use crate::probe::{self, Resolver};
use crate::report;

/// Outcome of [`ensure_engine_installed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineInstall {
    /// Every engine probe resolved; nothing was invoked.
    AlreadyPresent,
    /// Index refreshed and these packages installed.
    Installed(Vec<String>),
}

/// Install the engine unless it is already resolvable.
///
/// Any package manager failure aborts; a half-installed engine is never
/// used.
pub fn ensure_engine_installed(
    env: &Environment,
    resolver: &dyn Resolver,
    runner: &dyn Runner,
) -> Result<EngineInstall> {
    let probes = &env.settings.engine.probes;
    if probe::probe_all(resolver, probes.as_slice()) {
        report::info(&format!("{} already installed, skipping", probes.join(" and ")));
        return Ok(EngineInstall::AlreadyPresent);
    }

    privilege::ensure_privilege(env, resolver, runner)?;

    let pm = PackageManager::for_env(env);
    let packages = env.settings.packages.install_set();

    report::info("Refreshing package index");
    run_checked(runner, &pm.refresh(), "package index refresh")?;

    report::info(&format!("Installing {}", packages.join(" ")));
    run_checked(runner, &pm.install(&packages), "package install")?;

    report::success(&format!("Installed {}", env.settings.packages.engine));
    Ok(EngineInstall::Installed(packages))
}

/// Execute `invocation`, turning a non-zero status into an install error.
pub(crate) fn run_checked(
    runner: &dyn Runner,
    invocation: &Invocation,
    step: &'static str,
) -> Result<()> {
    let code = runner.execute(invocation)?;
    if code != 0 {
        return Err(Error::InstallFailed {
            step,
            command: invocation.to_string(),
            code,
        });
    }
    Ok(())
}
