//! Privilege escalation: make sure privileged steps will not fail or
//! prompt repeatedly.

use crate::backend::{Escalation, Runner};
use crate::environment::Environment;
use crate::error::{Error, Result};
use crate::probe::{self, Resolver};
use crate::report;

/// Outcome of [`ensure_privilege`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privilege {
    /// Already root; nothing was invoked.
    AlreadyElevated,
    /// Escalation mechanism validated and cached.
    Escalated,
}

/// Ensure privileged commands can run.
///
/// Never touches the escalation mechanism when already elevated. Otherwise
/// probes for it and pre-authorizes it once, which may prompt.
pub fn ensure_privilege(
    env: &Environment,
    resolver: &dyn Resolver,
    runner: &dyn Runner,
) -> Result<Privilege> {
    if env.identity.is_elevated() {
        log::debug!("euid 0, escalation not needed");
        return Ok(Privilege::AlreadyElevated);
    }

    let escalation = Escalation::from_settings(&env.settings);
    if !probe::probe(resolver, &escalation.program) {
        return Err(Error::EscalationUnavailable {
            program: escalation.program,
        });
    }

    report::info(&format!(
        "Requesting {} credentials for package installation",
        escalation.program
    ));
    let code = runner.execute(&escalation.validate())?;
    if code != 0 {
        return Err(Error::EscalationRefused {
            program: escalation.program,
            code,
        });
    }

    Ok(Privilege::Escalated)
}
