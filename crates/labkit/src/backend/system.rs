//! Runner that spawns real processes with inherited stdio.

use std::process::{Command, ExitStatus, Stdio};

use super::{Invocation, Runner};
use crate::error::{Error, Result};

/// Executes invocations on the host, blocking until each exits.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn execute(&self, invocation: &Invocation) -> Result<i32> {
        log::debug!("exec: {invocation}");

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = &invocation.cwd {
            command.current_dir(dir);
        }

        let status = command.status().map_err(|source| Error::Spawn {
            command: invocation.to_string(),
            source,
        })?;

        let code = status_code(status);
        log::debug!("exit {code}: {invocation}");
        Ok(code)
    }
}

/// Exit code of a finished child; `128 + signal` when it was killed.
fn status_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_success_status() {
        let code = SystemRunner.execute(&Invocation::new("true")).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn test_failure_status_is_returned_not_raised() {
        let code = SystemRunner
            .execute(&Invocation::new("sh").args(["-c", "exit 7"]))
            .unwrap();
        assert_eq!(code, 7);
    }

    #[test]
    fn test_signal_maps_to_128_plus() {
        let code = SystemRunner
            .execute(&Invocation::new("sh").args(["-c", "kill -TERM $$"]))
            .unwrap();
        assert_eq!(code, 128 + 15);
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let err = SystemRunner
            .execute(&Invocation::new("labstrap-no-such-program-xyz"))
            .unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
        assert_eq!(err.exit_code(), crate::error::EXIT_SPAWN);
    }

    #[test]
    fn test_runs_in_requested_dir() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join("marker"), "").unwrap();
        let code = SystemRunner
            .execute(
                &Invocation::new("test")
                    .args(["-f", "marker"])
                    .current_dir(tmp.path()),
            )
            .unwrap();
        assert_eq!(code, 0);
    }
}
