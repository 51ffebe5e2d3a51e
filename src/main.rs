mod cli;

use std::process::ExitCode;

use clap::Parser;
use cli::Cli;
use labkit::backend::SystemRunner;
use labkit::probe::PathResolver;
use labkit::{Environment, Orchestrator, report};

fn main() -> ExitCode {
    let _cli = Cli::parse();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report::error(&e.to_string());
            report::hint(e.category().advice());
            ExitCode::from(exit_byte(e.exit_code()))
        }
    }
}

fn run() -> labkit::Result<()> {
    let env = Environment::detect()?;

    // Level comes from labstrap.toml, so logging starts once settings are loaded
    env_logger::Builder::new()
        .filter_level(env.settings.logging.level_filter())
        .format_timestamp(None)
        .init();
    log::debug!("settings: {:?}", env.settings);

    report::info(&format!("Lab root: {}", env.layout.root.display()));
    Orchestrator::new(&env, &PathResolver, &SystemRunner).run()
}

/// Clamp a child status into the 1..=255 range a process can exit with.
fn exit_byte(code: i32) -> u8 {
    match u8::try_from(code) {
        Ok(0) | Err(_) => 1,
        Ok(b) => b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_byte_passthrough() {
        assert_eq!(exit_byte(2), 2);
        assert_eq!(exit_byte(69), 69);
        assert_eq!(exit_byte(255), 255);
    }

    #[test]
    fn test_exit_byte_never_success() {
        assert_eq!(exit_byte(0), 1);
        assert_eq!(exit_byte(-1), 1);
        assert_eq!(exit_byte(256), 1);
    }
}
