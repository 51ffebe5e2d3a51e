//! Leveled console output shared by every pipeline step.
//!
//! Each call writes exactly one tagged line. Informational output goes to
//! stdout; warnings, errors and hints go to stderr. No timestamps.

use colored::Colorize;

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", "[INFO]".blue().bold(), msg);
}

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// Print a warning message
pub fn warn(msg: &str) {
    eprintln!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", "[ERROR]".red().bold(), msg);
}

/// Print a dim hint under the previous error, on the same stream
pub fn hint(msg: &str) {
    eprintln!("        {}", msg.dimmed());
}

/// Print a step indicator
pub fn step(num: usize, total: usize, msg: &str) {
    println!();
    println!("{} {}", format!("[{num}/{total}]").cyan().bold(), msg.bold());
}
