use log::debug;
use std::io::{Error, ErrorKind};
use std::process::Command;

/// Runs external commands on behalf of the platform tools.
pub trait Shell {
    /// Runs `program` with `args`, blocking until it exits.
    ///
    /// Returns the captured standard output when the command succeeds. A
    /// command that cannot be spawned or exits with a non-zero status yields
    /// an `Error` carrying the failure text.
    fn run(&self, program: &str, args: &[&str]) -> Result<String, Error>;
}

/// `Shell` backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemShell;

impl Shell for SystemShell {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, Error> {
        debug!("Running {} {}", program, args.join(" "));

        let output = Command::new(program).args(args).output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            let message = if stderr.is_empty() {
                format!("{} {}", program, output.status)
            } else {
                stderr.to_string()
            };
            return Err(Error::new(ErrorKind::Other, message));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
