//! The `netkill` command-line utility lists the network connections of the
//! host and kills the processes that own them.
//!
//! Without arguments it prints every TCP and UDP connection. `--kill` prompts
//! for a connection to kill, and `--kill <port>` kills every process bound to
//! that port.

use log::{error, warn};
use netkill::cli::Cli;
use netkill::netkill::Netkill;
use netkill::platform::Platform;
use netkill::shell::SystemShell;
use std::io;

/// The `main` function is the entry point of the `netkill` utility.
///
/// It parses command-line arguments, sets up the logging environment and runs
/// the selected flow. Failures are reported, never turned into an exit code.
fn main() {
    // Parse command-line arguments
    let args = Cli::parse_or_list(std::env::args_os());

    // Set up logging environment
    let log_level = args
        .verbose
        .log_level()
        .map(|level| level.to_level_filter())
        .unwrap_or(log::LevelFilter::Off);

    env_logger::Builder::new()
        .format_module_path(log_level == log::LevelFilter::Trace)
        .format_target(log_level == log::LevelFilter::Trace)
        .format_timestamp(Option::None)
        .filter_level(log_level)
        .init();

    if let Some(reason) = args.rejected() {
        warn!("Ignoring options and listing connections instead: {}", reason);
    }

    if let Err(err) = run(&args) {
        error!("{}", err);
    }
}

fn run(args: &Cli) -> anyhow::Result<()> {
    let tools = Platform::detect().tools(SystemShell);
    let netkill = Netkill::new(tools)
        .signal(args.signal.clone())
        .dry_run(args.dry_run);

    let stdin = io::stdin();
    let stdout = io::stdout();
    netkill.run(&args.action(), &mut stdin.lock(), &mut stdout.lock())?;

    Ok(())
}
