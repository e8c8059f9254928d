use clap::error::ErrorKind;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::ffi::OsString;

use crate::signal::KillSignal;

/// Literal that switches to kill mode when it is the first argument.
pub const KILL_FLAG: &str = "--kill";

/// The flow selected by the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Action {
    /// Print every connection.
    #[default]
    List,
    /// Print a numbered table and kill the row the user picks.
    Interactive,
    /// Kill every process bound to the given port.
    KillPort(String),
}

/// `netkill` utility.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = None,
    override_usage = "netkill [OPTIONS]\n       netkill --kill [PORT] [OPTIONS]",
    after_help = "With `--kill` as the first argument, netkill kills every process using PORT,\n\
                  or asks which connection to kill when no PORT follows."
)]
pub struct Cli {
    /// An option to specify the type of signal to be sent.
    #[arg(
        long,
        short = 's',
        name = "SIG",
        help = "SIG is a signal name used on unix-like systems",
        default_value = "sigkill",
        value_parser = parse_signal
    )]
    pub signal: KillSignal,

    /// Dry-run flag to only display what would be done without taking action.
    #[arg(long, help = "Show which processes would be killed without killing them")]
    pub dry_run: bool,

    /// A verbosity flag to control the level of logging output.
    #[command(flatten)]
    pub verbose: Verbosity<WarnLevel>,

    /// Stray positional arguments, accepted and ignored.
    #[arg(hide = true)]
    #[allow(dead_code)]
    extra: Vec<String>,

    /// Flow chosen from the shape of the leading arguments.
    #[arg(skip)]
    action: Action,

    /// Why the options were discarded, when they could not be parsed.
    #[arg(skip)]
    rejected: Option<String>,
}

impl Cli {
    /// Parses the command line.
    ///
    /// The flow is decided by argument shape alone: `--kill` as the first
    /// argument selects kill mode and the second argument, whatever it looks
    /// like, is the port. Everything after that is parsed as options. When
    /// the options are malformed they are dropped and the flow falls back to
    /// a plain listing, so nothing is killed with settings the user did not
    /// ask for. `--help` and `--version` still print and exit.
    ///
    /// # Arguments
    ///
    /// * `args` - The full argument list, program name included.
    pub fn parse_or_list<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

        let (action, options_start) = match args.get(1).and_then(|arg| arg.to_str()) {
            Some(KILL_FLAG) => match args.get(2) {
                Some(port) => (Action::KillPort(port.to_string_lossy().into_owned()), 3),
                None => (Action::Interactive, 2),
            },
            _ => (Action::List, 1),
        };

        let program = args
            .first()
            .cloned()
            .unwrap_or_else(|| OsString::from("netkill"));
        let options = std::iter::once(program).chain(args.iter().skip(options_start).cloned());

        match Self::try_parse_from(options) {
            Ok(mut cli) => {
                cli.action = action;
                cli
            }
            Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                err.exit()
            }
            Err(err) => {
                let mut cli = Self::parse_from(["netkill"]);
                cli.rejected = err.to_string().lines().next().map(str::to_string);
                cli
            }
        }
    }

    /// Returns the flow selected by the command line.
    pub fn action(&self) -> Action {
        self.action.clone()
    }

    /// Returns the parse error that made the command line fall back to a listing.
    pub fn rejected(&self) -> Option<&str> {
        self.rejected.as_deref()
    }
}

fn parse_signal(arg: &str) -> Result<KillSignal, std::io::Error> {
    arg.parse()
}
