use crate::cli::Action;
use crate::connection::{Connection, Protocol};
use crate::platform::ConnectionTools;
use crate::port::{find_target_pids, normalize_port};
use crate::select::{read_selection, Selection};
use crate::signal::KillSignal;
use crate::table::print_table;
use log::info;
use std::io::{self, BufRead, Write};

/// The list, select and kill flows, driven by a platform's `ConnectionTools`.
pub struct Netkill<T> {
    tools: T,
    signal: KillSignal,
    dry_run: bool,
}

impl<T: ConnectionTools> Netkill<T> {
    pub fn new(tools: T) -> Self {
        Self {
            tools,
            signal: KillSignal::default(),
            dry_run: false,
        }
    }

    /// Signal delivered by the unix `kill` command. Defaults to SIGKILL.
    pub fn signal(mut self, signal: KillSignal) -> Self {
        self.signal = signal;
        self
    }

    /// When set, kills are reported but never carried out.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Enumerates TCP connections followed by UDP connections.
    pub fn connections(&self) -> Vec<Connection> {
        Protocol::ALL
            .iter()
            .flat_map(|&protocol| self.tools.connections(protocol))
            .collect()
    }

    /// Routes `action` to its flow.
    pub fn run<R: BufRead, W: Write>(&self, action: &Action, input: &mut R, out: &mut W) -> io::Result<()> {
        match action {
            Action::List => self.list(out),
            Action::Interactive => self.kill_interactive(input, out).map(|_| ()),
            Action::KillPort(port) => self.kill_port(port, out).map(|_| ()),
        }
    }

    /// Prints every connection.
    pub fn list<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let connections = self.connections();
        if !connections.is_empty() {
            writeln!(out, "Active network connections:")?;
        }
        print_table(out, &connections, false)
    }

    /// Prints a numbered table and kills the process of the row the user picks.
    ///
    /// Returns the PID that was targeted, if any.
    pub fn kill_interactive<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> io::Result<Option<u32>> {
        writeln!(out, "Scanning active ports...")?;
        let connections = self.connections();
        if connections.is_empty() {
            print_table(out, &connections, true)?;
            return Ok(None);
        }

        writeln!(out, "\nActive network connections:")?;
        print_table(out, &connections, true)?;
        write!(out, "\nEnter number to kill (or 'q' to quit): ")?;
        out.flush()?;

        let target = match read_selection(input, connections.len())? {
            Selection::Quit => return Ok(None),
            Selection::Invalid => {
                writeln!(out, "Invalid selection")?;
                return Ok(None);
            }
            Selection::Index(index) => &connections[index],
        };

        writeln!(
            out,
            "Killing {} (PID {}) on {}...",
            target.process_name(),
            target.pid(),
            target.local_address()
        )?;
        self.kill_pid(target.pid(), out)?;

        Ok(Some(target.pid()))
    }

    /// Kills every process with a local address on `port`.
    ///
    /// `port` may be given with or without its leading `:`. Returns the PIDs
    /// that were targeted; a failed kill does not stop the others.
    pub fn kill_port<W: Write>(&self, port: &str, out: &mut W) -> io::Result<Vec<u32>> {
        let port = normalize_port(port);
        let pids = find_target_pids(&self.connections(), &port);

        if pids.is_empty() {
            writeln!(out, "No processes found using port {}", port)?;
            return Ok(pids);
        }

        for &pid in &pids {
            self.kill_pid(pid, out)?;
        }

        Ok(pids)
    }

    /// Kills a single process and reports the outcome. Returns whether it succeeded.
    pub fn kill_pid<W: Write>(&self, pid: u32, out: &mut W) -> io::Result<bool> {
        if self.dry_run {
            info!("Dry run, leaving PID {} alone", pid);
            writeln!(out, "Would kill process {}", pid)?;
            return Ok(true);
        }

        match self.tools.kill(pid, &self.signal) {
            Ok(()) => {
                writeln!(out, "Successfully killed process {}", pid)?;
                Ok(true)
            }
            Err(err) => {
                writeln!(out, "Error killing process {}: {}", pid, err)?;
                Ok(false)
            }
        }
    }
}
