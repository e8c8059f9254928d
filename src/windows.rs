use crate::connection::{parse_pid, Connection, Protocol};
use crate::platform::ConnectionTools;
use crate::shell::Shell;
use crate::signal::KillSignal;
use log::{debug, info, trace};
use std::io::Error;

/// Minimum number of columns in a `netstat -ano` row.
const NETSTAT_MIN_FIELDS: usize = 5;

/// Process name used when `tasklist` cannot tell us one.
pub const UNKNOWN_PROCESS: &str = "unknown";

/// Connection tools for Windows hosts: `netstat` to list connections,
/// `tasklist` to name their owners and `taskkill` to terminate them.
#[derive(Debug)]
pub struct WindowsTools<S> {
    shell: S,
}

impl<S: Shell> WindowsTools<S> {
    pub fn new(shell: S) -> Self {
        Self { shell }
    }

    /// Looks up the image name of `pid`, or `"unknown"` on any failure.
    pub fn process_name(&self, pid: u32) -> String {
        let filter = format!("PID eq {}", pid);
        match self
            .shell
            .run("tasklist", &["/FI", &filter, "/FO", "CSV", "/NH"])
        {
            Ok(output) => parse_tasklist(&output).unwrap_or_else(|| UNKNOWN_PROCESS.to_string()),
            Err(err) => {
                debug!("tasklist failed for PID {}: {}", pid, err);
                UNKNOWN_PROCESS.to_string()
            }
        }
    }
}

impl<S: Shell> ConnectionTools for WindowsTools<S> {
    fn connections(&self, protocol: Protocol) -> Vec<Connection> {
        match self
            .shell
            .run("netstat", &["-ano", "-p", protocol.as_arg()])
        {
            Ok(output) => parse_netstat(&output, protocol, |pid| self.process_name(pid)),
            Err(err) => {
                debug!("netstat failed for {}: {}", protocol, err);
                Vec::new()
            }
        }
    }

    /// Terminates `pid` with `taskkill /F`. The signal has no meaning here.
    fn kill(&self, pid: u32, _: &KillSignal) -> Result<(), Error> {
        info!("Killing process with PID {}", pid);

        self.shell
            .run("taskkill", &["/PID", &pid.to_string(), "/F"])
            .map(|_| ())
    }
}

/// Parses `netstat -ano -p <proto>` output.
///
/// Only `LISTENING` and `ESTABLISHED` rows are considered. The PID is the
/// last column and the local address the second; `resolve` supplies the
/// process name for every row that survives.
pub fn parse_netstat<F>(output: &str, protocol: Protocol, resolve: F) -> Vec<Connection>
where
    F: Fn(u32) -> String,
{
    let mut connections = Vec::new();

    for line in output.lines() {
        if !line.contains("LISTENING") && !line.contains("ESTABLISHED") {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < NETSTAT_MIN_FIELDS {
            trace!("Skipping short netstat row: {}", line);
            continue;
        }

        let Some(pid) = fields.last().and_then(|token| parse_pid(token)) else {
            trace!("Skipping netstat row with bad PID: {}", line);
            continue;
        };

        connections.push(Connection::new(
            protocol,
            pid,
            fields[1].to_string(),
            resolve(pid),
        ));
    }

    connections
}

/// Extracts the image name from `tasklist /FO CSV /NH` output.
///
/// Returns `None` when the first line is empty or is not a quoted CSV row,
/// which is how tasklist reports that no task matched the filter.
pub fn parse_tasklist(output: &str) -> Option<String> {
    let line = output.lines().next()?.trim();
    if !line.starts_with('"') {
        return None;
    }

    let name = line.split(',').next()?.trim_matches('"').trim();
    if name.is_empty() {
        return None;
    }

    Some(name.to_string())
}
