use crate::connection::{parse_pid, Connection, Protocol};
use crate::platform::ConnectionTools;
use crate::shell::Shell;
use crate::signal::KillSignal;
use log::{debug, info, trace};
use std::io::Error;

/// Minimum number of columns in an `lsof` row (COMMAND .. NAME).
const LSOF_MIN_FIELDS: usize = 9;

/// Connection tools shared amongst unix-like operating systems: `lsof` to
/// list sockets, `kill` to terminate their owners.
#[derive(Debug)]
pub struct UnixTools<S> {
    shell: S,
}

impl<S: Shell> UnixTools<S> {
    pub fn new(shell: S) -> Self {
        Self { shell }
    }
}

impl<S: Shell> ConnectionTools for UnixTools<S> {
    fn connections(&self, protocol: Protocol) -> Vec<Connection> {
        match self
            .shell
            .run("lsof", &["-i", protocol.as_arg(), "-P", "-n", "-l"])
        {
            Ok(output) => parse_lsof(&output, protocol),
            Err(err) => {
                debug!("lsof failed for {}: {}", protocol, err);
                Vec::new()
            }
        }
    }

    /// Sends `signal` to `pid` through `kill(1)`.
    fn kill(&self, pid: u32, signal: &KillSignal) -> Result<(), Error> {
        info!("Killing process with PID {} using {}", pid, signal);

        self.shell
            .run("kill", &[&signal.kill_arg(), &pid.to_string()])
            .map(|_| ())
    }
}

/// Parses `lsof -i <proto> -P -n -l` output.
///
/// The first line is the header. Rows that are too short or whose PID column
/// is not a positive integer are skipped.
pub fn parse_lsof(output: &str, protocol: Protocol) -> Vec<Connection> {
    let mut connections = Vec::new();

    for line in output.lines().skip(1) {
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < LSOF_MIN_FIELDS {
            trace!("Skipping short lsof row: {}", line);
            continue;
        }

        let Some(pid) = parse_pid(fields[1]) else {
            trace!("Skipping lsof row with bad PID: {}", line);
            continue;
        };

        connections.push(Connection::new(
            protocol,
            pid,
            fields[8].to_string(),
            fields[0].to_string(),
        ));
    }

    connections
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io::ErrorKind;

    const LSOF_TCP: &str = "\
COMMAND   PID USER   FD   TYPE DEVICE SIZE/OFF NODE NAME
nginx    1201    0    6u  IPv4  23456      0t0  TCP *:80 (LISTEN)
node     4410  501   23u  IPv6  98765      0t0  TCP [::1]:3000 (LISTEN)
firefox  7788  501   91u  IPv4  11223      0t0  TCP 10.0.0.2:51234->93.184.216.34:443 (ESTABLISHED)
";

    struct CannedShell {
        result: Result<String, String>,
        calls: RefCell<Vec<Vec<String>>>,
    }

    impl CannedShell {
        fn new(result: Result<&str, &str>) -> Self {
            Self {
                result: result.map(str::to_string).map_err(str::to_string),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl Shell for &CannedShell {
        fn run(&self, program: &str, args: &[&str]) -> Result<String, Error> {
            let mut call = vec![program.to_string()];
            call.extend(args.iter().map(|a| a.to_string()));
            self.calls.borrow_mut().push(call);
            self.result
                .clone()
                .map_err(|e| Error::new(ErrorKind::Other, e))
        }
    }

    #[test]
    fn parses_every_well_formed_row() {
        let connections = parse_lsof(LSOF_TCP, Protocol::Tcp);

        assert_eq!(connections.len(), 3);
        assert_eq!(
            connections[0],
            Connection::new(Protocol::Tcp, 1201, "*:80".to_string(), "nginx".to_string())
        );
        assert_eq!(connections[1].local_address(), "[::1]:3000");
        assert_eq!(
            connections[2].local_address(),
            "10.0.0.2:51234->93.184.216.34:443"
        );
        assert!(connections.iter().all(|c| c.protocol() == Protocol::Tcp));
    }

    #[test]
    fn drops_malformed_rows() {
        let output = "\
COMMAND   PID USER   FD   TYPE DEVICE SIZE/OFF NODE NAME
broken   abc     0    6u  IPv4  23456      0t0  UDP *:53

short    12 0 6u
zero       0     0    6u  IPv4  23456      0t0  UDP *:67
dnsmasq   812    0    4u  IPv4  23456      0t0  UDP *:53
";
        let connections = parse_lsof(output, Protocol::Udp);

        assert_eq!(connections.len(), 1);
        assert_eq!(connections[0].pid(), 812);
        assert_eq!(connections[0].process_name(), "dnsmasq");
        assert_eq!(connections[0].protocol(), Protocol::Udp);
    }

    #[test]
    fn header_only_output_is_empty() {
        assert!(parse_lsof("COMMAND PID USER FD TYPE DEVICE SIZE/OFF NODE NAME\n", Protocol::Tcp).is_empty());
        assert!(parse_lsof("", Protocol::Tcp).is_empty());
    }

    #[test]
    fn runs_lsof_for_requested_protocol() {
        let shell = CannedShell::new(Ok(LSOF_TCP));
        let tools = UnixTools::new(&shell);

        assert_eq!(tools.connections(Protocol::Tcp).len(), 3);
        assert_eq!(
            shell.calls.borrow()[0],
            vec!["lsof", "-i", "tcp", "-P", "-n", "-l"]
        );
    }

    #[test]
    fn failing_lsof_yields_nothing() {
        let shell = CannedShell::new(Err("lsof: not found"));
        let tools = UnixTools::new(&shell);

        assert!(tools.connections(Protocol::Udp).is_empty());
    }

    #[test]
    fn kill_reports_command_error() {
        let shell = CannedShell::new(Err("kill: (4242) - No such process"));
        let tools = UnixTools::new(&shell);

        let err = tools.kill(4242, &KillSignal::default()).unwrap_err();
        assert!(err.to_string().contains("No such process"));
    }

    #[cfg(unix)]
    #[test]
    fn kill_sends_signal_number() {
        let shell = CannedShell::new(Ok(""));
        let tools = UnixTools::new(&shell);

        tools.kill(4242, &KillSignal::default()).unwrap();
        assert_eq!(shell.calls.borrow()[0], vec!["kill", "-9", "4242"]);
    }
}
