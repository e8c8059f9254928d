use crate::connection::Connection;
use std::io::{self, Write};

pub const EMPTY_MESSAGE: &str = "No active network connections found.";

/// Width of the `[ n] ` ordinal prefix on numbered rows.
const ORDINAL_WIDTH: usize = 5;

fn format_row(proto: &str, pid: &str, address: &str, name: &str) -> String {
    format!("{:<6} {:<8} {:<20} {:<10}", proto, pid, address, name)
        .trim_end()
        .to_string()
}

/// Writes `connections` as a fixed-width table.
///
/// With `numbered` set every row is prefixed with its 1-based ordinal, which
/// is what the interactive selector expects. An empty slice produces only
/// the "no connections" message.
pub fn print_table<W: Write>(out: &mut W, connections: &[Connection], numbered: bool) -> io::Result<()> {
    if connections.is_empty() {
        return writeln!(out, "{}", EMPTY_MESSAGE);
    }

    let indent = if numbered { ORDINAL_WIDTH } else { 0 };
    writeln!(
        out,
        "{:indent$}{}",
        "",
        format_row("Proto", "PID", "Local Address", "Process"),
        indent = indent
    )?;

    for (i, connection) in connections.iter().enumerate() {
        let row = format_row(
            &connection.protocol().to_string(),
            &connection.pid().to_string(),
            connection.local_address(),
            connection.process_name(),
        );
        if numbered {
            writeln!(out, "[{:>2}] {}", i + 1, row)?;
        } else {
            writeln!(out, "{}", row)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::Protocol;

    fn render(connections: &[Connection], numbered: bool) -> String {
        let mut out = Vec::new();
        print_table(&mut out, connections, numbered).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn sample() -> Vec<Connection> {
        vec![
            Connection::new(Protocol::Tcp, 111, "127.0.0.1:8080".to_string(), "app1".to_string()),
            Connection::new(Protocol::Udp, 222, "*:53".to_string(), "dnsmasq".to_string()),
        ]
    }

    #[test]
    fn plain_table() {
        assert_eq!(
            render(&sample(), false),
            "Proto  PID      Local Address        Process\n\
             TCP    111      127.0.0.1:8080       app1\n\
             UDP    222      *:53                 dnsmasq\n"
        );
    }

    #[test]
    fn numbered_table() {
        assert_eq!(
            render(&sample(), true),
            "     Proto  PID      Local Address        Process\n\
             [ 1] TCP    111      127.0.0.1:8080       app1\n\
             [ 2] UDP    222      *:53                 dnsmasq\n"
        );
    }

    #[test]
    fn empty_input_prints_message_only() {
        assert_eq!(render(&[], true), format!("{}\n", EMPTY_MESSAGE));
    }
}
