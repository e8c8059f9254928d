use crate::connection::Connection;

/// Prefixes `port` with the `:` separator unless it already carries one.
pub fn normalize_port(port: &str) -> String {
    if port.starts_with(':') {
        port.to_string()
    } else {
        format!(":{}", port)
    }
}

/// Collects the PIDs of connections whose local address ends with the
/// normalized `port` suffix. Each PID appears once, in first-seen order.
pub fn find_target_pids(connections: &[Connection], port: &str) -> Vec<u32> {
    let suffix = normalize_port(port);
    let mut pids = Vec::new();

    for connection in connections {
        if connection.local_address().ends_with(&suffix) && !pids.contains(&connection.pid()) {
            pids.push(connection.pid());
        }
    }

    pids
}
