use std::fmt;

/// Transport protocol of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Tcp,
    Udp,
}

impl Protocol {
    /// Both transports in enumeration order.
    pub const ALL: [Protocol; 2] = [Protocol::Tcp, Protocol::Udp];

    /// Lowercase form expected by the listing tools (`lsof -i tcp`, `netstat -p udp`).
    pub fn as_arg(&self) -> &'static str {
        match self {
            Protocol::Tcp => "tcp",
            Protocol::Udp => "udp",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Protocol::Tcp => "TCP",
            Protocol::Udp => "UDP",
        })
    }
}

/// A single observed transport-level binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    protocol: Protocol,
    pid: u32,
    local_address: String,
    process_name: String,
}

impl Connection {
    /// Creates a connection record.
    ///
    /// # Arguments
    ///
    /// * `protocol` - Transport the listing tool was asked for.
    /// * `pid` - Owning process ID, already validated by `parse_pid`.
    /// * `local_address` - Local `host:port` exactly as printed by the tool.
    /// * `process_name` - Owning process name, `"unknown"` when unresolvable.
    pub fn new(protocol: Protocol, pid: u32, local_address: String, process_name: String) -> Self {
        Self {
            protocol,
            pid,
            local_address,
            process_name,
        }
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Local address exactly as the listing tool printed it.
    pub fn local_address(&self) -> &str {
        &self.local_address
    }

    pub fn process_name(&self) -> &str {
        &self.process_name
    }
}

/// Parses a process id token. Zero, negative and non-numeric tokens are rejected.
pub fn parse_pid(token: &str) -> Option<u32> {
    match token.parse::<u32>() {
        Ok(0) | Err(_) => None,
        Ok(pid) => Some(pid),
    }
}
