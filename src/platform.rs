use crate::connection::{Connection, Protocol};
use crate::shell::Shell;
use crate::signal::KillSignal;
use crate::unix::UnixTools;
use crate::windows::WindowsTools;
use log::debug;
use std::io::Error;

/// Interface to the platform's connection-listing and process-killing tools.
pub trait ConnectionTools {
    /// Lists the connections of one transport protocol.
    ///
    /// Never fails: when the listing tool is missing or errors out the
    /// protocol simply contributes no connections.
    fn connections(&self, protocol: Protocol) -> Vec<Connection>;

    /// Forcefully terminates the process with the given `pid`.
    fn kill(&self, pid: u32, signal: &KillSignal) -> Result<(), Error>;
}

impl<T: ConnectionTools + ?Sized> ConnectionTools for Box<T> {
    fn connections(&self, protocol: Protocol) -> Vec<Connection> {
        (**self).connections(protocol)
    }

    fn kill(&self, pid: u32, signal: &KillSignal) -> Result<(), Error> {
        (**self).kill(pid, signal)
    }
}

/// Which family of external tools to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// `lsof` and `kill`.
    Unix,
    /// `netstat`, `tasklist` and `taskkill`.
    Windows,
}

impl Platform {
    /// Environment variable set to `Windows_NT` on Windows hosts.
    pub const ENV_VAR: &'static str = "OS";

    /// Reads the platform switch from the environment.
    pub fn detect() -> Self {
        let value = std::env::var(Self::ENV_VAR).ok();
        let platform = Self::from_os_var(value.as_deref());
        debug!("Detected {:?} platform", platform);
        platform
    }

    /// Maps the value of the `OS` environment variable to a platform.
    ///
    /// # Arguments
    ///
    /// * `value` - The variable's value, `None` when it is unset.
    ///
    /// # Returns
    ///
    /// * `Platform::Windows` for exactly `Windows_NT`, `Platform::Unix` otherwise.
    pub fn from_os_var(value: Option<&str>) -> Self {
        match value {
            Some("Windows_NT") => Platform::Windows,
            _ => Platform::Unix,
        }
    }

    /// Builds the tool set for this platform on top of `shell`.
    pub fn tools<S: Shell + 'static>(self, shell: S) -> Box<dyn ConnectionTools> {
        match self {
            Platform::Unix => Box::new(UnixTools::new(shell)),
            Platform::Windows => Box::new(WindowsTools::new(shell)),
        }
    }
}
