//! Wrapper around signals for platforms that they are not supported on

use std::{fmt::Display, str::FromStr};

#[cfg(unix)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillSignal(pub nix::sys::signal::Signal);

/// On a platform where we don't have the proper signals enum
#[cfg(not(unix))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillSignal(pub String);

impl KillSignal {
    /// The option handed to `kill(1)` to deliver this signal, e.g. `-9`.
    pub fn kill_arg(&self) -> String {
        #[cfg(unix)]
        {
            format!("-{}", self.0 as i32)
        }

        #[cfg(not(unix))]
        {
            format!("-{}", self.0.trim_start_matches("SIG"))
        }
    }
}

impl Default for KillSignal {
    fn default() -> Self {
        #[cfg(unix)]
        {
            KillSignal(nix::sys::signal::Signal::SIGKILL)
        }

        #[cfg(not(unix))]
        {
            KillSignal("SIGKILL".to_string())
        }
    }
}

impl Display for KillSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for KillSignal {
    type Err = std::io::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.to_uppercase();

        #[cfg(unix)]
        {
            let signal = nix::sys::signal::Signal::from_str(&value)?;
            Ok(KillSignal(signal))
        }

        #[cfg(not(unix))]
        {
            Ok(KillSignal(value))
        }
    }
}
