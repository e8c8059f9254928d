#![cfg(unix)]
#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

pub const LSOF_TCP: &str = "\
COMMAND  PID USER   FD   TYPE DEVICE SIZE/OFF NODE NAME
app1     111  501   10u  IPv4 0x1234      0t0  TCP 127.0.0.1:8080 (LISTEN)
";

pub const LSOF_UDP: &str = "\
COMMAND  PID USER   FD   TYPE DEVICE SIZE/OFF NODE NAME
app2     222  501   11u  IPv4 0x5678      0t0  UDP 127.0.0.1:8080
";

/// Writes an executable `/bin/sh` script called `name` into `dir`.
pub fn install_stub(dir: &Path, name: &str, body: &str) {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}", body)).expect("Failed to write stub script");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .expect("Failed to make stub script executable");
}

/// Installs an `lsof` stub printing `tcp` or `udp` depending on the `-i` argument.
pub fn install_lsof(dir: &Path, tcp: &str, udp: &str) {
    let body = format!(
        "if [ \"$2\" = \"tcp\" ]; then\n  printf '%s' '{}'\nelse\n  printf '%s' '{}'\nfi\n",
        tcp, udp
    );
    install_stub(dir, "lsof", &body);
}

/// Installs a `kill` stub that appends its arguments to the returned log file.
pub fn install_kill(dir: &Path) -> PathBuf {
    let log = dir.join("kill.log");
    install_stub(dir, "kill", &format!("echo \"$@\" >> '{}'\n", log.display()));
    log
}

/// Installs a `kill` stub that fails the way procps `kill` does for a dead PID.
pub fn install_failing_kill(dir: &Path) {
    install_stub(
        dir,
        "kill",
        "echo \"kill: ($2) - No such process\" >&2\nexit 1\n",
    );
}
