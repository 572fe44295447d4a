use log::{debug, warn};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use sysinfo::{Pid, ProcessStatus, System};

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

/// Foreground processes that must not be running while live state is
/// swapped.
pub const CLIENT_PROCESS_NAMES: [&str; 3] = ["RiotClientServices", "LeagueClient", "Valorant"];

#[cfg(windows)]
pub const CLIENT_EXECUTABLE: &str = "RiotClientServices.exe";
#[cfg(not(windows))]
pub const CLIENT_EXECUTABLE: &str = "RiotClientServices";

const LAUNCH_ARGS: [&str; 2] = ["--launch-product=riot-client", "--launch-patchline=live"];

const POLL_INTERVAL_MS: u64 = 100;
const GRACE_TIMEOUT_MS: u64 = 1_000;
const FORCE_TIMEOUT_MS: u64 = 2_000;

/// Best-effort stop of every client process: graceful signal, a short
/// bounded wait, then force. Never fails; stragglers are logged and the
/// caller proceeds anyway.
pub fn terminate_clients() {
    let pids = client_pids();
    if pids.is_empty() {
        return;
    }

    for pid in &pids {
        send_graceful_stop(*pid);
    }

    if wait_for_exit(&pids, Duration::from_millis(GRACE_TIMEOUT_MS)) {
        return;
    }

    for pid in &pids {
        if is_pid_running(*pid) {
            send_force_stop(*pid);
        }
    }

    if !wait_for_exit(&pids, Duration::from_millis(FORCE_TIMEOUT_MS)) {
        warn!("some client processes are still running after force stop");
    }
}

pub fn any_client_running() -> bool {
    !client_pids().is_empty()
}

/// Fire-and-forget client start. A missing executable or a spawn failure
/// is logged and swallowed.
pub fn launch_client(install_dir: &Path) {
    let executable = install_dir.join(CLIENT_EXECUTABLE);
    if !executable.is_file() {
        debug!("{} does not exist; skipping launch", executable.display());
        return;
    }

    let mut command = Command::new(&executable);
    command
        .args(LAUNCH_ARGS)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    match command.spawn() {
        Ok(child) => debug!("launched {} (pid {})", executable.display(), child.id()),
        Err(err) => warn!("failed to launch {}: {err}", executable.display()),
    }
}

fn client_pids() -> Vec<u32> {
    let mut system = System::new_all();
    system.refresh_all();

    system
        .processes()
        .iter()
        .filter(|(_, process)| is_client_process(process.name()))
        .map(|(pid, _)| pid.as_u32())
        .collect()
}

fn is_client_process(name: &str) -> bool {
    CLIENT_PROCESS_NAMES.iter().any(|client| {
        name.eq_ignore_ascii_case(client)
            || name
                .strip_suffix(".exe")
                .is_some_and(|base| base.eq_ignore_ascii_case(client))
    })
}

fn wait_for_exit(pids: &[u32], timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        if pids.iter().all(|pid| !is_pid_running(*pid)) {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        thread::sleep(Duration::from_millis(POLL_INTERVAL_MS));
    }
}

fn is_pid_running(pid: u32) -> bool {
    let mut system = System::new_all();
    system.refresh_all();
    match system.process(Pid::from_u32(pid)) {
        Some(process) => !matches!(
            process.status(),
            ProcessStatus::Zombie | ProcessStatus::Dead
        ),
        None => false,
    }
}

#[cfg(unix)]
fn send_graceful_stop(pid: u32) {
    unix::send_graceful(pid);
}

#[cfg(windows)]
fn send_graceful_stop(pid: u32) {
    windows::send_graceful(pid);
}

#[cfg(unix)]
fn send_force_stop(pid: u32) {
    unix::send_force(pid);
}

#[cfg(windows)]
fn send_force_stop(pid: u32) {
    windows::send_force(pid);
}

#[cfg(test)]
mod tests {
    use super::is_client_process;

    #[test]
    fn client_names_match_with_and_without_exe_suffix() {
        assert!(is_client_process("RiotClientServices"));
        assert!(is_client_process("RiotClientServices.exe"));
        assert!(is_client_process("leagueclient"));
        assert!(is_client_process("VALORANT.exe"));
    }

    #[test]
    fn unrelated_names_do_not_match() {
        assert!(!is_client_process("RiotClientServicesHelper"));
        assert!(!is_client_process("steam"));
        assert!(!is_client_process(""));
    }
}
