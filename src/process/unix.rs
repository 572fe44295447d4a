use nix::sys::signal::{Signal, kill};
use nix::unistd::Pid;

pub fn send_graceful(pid: u32) {
    send(pid, Signal::SIGTERM);
}

pub fn send_force(pid: u32) {
    send(pid, Signal::SIGKILL);
}

fn send(pid: u32, signal: Signal) {
    let _ = kill(Pid::from_raw(pid as i32), signal);
}
