use std::process::Command;

pub fn send_graceful(pid: u32) {
    taskkill(pid, false);
}

pub fn send_force(pid: u32) {
    taskkill(pid, true);
}

fn taskkill(pid: u32, force: bool) {
    let mut command = Command::new("taskkill");
    command.args(["/PID", &pid.to_string(), "/T"]);
    if force {
        command.arg("/F");
    }
    let _ = command.status();
}
