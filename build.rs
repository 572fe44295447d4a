use std::env;
use std::process::Command;

fn emit(name: &str, value: &str) {
    println!("cargo:rustc-env={name}={value}");
}

fn env_or_unknown(name: &str) -> String {
    env::var(name).unwrap_or_else(|_| "unknown".to_string())
}

fn main() {
    let version = env::var("VERSION")
        .or_else(|_| env::var("CARGO_PKG_VERSION"))
        .unwrap_or_else(|_| "unknown".to_string());
    emit("VERSION", &version);

    emit("COMMIT", &env_or_unknown("COMMIT"));
    emit("DATE", &env_or_unknown("DATE"));
    emit("OS", &env_or_unknown("CARGO_CFG_TARGET_OS"));
    emit("ARCH", &env_or_unknown("CARGO_CFG_TARGET_ARCH"));

    let rustc_version = Command::new("rustc")
        .arg("--version")
        .output()
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    emit("RUSTC_VERSION", &rustc_version);
}
