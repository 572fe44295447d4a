mod cli;
mod commands;
mod config;
mod engine;
mod error;
mod mirror;
mod paths;
mod process;
mod registry;
mod snapshot;
#[cfg(test)]
mod testutil;

fn main() {
    init_logging();

    if let Err(err) = cli::run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Warn);
    if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    }
    let _ = builder.try_init();
}
