use anyhow::{Result, bail};
use std::path::PathBuf;

use crate::cli::{Cli, Command};
use crate::engine::{ClientProcessController, SwitchEngine};
use crate::paths::AppPaths;
use crate::process;
use crate::registry::Profile;

pub fn run(cli: Cli) -> Result<()> {
    match (cli.profile, cli.command) {
        (Some(profile), None) => switch_profile(&profile),
        (None, Some(Command::List)) => list_profiles(),
        (None, Some(Command::Status)) => status(),
        (None, Some(Command::Create { name })) => create_profile(&name),
        (None, Some(Command::Delete { name })) => delete_profile(&name),
        (None, Some(Command::SetClientPath { dir })) => set_client_path(dir),
        (None, None) => bail!("profile or subcommand is required"),
        (Some(_), Some(_)) => bail!("profile argument and subcommand cannot be used together"),
    }
}

fn open_engine() -> Result<SwitchEngine> {
    let paths = AppPaths::resolve()?;
    paths.ensure_layout()?;
    Ok(SwitchEngine::open(paths, Box::new(ClientProcessController)))
}

fn switch_profile(name: &str) -> Result<()> {
    let mut engine = open_engine()?;
    let profile = engine.switch_to(name)?;
    println!("switched to profile `{}`", profile.name);
    Ok(())
}

fn create_profile(name: &str) -> Result<()> {
    let mut engine = open_engine()?;
    let profile = engine.create_and_activate(name)?;
    println!("created profile `{}`", profile.name);
    Ok(())
}

fn delete_profile(name: &str) -> Result<()> {
    let mut engine = open_engine()?;
    match engine.delete(name)? {
        Some(profile) => println!("deleted profile `{}`", profile.name),
        None => println!("no profile named `{name}`"),
    }
    Ok(())
}

fn list_profiles() -> Result<()> {
    let engine = open_engine()?;

    if engine.profiles().is_empty() {
        println!("no profiles");
        return Ok(());
    }

    for line in render_profile_list(engine.profiles(), engine.current_profile_name()) {
        println!("{line}");
    }

    Ok(())
}

fn status() -> Result<()> {
    let engine = open_engine()?;

    match engine.active_profile() {
        Some(profile) => {
            println!("Active profile: {}", profile.name);
            println!("Created at: {}", profile.created_at);
        }
        None => match engine.current_profile_name() {
            Some(name) => println!("Active profile: {name} (missing from registry)"),
            None => println!("Active profile: none"),
        },
    }

    println!("Profiles: {}", engine.profiles().len());

    match engine.install_dir() {
        Some(dir) => println!("Client install path: {}", dir.display()),
        None => println!("Client install path: not configured"),
    }

    let state = if process::any_client_running() {
        "running"
    } else {
        "stopped"
    };
    println!("Client processes: {state}");

    Ok(())
}

fn set_client_path(dir: PathBuf) -> Result<()> {
    let mut engine = open_engine()?;
    engine.set_client_path(dir.clone())?;
    println!("client install path set to {}", dir.display());
    Ok(())
}

// Profiles keep their registry (insertion) order; the active one gets the
// marker.
fn render_profile_list(profiles: &[Profile], current: Option<&str>) -> Vec<String> {
    profiles
        .iter()
        .map(|profile| {
            if current.is_some_and(|current| current.eq_ignore_ascii_case(&profile.name)) {
                format!("* {}", profile.name)
            } else {
                format!("  {}", profile.name)
            }
        })
        .collect()
}
