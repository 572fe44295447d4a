use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;

#[derive(Debug, Parser)]
#[command(
    version = env!("VERSION"),
    about = "Riot Client profile switch executor",
    long_about = None,
    long_version = concat!(
        "version ",
        env!("VERSION"),
        "\n",
        "  commit: ",
        env!("COMMIT"),
        "\n",
        "  built at: ",
        env!("DATE"),
        "\n",
        "  rust version: ",
        env!("RUSTC_VERSION"),
        "\n",
        "  platform: ",
        env!("OS"),
        "/",
        env!("ARCH")
    )
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[arg(value_name = "profile")]
    pub profile: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    List,
    Status,
    Create {
        #[arg(value_name = "name")]
        name: String,
    },
    Delete {
        #[arg(value_name = "name")]
        name: String,
    },
    SetClientPath {
        #[arg(value_name = "dir")]
        dir: PathBuf,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.profile.is_some() && cli.command.is_some() {
        bail!("profile argument and subcommand cannot be used together")
    }

    commands::run(cli)
}
