use anyhow::{Context, Result, anyhow};
use std::env;
use std::fs;
use std::path::PathBuf;

const APP_DIR_NAME: &str = "riotswap";

/// Filesystem anchors: the tool's own data root (registry, config, profile
/// storage) and the per-user local-data root the live client state lives
/// under.
#[derive(Debug, Clone)]
pub struct AppPaths {
    data_root: PathBuf,
    live_root: PathBuf,
}

impl AppPaths {
    pub fn resolve() -> Result<Self> {
        Ok(Self {
            data_root: app_data_dir()?,
            live_root: local_data_dir()?,
        })
    }

    #[cfg(test)]
    pub fn with_roots(data_root: impl Into<PathBuf>, live_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
            live_root: live_root.into(),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_root.join("config.json")
    }

    pub fn profiles_dir(&self) -> PathBuf {
        self.data_root.join("profiles")
    }

    pub fn riot_data_dir(&self) -> PathBuf {
        self.riot_client_root().join("Data")
    }

    pub fn riot_config_dir(&self) -> PathBuf {
        self.riot_client_root().join("Config")
    }

    fn riot_client_root(&self) -> PathBuf {
        self.live_root.join("Riot Games").join("Riot Client")
    }

    pub fn ensure_layout(&self) -> Result<()> {
        let profiles = self.profiles_dir();

        fs::create_dir_all(&self.data_root)
            .with_context(|| format!("failed to create {}", self.data_root.display()))?;
        fs::create_dir_all(&profiles)
            .with_context(|| format!("failed to create {}", profiles.display()))?;

        Ok(())
    }
}

/// Well-known default client install location, probed when no path is
/// configured yet.
pub fn default_install_dir() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        Some(PathBuf::from(r"C:\Riot Games\Riot Client"))
    }

    #[cfg(not(windows))]
    {
        resolve_home_dir().map(|home| home.join("Riot Games").join("Riot Client"))
    }
}

fn resolve_home_dir() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        if let Some(userprofile) = env::var_os("USERPROFILE").filter(|v| !v.is_empty()) {
            return Some(PathBuf::from(userprofile));
        }

        if let (Some(mut homedrive), Some(homepath)) =
            (env::var_os("HOMEDRIVE"), env::var_os("HOMEPATH"))
            && !homedrive.is_empty()
            && !homepath.is_empty()
        {
            homedrive.push(homepath);
            return Some(PathBuf::from(homedrive));
        }

        env::var_os("HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    #[cfg(not(windows))]
    {
        env::var_os("HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }
}

fn home_dir() -> Result<PathBuf> {
    resolve_home_dir()
        .ok_or_else(|| anyhow!("failed to resolve home directory from environment variables"))
}

fn app_data_dir() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        if let Some(appdata) = env::var_os("APPDATA").filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(appdata).join(APP_DIR_NAME));
        }

        Ok(home_dir()?
            .join("AppData")
            .join("Roaming")
            .join(APP_DIR_NAME))
    }

    #[cfg(not(windows))]
    {
        Ok(home_dir()?.join(".config").join(APP_DIR_NAME))
    }
}

fn local_data_dir() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        if let Some(local) = env::var_os("LOCALAPPDATA").filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(local));
        }

        Ok(home_dir()?.join("AppData").join("Local"))
    }

    #[cfg(not(windows))]
    {
        if let Some(data_home) = env::var_os("XDG_DATA_HOME").filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(data_home));
        }

        Ok(home_dir()?.join(".local").join("share"))
    }
}
