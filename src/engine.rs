use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::error::SwitchError;
use crate::mirror::{self, MirrorError};
use crate::paths::{self, AppPaths};
use crate::process;
use crate::registry::{Profile, Registry, RegistryError};
use crate::snapshot::{self, EntryKind};

/// Seam to the OS process layer, so the switch sequence can be exercised
/// without killing or starting real client processes.
pub trait ProcessController {
    /// Best-effort stop of all client processes; errors are swallowed.
    fn terminate_clients(&self);
    /// Fire-and-forget client start; a no-op when the executable is absent.
    fn launch(&self, install_dir: &Path);
}

pub struct ClientProcessController;

impl ProcessController for ClientProcessController {
    fn terminate_clients(&self) {
        process::terminate_clients();
    }

    fn launch(&self, install_dir: &Path) {
        process::launch_client(install_dir);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupOutcome {
    Complete,
    Degraded,
}

/// Orchestrates profile switches: backup of the outgoing profile, live
/// state clear/restore for the incoming one, process lifecycle around the
/// swap, and the active-profile pointer.
pub struct SwitchEngine {
    paths: AppPaths,
    registry: Registry,
    config: AppConfig,
    controller: Box<dyn ProcessController>,
}

impl SwitchEngine {
    pub fn open(paths: AppPaths, controller: Box<dyn ProcessController>) -> Self {
        let registry = Registry::load(paths.profiles_dir());
        let config = AppConfig::load(&paths.config_path());

        Self {
            paths,
            registry,
            config,
            controller,
        }
    }

    pub fn profiles(&self) -> &[Profile] {
        self.registry.profiles()
    }

    pub fn current_profile_name(&self) -> Option<&str> {
        self.config.last_active_profile.as_deref()
    }

    /// The registry record behind the active pointer. A pointer to a
    /// deleted profile resolves to `None` and is treated as "no active
    /// profile".
    pub fn active_profile(&self) -> Option<&Profile> {
        self.config
            .last_active_profile
            .as_deref()
            .and_then(|name| self.registry.find(name))
    }

    /// Configured install path, or the well-known default location when it
    /// exists on disk.
    pub fn install_dir(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.config.client_install_path {
            return Some(dir.clone());
        }
        paths::default_install_dir().filter(|dir| dir.is_dir())
    }

    pub fn set_client_path(&mut self, dir: PathBuf) -> Result<(), SwitchError> {
        if !dir.join(process::CLIENT_EXECUTABLE).is_file() {
            return Err(SwitchError::InstallPathInvalid { dir });
        }

        self.config.client_install_path = Some(dir);
        self.config.save(&self.paths.config_path());
        Ok(())
    }

    /// Creates a profile and makes it the live one. The previous identity
    /// is backed up to its own storage first; the new profile starts from
    /// a cleared live state rather than inheriting whatever was live.
    pub fn create_and_activate(&mut self, name: &str) -> Result<Profile, SwitchError> {
        if self.registry.find(name).is_some() {
            return Err(RegistryError::DuplicateName(name.to_string()).into());
        }

        self.backup_active();

        let profile = self.registry.create(name)?;

        self.config.last_active_profile = Some(profile.name.clone());
        self.config.save(&self.paths.config_path());

        self.controller.terminate_clients();
        snapshot::clear_live_state(&self.paths);
        self.launch();

        Ok(profile)
    }

    /// The switch sequence. Backup of the outgoing profile happens before
    /// the client is terminated; restore happens after termination and
    /// before relaunch, so the client never sees a half-swapped state.
    pub fn switch_to(&mut self, name: &str) -> Result<Profile, SwitchError> {
        let Some(target) = self.registry.find(name).cloned() else {
            return Err(SwitchError::ProfileNotFound(name.to_string()));
        };

        let switching_away = self
            .active_profile()
            .is_some_and(|active| !active.name.eq_ignore_ascii_case(&target.name));
        if switching_away {
            self.backup_active();
        }

        self.controller.terminate_clients();

        self.restore(&self.registry.storage_dir(&target))?;

        self.config.last_active_profile = Some(target.name.clone());
        self.config.save(&self.paths.config_path());

        self.launch();

        Ok(target)
    }

    /// Deleting the active profile clears the active pointer; deleting a
    /// nonexistent one is a no-op.
    pub fn delete(&mut self, name: &str) -> Result<Option<Profile>, SwitchError> {
        let Some(removed) = self.registry.remove(name)? else {
            return Ok(None);
        };

        let was_active = self
            .config
            .last_active_profile
            .as_deref()
            .is_some_and(|active| active.eq_ignore_ascii_case(&removed.name));
        if was_active {
            self.config.last_active_profile = None;
            self.config.save(&self.paths.config_path());
        }

        Ok(Some(removed))
    }

    /// Backup of the outgoing profile never blocks a switch: a degraded
    /// outcome is logged and then ignored. Known data-loss risk, kept to
    /// match the observed behavior of the original flow.
    fn backup_active(&self) {
        let Some(active) = self.active_profile() else {
            return;
        };

        let dest_dir = self.registry.storage_dir(active);
        info!("backing up live state for `{}`", active.name);
        if self.backup(&dest_dir) == BackupOutcome::Degraded {
            warn!(
                "backup for `{}` was incomplete; continuing with the switch",
                active.name
            );
        }
    }

    fn backup(&self, dest_dir: &Path) -> BackupOutcome {
        let mut outcome = BackupOutcome::Complete;

        for entry in snapshot::entries(&self.paths, self.install_dir().as_deref()) {
            let archive = dest_dir.join(entry.archive_name);
            let result = match entry.kind {
                EntryKind::File => mirror::copy_optional(&entry.live, &archive),
                EntryKind::Directory => mirror::mirror_directory(&entry.live, &archive),
            };

            if let Err(err) = result {
                warn!("backup of {} failed: {err}", entry.live.display());
                outcome = BackupOutcome::Degraded;
            }
        }

        outcome
    }

    /// Unlike backup, restore is fatal on the first failure: a half-restored
    /// identity must surface to the caller instead of being silently used.
    fn restore(&self, source_dir: &Path) -> Result<(), MirrorError> {
        // A profile that was never backed up has no primary settings
        // archive; it starts from a clean slate instead of inheriting the
        // previous identity's live files.
        if !source_dir.join(snapshot::PRIMARY_SETTINGS_ARCHIVE).is_file() {
            snapshot::clear_live_state(&self.paths);
        }

        for entry in snapshot::entries(&self.paths, self.install_dir().as_deref()) {
            let archive = source_dir.join(entry.archive_name);
            match entry.kind {
                EntryKind::File => mirror::copy_optional(&archive, &entry.live)?,
                EntryKind::Directory => mirror::mirror_directory(&archive, &entry.live)?,
            }
        }

        Ok(())
    }

    fn launch(&self) {
        match self.install_dir() {
            Some(dir) => self.controller.launch(&dir),
            None => info!("client install path is not configured; skipping launch"),
        }
    }
}
