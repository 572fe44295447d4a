use log::warn;
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths::AppPaths;

/// Absence of this archive in a profile's storage marks the profile as
/// never backed up.
pub const PRIMARY_SETTINGS_ARCHIVE: &str = "RiotGamesPrivateSettings.yaml";

const SESSIONS_ARCHIVE: &str = "Sessions";
const CLIENT_SETTINGS_ARCHIVE: &str = "RiotClientSettings.yaml";
const LOCKFILE_ARCHIVE: &str = "lockfile";
const INSTALL_CONFIG_ARCHIVE: &str = "client.config.yaml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One element of the live identity state: where it lives on disk and what
/// it is called inside a profile's storage directory.
#[derive(Debug, Clone)]
pub struct SnapshotEntry {
    pub live: PathBuf,
    pub archive_name: &'static str,
    pub kind: EntryKind,
}

/// The fixed file set that constitutes the client's identity state. The
/// install-relative entry is only present when the install path is known.
pub fn entries(paths: &AppPaths, install_dir: Option<&Path>) -> Vec<SnapshotEntry> {
    let data_dir = paths.riot_data_dir();
    let config_dir = paths.riot_config_dir();

    let mut entries = vec![
        SnapshotEntry {
            live: data_dir.join(PRIMARY_SETTINGS_ARCHIVE),
            archive_name: PRIMARY_SETTINGS_ARCHIVE,
            kind: EntryKind::File,
        },
        SnapshotEntry {
            live: data_dir.join(SESSIONS_ARCHIVE),
            archive_name: SESSIONS_ARCHIVE,
            kind: EntryKind::Directory,
        },
        SnapshotEntry {
            live: config_dir.join(CLIENT_SETTINGS_ARCHIVE),
            archive_name: CLIENT_SETTINGS_ARCHIVE,
            kind: EntryKind::File,
        },
        SnapshotEntry {
            live: config_dir.join(LOCKFILE_ARCHIVE),
            archive_name: LOCKFILE_ARCHIVE,
            kind: EntryKind::File,
        },
    ];

    if let Some(install_dir) = install_dir {
        entries.push(SnapshotEntry {
            live: install_dir.join("Config").join(INSTALL_CONFIG_ARCHIVE),
            archive_name: INSTALL_CONFIG_ARCHIVE,
            kind: EntryKind::File,
        });
    }

    entries
}

/// Deletes the primary settings file and the session directory from the
/// live locations, forcing the client to a logged-out clean slate. Each
/// failure is logged and swallowed.
pub fn clear_live_state(paths: &AppPaths) {
    let settings = paths.riot_data_dir().join(PRIMARY_SETTINGS_ARCHIVE);
    if settings.is_file()
        && let Err(err) = fs::remove_file(&settings)
    {
        warn!("failed to remove {}: {err}", settings.display());
    }

    let sessions = paths.riot_data_dir().join(SESSIONS_ARCHIVE);
    if sessions.is_dir()
        && let Err(err) = fs::remove_dir_all(&sessions)
    {
        warn!("failed to remove {}: {err}", sessions.display());
    }
}
