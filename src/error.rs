use std::path::PathBuf;

use crate::mirror::MirrorError;
use crate::process;
use crate::registry::RegistryError;

/// Typed failure surface of the engine operations. Anything not listed
/// here (backup degradation, config save failures, process termination)
/// is swallowed by design and only visible in diagnostic logs.
#[derive(Debug, thiserror::Error)]
pub enum SwitchError {
    #[error("profile `{0}` was not found")]
    ProfileNotFound(String),

    #[error("{} not found in {}", process::CLIENT_EXECUTABLE, dir.display())]
    InstallPathInvalid { dir: PathBuf },

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Mirror(#[from] MirrorError),
}
