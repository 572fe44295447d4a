use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum MirrorError {
    #[error("required file is missing: {}", path.display())]
    MissingSource { path: PathBuf },

    #[error("failed to copy {} to {}: {source}", src.display(), dst.display())]
    Copy {
        src: PathBuf,
        dst: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Required-copy variant; no snapshot entry currently uses it.
#[allow(dead_code)]
pub fn copy_required(src: &Path, dst: &Path) -> Result<(), MirrorError> {
    if !src.is_file() {
        return Err(MirrorError::MissingSource {
            path: src.to_path_buf(),
        });
    }
    copy_file(src, dst)
}

pub fn copy_optional(src: &Path, dst: &Path) -> Result<(), MirrorError> {
    if !src.is_file() {
        return Ok(());
    }
    copy_file(src, dst)
}

/// Replaces `dst` with a deep copy of `src`. An absent `src` is a no-op
/// so that a missing archive directory never destroys an existing live one.
pub fn mirror_directory(src: &Path, dst: &Path) -> Result<(), MirrorError> {
    if !src.is_dir() {
        return Ok(());
    }

    if dst.exists() {
        fs::remove_dir_all(dst).map_err(|source| MirrorError::Remove {
            path: dst.to_path_buf(),
            source,
        })?;
    }

    copy_tree(src, dst)
}

fn copy_file(src: &Path, dst: &Path) -> Result<(), MirrorError> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).map_err(|source| MirrorError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::copy(src, dst).map_err(|source| MirrorError::Copy {
        src: src.to_path_buf(),
        dst: dst.to_path_buf(),
        source,
    })?;

    Ok(())
}

fn copy_tree(src: &Path, dst: &Path) -> Result<(), MirrorError> {
    fs::create_dir_all(dst).map_err(|source| MirrorError::CreateDir {
        path: dst.to_path_buf(),
        source,
    })?;

    let read_dir_err = |source| MirrorError::ReadDir {
        path: src.to_path_buf(),
        source,
    };

    for entry in fs::read_dir(src).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let file_type = entry.file_type().map_err(read_dir_err)?;
        let target = dst.join(entry.file_name());

        if file_type.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            copy_file(&entry.path(), &target)?;
        }
    }

    Ok(())
}
