use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

const REGISTRY_FILE: &str = "profiles.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub directory_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("profile `{0}` already exists")]
    DuplicateName(String),

    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode profile registry: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Durable profile list, persisted as a whole-file JSON overwrite on every
/// mutation. Single-caller access is assumed; there is no locking.
#[derive(Debug)]
pub struct Registry {
    profiles_dir: PathBuf,
    profiles: Vec<Profile>,
}

impl Registry {
    /// A missing registry file is an empty registry; a corrupt one is
    /// recovered by resetting to empty.
    pub fn load(profiles_dir: PathBuf) -> Self {
        let path = profiles_dir.join(REGISTRY_FILE);

        let profiles = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(profiles) => profiles,
                Err(err) => {
                    warn!(
                        "invalid JSON in {}: {err}; starting with an empty registry",
                        path.display()
                    );
                    Vec::new()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                warn!(
                    "failed to read {}: {err}; starting with an empty registry",
                    path.display()
                );
                Vec::new()
            }
        };

        Self {
            profiles_dir,
            profiles,
        }
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn find(&self, name: &str) -> Option<&Profile> {
        self.profiles
            .iter()
            .find(|profile| profile.name.eq_ignore_ascii_case(name))
    }

    pub fn storage_dir(&self, profile: &Profile) -> PathBuf {
        self.profiles_dir.join(&profile.directory_name)
    }

    /// Derives the storage directory name once, at creation, from the
    /// sanitized profile name and the current Unix timestamp. Two creations
    /// with the same cleaned name in the same second could collide; the
    /// uniqueness check on `name` makes that unreachable in practice.
    pub fn create(&mut self, name: &str) -> Result<Profile, RegistryError> {
        if self.find(name).is_some() {
            return Err(RegistryError::DuplicateName(name.to_string()));
        }

        let created_at = Utc::now();
        let directory_name = format!("{}_{}", clean_name(name), created_at.timestamp());

        let storage_dir = self.profiles_dir.join(&directory_name);
        fs::create_dir_all(&storage_dir).map_err(|source| RegistryError::CreateDir {
            path: storage_dir,
            source,
        })?;

        let profile = Profile {
            name: name.to_string(),
            directory_name,
            created_at,
        };
        self.profiles.push(profile.clone());
        self.save()?;

        Ok(profile)
    }

    /// Removing a nonexistent profile is a no-op. Storage-directory cleanup
    /// is best-effort: the registry entry goes away even if the disk
    /// removal fails.
    pub fn remove(&mut self, name: &str) -> Result<Option<Profile>, RegistryError> {
        let Some(index) = self
            .profiles
            .iter()
            .position(|profile| profile.name.eq_ignore_ascii_case(name))
        else {
            return Ok(None);
        };

        let profile = self.profiles.remove(index);

        let storage_dir = self.profiles_dir.join(&profile.directory_name);
        if storage_dir.exists()
            && let Err(err) = fs::remove_dir_all(&storage_dir)
        {
            warn!("failed to remove {}: {err}", storage_dir.display());
        }

        self.save()?;
        Ok(Some(profile))
    }

    fn save(&self) -> Result<(), RegistryError> {
        let raw = serde_json::to_string_pretty(&self.profiles)?;

        fs::create_dir_all(&self.profiles_dir).map_err(|source| RegistryError::CreateDir {
            path: self.profiles_dir.clone(),
            source,
        })?;

        let path = self.profiles_dir.join(REGISTRY_FILE);
        fs::write(&path, raw).map_err(|source| RegistryError::Write { path, source })
    }
}

fn clean_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::TempDir;

    #[test]
    fn clean_name_replaces_hostile_characters() {
        assert_eq!(clean_name("Main"), "Main");
        assert_eq!(clean_name("smurf/alt:2"), "smurf_alt_2");
        assert_eq!(clean_name(r#"a\b*c?"#), "a_b_c_");
        assert_eq!(clean_name("tab\there"), "tab_here");
    }

    #[test]
    fn create_persists_and_creates_storage_dir() {
        let root = TempDir::new("registry-create");
        let mut registry = Registry::load(root.path().to_path_buf());

        let profile = registry.create("Main").expect("create");
        assert!(profile.directory_name.starts_with("Main_"));
        assert!(root.path().join(&profile.directory_name).is_dir());

        let reloaded = Registry::load(root.path().to_path_buf());
        assert_eq!(reloaded.profiles().len(), 1);
        assert_eq!(reloaded.profiles()[0].name, "Main");
    }

    #[test]
    fn duplicate_names_are_rejected_case_insensitively() {
        let root = TempDir::new("registry-dup");
        let mut registry = Registry::load(root.path().to_path_buf());

        registry.create("Main").expect("create");
        let result = registry.create("MAIN");
        assert!(matches!(result, Err(RegistryError::DuplicateName(_))));
        assert_eq!(registry.profiles().len(), 1);
    }

    #[test]
    fn remove_is_a_noop_for_unknown_names() {
        let root = TempDir::new("registry-remove-unknown");
        let mut registry = Registry::load(root.path().to_path_buf());

        let removed = registry.remove("Ghost").expect("remove");
        assert!(removed.is_none());
    }

    #[test]
    fn remove_deletes_entry_and_storage() {
        let root = TempDir::new("registry-remove");
        let mut registry = Registry::load(root.path().to_path_buf());

        let profile = registry.create("Alt").expect("create");
        let storage_dir = root.path().join(&profile.directory_name);
        fs::write(storage_dir.join("lockfile"), "x").expect("write");

        let removed = registry.remove("alt").expect("remove");
        assert_eq!(removed.expect("profile").name, "Alt");
        assert!(!storage_dir.exists(), "storage dir should be removed");

        let reloaded = Registry::load(root.path().to_path_buf());
        assert!(reloaded.profiles().is_empty());
    }

    #[test]
    fn corrupt_registry_recovers_to_empty() {
        let root = TempDir::new("registry-corrupt");
        fs::write(root.path().join(REGISTRY_FILE), "[{broken").expect("write");

        let registry = Registry::load(root.path().to_path_buf());
        assert!(registry.profiles().is_empty());
    }

    #[test]
    fn insertion_order_is_preserved() {
        let root = TempDir::new("registry-order");
        let mut registry = Registry::load(root.path().to_path_buf());

        registry.create("zeta").expect("create");
        registry.create("alpha").expect("create");

        let names: Vec<&str> = registry
            .profiles()
            .iter()
            .map(|profile| profile.name.as_str())
            .collect();
        assert_eq!(names, ["zeta", "alpha"]);
    }
}
