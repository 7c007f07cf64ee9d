//! Persisted identity storage.
//!
//! The browser original kept the identity under a fixed localStorage
//! key; here it is a small JSON file under a fixed name. One entry,
//! holding the serialized identity of the active session, if any.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SESSION_STORAGE_KEY;
use crate::domain::Identity;
use crate::errors::{AppError, AppResult};

/// Client-side persistence for the current identity.
///
/// `load` returns `Ok(None)` when nothing is stored and `Err` when the
/// stored entry exists but cannot be parsed; the session service decides
/// what to do about corruption (it discards it).
pub trait IdentityStorage: Send + Sync {
    fn load(&self) -> AppResult<Option<Identity>>;
    fn save(&self, identity: &Identity) -> AppResult<()>;
    fn clear(&self) -> AppResult<()>;
}

/// JSON-file implementation of [`IdentityStorage`].
pub struct FileIdentityStorage {
    path: PathBuf,
}

impl FileIdentityStorage {
    /// Store the identity under the fixed storage key inside `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", SESSION_STORAGE_KEY)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IdentityStorage for FileIdentityStorage {
    fn load(&self) -> AppResult<Option<Identity>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let identity = serde_json::from_slice(&data)
            .map_err(|e| AppError::internal(format!("Stored identity is corrupt: {}", e)))?;
        Ok(Some(identity))
    }

    fn save(&self, identity: &Identity) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_vec(identity)
            .map_err(|e| AppError::internal(format!("Failed to serialize identity: {}", e)))?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;
    use uuid::Uuid;

    fn identity() -> Identity {
        Identity {
            id: Uuid::new_v4(),
            email: "a@x.com".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            user_type: UserRole::Learner,
        }
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileIdentityStorage::new(dir.path());

        let stored = identity();
        storage.save(&stored).unwrap();
        assert_eq!(storage.load().unwrap(), Some(stored));
    }

    #[test]
    fn test_load_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileIdentityStorage::new(dir.path());
        assert_eq!(storage.load().unwrap(), None);
    }

    #[test]
    fn test_load_corrupt_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileIdentityStorage::new(dir.path());
        fs::write(storage.path(), b"{broken").unwrap();
        assert!(storage.load().is_err());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileIdentityStorage::new(dir.path());
        storage.save(&identity()).unwrap();
        storage.clear().unwrap();
        storage.clear().unwrap();
        assert_eq!(storage.load().unwrap(), None);
    }
}
