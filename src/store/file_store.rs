//! File-backed credential store.
//!
//! Persists user records as a single pretty-printed JSON array. Every
//! mutation re-reads the file, applies the change in memory, and replaces
//! the file wholesale. Writers serialize on an OS advisory lock held on a
//! sibling `.lock` file, and the replacement is a write-to-temp plus
//! atomic rename, so concurrent signups cannot lose updates.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewUser, User};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// Durable mapping from email to user record.
///
/// Records are created once and never updated or deleted; lookups are
/// read-only against the backing file.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Persist a new user record.
    ///
    /// Fails with [`AppError::DuplicateEmail`] if a record with the same
    /// email (exact string match) already exists.
    async fn create(&self, new_user: NewUser) -> AppResult<User>;

    /// Find a user record by exact email match.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user record by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
}

/// JSON-file implementation of [`CredentialStore`].
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing credential file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }

    fn ensure_parent_dir(&self) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    /// Take the advisory lock; released when the returned handle drops.
    fn acquire_lock(&self, exclusive: bool) -> AppResult<File> {
        self.ensure_parent_dir()?;
        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(self.lock_path())?;
        if exclusive {
            lock_file.lock()?;
        } else {
            lock_file.lock_shared()?;
        }
        Ok(lock_file)
    }

    /// Read all user records.
    ///
    /// A missing or corrupt backing file is treated as "no users yet";
    /// only creation ever reports errors to callers.
    fn read_users(&self) -> Vec<User> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_slice(&data) {
            Ok(users) => users,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "credential file is corrupt, treating as empty: {}",
                    e
                );
                Vec::new()
            }
        }
    }

    /// Replace the backing file with the given records.
    fn write_users(&self, users: &[User]) -> AppResult<()> {
        let json = serde_json::to_vec_pretty(users)
            .map_err(|e| AppError::internal(format!("Failed to serialize users: {}", e)))?;

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&json)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)
            .map_err(|e| AppError::Io(e.error))?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for FileStore {
    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let _lock = self.acquire_lock(true)?;

        let mut users = self.read_users();
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::DuplicateEmail);
        }

        let user = User::new(new_user);
        users.push(user.clone());
        self.write_users(&users)?;

        tracing::info!(user_id = %user.id, "user created");
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let _lock = self.acquire_lock(false)?;
        Ok(self.read_users().into_iter().find(|u| u.email == email))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let _lock = self.acquire_lock(false)?;
        Ok(self.read_users().into_iter().find(|u| u.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            user_type: UserRole::Learner,
        }
    }

    fn store_in(dir: &tempfile::TempDir) -> FileStore {
        FileStore::new(dir.path().join("users.json"))
    }

    #[tokio::test]
    async fn test_create_then_find_by_email() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let created = store.create(new_user("a@x.com")).await.unwrap();
        let found = store.find_by_email("a@x.com").await.unwrap().unwrap();

        assert_eq!(found.id, created.id);
        assert_eq!(found.first_name, "Test");
    }

    #[tokio::test]
    async fn test_create_duplicate_email_fails_and_keeps_original() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let original = store.create(new_user("a@x.com")).await.unwrap();
        let mut dup = new_user("a@x.com");
        dup.first_name = "Other".to_string();
        let err = store.create(dup).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateEmail));

        // The existing record is untouched
        let found = store.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(found.id, original.id);
        assert_eq!(found.first_name, "Test");
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.find_by_email("a@x.com").await.unwrap().is_none());
        assert!(store.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_as_empty_and_create_recovers() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), b"{not json").unwrap();

        assert!(store.find_by_email("a@x.com").await.unwrap().is_none());

        // Creation rewrites the file wholesale
        store.create(new_user("a@x.com")).await.unwrap();
        assert!(store.find_by_email("a@x.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_file_is_pretty_printed_array() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.create(new_user("a@x.com")).await.unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.trim_start().starts_with('['));
        assert!(text.contains('\n'));
        assert!(text.contains("\"passwordHash\""));
    }

    #[tokio::test]
    async fn test_concurrent_creates_do_not_lose_records() {
        let dir = tempfile::tempdir().unwrap();
        let store = std::sync::Arc::new(store_in(&dir));

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.create(new_user(&format!("u{}@x.com", i))).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        for i in 0..8 {
            let email = format!("u{}@x.com", i);
            assert!(store.find_by_email(&email).await.unwrap().is_some());
        }
    }
}
