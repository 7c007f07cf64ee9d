//! Authentication service - signup, login, and identity lookup.
//!
//! Sits between the HTTP layer and the credential store: hashes
//! passwords on the way in and strips secrets on the way out. Callers
//! only ever see [`Identity`] values or typed errors.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Identity, NewUser, Password, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::store::CredentialStore;

/// Validated signup data with the password still in plain text.
#[derive(Debug, Clone)]
pub struct Signup {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub user_type: UserRole,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user and return the authenticated identity
    async fn signup(&self, signup: Signup) -> AppResult<Identity>;

    /// Verify credentials and return the matching identity
    async fn login(&self, email: String, password: String) -> AppResult<Identity>;

    /// Look up an identity by user id
    async fn lookup(&self, id: Uuid) -> AppResult<Identity>;
}

/// Concrete implementation of [`AuthService`] backed by a credential store.
pub struct Authenticator {
    store: Arc<dyn CredentialStore>,
}

impl Authenticator {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn signup(&self, signup: Signup) -> AppResult<Identity> {
        // Field shape is validated by the handler's ValidatedJson extractor;
        // the duplicate-email check happens inside the store, under its lock.
        let password_hash = Password::new(&signup.password)?.into_string();

        let user = self
            .store
            .create(NewUser {
                email: signup.email,
                password_hash,
                first_name: signup.first_name,
                last_name: signup.last_name,
                user_type: signup.user_type,
            })
            .await?;

        Ok(Identity::from(user))
    }

    async fn login(&self, email: String, password: String) -> AppResult<Identity> {
        let user_result = self.store.find_by_email(&email).await?;

        // SECURITY: Perform password verification even if the user doesn't
        // exist, so an unknown email and a wrong password are observably
        // identical (no user enumeration). The dummy hash never verifies.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let (password_hash, user_exists) = match &user_result {
            Some(user) => (user.password_hash.as_str(), true),
            None => (dummy_hash, false),
        };

        let stored_password = Password::from_hash(password_hash.to_string());
        let password_valid = stored_password.verify(&password);

        if !user_exists || !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        // Safe to unwrap since we verified user_exists is true
        Ok(Identity::from(user_result.unwrap()))
    }

    async fn lookup(&self, id: Uuid) -> AppResult<Identity> {
        let user = self.store.find_by_id(id).await?.ok_or_not_found()?;
        Ok(Identity::from(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;
    use crate::store::MockCredentialStore;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn signup_request() -> Signup {
        Signup {
            email: "a@x.com".to_string(),
            password: "password123".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            user_type: UserRole::Learner,
        }
    }

    fn stored_user(password: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: "a@x.com".to_string(),
            password_hash: Password::new(password).unwrap().into_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            user_type: UserRole::Learner,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_signup_hashes_password_before_store() {
        let mut store = MockCredentialStore::new();
        store
            .expect_create()
            .withf(|new_user: &NewUser| {
                new_user.password_hash != "password123"
                    && new_user.password_hash.starts_with("$argon2")
            })
            .returning(|new_user| Ok(User::new(new_user)));

        let service = Authenticator::new(Arc::new(store));
        let identity = service.signup(signup_request()).await.unwrap();

        assert_eq!(identity.email, "a@x.com");
        assert_eq!(identity.user_type, UserRole::Learner);
    }

    #[tokio::test]
    async fn test_signup_duplicate_email_propagates() {
        let mut store = MockCredentialStore::new();
        store
            .expect_create()
            .returning(|_| Err(AppError::DuplicateEmail));

        let service = Authenticator::new(Arc::new(store));
        let err = service.signup(signup_request()).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateEmail));
    }

    #[tokio::test]
    async fn test_signup_short_password_never_reaches_store() {
        let mut store = MockCredentialStore::new();
        store.expect_create().never();

        let service = Authenticator::new(Arc::new(store));
        let mut signup = signup_request();
        signup.password = "short".to_string();
        let err = service.signup(signup).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_login_returns_identity_without_secret() {
        let user = stored_user("password123");
        let mut store = MockCredentialStore::new();
        let stored = user.clone();
        store
            .expect_find_by_email()
            .with(eq("a@x.com"))
            .returning(move |_| Ok(Some(stored.clone())));

        let service = Authenticator::new(Arc::new(store));
        let identity = service
            .login("a@x.com".to_string(), "password123".to_string())
            .await
            .unwrap();

        assert_eq!(identity, Identity::from(user));
    }

    #[tokio::test]
    async fn test_login_wrong_password_and_unknown_email_look_the_same() {
        let mut store = MockCredentialStore::new();
        let stored = stored_user("password123");
        store
            .expect_find_by_email()
            .with(eq("a@x.com"))
            .returning(move |_| Ok(Some(stored.clone())));
        store
            .expect_find_by_email()
            .with(eq("nobody@x.com"))
            .returning(|_| Ok(None));

        let service = Authenticator::new(Arc::new(store));
        let wrong_password = service
            .login("a@x.com".to_string(), "wrongpass123".to_string())
            .await
            .unwrap_err();
        let unknown_email = service
            .login("nobody@x.com".to_string(), "password123".to_string())
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AppError::InvalidCredentials));
        assert!(matches!(unknown_email, AppError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_lookup_not_found() {
        let mut store = MockCredentialStore::new();
        store.expect_find_by_id().returning(|_| Ok(None));

        let service = Authenticator::new(Arc::new(store));
        let err = service.lookup(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }
}
