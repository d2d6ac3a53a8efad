//! User service - Signup, credentials and password resets.

use std::sync::Arc;

use argon2::password_hash::rand_core::{OsRng, RngCore};
use async_trait::async_trait;
use chrono::Duration;
use serde_json::json;
use tracing::instrument;

use crate::config::{Config, RESET_TOKEN_BYTES, RESET_TOKEN_LIFETIME_HOURS};
use crate::domain::password::{keyed_digest, to_hex};
use crate::domain::{NewUser, Password, PwReset, User};
use crate::errors::{AppError, AppResult, OptionExt, ValidationError};
use crate::infra::repositories::{CompanyProfileRepository, PwResetRepository, UserRepository};
use crate::infra::{Clock, Notifier, TemplateKind};
use crate::validation::{new_user_pipeline, normalize_email, password_pipeline, user_pipeline};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new user
    async fn create(&self, new_user: NewUser) -> AppResult<User>;

    /// User with its company profile, if any
    async fn by_id(&self, id: i32) -> AppResult<User>;

    async fn by_email(&self, email: &str) -> AppResult<User>;

    /// Check credentials and return the user
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<User>;

    async fn update(&self, user: &mut User) -> AppResult<()>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Start a password reset and return the plain reset token
    async fn initiate_reset(&self, email: &str) -> AppResult<String>;

    /// Consume a reset token and set a new password
    async fn complete_reset(&self, token: &str, new_password: &str) -> AppResult<User>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    users: Arc<dyn UserRepository>,
    pw_resets: Arc<dyn PwResetRepository>,
    profiles: Arc<dyn CompanyProfileRepository>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    pepper: String,
    hmac_key: Vec<u8>,
}

impl UserManager {
    pub fn new(
        users: Arc<dyn UserRepository>,
        pw_resets: Arc<dyn PwResetRepository>,
        profiles: Arc<dyn CompanyProfileRepository>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        config: &Config,
    ) -> Self {
        Self {
            users,
            pw_resets,
            profiles,
            notifier,
            clock,
            pepper: config.password_pepper().to_string(),
            hmac_key: config.hmac_key_bytes().to_vec(),
        }
    }

    async fn with_profile(&self, mut user: User) -> AppResult<User> {
        user.company_profile = self.profiles.find_by_user_id(user.id).await?;
        Ok(user)
    }

    fn reset_token() -> String {
        let mut bytes = [0u8; RESET_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        to_hex(&bytes)
    }
}

#[async_trait]
impl UserService for UserManager {
    #[instrument(skip_all)]
    async fn create(&self, mut new_user: NewUser) -> AppResult<User> {
        normalize_email(&mut new_user.email);
        new_user_pipeline().run(&new_user)?;

        if self.users.find_by_email(&new_user.email).await?.is_some() {
            return Err(ValidationError::EmailTaken.into());
        }

        let password_hash = Password::new(&new_user.password, &self.pepper)?.into_string();
        let mut user = User {
            email: new_user.email,
            password_hash,
            role_id: new_user.role_id,
            ..Default::default()
        };
        self.users.create(&mut user).await?;
        tracing::info!(id = user.id, "User created");

        // Best effort: the account is already stored.
        if let Err(e) = self
            .notifier
            .send(&user.email, TemplateKind::Welcome, json!({ "email": user.email }))
            .await
        {
            tracing::warn!(id = user.id, error = %e, "Welcome notification not sent");
        }

        Ok(user)
    }

    async fn by_id(&self, id: i32) -> AppResult<User> {
        let user = self.users.find_by_id(id).await?.ok_or_not_found()?;
        self.with_profile(user).await
    }

    async fn by_email(&self, email: &str) -> AppResult<User> {
        let mut email = email.to_string();
        normalize_email(&mut email);

        let user = self.users.find_by_email(&email).await?.ok_or_not_found()?;
        self.with_profile(user).await
    }

    async fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        let user = self.by_email(email).await?;

        if !Password::from_hash(user.password_hash.clone()).verify(password, &self.pepper) {
            tracing::warn!(id = user.id, "Invalid password");
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }

    #[instrument(skip_all, fields(id = user.id))]
    async fn update(&self, user: &mut User) -> AppResult<()> {
        normalize_email(&mut user.email);
        user_pipeline().run(user)?;

        if let Some(existing) = self.users.find_by_email(&user.email).await? {
            if existing.id != user.id {
                return Err(ValidationError::EmailTaken.into());
            }
        }

        self.users.update(user).await?;
        tracing::info!("User updated");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i32) -> AppResult<()> {
        if id <= 0 {
            return Err(AppError::InvalidId);
        }
        self.users.delete(id).await?;

        tracing::info!("User deleted");
        Ok(())
    }

    #[instrument(skip_all)]
    async fn initiate_reset(&self, email: &str) -> AppResult<String> {
        let user = self.by_email(email).await?;

        let token = Self::reset_token();
        let mut reset = PwReset {
            user_id: user.id,
            token_hash: keyed_digest(&token, &self.hmac_key)?,
            created_at: self.clock.now(),
            ..Default::default()
        };
        self.pw_resets.create(&mut reset).await?;

        self.notifier
            .send(
                &user.email,
                TemplateKind::PasswordReset,
                json!({ "email": user.email, "token": token }),
            )
            .await?;

        tracing::info!(user_id = user.id, "Password reset started");
        Ok(token)
    }

    #[instrument(skip_all)]
    async fn complete_reset(&self, token: &str, new_password: &str) -> AppResult<User> {
        let token_hash = keyed_digest(token, &self.hmac_key)?;
        let reset = self
            .pw_resets
            .find_by_token_hash(&token_hash)
            .await?
            .ok_or(ValidationError::PwResetInvalid)?;

        if self.clock.now() - reset.created_at > Duration::hours(RESET_TOKEN_LIFETIME_HOURS) {
            self.pw_resets.delete(reset.id).await?;
            return Err(ValidationError::PwResetInvalid.into());
        }

        password_pipeline().run(new_password)?;

        let mut user = self.by_id(reset.user_id).await?;
        user.password_hash = Password::new(new_password, &self.pepper)?.into_string();
        self.users.update(&mut user).await?;
        self.pw_resets.delete(reset.id).await?;

        tracing::info!(user_id = user.id, "Password reset completed");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repositories::{
        MockCompanyProfileRepository, MockPwResetRepository, MockUserRepository,
    };
    use crate::infra::{MockNotifier, SystemClock};

    fn config() -> Config {
        Config::new(
            "postgres://localhost/test",
            "test-secret-key-at-least-32-chars!!",
            "pepper",
            "hmac-test-key",
        )
    }

    fn manager(users: MockUserRepository, notifier: MockNotifier) -> UserManager {
        let mut profiles = MockCompanyProfileRepository::new();
        profiles.expect_find_by_user_id().returning(|_| Ok(None));

        UserManager::new(
            Arc::new(users),
            Arc::new(MockPwResetRepository::new()),
            Arc::new(profiles),
            Arc::new(notifier),
            Arc::new(SystemClock),
            &config(),
        )
    }

    #[tokio::test]
    async fn test_create_normalizes_and_hashes() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users.expect_create().times(1).returning(|user| {
            user.id = 1;
            Ok(())
        });
        let mut notifier = MockNotifier::new();
        notifier
            .expect_send()
            .withf(|to, kind, _| to == "jon@calhoun.io" && *kind == TemplateKind::Welcome)
            .times(1)
            .returning(|_, _, _| Ok(()));

        let user = manager(users, notifier)
            .create(NewUser::new("  Jon@Calhoun.IO ", "supersecret"))
            .await
            .unwrap();

        assert_eq!(user.email, "jon@calhoun.io");
        assert_ne!(user.password_hash, "supersecret");
        assert!(Password::from_hash(user.password_hash).verify("supersecret", "pepper"));
    }

    #[tokio::test]
    async fn test_create_survives_failed_welcome() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users.expect_create().times(1).returning(|user| {
            user.id = 7;
            Ok(())
        });
        let mut notifier = MockNotifier::new();
        notifier
            .expect_send()
            .times(1)
            .returning(|_, _, _| Err(AppError::notification("smtp down")));

        let user = manager(users, notifier)
            .create(NewUser::new("a@b.com", "longenough"))
            .await
            .unwrap();

        assert_eq!(user.id, 7);
    }

    #[tokio::test]
    async fn test_create_rejects_short_password() {
        let mut users = MockUserRepository::new();
        users.expect_create().never();

        let err = manager(users, MockNotifier::new())
            .create(NewUser::new("a@b.com", "short"))
            .await
            .unwrap_err();

        assert_eq!(err.validation(), Some(ValidationError::PasswordTooShort));
    }

    #[tokio::test]
    async fn test_create_rejects_taken_email() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| {
            Ok(Some(User {
                id: 3,
                email: "a@b.com".to_string(),
                ..Default::default()
            }))
        });
        users.expect_create().never();

        let err = manager(users, MockNotifier::new())
            .create(NewUser::new("a@b.com", "longenough"))
            .await
            .unwrap_err();

        assert_eq!(err.validation(), Some(ValidationError::EmailTaken));
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let hash = Password::new("correct-horse", "pepper").unwrap().into_string();
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(move |_| {
            Ok(Some(User {
                id: 3,
                email: "a@b.com".to_string(),
                password_hash: hash.clone(),
                ..Default::default()
            }))
        });
        let service = manager(users, MockNotifier::new());

        assert!(service.authenticate("a@b.com", "correct-horse").await.is_ok());
        assert!(matches!(
            service.authenticate("a@b.com", "battery-staple").await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));

        let result = manager(users, MockNotifier::new())
            .authenticate("nobody@b.com", "whatever1")
            .await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_rejects_non_positive_id() {
        let mut users = MockUserRepository::new();
        users.expect_delete().never();

        let result = manager(users, MockNotifier::new()).delete(-1).await;
        assert!(matches!(result, Err(AppError::InvalidId)));
    }

    #[test]
    fn test_reset_token_is_hex_of_expected_length() {
        let token = UserManager::reset_token();
        assert_eq!(token.len(), RESET_TOKEN_BYTES * 2);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
