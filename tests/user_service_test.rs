//! User service tests: signup, credentials and password resets.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use serde_json::Value;

use job_board::config::RESET_TOKEN_LIFETIME_HOURS;
use job_board::domain::{CompanyProfile, NewUser};
use job_board::errors::{AppError, AppResult, ValidationError};
use job_board::infra::{MemoryStore, Notifier, Repositories, TemplateKind};
use job_board::services::{ServiceContainer, Services};

use common::harness;

/// Mail backend that is always down
struct DownNotifier;

#[async_trait]
impl Notifier for DownNotifier {
    async fn send(&self, _: &str, _: TemplateKind, _: Value) -> AppResult<()> {
        Err(AppError::notification("smtp down"))
    }
}

#[tokio::test]
async fn test_signup_and_login() {
    let h = harness();
    let users = h.services.users();

    let user = users
        .create(NewUser::new(" Jon@Calhoun.io", "supersecret"))
        .await
        .unwrap();
    assert!(user.id > 0);
    assert_eq!(user.email, "jon@calhoun.io");

    let logged_in = users.authenticate("JON@calhoun.io", "supersecret").await.unwrap();
    assert_eq!(logged_in.id, user.id);

    assert!(matches!(
        users.authenticate("jon@calhoun.io", "not-the-password").await,
        Err(AppError::InvalidCredentials)
    ));

    let sent = h.notifier.sent().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].template, TemplateKind::Welcome);
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let h = harness();
    let users = h.services.users();
    users.create(NewUser::new("a@b.com", "longenough")).await.unwrap();

    let err = users
        .create(NewUser::new("A@B.com", "longenough"))
        .await
        .unwrap_err();
    assert_eq!(err.validation(), Some(ValidationError::EmailTaken));
}

#[tokio::test]
async fn test_update_cannot_steal_email() {
    let h = harness();
    let users = h.services.users();
    users.create(NewUser::new("a@b.com", "longenough")).await.unwrap();
    let mut other = users.create(NewUser::new("c@d.com", "longenough")).await.unwrap();

    other.email = "a@b.com".to_string();
    let err = users.update(&mut other).await.unwrap_err();
    assert_eq!(err.validation(), Some(ValidationError::EmailTaken));

    other.email = "not-an-email".to_string();
    let err = users.update(&mut other).await.unwrap_err();
    assert_eq!(err.validation(), Some(ValidationError::EmailInvalid));
}

#[tokio::test]
async fn test_user_carries_company_profile() {
    let h = harness();
    let user = h
        .services
        .users()
        .create(NewUser::new("a@b.com", "longenough"))
        .await
        .unwrap();

    let mut profile = CompanyProfile {
        user_id: user.id,
        website: "https://acme.io".to_string(),
        ..Default::default()
    };
    h.services.company_profiles().save(&mut profile).await.unwrap();

    let loaded = h.services.users().by_id(user.id).await.unwrap();
    assert_eq!(loaded.company_profile.map(|p| p.id), Some(profile.id));
}

#[tokio::test]
async fn test_password_reset_flow() {
    let h = harness();
    let users = h.services.users();
    users.create(NewUser::new("a@b.com", "old-password")).await.unwrap();

    let token = users.initiate_reset("a@b.com").await.unwrap();

    let sent = h.notifier.sent().unwrap();
    let reset_mail = sent.last().unwrap();
    assert_eq!(reset_mail.template, TemplateKind::PasswordReset);
    assert_eq!(reset_mail.recipient, "a@b.com");
    assert_eq!(reset_mail.payload["token"], token.as_str());

    let err = users.complete_reset(&token, "short").await.unwrap_err();
    assert_eq!(err.validation(), Some(ValidationError::PasswordTooShort));

    users.complete_reset(&token, "new-password").await.unwrap();
    assert!(users.authenticate("a@b.com", "new-password").await.is_ok());
    assert!(matches!(
        users.authenticate("a@b.com", "old-password").await,
        Err(AppError::InvalidCredentials)
    ));

    // Tokens are single use
    let err = users.complete_reset(&token, "another-password").await.unwrap_err();
    assert_eq!(err.validation(), Some(ValidationError::PwResetInvalid));
}

#[tokio::test]
async fn test_expired_reset_token_is_invalid() {
    let h = harness();
    let users = h.services.users();
    users.create(NewUser::new("a@b.com", "old-password")).await.unwrap();
    let token = users.initiate_reset("a@b.com").await.unwrap();

    h.clock.advance(Duration::hours(RESET_TOKEN_LIFETIME_HOURS) + Duration::minutes(1));

    let err = users.complete_reset(&token, "new-password").await.unwrap_err();
    assert_eq!(err.validation(), Some(ValidationError::PwResetInvalid));
}

#[tokio::test]
async fn test_reset_for_unknown_email() {
    let h = harness();

    let result = h.services.users().initiate_reset("ghost@b.com").await;
    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_signup_succeeds_when_mail_is_down() {
    let store = MemoryStore::new();
    let services = Services::from_repositories(
        Repositories::in_memory(store),
        &common::config(),
        Arc::new(DownNotifier),
        common::clock(),
    )
    .unwrap();
    let users = services.users();

    let user = users.create(NewUser::new("a@b.com", "longenough")).await.unwrap();
    assert!(user.id > 0);

    let err = users
        .create(NewUser::new("a@b.com", "longenough"))
        .await
        .unwrap_err();
    assert_eq!(err.validation(), Some(ValidationError::EmailTaken));

    let logged_in = users.authenticate("a@b.com", "longenough").await.unwrap();
    assert_eq!(logged_in.id, user.id);
}
