//! User validation rules and normalizers.

use validator::ValidateEmail;

use super::{Pipeline, Validator};
use crate::config::MIN_PASSWORD_LENGTH;
use crate::domain::{NewUser, User};
use crate::errors::ValidationError;

/// Trim and lowercase an email address in place.
pub fn normalize_email(email: &mut String) {
    let normalized = email.trim().to_lowercase();
    *email = normalized;
}

pub fn email_required(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    Ok(())
}

pub fn email_format(email: &str) -> Result<(), ValidationError> {
    if !email.validate_email() {
        return Err(ValidationError::EmailInvalid);
    }
    Ok(())
}

pub fn password_required(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    Ok(())
}

pub fn password_min_length(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

/// Rules for a plain-text password (signup and reset).
pub fn password_pipeline() -> Pipeline<str> {
    let rules: Vec<Validator<str>> = vec![password_required, password_min_length];
    Pipeline::new(rules)
}

fn new_user_email_required(user: &NewUser) -> Result<(), ValidationError> {
    email_required(&user.email)
}

fn new_user_email_format(user: &NewUser) -> Result<(), ValidationError> {
    email_format(&user.email)
}

fn new_user_password_required(user: &NewUser) -> Result<(), ValidationError> {
    password_required(&user.password)
}

fn new_user_password_min_length(user: &NewUser) -> Result<(), ValidationError> {
    password_min_length(&user.password)
}

fn user_email_required(user: &User) -> Result<(), ValidationError> {
    email_required(&user.email)
}

fn user_email_format(user: &User) -> Result<(), ValidationError> {
    email_format(&user.email)
}

/// Rules for signup input.
pub fn new_user_pipeline() -> Pipeline<NewUser> {
    let rules: Vec<Validator<NewUser>> = vec![
        new_user_email_required,
        new_user_email_format,
        new_user_password_required,
        new_user_password_min_length,
    ];
    Pipeline::new(rules)
}

/// Rules for a stored user on update.
pub fn user_pipeline() -> Pipeline<User> {
    let rules: Vec<Validator<User>> = vec![user_email_required, user_email_format];
    Pipeline::new(rules)
}
