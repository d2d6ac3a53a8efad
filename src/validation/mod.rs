//! Validation pipeline.
//!
//! A pipeline is an ordered list of pure predicates over an entity. Running
//! it returns the first failure; later predicates are not evaluated.

mod benefit;
mod job_post;
mod user;

pub use benefit::{benefit_name_required, benefit_pipeline, company_profile_required, profile_pipeline};
pub use job_post::{
    apply_at_required, category_id_required, description_required, job_post_pipeline,
    location_id_required, title_required, user_id_required,
};
pub use user::{
    email_format, email_required, new_user_pipeline, normalize_email, password_min_length,
    password_pipeline, password_required, user_pipeline,
};

use crate::errors::ValidationError;

/// A single validation rule.
pub type Validator<T> = fn(&T) -> Result<(), ValidationError>;

/// Run validators in order and stop at the first failure.
pub fn run_validators<T: ?Sized>(entity: &T, validators: &[Validator<T>]) -> Result<(), ValidationError> {
    for validate in validators {
        validate(entity)?;
    }
    Ok(())
}

/// Ordered, reusable set of validators for one entity type.
pub struct Pipeline<T: ?Sized> {
    validators: Vec<Validator<T>>,
}

impl<T: ?Sized> Pipeline<T> {
    pub fn new(validators: Vec<Validator<T>>) -> Self {
        Self { validators }
    }

    /// Append a rule after the existing ones.
    pub fn with(mut self, validator: Validator<T>) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn run(&self, entity: &T) -> Result<(), ValidationError> {
        run_validators(entity, &self.validators)
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl<T: ?Sized> Clone for Pipeline<T> {
    fn clone(&self) -> Self {
        Self {
            validators: self.validators.clone(),
        }
    }
}

impl<T: ?Sized> std::fmt::Debug for Pipeline<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("validators", &self.validators.len())
            .finish()
    }
}
