//! Company benefit and profile rules.

use super::{Pipeline, Validator};
use crate::domain::{CompanyBenefit, CompanyProfile};
use crate::errors::ValidationError;

pub fn company_profile_required(benefit: &CompanyBenefit) -> Result<(), ValidationError> {
    if benefit.company_profile_id <= 0 {
        return Err(ValidationError::CompanyProfileRequired);
    }
    Ok(())
}

pub fn benefit_name_required(benefit: &CompanyBenefit) -> Result<(), ValidationError> {
    if benefit.benefit_name.is_empty() {
        return Err(ValidationError::BenefitNameRequired);
    }
    Ok(())
}

pub fn benefit_pipeline() -> Pipeline<CompanyBenefit> {
    let rules: Vec<Validator<CompanyBenefit>> = vec![company_profile_required, benefit_name_required];
    Pipeline::new(rules)
}

fn profile_user_required(profile: &CompanyProfile) -> Result<(), ValidationError> {
    if profile.user_id <= 0 {
        return Err(ValidationError::UserIdRequired);
    }
    Ok(())
}

pub fn profile_pipeline() -> Pipeline<CompanyProfile> {
    let rules: Vec<Validator<CompanyProfile>> = vec![profile_user_required];
    Pipeline::new(rules)
}
