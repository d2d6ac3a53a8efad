//! Job post validation rules.

use super::{Pipeline, Validator};
use crate::domain::JobPost;
use crate::errors::ValidationError;

pub fn user_id_required(post: &JobPost) -> Result<(), ValidationError> {
    if post.user_id <= 0 {
        return Err(ValidationError::UserIdRequired);
    }
    Ok(())
}

pub fn title_required(post: &JobPost) -> Result<(), ValidationError> {
    if post.title.is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    Ok(())
}

pub fn location_id_required(post: &JobPost) -> Result<(), ValidationError> {
    if post.location_id <= 0 {
        return Err(ValidationError::LocationIdRequired);
    }
    Ok(())
}

pub fn category_id_required(post: &JobPost) -> Result<(), ValidationError> {
    if post.category_id <= 0 {
        return Err(ValidationError::CategoryIdRequired);
    }
    Ok(())
}

pub fn description_required(post: &JobPost) -> Result<(), ValidationError> {
    if post.description.is_empty() {
        return Err(ValidationError::DescriptionRequired);
    }
    Ok(())
}

pub fn apply_at_required(post: &JobPost) -> Result<(), ValidationError> {
    if post.apply_at.is_empty() {
        return Err(ValidationError::ApplyAtRequired);
    }
    Ok(())
}

/// Rules applied to every job post create and update.
pub fn job_post_pipeline() -> Pipeline<JobPost> {
    let rules: Vec<Validator<JobPost>> = vec![
        user_id_required,
        title_required,
        location_id_required,
        category_id_required,
        description_required,
        apply_at_required,
    ];
    Pipeline::new(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_post() -> JobPost {
        JobPost {
            user_id: 1,
            title: "Golang Dev Wanted".to_string(),
            location_id: 2,
            category_id: 2,
            description: "Build services".to_string(),
            apply_at: "x@y.com".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_post_passes() {
        assert_eq!(job_post_pipeline().run(&valid_post()), Ok(()));
    }

    #[test]
    fn test_each_missing_field_reports_its_own_error() {
        fn case(
            mutate: fn(&mut JobPost),
            expected: ValidationError,
        ) -> (fn(&mut JobPost), ValidationError) {
            (mutate, expected)
        }

        let cases = vec![
            case(|p| p.user_id = 0, ValidationError::UserIdRequired),
            case(|p| p.title.clear(), ValidationError::TitleRequired),
            case(|p| p.location_id = 0, ValidationError::LocationIdRequired),
            case(|p| p.category_id = -3, ValidationError::CategoryIdRequired),
            case(|p| p.description.clear(), ValidationError::DescriptionRequired),
            case(|p| p.apply_at.clear(), ValidationError::ApplyAtRequired),
        ];

        for (mutate, expected) in cases {
            let mut post = valid_post();
            mutate(&mut post);
            assert_eq!(job_post_pipeline().run(&post), Err(expected));
        }
    }

    #[test]
    fn test_user_id_checked_before_title() {
        let post = JobPost::default();
        assert_eq!(job_post_pipeline().run(&post), Err(ValidationError::UserIdRequired));
    }
}
