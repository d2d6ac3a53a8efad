//! Job post service tests against the in-memory store.

mod common;

use job_board::domain::{JobPost, Skill};
use job_board::errors::{AppError, ValidationError};
use job_board::search::JobPostFilter;
use job_board::services::ServiceContainer;

use common::{golang_post, harness};

#[tokio::test]
async fn test_create_then_by_id_round_trips_fields() {
    let h = harness();
    let posts = h.services.job_posts();

    let mut post = golang_post();
    posts.create(&mut post).await.unwrap();

    assert!(post.id > 0);
    assert!(post.created_at.timestamp() > 0);
    assert_eq!(post.created_at, post.updated_at);

    let loaded = posts.by_id(post.id).await.unwrap();
    assert_eq!(loaded.title, "Golang Dev Wanted");
    assert_eq!(loaded.user_id, 1);
    assert_eq!(loaded.location_id, 2);
    assert_eq!(loaded.category_id, 2);
    assert_eq!(loaded.description, post.description);
    assert_eq!(loaded.apply_at, post.apply_at);
    assert_eq!(loaded.id, post.id);
}

#[tokio::test]
async fn test_missing_field_rejected_on_create_and_nothing_stored() {
    let h = harness();
    let posts = h.services.job_posts();

    let mut post = JobPost {
        apply_at: String::new(),
        ..golang_post()
    };
    let err = posts.create(&mut post).await.unwrap_err();

    assert_eq!(err.validation(), Some(ValidationError::ApplyAtRequired));
    assert_eq!(post.id, 0);
    assert!(posts.find_all(&JobPostFilter::new()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_with_empty_title_leaves_row_unchanged() {
    let h = harness();
    let posts = h.services.job_posts();

    let mut post = golang_post();
    posts.create(&mut post).await.unwrap();

    post.title = String::new();
    let err = posts.update(&mut post).await.unwrap_err();
    assert_eq!(err.validation(), Some(ValidationError::TitleRequired));

    let stored = posts.by_id(post.id).await.unwrap();
    assert_eq!(stored.title, "Golang Dev Wanted");
}

#[tokio::test]
async fn test_update_saves_every_field() {
    let h = harness();
    let posts = h.services.job_posts();

    let mut post = golang_post();
    posts.create(&mut post).await.unwrap();

    post.title = "Senior Golang Dev".to_string();
    post.location_id = 5;
    posts.update(&mut post).await.unwrap();

    let stored = posts.by_id(post.id).await.unwrap();
    assert_eq!(stored.title, "Senior Golang Dev");
    assert_eq!(stored.location_id, 5);
    assert_eq!(stored.created_at, post.created_at);
}

#[tokio::test]
async fn test_find_all_by_title_is_case_insensitive() {
    let h = harness();
    let posts = h.services.job_posts();

    let mut wanted = golang_post();
    posts.create(&mut wanted).await.unwrap();
    let mut other = JobPost {
        title: "Rust Engineer".to_string(),
        ..golang_post()
    };
    posts.create(&mut other).await.unwrap();

    let found = posts
        .find_all(&JobPostFilter::new().title("golang"))
        .await
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, wanted.id);
    assert_eq!(posts.find_all(&JobPostFilter::new()).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_find_all_by_skill_membership() {
    let h = harness();
    let go = h.store.insert_skill("Go").unwrap();
    let rust = h.store.insert_skill("Rust").unwrap();
    let posts = h.services.job_posts();

    let mut with_go = golang_post();
    with_go.skills = vec![go.clone()];
    posts.create(&mut with_go).await.unwrap();
    let mut with_rust = JobPost {
        skills: vec![rust.clone()],
        ..golang_post()
    };
    posts.create(&mut with_rust).await.unwrap();

    let found = posts
        .find_all(&JobPostFilter::new().skill_ids([go.id]))
        .await
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].skills, vec![go]);
}

#[tokio::test]
async fn test_by_user_id_lists_only_that_user() {
    let h = harness();
    let posts = h.services.job_posts();

    let mut mine = golang_post();
    posts.create(&mut mine).await.unwrap();
    let mut theirs = JobPost {
        user_id: 9,
        ..golang_post()
    };
    posts.create(&mut theirs).await.unwrap();

    let listed = posts.by_user_id(9).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, theirs.id);
}

#[tokio::test]
async fn test_delete_removes_post_but_keeps_skills() {
    let h = harness();
    let go = h.store.insert_skill("Go").unwrap();
    let posts = h.services.job_posts();

    let mut post = golang_post();
    post.skills = vec![go.clone()];
    posts.create(&mut post).await.unwrap();

    posts.delete(post.id).await.unwrap();

    assert!(matches!(posts.by_id(post.id).await, Err(AppError::NotFound)));
    assert_eq!(h.services.skills().by_id(go.id).await.unwrap(), go);
    assert_eq!(h.store.link_count("job_post_skills").unwrap(), 0);
}

#[tokio::test]
async fn test_delete_invalid_and_missing_ids() {
    let h = harness();
    let posts = h.services.job_posts();

    assert!(matches!(posts.delete(0).await, Err(AppError::InvalidId)));
    assert!(matches!(posts.delete(404).await, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_skills_survive_update() {
    let h = harness();
    let go = h.store.insert_skill("Go").unwrap();
    let posts = h.services.job_posts();

    let mut post = golang_post();
    post.skills = vec![go.clone()];
    posts.create(&mut post).await.unwrap();

    let mut edited = JobPost {
        skills: vec![Skill::with_id(77)],
        description: "Updated".to_string(),
        ..post.clone()
    };
    posts.update(&mut edited).await.unwrap();

    assert_eq!(posts.by_id(post.id).await.unwrap().skills, vec![go]);
}
