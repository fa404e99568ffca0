//! Integration tests for slug lookup and slugged creation.

mod helpers;

use wellness_core::error::ErrorKind;
use wellness_core::traits::Repository;
use wellness_entity::learning::{NewCourse, NewTrail};
use wellness_entity::profile::{NewProfile, ProfileRole};

#[tokio::test]
async fn test_slug_lookup_is_exact() {
    let app = helpers::TestApp::new();
    app.insert_course("ABC", "abc-1", false, 0).await;

    let courses = &app.repos.courses;
    assert!(courses.find_by_slug("abc").await.unwrap().is_none());
    assert!(courses.find_by_slug("abc-1").await.unwrap().is_some());
}

#[tokio::test]
async fn test_course_slug_scenario() {
    let app = helpers::TestApp::new();
    app.insert_course("Intro", "intro-101", false, 0).await;
    app.insert_course("Old", "old-course", true, 0).await;
    let courses = &app.repos.courses;

    let intro = courses.find_by_slug("intro-101").await.unwrap();
    assert_eq!(intro.map(|c| c.title), Some("Intro".to_string()));

    // Default exclusion applies to slug lookups too.
    assert!(courses.find_by_slug("old-course").await.unwrap().is_none());

    let old = courses
        .base()
        .find_by_slug_including_deleted("old-course")
        .await
        .unwrap()
        .expect("Deleted course should be found");
    assert!(old.deleted_at.is_some());
}

#[tokio::test]
async fn test_create_generates_well_formed_slug() {
    let app = helpers::TestApp::new();
    let trail = app
        .repos
        .trails
        .create(NewTrail {
            title: "Saúde Mental & Bem-Estar".into(),
            description: None,
        })
        .await
        .unwrap();

    let (base, tag) = trail.slug.rsplit_once('-').unwrap();
    assert_eq!(base, "saude-mental-bem-estar");
    assert_eq!(tag.len(), 6);
    assert!(tag.chars().all(|c| c.is_ascii_digit()));

    let course = app
        .repos
        .courses
        .create(NewCourse {
            trail_id: Some(trail.id),
            title: "Respiração".into(),
            description: None,
        })
        .await
        .unwrap();
    let found = app.repos.courses.find_by_slug(&course.slug).await.unwrap().unwrap();
    assert_eq!(found.id, course.id);
    assert_eq!(found.trail.map(|t| t.id), Some(trail.id));
}

#[tokio::test]
async fn test_slug_lookup_on_unslugged_entity_is_invalid() {
    let app = helpers::TestApp::new();
    app.repos
        .profiles
        .create(NewProfile {
            email: "ana@example.com".into(),
            name: "Ana".into(),
            role: ProfileRole::Employee,
            department_id: None,
        })
        .await
        .unwrap();

    let err = app.repos.profiles.find_by_slug("ana").await.unwrap_err();
    assert!(err.is(ErrorKind::InvalidQuery));
}
