//! Integration tests for name-driven dispatch.

mod helpers;

use serde_json::json;
use uuid::Uuid;

use wellness_core::error::ErrorKind;
use wellness_core::events::RepositoryEvent;
use wellness_core::types::RawQuery;
use wellness_entity::organization::{ORGANIZATION, ORGANIZATION_MEMBER};

#[tokio::test]
async fn test_aliases_count_the_same_rows() {
    let app = helpers::TestApp::new();
    let org = app
        .insert(
            &ORGANIZATION,
            json!({ "id": Uuid::new_v4().to_string(), "name": "Acme", "slug": "acme", "deletedAt": null }),
        )
        .await;
    for role in ["owner", "member", "member"] {
        app.insert(
            &ORGANIZATION_MEMBER,
            json!({ "id": Uuid::new_v4().to_string(), "organizationId": org["id"], "role": role }),
        )
        .await;
    }

    let canonical = app.registry.count("organizationMember", None).await.unwrap();
    let alias = app.registry.count("organization-members", None).await.unwrap();
    assert_eq!(canonical, 3);
    assert_eq!(canonical, alias);
}

#[tokio::test]
async fn test_unknown_entity_lists_valid_names() {
    let app = helpers::TestApp::new();
    let err = app.registry.count("invoices", None).await.unwrap_err();

    assert!(err.is(ErrorKind::UnknownEntity));
    assert!(err.message.contains("invoices"));
    for name in ["profile", "course", "organization-members", "projects"] {
        assert!(err.message.contains(name), "missing {name} in {}", err.message);
    }
}

#[tokio::test]
async fn test_count_with_query_string() {
    let app = helpers::TestApp::new();
    app.seed_courses(4, 2).await;

    let raw = RawQuery::from_pairs([("where", r#"{"title":{"in":["Live 0","Live 1","Gone 0"]}}"#)])
        .unwrap();
    assert_eq!(app.registry.count("courses", Some(&raw)).await.unwrap(), 2);
    assert_eq!(app.registry.count("course", None).await.unwrap(), 4);
}

#[tokio::test]
async fn test_not_list_excludes_every_entry() {
    let app = helpers::TestApp::new();
    for (n, title) in ["A", "B", "C"].into_iter().enumerate() {
        app.insert_course(title, &title.to_lowercase(), false, n as i64)
            .await;
    }

    let raw = RawQuery::with_where(json!({ "NOT": [{ "title": "A" }, { "title": "B" }] }));
    assert_eq!(app.registry.count("courses", Some(&raw)).await.unwrap(), 1);

    let found = app.registry.find("course", &raw).await.unwrap();
    assert_eq!(found.records()[0]["title"], json!("C"));
}

#[tokio::test]
async fn test_find_through_registry() {
    let app = helpers::TestApp::new();
    app.seed_courses(7, 3).await;

    let raw = RawQuery::from_pairs([("take", "5"), ("getCount", "true"), ("orderBy", "title")])
        .unwrap();
    let result = app.registry.find("courses", &raw).await.unwrap();
    assert_eq!(result.records().len(), 5);
    assert_eq!(result.total_count(), Some(7));
    assert_eq!(result.records()[0]["title"], json!("Live 0"));

    let executed = app.observer.events().into_iter().any(|e| {
        matches!(
            e,
            RepositoryEvent::QueryExecuted {
                entity: "course",
                rows: 5,
                total_count: Some(7),
                soft_delete_applied: true,
            }
        )
    });
    assert!(executed);
}

#[tokio::test]
async fn test_invalid_field_through_registry() {
    let app = helpers::TestApp::new();
    let raw = RawQuery::with_where(json!({ "salary": { "gt": 10 } }));
    let err = app.registry.find("profiles", &raw).await.unwrap_err();
    assert!(err.is(ErrorKind::InvalidQuery));
}

#[tokio::test]
async fn test_list_entities() {
    let app = helpers::TestApp::new();
    let names = app.registry.list_entities();
    assert!(names.contains(&"organizationMember"));
    assert!(names.contains(&"organization-members"));
    assert_eq!(app.registry.kinds().count(), 13);
}
