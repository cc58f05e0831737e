//! Relationship tests.
//!
//! Sub-collection listing, linking existing and new records, unlinking, and
//! the undirected view of each edge set from both endpoints.

mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use todo_persistence::core::{EntityStorage, RelationshipStorage};
use todo_persistence::types::{EntityKind, Relation};

use common::assertions::{assert_empty_body, assert_error_message, assert_json_field, assert_status};
use common::fixtures;
use common::harness::TodoTestHarness;

#[tokio::test]
async fn test_related_wrapped_under_target_plural() {
    let harness = TodoTestHarness::seeded();

    let response = harness.get("/todos/1/tasksof").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["projects"][0]["title"], "Office Work");
}

#[tokio::test]
async fn test_edges_visible_from_both_sides() {
    let harness = TodoTestHarness::seeded();

    assert_eq!(harness.ids_at("/projects/1/tasks", "todos").await, vec!["1", "2"]);
    assert_eq!(harness.ids_at("/categories/1/todos", "todos").await, vec!["1"]);
    assert!(harness.ids_at("/categories/2/todos", "todos").await.is_empty());
}

#[tokio::test]
async fn test_related_of_missing_parent_is_empty() {
    let harness = TodoTestHarness::seeded();

    let ids = harness.ids_at("/todos/99/categories", "categories").await;

    assert!(ids.is_empty());
}

#[tokio::test]
async fn test_link_existing_record() {
    let harness = TodoTestHarness::seeded();

    let response = harness
        .post("/todos/2/categories", fixtures::link_to("2"))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_json_field(&response, "id", "2");
    assert_json_field(&response, "title", "Home");
    assert_eq!(harness.ids_at("/categories/2/todos", "todos").await, vec!["2"]);
}

#[tokio::test]
async fn test_link_twice_keeps_one_edge() {
    let harness = TodoTestHarness::seeded();

    for _ in 0..2 {
        harness
            .post("/projects/1/categories", fixtures::link_to("1"))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let categories = harness
        .backend
        .related(Relation::ProjectCategories, "1")
        .await
        .unwrap();
    assert_eq!(categories.len(), 1);
}

#[tokio::test]
async fn test_link_creates_new_record() {
    let harness = TodoTestHarness::seeded();

    let response = harness
        .post("/projects/1/tasks", fixtures::todo("book meeting room"))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_json_field(&response, "id", "3");
    assert_json_field(&response, "title", "book meeting room");
    assert_eq!(harness.backend.count(EntityKind::Todo).await.unwrap(), 3);
    assert_eq!(
        harness.ids_at("/todos/3/tasksof", "projects").await,
        vec!["1"]
    );
}

#[tokio::test]
async fn test_link_missing_parent() {
    let harness = TodoTestHarness::seeded();

    let response = harness
        .post("/todos/99/categories", fixtures::link_to("1"))
        .await;

    assert_status(&response, 404);
    assert_error_message(
        &response,
        "Could not find parent thing for relationship todos/99/categories",
    );
}

#[tokio::test]
async fn test_link_missing_parent_checked_before_body() {
    let harness = TodoTestHarness::seeded();

    let response = harness
        .send_raw(axum::http::Method::POST, "/todos/99/categories", None, "")
        .await;

    assert_status(&response, 404);
}

#[tokio::test]
async fn test_link_missing_target() {
    let harness = TodoTestHarness::seeded();

    let response = harness
        .post("/todos/1/categories", fixtures::link_to("10"))
        .await;

    assert_status(&response, 404);
    assert_error_message(&response, "Could not find thing matching value for id: 10");
}

#[tokio::test]
async fn test_link_id_of_other_kind() {
    let harness = TodoTestHarness::seeded();
    // Category 3 does not exist even though todo 3 would.
    harness.create("todos", fixtures::todo("third")).await;

    let response = harness
        .post("/todos/1/categories", fixtures::link_to("3"))
        .await;

    assert_status(&response, 404);
}

#[tokio::test]
async fn test_link_create_with_unknown_field() {
    let harness = TodoTestHarness::seeded();

    let response = harness
        .post("/categories/1/projects", json!({"title": "x", "owner": "me"}))
        .await;

    assert_status(&response, 400);
    assert_error_message(&response, "Could not find field: owner");
    assert_eq!(harness.backend.count(EntityKind::Project).await.unwrap(), 1);
}

#[tokio::test]
async fn test_unlink_twice() {
    let harness = TodoTestHarness::seeded();
    let project = harness.create("projects", fixtures::project("A")).await;
    harness
        .post(&format!("/projects/{}/categories", project), fixtures::link_to("1"))
        .await
        .assert_status(StatusCode::CREATED);

    let path = format!("/projects/{}/categories/1", project);

    let response = harness.delete(&path).await;
    response.assert_status_ok();
    assert_empty_body(&response);

    let response = harness.delete(&path).await;
    assert_status(&response, 404);
    assert_error_message(
        &response,
        &format!("Could not find any instances with projects/{}/categories/1", project),
    );
}

#[tokio::test]
async fn test_unlink_from_other_side() {
    let harness = TodoTestHarness::seeded();

    harness.delete("/categories/1/todos/1").await.assert_status_ok();

    assert!(harness.ids_at("/todos/1/categories", "categories").await.is_empty());
    // Both records survive the unlink.
    assert_status(&harness.get("/todos/1").await, 200);
    assert_status(&harness.get("/categories/1").await, 200);
}

#[tokio::test]
async fn test_unlink_out_of_range() {
    let harness = TodoTestHarness::seeded();

    assert_status(&harness.delete("/todos/1/categories/77").await, 404);
    assert_status(&harness.delete("/todos/abc/categories/1").await, 404);
}
