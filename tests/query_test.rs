//! Integration tests for the query builder
//!
//! Seeded rows: bob (1), mike (2), john (3).

mod common;

use common::{TestDb, User};
use std::sync::Arc;
use tablehaus::prelude::*;

/// Reads only the name column
#[model]
pub struct UserName {
    pub name: String,
}

#[tokio::test]
async fn test_where_matches_single_row() {
    let db = TestDb::new().await;
    let mut session = db.session();

    let mut user = User::default();
    session
        .table("users")
        .query()
        .filter("name =", "bob")
        .one(&mut user)
        .await
        .unwrap();

    assert_eq!(user.id, 1);
    assert_eq!(user.name, "bob");
}

#[tokio::test]
async fn test_one_requires_single_row() {
    let db = TestDb::new().await;
    let mut session = db.session();

    let mut user = User::default();
    let err = session
        .table("users")
        .query()
        .one(&mut user)
        .await
        .unwrap_err();
    assert!(matches!(err, MappingError::MultipleRowsFound));
    assert_eq!(user, User::default());

    session
        .table("users")
        .query()
        .order_by(["id"])
        .limit(1)
        .one(&mut user)
        .await
        .unwrap();
    assert_eq!(user.id, 1);
    assert_eq!(user.name, "bob");
}

#[tokio::test]
async fn test_one_not_found() {
    let db = TestDb::new().await;
    let mut session = db.session();

    let mut user = User::default();
    let err = session
        .table("users")
        .query()
        .filter("name =", "nobody")
        .one(&mut user)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_all_with_limit_offset_and_order() {
    let db = TestDb::new().await;
    let mut session = db.session();

    let mut users: Vec<User> = Vec::new();
    session
        .table("users")
        .query()
        .limit(2)
        .offset(1)
        .order_by(["id"])
        .all(&mut users)
        .await
        .unwrap();

    let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![2, 3]);
}

#[tokio::test]
async fn test_all_descending_into_boxes() {
    let db = TestDb::new().await;
    let mut session = db.session();

    let mut users: Vec<Box<User>> = Vec::new();
    session
        .table("users")
        .query()
        .order_desc(["name"])
        .all(&mut users)
        .await
        .unwrap();

    let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["mike", "john", "bob"]);
}

#[tokio::test]
async fn test_offset_without_limit() {
    let db = TestDb::new().await;
    let mut session = db.session();

    let mut users: Vec<User> = Vec::new();
    session
        .table("users")
        .query()
        .order_by(["id"])
        .offset(2)
        .all(&mut users)
        .await
        .unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "john");
}

#[tokio::test]
async fn test_partial_record_selects_subset() {
    let db = TestDb::new().await;
    let mut session = db.session();

    let mut names: Vec<UserName> = Vec::new();
    session
        .table("users")
        .query()
        .filter("id >", 1)
        .filter("id <", 10)
        .order_by(["id"])
        .all(&mut names)
        .await
        .unwrap();

    let names: Vec<String> = names.into_iter().map(|n| n.name).collect();
    assert_eq!(names, vec!["mike", "john"]);
}

#[tokio::test]
async fn test_count_and_exists() {
    let db = TestDb::new().await;
    let mut session = db.session();

    assert_eq!(session.table("users").query().count().await.unwrap(), 3);
    assert_eq!(
        session
            .table("users")
            .query()
            .filter("name <>", "bob")
            .count()
            .await
            .unwrap(),
        2
    );
    assert_eq!(
        session
            .table("users")
            .query()
            .limit(2)
            .offset(2)
            .count()
            .await
            .unwrap(),
        1
    );

    assert!(
        session
            .table("users")
            .query()
            .filter("name =", "john")
            .exists()
            .await
            .unwrap()
    );
    assert!(
        !session
            .table("users")
            .query()
            .filter("name =", "zed")
            .exists()
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_catalog_shared_between_sessions() {
    let db = TestDb::new().await;
    let catalog = db.tablehaus.catalog();
    assert!(catalog.is_empty().await);

    let mut first = db.session();
    let mut second = db.session();
    let (a, b) = tokio::join!(
        catalog.get_schema(&mut first, "users"),
        catalog.get_schema(&mut second, "users"),
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(catalog.len().await, 1);
    assert_eq!(a.primary_key().unwrap().column_name, "id");
    assert_eq!(a.column("name").unwrap().field_name, "Name");
}

#[tokio::test]
async fn test_schema_script_clears_catalog() {
    let db = TestDb::new().await;
    let mut session = db.session();

    let schema = session.table("tags").schema().await.unwrap();
    assert_eq!(schema.columns.len(), 2);
    session.commit().await.unwrap();
    drop(session);

    db.tablehaus
        .exec_script("ALTER TABLE tags ADD COLUMN colour TEXT;")
        .await
        .unwrap();
    assert!(db.tablehaus.catalog().cached("tags").await.is_none());

    let mut session = db.session();
    let schema = session.table("tags").schema().await.unwrap();
    assert_eq!(schema.columns.len(), 3);
}
