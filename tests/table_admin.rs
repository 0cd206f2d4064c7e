//! Table registry admin operations.

mod common;

use common::{assert_code, setup};
use venue_server::db::models::{DiningTableUpdate, TableLayoutItem, TableLayoutRequest};
use venue_server::utils::error::codes;

#[tokio::test]
async fn duplicate_code_is_rejected_within_a_department() {
    let app = setup().await;
    app.seed_table("T1").await;

    let err = app
        .state
        .tables
        .create(
            app.dept.id,
            &venue_server::db::models::DiningTableCreate {
                code: "T1".to_string(),
                name: None,
                capacity: None,
                pos_x: None,
                pos_y: None,
                width: None,
                height: None,
            },
        )
        .await
        .expect_err("duplicate");
    assert_code(&err, codes::DUPLICATE_CODE);
}

#[tokio::test]
async fn same_code_is_allowed_across_departments() {
    let app = setup().await;
    let other = app.other_department().await;
    app.seed_table("T1").await;

    app.state
        .tables
        .create(
            other.id,
            &venue_server::db::models::DiningTableCreate {
                code: "T1".to_string(),
                name: None,
                capacity: None,
                pos_x: None,
                pos_y: None,
                width: None,
                height: None,
            },
        )
        .await
        .expect("code is scoped per department");
}

#[tokio::test]
async fn rename_collision_is_rejected() {
    let app = setup().await;
    app.seed_table("T1").await;
    let t2 = app.seed_table("T2").await;

    let err = app
        .state
        .tables
        .update(
            app.dept.id,
            t2.id,
            &DiningTableUpdate {
                code: Some("T1".to_string()),
                name: None,
                capacity: None,
                pos_x: None,
                pos_y: None,
                width: None,
                height: None,
                active: None,
            },
        )
        .await
        .expect_err("rename collides");
    assert_code(&err, codes::DUPLICATE_CODE);
}

#[tokio::test]
async fn partial_update_keeps_other_fields() {
    let app = setup().await;
    let table = app.seed_table("T1").await;

    let updated = app
        .state
        .tables
        .update(
            app.dept.id,
            table.id,
            &DiningTableUpdate {
                code: None,
                name: Some("Window seat".to_string()),
                capacity: None,
                pos_x: None,
                pos_y: None,
                width: None,
                height: None,
                active: None,
            },
        )
        .await
        .expect("update");
    assert_eq!(updated.code, "T1");
    assert_eq!(updated.name.as_deref(), Some("Window seat"));
    assert_eq!(updated.capacity, Some(4));
}

#[tokio::test]
async fn layout_save_is_all_or_nothing() {
    let app = setup().await;
    let other = app.other_department().await;
    let mine = app.seed_table("T1").await;
    let foreign = app
        .state
        .tables
        .create(
            other.id,
            &venue_server::db::models::DiningTableCreate {
                code: "X1".to_string(),
                name: None,
                capacity: None,
                pos_x: None,
                pos_y: None,
                width: None,
                height: None,
            },
        )
        .await
        .expect("foreign table");

    let err = app
        .state
        .tables
        .update_layout(
            app.dept.id,
            &TableLayoutRequest {
                tables: vec![
                    TableLayoutItem {
                        id: mine.id,
                        pos_x: Some(10),
                        pos_y: Some(20),
                        width: None,
                        height: None,
                    },
                    TableLayoutItem {
                        id: foreign.id,
                        pos_x: Some(1),
                        pos_y: Some(1),
                        width: None,
                        height: None,
                    },
                ],
            },
        )
        .await
        .expect_err("foreign table aborts the batch");
    assert_code(&err, codes::INVALID_TABLE);

    // First item rolled back with the rest
    let reloaded = app
        .state
        .tables
        .get(app.dept.id, mine.id)
        .await
        .expect("reload");
    assert_eq!(reloaded.pos_x, None);
}

#[tokio::test]
async fn deleting_a_table_does_not_touch_sessions() {
    let app = setup().await;
    let table = app.seed_table("T1").await;

    let mut request = common::start_request(venue_server::db::models::SessionType::Qr);
    request.table_id = Some(table.id);
    let session = app
        .state
        .sessions
        .start_session(app.dept.id, &request)
        .await
        .expect("session");

    app.state
        .tables
        .delete(app.dept.id, table.id)
        .await
        .expect("delete table");

    let session = app
        .state
        .sessions
        .get(app.dept.id, session.id)
        .await
        .expect("session survives");
    assert_eq!(session.table_id, Some(table.id));
}
