//! Guest-session lifecycle: entry types, table occupancy, close/reopen,
//! cascade delete, tenant boundaries.

mod common;

use common::{assert_code, setup, start_request};
use venue_server::db::models::{SessionStatus, SessionType};
use venue_server::db::repository::order as order_repo;
use venue_server::utils::error::codes;

// ========== QR sessions / occupancy ==========

#[tokio::test]
async fn qr_session_occupies_its_table() {
    let app = setup().await;
    let table = app.seed_table("T1").await;

    let mut request = start_request(SessionType::Qr);
    request.table_id = Some(table.id);

    let first = app
        .state
        .sessions
        .start_session(app.dept.id, &request)
        .await
        .expect("first session");
    assert_eq!(first.table_id, Some(table.id));
    assert_eq!(first.status, SessionStatus::Active);

    // Same table again -> refused while the first session is active
    let err = app
        .state
        .sessions
        .start_session(app.dept.id, &request)
        .await
        .expect_err("table is occupied");
    assert_code(&err, codes::TABLE_OCCUPIED);

    // Closing frees the table
    app.state
        .sessions
        .close(app.dept.id, first.id)
        .await
        .expect("close");
    app.state
        .sessions
        .start_session(app.dept.id, &request)
        .await
        .expect("table free after close");
}

#[tokio::test]
async fn qr_session_requires_a_table() {
    let app = setup().await;
    let err = app
        .state
        .sessions
        .start_session(app.dept.id, &start_request(SessionType::Qr))
        .await
        .expect_err("missing table id");
    assert_code(&err, codes::TABLE_REQUIRED);
}

#[tokio::test]
async fn qr_session_rejects_foreign_table() {
    let app = setup().await;
    let other = app.other_department().await;
    let table = app.seed_table("T1").await;

    let mut request = start_request(SessionType::Qr);
    request.table_id = Some(table.id);

    let err = app
        .state
        .sessions
        .start_session(other.id, &request)
        .await
        .expect_err("cross-tenant table");
    assert_code(&err, codes::INVALID_TABLE);
}

#[tokio::test]
async fn concurrent_double_book_has_exactly_one_winner() {
    let app = setup().await;
    let table = app.seed_table("T1").await;

    let mut request = start_request(SessionType::Qr);
    request.table_id = Some(table.id);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let sessions = app.state.sessions.clone();
        let request = request.clone();
        let dept_id = app.dept.id;
        handles.push(tokio::spawn(async move {
            sessions.start_session(dept_id, &request).await
        }));
    }

    let mut winners = 0;
    for handle in handles {
        match handle.await.expect("task") {
            Ok(_) => winners += 1,
            Err(err) => assert_code(&err, codes::TABLE_OCCUPIED),
        }
    }
    assert_eq!(winners, 1, "exactly one session may hold the table");
}

// ========== Reservation sessions ==========

#[tokio::test]
async fn reservation_session_inherits_guest_fields() {
    let app = setup().await;
    let reservation = app.seed_reservation("Kim", "010-1234-5678").await;

    let mut request = start_request(SessionType::Reservation);
    request.reservation_id = Some(reservation.id);

    let session = app
        .state
        .sessions
        .start_session(app.dept.id, &request)
        .await
        .expect("reservation session");
    assert_eq!(session.reservation_id, Some(reservation.id));
    assert_eq!(session.guest_name.as_deref(), Some("Kim"));
    assert_eq!(session.guest_phone.as_deref(), Some("010-1234-5678"));
    assert_eq!(session.people, Some(3));
}

#[tokio::test]
async fn explicit_guest_fields_override_reservation_defaults() {
    let app = setup().await;
    let reservation = app.seed_reservation("Kim", "010-1234-5678").await;

    let mut request = start_request(SessionType::Reservation);
    request.reservation_id = Some(reservation.id);
    request.guest_name = Some("Lee".to_string());
    request.people = Some(5);

    let session = app
        .state
        .sessions
        .start_session(app.dept.id, &request)
        .await
        .expect("session");
    assert_eq!(session.guest_name.as_deref(), Some("Lee"));
    // Phone not overridden, still inherited
    assert_eq!(session.guest_phone.as_deref(), Some("010-1234-5678"));
    assert_eq!(session.people, Some(5));
}

#[tokio::test]
async fn reservation_gets_at_most_one_session() {
    let app = setup().await;
    let reservation = app.seed_reservation("Kim", "010-1234-5678").await;

    let mut request = start_request(SessionType::Reservation);
    request.reservation_id = Some(reservation.id);

    app.state
        .sessions
        .start_session(app.dept.id, &request)
        .await
        .expect("first session");
    let err = app
        .state
        .sessions
        .start_session(app.dept.id, &request)
        .await
        .expect_err("second session for same reservation");
    assert_code(&err, codes::SESSION_EXISTS);
}

#[tokio::test]
async fn reservation_session_requires_reservation_id() {
    let app = setup().await;
    let err = app
        .state
        .sessions
        .start_session(app.dept.id, &start_request(SessionType::Reservation))
        .await
        .expect_err("missing reservation id");
    assert_code(&err, codes::RESERVATION_REQUIRED);
}

// ========== Code sessions ==========

#[tokio::test]
async fn code_session_generates_a_six_char_code() {
    let app = setup().await;
    let session = app
        .state
        .sessions
        .start_session(app.dept.id, &start_request(SessionType::Code))
        .await
        .expect("code session");

    let code = session.session_code.expect("generated code");
    assert_eq!(code.len(), 6);
    assert!(
        code.bytes()
            .all(|c| b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789".contains(&c))
    );

    let found = app
        .state
        .sessions
        .get_by_code(app.dept.id, &code)
        .await
        .expect("lookup by code");
    assert_eq!(found.id, session.id);
}

#[tokio::test]
async fn explicit_duplicate_code_is_rejected() {
    let app = setup().await;
    let mut request = start_request(SessionType::Code);
    request.session_code = Some("ABC234".to_string());

    app.state
        .sessions
        .start_session(app.dept.id, &request)
        .await
        .expect("first");
    let err = app
        .state
        .sessions
        .start_session(app.dept.id, &request)
        .await
        .expect_err("duplicate code");
    assert_code(&err, codes::DUPLICATE_CODE);
}

#[tokio::test]
async fn same_code_is_fine_in_another_department() {
    let app = setup().await;
    let other = app.other_department().await;

    let mut request = start_request(SessionType::Code);
    request.session_code = Some("ABC234".to_string());

    app.state
        .sessions
        .start_session(app.dept.id, &request)
        .await
        .expect("first department");
    app.state
        .sessions
        .start_session(other.id, &request)
        .await
        .expect("code is scoped per department");
}

// ========== Assignment / close / reopen / delete ==========

#[tokio::test]
async fn assign_table_moves_and_clears() {
    let app = setup().await;
    let t1 = app.seed_table("T1").await;
    let t2 = app.seed_table("T2").await;

    let session = app
        .state
        .sessions
        .start_session(app.dept.id, &start_request(SessionType::Code))
        .await
        .expect("session");

    let session = app
        .state
        .sessions
        .assign_table(app.dept.id, session.id, Some(t1.id))
        .await
        .expect("assign");
    assert_eq!(session.table_id, Some(t1.id));

    let session = app
        .state
        .sessions
        .assign_table(app.dept.id, session.id, Some(t2.id))
        .await
        .expect("move");
    assert_eq!(session.table_id, Some(t2.id));

    let session = app
        .state
        .sessions
        .assign_table(app.dept.id, session.id, None)
        .await
        .expect("clear");
    assert_eq!(session.table_id, None);
}

#[tokio::test]
async fn assign_table_refuses_an_occupied_table() {
    let app = setup().await;
    let table = app.seed_table("T1").await;

    let mut qr = start_request(SessionType::Qr);
    qr.table_id = Some(table.id);
    app.state
        .sessions
        .start_session(app.dept.id, &qr)
        .await
        .expect("occupant");

    let walk_in = app
        .state
        .sessions
        .start_session(app.dept.id, &start_request(SessionType::Code))
        .await
        .expect("walk-in");
    let err = app
        .state
        .sessions
        .assign_table(app.dept.id, walk_in.id, Some(table.id))
        .await
        .expect_err("occupied");
    assert_code(&err, codes::TABLE_OCCUPIED);
}

#[tokio::test]
async fn close_and_reopen_round_trip() {
    let app = setup().await;
    let session = app
        .state
        .sessions
        .start_session(app.dept.id, &start_request(SessionType::Code))
        .await
        .expect("session");

    let closed = app
        .state
        .sessions
        .close(app.dept.id, session.id)
        .await
        .expect("close");
    assert_eq!(closed.status, SessionStatus::Closed);
    assert!(closed.closed_at.is_some());

    let reopened = app
        .state
        .sessions
        .reopen(app.dept.id, session.id)
        .await
        .expect("reopen");
    assert_eq!(reopened.status, SessionStatus::Active);
    assert!(reopened.closed_at.is_none());
}

#[tokio::test]
async fn reopen_fails_when_the_table_was_reseated() {
    let app = setup().await;
    let table = app.seed_table("T1").await;

    let mut request = start_request(SessionType::Qr);
    request.table_id = Some(table.id);

    let first = app
        .state
        .sessions
        .start_session(app.dept.id, &request)
        .await
        .expect("first");
    app.state
        .sessions
        .close(app.dept.id, first.id)
        .await
        .expect("close");
    app.state
        .sessions
        .start_session(app.dept.id, &request)
        .await
        .expect("second takes the table");

    let err = app
        .state
        .sessions
        .reopen(app.dept.id, first.id)
        .await
        .expect_err("table taken");
    assert_code(&err, codes::TABLE_OCCUPIED);
}

#[tokio::test]
async fn delete_cascades_to_orders_and_items() {
    let app = setup().await;
    let menu = app.seed_menu("Pasta", 6500).await;

    let session = app
        .state
        .sessions
        .start_session(app.dept.id, &start_request(SessionType::Code))
        .await
        .expect("session");

    let mut order_request = common::order_request(&[(menu.id, 2)]);
    order_request.session_id = Some(session.id);
    let order = app
        .state
        .orders
        .create_order(&app.dept, &order_request)
        .await
        .expect("order");

    app.state
        .sessions
        .delete(app.dept.id, session.id)
        .await
        .expect("delete");

    assert!(
        order_repo::find_by_id(app.state.pool(), order.order.id)
            .await
            .expect("query")
            .is_none()
    );
    assert!(
        order_repo::items_by_order(app.state.pool(), order.order.id)
            .await
            .expect("query")
            .is_empty()
    );
    assert!(app.state.sessions.get(app.dept.id, session.id).await.is_err());
}

// ========== Tenant isolation ==========

#[tokio::test]
async fn sessions_are_invisible_across_departments() {
    let app = setup().await;
    let other = app.other_department().await;

    let session = app
        .state
        .sessions
        .start_session(app.dept.id, &start_request(SessionType::Code))
        .await
        .expect("session");

    assert!(app.state.sessions.get(other.id, session.id).await.is_err());
    assert!(app.state.sessions.close(other.id, session.id).await.is_err());
    assert!(app.state.sessions.delete(other.id, session.id).await.is_err());

    let list = app
        .state
        .sessions
        .list(other.id, None)
        .await
        .expect("list");
    assert!(list.is_empty());
}
