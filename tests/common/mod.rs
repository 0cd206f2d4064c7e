//! Shared test harness: temp-file database + assembled services
#![allow(dead_code)]

use tempfile::TempDir;

use venue_server::db::models::{
    Department, DepartmentSettings, DiningTable, DiningTableCreate, Menu, OrderCreateRequest,
    OrderItemRequest, Reservation, ReservationCreateRequest, SessionType, StartSessionRequest,
};
use venue_server::db::repository::{department as department_repo, menu as menu_repo};
use venue_server::{AppError, Config, DbService, ServerState};

/// A server state backed by a throwaway on-disk database. The TempDir
/// must outlive the state, so keep the whole harness alive in the test.
pub struct TestApp {
    pub state: ServerState,
    pub dept: Department,
    #[allow(dead_code)]
    dir: TempDir,
}

pub async fn setup() -> TestApp {
    let dir = TempDir::new().expect("temp dir");
    let db_path = dir.path().join("test.db");
    let db = DbService::new(db_path.to_str().expect("utf-8 path"))
        .await
        .expect("open test database");

    let dept = department_repo::create(&db.pool, "cs", "CS Department")
        .await
        .expect("seed department");

    let config = Config::with_overrides(dir.path().to_str().unwrap(), 0);
    let state = ServerState::with_db(config, db);

    TestApp { state, dept, dir }
}

impl TestApp {
    pub async fn other_department(&self) -> Department {
        department_repo::create(self.state.pool(), "design", "Design Department")
            .await
            .expect("seed second department")
    }

    pub async fn seed_table(&self, code: &str) -> DiningTable {
        self.state
            .tables
            .create(
                self.dept.id,
                &DiningTableCreate {
                    code: code.to_string(),
                    name: None,
                    capacity: Some(4),
                    pos_x: None,
                    pos_y: None,
                    width: None,
                    height: None,
                },
            )
            .await
            .expect("seed table")
    }

    pub async fn seed_menu(&self, name: &str, price: i64) -> Menu {
        menu_repo::insert(self.state.pool(), self.dept.id, Some("Main"), name, price)
            .await
            .expect("seed menu")
    }

    pub async fn seed_reservation(&self, name: &str, phone: &str) -> Reservation {
        self.state
            .reservations
            .create(
                self.dept.id,
                &ReservationCreateRequest {
                    name: name.to_string(),
                    phone: phone.to_string(),
                    reservation_time: "2026-09-01T19:00".to_string(),
                    people: Some(3),
                },
            )
            .await
            .expect("seed reservation")
    }

    pub async fn save_settings(&self, settings: &DepartmentSettings) {
        self.state
            .settings
            .update(self.dept.id, settings)
            .await
            .expect("save settings");
    }
}

/// A session start request with everything unset
pub fn start_request(session_type: SessionType) -> StartSessionRequest {
    StartSessionRequest {
        session_type,
        reservation_id: None,
        table_id: None,
        session_code: None,
        guest_name: None,
        guest_phone: None,
        people: None,
    }
}

/// An order request over menu items, `(menu_id, quantity)` pairs
pub fn order_request(items: &[(i64, i64)]) -> OrderCreateRequest {
    OrderCreateRequest {
        items: items
            .iter()
            .map(|&(menu_id, quantity)| OrderItemRequest {
                menu_id: Some(menu_id),
                name: None,
                price: None,
                quantity,
            })
            .collect(),
        session_id: None,
        reservation_id: None,
        discount_code: None,
        guest_phone: None,
        note: None,
        include_table_fee: None,
    }
}

/// Assert an error carries the expected business code
pub fn assert_code(err: &AppError, code: &str) {
    assert_eq!(err.code(), code, "unexpected error: {err}");
}
