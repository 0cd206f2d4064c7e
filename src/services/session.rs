//! Session Manager
//!
//! Guest-session lifecycle: creation by entry type, table (re)assignment,
//! close/reopen, destructive delete. The occupancy rule ("at most one
//! ACTIVE session per table") and the reservation/code uniqueness rules
//! are enforced by unique indexes; application-level checks exist only to
//! produce friendly errors on the non-racing path, and unique violations
//! from the index are mapped back to the same business errors.

use rand::Rng;
use sqlx::SqlitePool;

use crate::db::models::{GuestSession, SessionStatus, SessionType, StartSessionRequest};
use crate::db::repository::{
    RepoError, dining_table as table_repo, guest_session as session_repo, order as order_repo,
    reservation as reservation_repo,
};
use crate::utils::error::codes;
use crate::utils::{AppError, AppResult};

/// Code alphabet — 32 symbols, visually ambiguous characters excluded
/// (no 0/O/1/I).
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const CODE_LENGTH: usize = 6;
/// Bounded retry instead of open-ended regeneration
const MAX_CODE_ATTEMPTS: usize = 10;

#[derive(Clone)]
pub struct SessionService {
    pool: SqlitePool,
}

impl SessionService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Load a session, verifying department ownership
    pub async fn get(&self, department_id: i64, session_id: i64) -> AppResult<GuestSession> {
        let session = session_repo::find_by_id(&self.pool, session_id)
            .await?
            .ok_or_else(|| session_not_found(session_id))?;
        if session.department_id != department_id {
            return Err(session_not_found(session_id));
        }
        Ok(session)
    }

    pub async fn get_by_code(&self, department_id: i64, code: &str) -> AppResult<GuestSession> {
        session_repo::find_by_code(&self.pool, department_id, code)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Session '{code}' not found")))
    }

    pub async fn list(
        &self,
        department_id: i64,
        status: Option<SessionStatus>,
    ) -> AppResult<Vec<GuestSession>> {
        Ok(session_repo::list(&self.pool, department_id, status).await?)
    }

    /// 세션 시작 — create an ACTIVE session per the entry type's contract
    pub async fn start_session(
        &self,
        department_id: i64,
        request: &StartSessionRequest,
    ) -> AppResult<GuestSession> {
        let mut new_session = session_repo::NewSession {
            department_id,
            session_type: request.session_type,
            reservation_id: None,
            table_id: None,
            session_code: None,
            guest_name: None,
            guest_phone: None,
            people: None,
        };

        match request.session_type {
            SessionType::Reservation => {
                let Some(reservation_id) = request.reservation_id else {
                    return Err(AppError::business(
                        codes::RESERVATION_REQUIRED,
                        "A reservation id is required for RESERVATION sessions",
                    ));
                };
                if session_repo::find_by_reservation(&self.pool, reservation_id)
                    .await?
                    .is_some()
                {
                    return Err(session_exists(reservation_id));
                }
                let reservation = reservation_repo::find_by_id(&self.pool, reservation_id)
                    .await?
                    .filter(|r| r.department_id == department_id)
                    .ok_or_else(|| {
                        AppError::not_found(format!("Reservation {reservation_id} not found"))
                    })?;

                // Reservation supplies the guest defaults
                new_session.reservation_id = Some(reservation_id);
                new_session.guest_name = Some(reservation.name);
                new_session.guest_phone = Some(reservation.phone);
                new_session.people = Some(reservation.people);
            }
            SessionType::Qr => {
                let Some(table_id) = request.table_id else {
                    return Err(AppError::business(
                        codes::TABLE_REQUIRED,
                        "A table id is required for QR sessions",
                    ));
                };
                let table = table_repo::find_by_id(&self.pool, table_id)
                    .await?
                    .ok_or_else(|| AppError::not_found(format!("Table {table_id} not found")))?;
                if table.department_id != department_id {
                    return Err(AppError::business(
                        codes::INVALID_TABLE,
                        format!("Table {table_id} does not belong to this department"),
                    ));
                }
                if session_repo::find_active_on_table(&self.pool, table_id, None)
                    .await?
                    .is_some()
                {
                    return Err(table_occupied());
                }
                new_session.table_id = Some(table_id);
            }
            SessionType::Code => {
                match request.session_code.as_deref().filter(|c| !c.is_empty()) {
                    Some(code) => new_session.session_code = Some(code.to_string()),
                    // Generated below, inside the bounded insert loop
                    None => {}
                }
            }
        }

        // Explicit guest fields override inherited defaults
        if let Some(name) = request.guest_name.as_deref().filter(|s| !s.is_empty()) {
            new_session.guest_name = Some(name.to_string());
        }
        if let Some(phone) = request.guest_phone.as_deref().filter(|s| !s.is_empty()) {
            new_session.guest_phone = Some(phone.to_string());
        }
        if let Some(people) = request.people {
            new_session.people = Some(people);
        }

        let generate = request.session_type == SessionType::Code && new_session.session_code.is_none();
        self.insert_session(new_session, generate).await
    }

    /// Insert, mapping unique violations back to business errors. When
    /// `generate_code` is set, retries with a fresh code on collision, up
    /// to the attempt budget.
    async fn insert_session(
        &self,
        mut new_session: session_repo::NewSession,
        generate_code: bool,
    ) -> AppResult<GuestSession> {
        let attempts = if generate_code { MAX_CODE_ATTEMPTS } else { 1 };

        for _ in 0..attempts {
            if generate_code {
                new_session.session_code = Some(generate_session_code());
            }
            match session_repo::insert(&self.pool, &new_session).await {
                Ok(session) => return Ok(session),
                Err(e) if e.violates("guest_sessions.table_id") => {
                    // Lost the occupancy race to a concurrent insert
                    return Err(table_occupied());
                }
                Err(e) if e.violates("guest_sessions.reservation_id") => {
                    return Err(session_exists(new_session.reservation_id.unwrap_or_default()));
                }
                Err(e) if e.violates("guest_sessions.session_code") => {
                    if generate_code {
                        continue;
                    }
                    return Err(AppError::business(
                        codes::DUPLICATE_CODE,
                        "Session code is already in use",
                    ));
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::business(
            codes::CODE_EXHAUSTED,
            "Could not generate a unique session code",
        ))
    }

    /// 테이블 배정 — `None` clears unconditionally; assignment re-checks
    /// ownership and occupancy, with the partial unique index closing the
    /// check-then-act window.
    pub async fn assign_table(
        &self,
        department_id: i64,
        session_id: i64,
        table_id: Option<i64>,
    ) -> AppResult<GuestSession> {
        let mut tx = self.pool.begin().await.map_err(RepoError::from)?;

        let session = session_repo::find_by_id(&mut *tx, session_id)
            .await?
            .filter(|s| s.department_id == department_id)
            .ok_or_else(|| session_not_found(session_id))?;

        if let Some(table_id) = table_id {
            let table = table_repo::find_by_id(&mut *tx, table_id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Table {table_id} not found")))?;
            if table.department_id != department_id {
                return Err(AppError::business(
                    codes::INVALID_TABLE,
                    format!("Table {table_id} does not belong to this department"),
                ));
            }
            if session_repo::find_active_on_table(&mut *tx, table_id, Some(session.id))
                .await?
                .is_some()
            {
                return Err(table_occupied());
            }
        }

        let updated = match session_repo::set_table(&mut *tx, session_id, table_id).await {
            Ok(Some(session)) => session,
            Ok(None) => return Err(session_not_found(session_id)),
            Err(e) if e.violates("guest_sessions.table_id") => return Err(table_occupied()),
            Err(e) => return Err(e.into()),
        };

        tx.commit().await.map_err(RepoError::from)?;
        Ok(updated)
    }

    /// ACTIVE → CLOSED, stamping `closed_at`
    pub async fn close(&self, department_id: i64, session_id: i64) -> AppResult<GuestSession> {
        self.get(department_id, session_id).await?;
        session_repo::close(&self.pool, session_id)
            .await?
            .ok_or_else(|| session_not_found(session_id))
    }

    /// CLOSED → ACTIVE, clearing `closed_at`. Fails TABLE_OCCUPIED when
    /// the table was re-seated in the meantime.
    pub async fn reopen(&self, department_id: i64, session_id: i64) -> AppResult<GuestSession> {
        self.get(department_id, session_id).await?;
        match session_repo::reopen(&self.pool, session_id).await {
            Ok(Some(session)) => Ok(session),
            Ok(None) => Err(session_not_found(session_id)),
            Err(e) if e.violates("guest_sessions.table_id") => Err(table_occupied()),
            Err(e) => Err(e.into()),
        }
    }

    /// Destructive delete: order items → orders → session, one transaction
    pub async fn delete(&self, department_id: i64, session_id: i64) -> AppResult<()> {
        self.get(department_id, session_id).await?;

        let mut tx = self.pool.begin().await.map_err(RepoError::from)?;
        order_repo::delete_items_by_session(&mut *tx, session_id).await?;
        order_repo::delete_by_session(&mut *tx, session_id).await?;
        session_repo::delete(&mut *tx, session_id).await?;
        tx.commit().await.map_err(RepoError::from)?;
        Ok(())
    }
}

/// Generate one candidate session code
fn generate_session_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

fn session_not_found(session_id: i64) -> AppError {
    AppError::not_found(format!("Session {session_id} not found"))
}

fn table_occupied() -> AppError {
    AppError::business(
        codes::TABLE_OCCUPIED,
        "The table already has an active session",
    )
}

fn session_exists(reservation_id: i64) -> AppError {
    AppError::business(
        codes::SESSION_EXISTS,
        format!("Reservation {reservation_id} already has a session"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_use_the_unambiguous_alphabet() {
        for _ in 0..100 {
            let code = generate_session_code();
            assert_eq!(code.len(), CODE_LENGTH);
            for c in code.bytes() {
                assert!(CODE_ALPHABET.contains(&c), "unexpected symbol {}", c as char);
                assert!(!b"0O1I".contains(&c));
            }
        }
    }
}
