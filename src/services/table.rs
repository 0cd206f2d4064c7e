//! Table Registry
//!
//! Owns table records and their code-uniqueness rule. Cross-tenant table
//! ids surface as INVALID_TABLE; code collisions as DUPLICATE_CODE (the
//! unique index is authoritative, the pre-check just gives the friendly
//! message on the common path).

use sqlx::SqlitePool;

use crate::db::models::{DiningTable, DiningTableCreate, DiningTableUpdate, TableLayoutRequest};
use crate::db::repository::{RepoError, dining_table as table_repo};
use crate::utils::error::codes;
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct TableService {
    pool: SqlitePool,
}

impl TableService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, department_id: i64) -> AppResult<Vec<DiningTable>> {
        Ok(table_repo::find_all(&self.pool, department_id).await?)
    }

    /// Load a table, verifying department ownership
    pub async fn get(&self, department_id: i64, table_id: i64) -> AppResult<DiningTable> {
        let table = table_repo::find_by_id(&self.pool, table_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Table {table_id} not found")))?;
        if table.department_id != department_id {
            return Err(AppError::not_found(format!("Table {table_id} not found")));
        }
        Ok(table)
    }

    pub async fn create(
        &self,
        department_id: i64,
        data: &DiningTableCreate,
    ) -> AppResult<DiningTable> {
        if table_repo::code_exists(&self.pool, department_id, &data.code, None).await? {
            return Err(duplicate_code(&data.code));
        }

        match table_repo::insert(&self.pool, department_id, data).await {
            Ok(table) => Ok(table),
            Err(e) if e.violates("dining_tables.code") => Err(duplicate_code(&data.code)),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn update(
        &self,
        department_id: i64,
        table_id: i64,
        data: &DiningTableUpdate,
    ) -> AppResult<DiningTable> {
        let existing = table_repo::find_by_id(&self.pool, table_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Table {table_id} not found")))?;
        if existing.department_id != department_id {
            return Err(invalid_table(table_id));
        }

        if let Some(code) = &data.code
            && *code != existing.code
            && table_repo::code_exists(&self.pool, department_id, code, Some(table_id)).await?
        {
            return Err(duplicate_code(code));
        }

        let updated = table_repo::update(
            &self.pool,
            table_id,
            data.code.as_deref(),
            data.name.as_deref(),
            data.capacity,
            data.pos_x,
            data.pos_y,
            data.width,
            data.height,
            data.active,
        )
        .await;

        match updated {
            Ok(Some(table)) => Ok(table),
            Ok(None) => Err(AppError::not_found(format!("Table {table_id} not found"))),
            Err(e) if e.violates("dining_tables.code") => {
                Err(duplicate_code(data.code.as_deref().unwrap_or("")))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete(&self, department_id: i64, table_id: i64) -> AppResult<bool> {
        // Sessions keep their (now dangling) table_id; no cascade
        self.get(department_id, table_id).await?;
        Ok(table_repo::delete(&self.pool, table_id).await?)
    }

    /// Bulk layout save. Ownership is re-checked per item inside the
    /// transaction; any foreign table aborts the whole batch.
    pub async fn update_layout(
        &self,
        department_id: i64,
        request: &TableLayoutRequest,
    ) -> AppResult<Vec<DiningTable>> {
        let mut tx = self.pool.begin().await.map_err(RepoError::from)?;

        for item in &request.tables {
            let table = table_repo::find_by_id(&mut *tx, item.id)
                .await?
                .ok_or_else(|| invalid_table(item.id))?;
            if table.department_id != department_id {
                return Err(invalid_table(item.id));
            }
            table_repo::update_layout(&mut *tx, item).await?;
        }

        tx.commit().await.map_err(RepoError::from)?;

        self.list(department_id).await
    }
}

fn duplicate_code(code: &str) -> AppError {
    AppError::business(
        codes::DUPLICATE_CODE,
        format!("Table code '{code}' is already in use"),
    )
}

fn invalid_table(table_id: i64) -> AppError {
    AppError::business(
        codes::INVALID_TABLE,
        format!("Table {table_id} does not belong to this department"),
    )
}
