//! Settings Store
//!
//! Typed access to the per-department settings document. Reads fall back
//! to explicit defaults when nothing is stored; writes are a validated
//! typed replace (the handler deserializes into [`DepartmentSettings`],
//! so free-form JSON never reaches storage).

use sqlx::SqlitePool;

use crate::db::models::{DepartmentSettings, PricingSettings};
use crate::db::repository::settings as settings_repo;
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct SettingsService {
    pool: SqlitePool,
}

impl SettingsService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Load a department's settings; defaults when unset
    pub async fn get(&self, department_id: i64) -> AppResult<DepartmentSettings> {
        let raw = settings_repo::get_raw(&self.pool, department_id)
            .await
            .map_err(AppError::from)?;
        let Some(raw) = raw else {
            return Ok(DepartmentSettings::default());
        };
        match serde_json::from_str(&raw) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                // Writes are typed, so this only fires for pre-migration rows
                tracing::warn!(
                    department_id,
                    error = %e,
                    "Stored settings unreadable, serving defaults"
                );
                Ok(DepartmentSettings::default())
            }
        }
    }

    /// Pricing section only
    pub async fn pricing(&self, department_id: i64) -> AppResult<PricingSettings> {
        Ok(self.get(department_id).await?.pricing)
    }

    /// Closed reservation slots (ISO-8601 strings, matched verbatim)
    pub async fn closed_slots(&self, department_id: i64) -> AppResult<Vec<String>> {
        Ok(self.get(department_id).await?.reservation_closed)
    }

    /// Typed replace of the whole document
    pub async fn update(
        &self,
        department_id: i64,
        settings: &DepartmentSettings,
    ) -> AppResult<DepartmentSettings> {
        let json = serde_json::to_string(settings)
            .map_err(|e| AppError::internal(format!("Failed to serialize settings: {e}")))?;
        settings_repo::upsert(&self.pool, department_id, &json)
            .await
            .map_err(AppError::from)?;
        Ok(settings.clone())
    }
}
