pub mod health;
pub mod records;
pub mod schema;

use crate::db::Database;
use crate::error::ApiError;

/// Shared by every handler. `db` is `None` when no store was configured or
/// the startup connection failed.
#[derive(Clone, Default)]
pub struct AppState {
    pub db: Option<Database>,
}

impl AppState {
    pub fn new(db: Option<Database>) -> Self {
        Self { db }
    }

    pub(crate) fn store(&self) -> Result<&Database, ApiError> {
        self.db.as_ref().ok_or(ApiError::StoreUnavailable)
    }
}
