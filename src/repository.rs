// Storage capabilities shared by every entity type
// Handlers depend only on these traits so the engine behind them can be swapped

use async_trait::async_trait;

use crate::error::RepositoryError;
use crate::id::Id;

/// Basic create/read/update/delete over one entity type
#[async_trait]
pub trait Repository<T>: Send + Sync {
    /// Insert a new record
    async fn create(&self, entity: &T) -> Result<(), RepositoryError>;

    /// Fetch a record, failing with NotFound when absent
    async fn find_by_id(&self, id: Id) -> Result<T, RepositoryError>;

    /// Replace the mutable fields of an existing record
    async fn update(&self, entity: &T) -> Result<(), RepositoryError>;

    /// Permanently remove a record
    async fn delete(&self, id: Id) -> Result<(), RepositoryError>;
}

/// Unique violations become Conflict; everything else stays a database error
pub fn map_write_error(err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return RepositoryError::Conflict(db_err.message().to_string());
        }
    }
    RepositoryError::Database(err)
}
