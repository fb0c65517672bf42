pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod schema;
pub mod store;

use std::sync::Arc;
use tracing::warn;

use crate::config::{DatabaseConfig, StoreBackend};

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::{Fault, MemoryStore};
pub use postgres::PgTeacherStore;
pub use store::{TeacherStore, TeacherWithCreator, UserWithTeachers};

/// Open the configured backend. PostgreSQL stores get their tables created on the way.
pub async fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn TeacherStore>, DatabaseError> {
    match config.backend {
        StoreBackend::Memory => {
            warn!("Using in-memory store; data is lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Postgres => {
            let pool = DatabaseManager::connect(config).await?;
            schema::ensure_schema(&pool).await?;
            Ok(Arc::new(PgTeacherStore::new(pool)))
        }
    }
}
