//! Database layer: SQLite pool, schema and user repository.

mod pool;
mod repositories;

pub use pool::{create_in_memory_pool, create_pool, init_schema, DbPool};
pub use repositories::*;
