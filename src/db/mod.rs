//! Database layer: SQLite pool, schema bootstrap and the user repository.

mod pool;
mod repositories;

pub use pool::{create_pool, init_schema, DbPool};
pub use repositories::*;
