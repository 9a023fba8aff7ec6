//! In-memory database helpers.

use crate::adapter::db::{create_pool, run_migrations, DbPool};

/// A single-connection in-memory pool with migrations applied.
///
/// Size 1 matters: every sqlite `:memory:` connection is its own
/// database, so the store and queue must share the one connection.
pub fn memory_pool() -> DbPool {
    let pool = create_pool(":memory:", 1).expect("create in-memory pool");
    run_migrations(&pool).expect("apply migrations");
    pool
}
