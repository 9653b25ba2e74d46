//! PostgreSQL connection pool construction.
//!
//! The pool is the only process-wide shared resource: it is constructed once
//! at startup, handed to each repository, and dropped on shutdown. Sizing is
//! fixed: up to 25 concurrent connections, 5 kept idle, no maximum
//! connection lifetime (connections are reused until the pool recycles
//! them).

use sqlx::postgres::PgPoolOptions;

pub use sqlx::PgPool;

const MAX_CONNECTIONS: u32 = 25;
const MIN_CONNECTIONS: u32 = 5;

/// Connect to PostgreSQL and verify the connection.
///
/// # Errors
/// Returns the underlying `sqlx` error if the URL is invalid or the server
/// is unreachable.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .min_connections(MIN_CONNECTIONS)
        .max_lifetime(None)
        .connect(database_url)
        .await
}

/// Build a pool without establishing a connection.
///
/// Connections are opened on first use. Handler tests use this so that
/// request paths rejected before any statement executes can be exercised
/// without a live database.
pub fn connect_lazy(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .min_connections(MIN_CONNECTIONS)
        .max_lifetime(None)
        .connect_lazy(database_url)
}
