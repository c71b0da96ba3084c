//! SQLite connection pooling helpers.

use diesel::r2d2::{self, ConnectionManager};
use diesel::sqlite::SqliteConnection;

/// Shared r2d2 pool over SQLite connections.
pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;
/// A single pooled connection.
pub type DbConnection = r2d2::PooledConnection<ConnectionManager<SqliteConnection>>;

/// Build a connection pool for the given SQLite database path or URL.
pub fn establish_connection_pool(database_url: &str) -> Result<DbPool, r2d2::PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    r2d2::Pool::builder().build(manager)
}
