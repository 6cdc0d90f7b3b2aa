use telemed_backend::db::{self, DBClient};

/// Fresh in-memory database with the migrations applied.
///
/// A single-connection pool keeps every operation on the same `:memory:`
/// database (each sqlite memory connection is otherwise its own database).
pub async fn test_db() -> DBClient {
    let pool = db::connect_pool("sqlite::memory:", 1)
        .await
        .expect("failed to open in-memory database");
    DBClient::new(pool)
}
