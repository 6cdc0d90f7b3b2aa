use super::DBClient;
use crate::error::DbError;
use crate::models::{Role, RoleName};
use sqlx::SqliteConnection;

/// Role catalog operations trait
pub trait RoleExt {
    /// Ensure the catalog holds exactly one row per RoleName variant.
    /// Idempotent; commits once at the end.
    async fn seed_roles(&self) -> Result<(), DbError>;

    /// Resolve a human-readable role name to its catalog id.
    /// Fails with RoleNotFound if no row matches.
    async fn get_role_id(&self, role_name: &str) -> Result<i64, DbError>;

    /// Fetch a full catalog row by name.
    async fn get_role(&self, role_name: &str) -> Result<Option<Role>, DbError>;
}

/// Look up a role id by name on an open connection, normalizing the input.
///
/// Normalization happens in Rust: the catalog values are Cyrillic and
/// sqlite's lower() only folds ASCII. Callers resolving roles inside a
/// transaction share this helper so every lookup in the crate has the same
/// case-insensitive semantics.
pub(super) async fn role_id_by_name(
    conn: &mut SqliteConnection,
    role_name: &str,
) -> Result<i64, DbError> {
    let normalized = role_name.trim().to_lowercase();

    let id = sqlx::query_scalar::<_, i64>("SELECT id FROM roles WHERE name = ?")
        .bind(&normalized)
        .fetch_optional(&mut *conn)
        .await?;

    id.ok_or_else(|| DbError::RoleNotFound(role_name.to_string()))
}

impl RoleExt for DBClient {
    async fn seed_roles(&self) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        for role in RoleName::ALL {
            let exists =
                sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM roles WHERE name = ?)")
                    .bind(role)
                    .fetch_one(&mut *tx)
                    .await?;

            if !exists {
                sqlx::query("INSERT INTO roles (name) VALUES (?)")
                    .bind(role)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        // Single commit for the whole catalog; a failure above rolls back
        // any rows inserted during this run.
        tx.commit().await?;

        Ok(())
    }

    async fn get_role_id(&self, role_name: &str) -> Result<i64, DbError> {
        let mut conn = self.pool.acquire().await?;
        role_id_by_name(&mut conn, role_name).await
    }

    async fn get_role(&self, role_name: &str) -> Result<Option<Role>, DbError> {
        let normalized = role_name.trim().to_lowercase();

        let role = sqlx::query_as::<_, Role>(
            "SELECT id, name, created_at, updated_at FROM roles WHERE name = ?",
        )
        .bind(&normalized)
        .fetch_optional(&self.pool)
        .await?;

        Ok(role)
    }
}
