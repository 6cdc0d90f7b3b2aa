use super::DBClient;
use super::role::role_id_by_name;
use crate::error::DbError;
use crate::models::{NewProfile, NewUser, Profession, Profile, Role, User, UserWithProfile};
use sqlx::types::Json;

const USER_COLUMNS: &str = "id, username, email, password, role_id, created_at, updated_at";

/// User database operations trait
pub trait UserExt {
    /// Get single user by ID, username, or email.
    /// Returns Option - Some(user) if found, None if not found
    async fn get_user(
        &self,
        user_id: Option<i64>,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, DbError>;

    /// Get a user together with its role and (optional) profile.
    /// Related rows are fetched here, explicitly, not by the entity.
    async fn get_user_with_profile(&self, user_id: i64)
    -> Result<Option<UserWithProfile>, DbError>;

    /// Get paginated list of all users
    async fn get_users(&self, page: u32, limit: usize) -> Result<Vec<User>, DbError>;

    /// Get total count of all users
    async fn get_user_count(&self) -> Result<i64, DbError>;

    /// Create a new user bound to the named role. Returns the new id.
    async fn save_user<T: Into<String> + Send>(
        &self,
        username: T,
        email: T,
        password: T,
        role_name: &str,
    ) -> Result<i64, DbError>;

    /// Create a user and its profile as one unit of work.
    /// Returns (user_id, profile_id); on any failure neither row persists.
    async fn save_user_with_profile(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role_name: &str,
        profile: NewProfile,
    ) -> Result<(i64, i64), DbError>;

    /// Create a batch of users in one transaction.
    /// Any unresolvable role aborts the whole batch before the first insert.
    /// Returns the generated ids in input order.
    async fn save_users(&self, users: &[NewUser]) -> Result<Vec<i64>, DbError>;

    /// Delete user by ID (hard delete; the profile cascades)
    async fn delete_user(&self, user_id: i64) -> Result<(), DbError>;
}

impl UserExt for DBClient {
    async fn get_user(
        &self,
        user_id: Option<i64>,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, DbError> {
        let mut user: Option<User> = None;

        if let Some(user_id) = user_id {
            user = sqlx::query_as::<_, User>(&format!(
                "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
            ))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        } else if let Some(username) = username {
            user = sqlx::query_as::<_, User>(&format!(
                "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
            ))
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        } else if let Some(email) = email {
            user = sqlx::query_as::<_, User>(&format!(
                "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
            ))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        }

        Ok(user)
    }

    async fn get_user_with_profile(
        &self,
        user_id: i64,
    ) -> Result<Option<UserWithProfile>, DbError> {
        let Some(user) = self.get_user(Some(user_id), None, None).await? else {
            return Ok(None);
        };

        let role = sqlx::query_as::<_, Role>(
            "SELECT id, name, created_at, updated_at FROM roles WHERE id = ?",
        )
        .bind(user.role_id)
        .fetch_one(&self.pool)
        .await?;

        let profile = sqlx::query_as::<_, Profile>(
            "SELECT id, user_id, first_name, last_name, age, gender, profession, contacts, \
             created_at, updated_at FROM profiles WHERE user_id = ?",
        )
        .bind(user.id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(Some(UserWithProfile {
            user,
            role,
            profile,
        }))
    }

    async fn get_users(&self, page: u32, limit: usize) -> Result<Vec<User>, DbError> {
        let offset = (page.saturating_sub(1) as i64) * limit as i64;

        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
        ))
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn get_user_count(&self) -> Result<i64, DbError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn save_user<T: Into<String> + Send>(
        &self,
        username: T,
        email: T,
        password: T,
        role_name: &str,
    ) -> Result<i64, DbError> {
        let mut tx = self.pool.begin().await?;

        // Role must exist before the user referencing it is created.
        let role_id = role_id_by_name(&mut tx, role_name).await?;

        let user_id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (username, email, password, role_id) VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(username.into())
        .bind(email.into())
        .bind(password.into())
        .bind(role_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(user_id)
    }

    async fn save_user_with_profile(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role_name: &str,
        profile: NewProfile,
    ) -> Result<(i64, i64), DbError> {
        let mut tx = self.pool.begin().await?;

        let role_id = role_id_by_name(&mut tx, role_name).await?;

        // RETURNING hands back the generated id mid-transaction, so the
        // profile can reference it before anything is committed.
        let user_id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (username, email, password, role_id) VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(username)
        .bind(email)
        .bind(password)
        .bind(role_id)
        .fetch_one(&mut *tx)
        .await?;

        let profile_id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO profiles (user_id, first_name, last_name, age, gender, profession, contacts) \
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(user_id)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(profile.age)
        .bind(profile.gender)
        .bind(profile.profession.unwrap_or(Profession::Unemployed))
        .bind(profile.contacts.map(Json))
        .fetch_one(&mut *tx)
        .await?;

        // One commit for both rows; an error on either insert drops the
        // transaction and rolls everything back.
        tx.commit().await?;

        Ok((user_id, profile_id))
    }

    async fn save_users(&self, users: &[NewUser]) -> Result<Vec<i64>, DbError> {
        let mut tx = self.pool.begin().await?;

        // Resolve every role before the first insert: a single bad record
        // must abort the batch with nothing written.
        let mut role_ids = Vec::with_capacity(users.len());
        for user in users {
            role_ids.push(role_id_by_name(&mut tx, &user.role).await?);
        }

        let mut user_ids = Vec::with_capacity(users.len());
        for (user, role_id) in users.iter().zip(role_ids) {
            let id = sqlx::query_scalar::<_, i64>(
                "INSERT INTO users (username, email, password, role_id) VALUES (?, ?, ?, ?) RETURNING id",
            )
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password)
            .bind(role_id)
            .fetch_one(&mut *tx)
            .await?;
            user_ids.push(id);
        }

        tx.commit().await?;

        Ok(user_ids)
    }

    async fn delete_user(&self, user_id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::Sqlx(sqlx::Error::RowNotFound));
        }

        Ok(())
    }
}
