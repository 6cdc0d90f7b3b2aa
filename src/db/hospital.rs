use super::DBClient;
use crate::error::DbError;
use crate::models::Hospital;

const HOSPITAL_COLUMNS: &str = "id, name, address, created_at, updated_at";

/// Hospital database operations trait
pub trait HospitalExt {
    /// Get single hospital by ID or unique name.
    async fn get_hospital(
        &self,
        hospital_id: Option<i64>,
        name: Option<&str>,
    ) -> Result<Option<Hospital>, DbError>;

    /// List all hospitals, newest first.
    async fn get_hospitals(&self) -> Result<Vec<Hospital>, DbError>;

    /// Register a new hospital. Returns the new id.
    async fn save_hospital(&self, name: &str, address: Option<&str>) -> Result<i64, DbError>;

    /// Delete hospital by ID (its patients cascade)
    async fn delete_hospital(&self, hospital_id: i64) -> Result<(), DbError>;
}

impl HospitalExt for DBClient {
    async fn get_hospital(
        &self,
        hospital_id: Option<i64>,
        name: Option<&str>,
    ) -> Result<Option<Hospital>, DbError> {
        let mut hospital: Option<Hospital> = None;

        if let Some(hospital_id) = hospital_id {
            hospital = sqlx::query_as::<_, Hospital>(&format!(
                "SELECT {HOSPITAL_COLUMNS} FROM hospitals WHERE id = ?"
            ))
            .bind(hospital_id)
            .fetch_optional(&self.pool)
            .await?;
        } else if let Some(name) = name {
            hospital = sqlx::query_as::<_, Hospital>(&format!(
                "SELECT {HOSPITAL_COLUMNS} FROM hospitals WHERE name = ?"
            ))
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        }

        Ok(hospital)
    }

    async fn get_hospitals(&self) -> Result<Vec<Hospital>, DbError> {
        let hospitals = sqlx::query_as::<_, Hospital>(&format!(
            "SELECT {HOSPITAL_COLUMNS} FROM hospitals ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(hospitals)
    }

    async fn save_hospital(&self, name: &str, address: Option<&str>) -> Result<i64, DbError> {
        let hospital_id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO hospitals (name, address) VALUES (?, ?) RETURNING id",
        )
        .bind(name)
        .bind(address)
        .fetch_one(&self.pool)
        .await?;

        Ok(hospital_id)
    }

    async fn delete_hospital(&self, hospital_id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM hospitals WHERE id = ?")
            .bind(hospital_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::Sqlx(sqlx::Error::RowNotFound));
        }

        Ok(())
    }
}
