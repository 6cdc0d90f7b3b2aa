use super::DBClient;
use crate::error::DbError;
use crate::models::{Diagnosis, NewPatient, Patient, Profession};
use sqlx::types::Json;

const PATIENT_COLUMNS: &str = "id, first_name, last_name, age, gender, profession, contacts, \
                               diagnosis, hospital_id, created_at, updated_at";

/// Patient database operations trait
pub trait PatientExt {
    /// Get single patient by ID.
    async fn get_patient(&self, patient_id: i64) -> Result<Option<Patient>, DbError>;

    /// List every patient admitted to the given hospital.
    async fn get_patients_by_hospital(&self, hospital_id: i64) -> Result<Vec<Patient>, DbError>;

    /// Admit a patient. Diagnosis defaults to healthy when not given.
    /// Returns the new id.
    async fn save_patient(&self, patient: NewPatient) -> Result<i64, DbError>;

    /// Update a patient's diagnosis, returning the updated row.
    async fn update_patient_diagnosis(
        &self,
        patient_id: i64,
        diagnosis: Diagnosis,
    ) -> Result<Patient, DbError>;

    /// Delete patient by ID
    async fn delete_patient(&self, patient_id: i64) -> Result<(), DbError>;
}

impl PatientExt for DBClient {
    async fn get_patient(&self, patient_id: i64) -> Result<Option<Patient>, DbError> {
        let patient = sqlx::query_as::<_, Patient>(&format!(
            "SELECT {PATIENT_COLUMNS} FROM patients WHERE id = ?"
        ))
        .bind(patient_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(patient)
    }

    async fn get_patients_by_hospital(&self, hospital_id: i64) -> Result<Vec<Patient>, DbError> {
        let patients = sqlx::query_as::<_, Patient>(&format!(
            "SELECT {PATIENT_COLUMNS} FROM patients WHERE hospital_id = ? ORDER BY id"
        ))
        .bind(hospital_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(patients)
    }

    async fn save_patient(&self, patient: NewPatient) -> Result<i64, DbError> {
        let patient_id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO patients (first_name, last_name, age, gender, profession, contacts, \
             diagnosis, hospital_id) VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(&patient.first_name)
        .bind(&patient.last_name)
        .bind(patient.age)
        .bind(patient.gender)
        .bind(patient.profession.unwrap_or(Profession::Unemployed))
        .bind(patient.contacts.map(Json))
        .bind(patient.diagnosis.unwrap_or(Diagnosis::Healthy))
        .bind(patient.hospital_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(patient_id)
    }

    async fn update_patient_diagnosis(
        &self,
        patient_id: i64,
        diagnosis: Diagnosis,
    ) -> Result<Patient, DbError> {
        let patient = sqlx::query_as::<_, Patient>(&format!(
            "UPDATE patients SET diagnosis = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ? \
             RETURNING {PATIENT_COLUMNS}"
        ))
        .bind(diagnosis)
        .bind(patient_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(patient)
    }

    async fn delete_patient(&self, patient_id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM patients WHERE id = ?")
            .bind(patient_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::Sqlx(sqlx::Error::RowNotFound));
        }

        Ok(())
    }
}
