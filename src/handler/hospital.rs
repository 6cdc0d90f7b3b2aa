use crate::{
    AppState,
    db::{HospitalExt, PatientExt},
    dtos::{
        AdmitPatientDto, HospitalCreatedResponseDto, HospitalListResponseDto,
        PatientCreatedResponseDto, PatientListResponseDto, PatientResponseDto,
        RegisterHospitalDto, Response, UpdateDiagnosisDto,
    },
    error::{ErrorMessage, HttpError},
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, post, put},
};
use tracing::instrument;
use validator::Validate;

/// Router for hospitals and their admitted patients
pub fn hospital_handler() -> Router<AppState> {
    Router::new()
        // POST / - Register a hospital, GET / - list hospitals
        .route("/", post(create_hospital).get(get_hospitals))
        // POST /{id}/patients - Admit a patient, GET - list the hospital's patients
        .route("/{id}/patients", post(admit_patient).get(get_patients))
}

/// Router for patient-scoped operations
pub fn patient_handler() -> Router<AppState> {
    Router::new()
        // PUT /{id}/diagnosis - Update a patient's diagnosis
        .route("/{id}/diagnosis", put(update_diagnosis))
        // DELETE /{id} - Discharge (hard delete) a patient
        .route("/{id}", delete(delete_patient))
}

#[instrument(skip(app_state, body), fields(name = %body.name))]
pub async fn create_hospital(
    State(app_state): State<AppState>,
    Json(body): Json<RegisterHospitalDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate().map_err(|e| {
        tracing::error!("Invalid create_hospital input: {}", e);
        HttpError::bad_request(e.to_string())
    })?;

    let hospital_id = app_state
        .db_client
        .save_hospital(&body.name, body.address.as_deref())
        .await?;

    tracing::info!(hospital_id, "Hospital registered");
    Ok((
        StatusCode::CREATED,
        Json(HospitalCreatedResponseDto {
            status: "success".to_string(),
            hospital_id,
        }),
    ))
}

#[instrument(skip(app_state))]
pub async fn get_hospitals(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    let hospitals = app_state.db_client.get_hospitals().await?;

    Ok(Json(HospitalListResponseDto {
        status: "success".to_string(),
        results: hospitals.len(),
        hospitals,
    }))
}

#[instrument(skip(app_state, body))]
pub async fn admit_patient(
    Path(hospital_id): Path<i64>,
    State(app_state): State<AppState>,
    Json(body): Json<AdmitPatientDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate().map_err(|e| {
        tracing::error!("Invalid admit_patient input: {}", e);
        HttpError::bad_request(e.to_string())
    })?;

    // The hospital must exist; a dangling FK would otherwise surface as an
    // opaque constraint error.
    app_state
        .db_client
        .get_hospital(Some(hospital_id), None)
        .await?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::RecordNotFound.to_string()))?;

    let patient_id = app_state
        .db_client
        .save_patient(body.into_new_patient(hospital_id))
        .await?;

    tracing::info!(patient_id, hospital_id, "Patient admitted");
    Ok((
        StatusCode::CREATED,
        Json(PatientCreatedResponseDto {
            status: "success".to_string(),
            patient_id,
        }),
    ))
}

#[instrument(skip(app_state))]
pub async fn get_patients(
    Path(hospital_id): Path<i64>,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    let patients = app_state
        .db_client
        .get_patients_by_hospital(hospital_id)
        .await?;

    Ok(Json(PatientListResponseDto {
        status: "success".to_string(),
        results: patients.len(),
        patients,
    }))
}

#[instrument(skip(app_state, body))]
pub async fn update_diagnosis(
    Path(patient_id): Path<i64>,
    State(app_state): State<AppState>,
    Json(body): Json<UpdateDiagnosisDto>,
) -> Result<impl IntoResponse, HttpError> {
    let patient = app_state
        .db_client
        .update_patient_diagnosis(patient_id, body.diagnosis)
        .await?;

    tracing::info!(patient_id, "Diagnosis updated");
    Ok(Json(PatientResponseDto {
        status: "success".to_string(),
        patient,
    }))
}

#[instrument(skip(app_state))]
pub async fn delete_patient(
    Path(patient_id): Path<i64>,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, HttpError> {
    app_state.db_client.delete_patient(patient_id).await?;

    tracing::info!(patient_id, "Patient deleted");
    Ok(Json(Response {
        status: "success",
        message: "Patient deleted".to_string(),
    }))
}
