use crate::models::{
    Diagnosis, Gender, Hospital, NewPatient, NewProfile, NewUser, Patient, Profession, Profile,
    Role, User, UserWithProfile,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

// DTOs define the structure of data exchanged with clients, separate from the
// database models so the API controls exactly what is exposed.

// ============================================================================
// User request DTOs
// ============================================================================

/// User creation request; the role field is a catalog name resolved at
/// insert time.
#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct RegisterUserDto {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
}

impl RegisterUserDto {
    pub fn into_new_user(self) -> NewUser {
        NewUser {
            username: self.username,
            email: self.email,
            password: self.password,
            role: self.role,
        }
    }
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct ProfileDto {
    #[validate(length(min = 1, message = "First name is required"))]
    #[serde(rename = "firstName")]
    pub first_name: String,

    #[serde(rename = "lastName")]
    pub last_name: Option<String>,

    #[validate(range(min = 0, max = 130, message = "Age must be between 0 and 130"))]
    pub age: Option<i64>,

    pub gender: Option<Gender>,
    pub profession: Option<Profession>,
    pub contacts: Option<Value>,
}

impl ProfileDto {
    pub fn into_new_profile(self) -> NewProfile {
        NewProfile {
            first_name: self.first_name,
            last_name: self.last_name,
            age: self.age,
            gender: self.gender,
            profession: self.profession,
            contacts: self.contacts,
        }
    }
}

/// Atomic user + profile creation request.
#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserProfileDto {
    #[validate(nested)]
    pub user: RegisterUserDto,

    #[validate(nested)]
    pub profile: ProfileDto,
}

/// Bulk user creation request; all records commit or none do.
#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct BulkRegisterDto {
    #[validate(length(min = 1, message = "At least one user is required"), nested)]
    pub users: Vec<RegisterUserDto>,
}

// ============================================================================
// Hospital & patient request DTOs
// ============================================================================

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct RegisterHospitalDto {
    #[validate(length(min = 1, message = "Hospital name is required"))]
    pub name: String,

    pub address: Option<String>,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct AdmitPatientDto {
    #[validate(length(min = 1, message = "First name is required"))]
    #[serde(rename = "firstName")]
    pub first_name: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    #[serde(rename = "lastName")]
    pub last_name: String,

    #[validate(range(min = 0, max = 130, message = "Age must be between 0 and 130"))]
    pub age: i64,

    pub gender: Gender,
    pub profession: Option<Profession>,
    pub contacts: Option<Value>,
    pub diagnosis: Option<Diagnosis>,
}

impl AdmitPatientDto {
    pub fn into_new_patient(self, hospital_id: i64) -> NewPatient {
        NewPatient {
            first_name: self.first_name,
            last_name: self.last_name,
            age: self.age,
            gender: self.gender,
            profession: self.profession,
            contacts: self.contacts,
            diagnosis: self.diagnosis,
            hospital_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateDiagnosisDto {
    pub diagnosis: Diagnosis,
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Client-safe user representation (no password field).
#[derive(Debug, Serialize, Deserialize)]
pub struct FilterUserDto {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl FilterUserDto {
    pub fn filter_user(user: &User, role: &Role) -> Self {
        FilterUserDto {
            id: user.id,
            username: user.username.to_owned(),
            email: user.email.to_owned(),
            role: role.name.to_str().to_string(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Single user with its explicitly fetched relations.
#[derive(Debug, Serialize)]
pub struct UserDetailData {
    pub user: FilterUserDto,
    pub profile: Option<Profile>,
}

#[derive(Debug, Serialize)]
pub struct UserDetailResponseDto {
    pub status: String,
    pub data: UserDetailData,
}

impl UserDetailResponseDto {
    pub fn from_record(record: &UserWithProfile) -> Self {
        UserDetailResponseDto {
            status: "success".to_string(),
            data: UserDetailData {
                user: FilterUserDto::filter_user(&record.user, &record.role),
                profile: record.profile.clone(),
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserCreatedResponseDto {
    pub status: String,
    #[serde(rename = "userId")]
    pub user_id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserProfileCreatedResponseDto {
    pub status: String,
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "profileId")]
    pub profile_id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BulkCreatedResponseDto {
    pub status: String,
    #[serde(rename = "userIds")]
    pub user_ids: Vec<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoleIdResponseDto {
    pub status: String,
    #[serde(rename = "roleId")]
    pub role_id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HospitalCreatedResponseDto {
    pub status: String,
    #[serde(rename = "hospitalId")]
    pub hospital_id: i64,
}

#[derive(Debug, Serialize)]
pub struct HospitalListResponseDto {
    pub status: String,
    pub hospitals: Vec<Hospital>,
    pub results: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PatientCreatedResponseDto {
    pub status: String,
    #[serde(rename = "patientId")]
    pub patient_id: i64,
}

#[derive(Debug, Serialize)]
pub struct PatientListResponseDto {
    pub status: String,
    pub patients: Vec<Patient>,
    pub results: usize,
}

#[derive(Debug, Serialize)]
pub struct PatientResponseDto {
    pub status: String,
    pub patient: Patient,
}

/// Generic success response
#[derive(Serialize, Deserialize)]
pub struct Response {
    pub status: &'static str,
    pub message: String,
}
