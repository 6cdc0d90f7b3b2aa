use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;

/// Role catalog enumeration
///
/// The roles table holds exactly one row per variant; users reference a row
/// by id. Stored as TEXT with the Russian catalog values, which is why every
/// variant carries explicit sqlx/serde renames instead of a `rename_all` rule.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
pub enum RoleName {
    #[sqlx(rename = "администратор")]
    #[serde(rename = "администратор")]
    Admin,
    #[sqlx(rename = "модератор")]
    #[serde(rename = "модератор")]
    Moderator,
    #[sqlx(rename = "пользователь")]
    #[serde(rename = "пользователь")]
    User,
}

impl RoleName {
    /// Every catalog value, in seeding order.
    pub const ALL: [RoleName; 3] = [RoleName::Admin, RoleName::Moderator, RoleName::User];

    pub fn to_str(&self) -> &str {
        match self {
            RoleName::Admin => "администратор",
            RoleName::Moderator => "модератор",
            RoleName::User => "пользователь",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
pub enum Gender {
    #[sqlx(rename = "мужчина")]
    #[serde(rename = "мужчина")]
    Male,
    #[sqlx(rename = "женщина")]
    #[serde(rename = "женщина")]
    Female,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
pub enum Profession {
    #[sqlx(rename = "разработчик")]
    #[serde(rename = "разработчик")]
    Developer,
    #[sqlx(rename = "дизайнер")]
    #[serde(rename = "дизайнер")]
    Designer,
    #[sqlx(rename = "менеджер")]
    #[serde(rename = "менеджер")]
    Manager,
    #[sqlx(rename = "учитель")]
    #[serde(rename = "учитель")]
    Teacher,
    #[sqlx(rename = "врач")]
    #[serde(rename = "врач")]
    Doctor,
    #[sqlx(rename = "инженер")]
    #[serde(rename = "инженер")]
    Engineer,
    #[sqlx(rename = "маркетолог")]
    #[serde(rename = "маркетолог")]
    Marketer,
    #[sqlx(rename = "писатель")]
    #[serde(rename = "писатель")]
    Writer,
    #[sqlx(rename = "художник")]
    #[serde(rename = "художник")]
    Artist,
    #[sqlx(rename = "юрист")]
    #[serde(rename = "юрист")]
    Lawyer,
    #[sqlx(rename = "ученый")]
    #[serde(rename = "ученый")]
    Scientist,
    #[sqlx(rename = "медсестра")]
    #[serde(rename = "медсестра")]
    Nurse,
    #[sqlx(rename = "безработный")]
    #[serde(rename = "безработный")]
    Unemployed,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
pub enum Diagnosis {
    #[sqlx(rename = "диабет")]
    #[serde(rename = "диабет")]
    Diabetes,
    #[sqlx(rename = "гипертония")]
    #[serde(rename = "гипертония")]
    Hypertension,
    #[sqlx(rename = "астма")]
    #[serde(rename = "астма")]
    Asthma,
    #[sqlx(rename = "депрессия")]
    #[serde(rename = "депрессия")]
    Depression,
    #[sqlx(rename = "тревожное расстройство")]
    #[serde(rename = "тревожное расстройство")]
    Anxiety,
    #[sqlx(rename = "артрит")]
    #[serde(rename = "артрит")]
    Arthritis,
    #[sqlx(rename = "сердечно-сосудистые заболевания")]
    #[serde(rename = "сердечно-сосудистые заболевания")]
    HeartDisease,
    #[sqlx(rename = "рак")]
    #[serde(rename = "рак")]
    Cancer,
    #[sqlx(rename = "аллергия")]
    #[serde(rename = "аллергия")]
    Allergy,
    #[sqlx(rename = "инфекция")]
    #[serde(rename = "инфекция")]
    Infection,
    #[sqlx(rename = "ожирение")]
    #[serde(rename = "ожирение")]
    Obesity,
    #[sqlx(rename = "мигрень")]
    #[serde(rename = "мигрень")]
    Migraine,
    #[sqlx(rename = "здоров")]
    #[serde(rename = "здоров")]
    Healthy,
}

/// Role catalog row. Small reference table keyed by unique name.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Role {
    pub id: i64,
    pub name: RoleName,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User model representing the users table
///
/// `password` is stored as received. Hashing belongs to an auth layer this
/// service does not have yet.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub role_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile model, owned one-to-one by a User
///
/// `user_id` is UNIQUE with ON DELETE CASCADE: a profile belongs to exactly
/// one user and disappears with it. `contacts` is a free-form JSON map.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Profile {
    pub id: i64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<Gender>,
    pub profession: Profession,
    pub contacts: Option<Json<Value>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Hospital {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Patient model, many-to-one with Hospital (cascade on hospital delete)
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Patient {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
    pub gender: Gender,
    pub profession: Profession,
    pub contacts: Option<Json<Value>>,
    pub diagnosis: Diagnosis,
    pub hospital_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user together with its explicitly fetched relations.
///
/// Related records are loaded by `get_user_with_profile` on request; nothing
/// in the entity definitions joins implicitly.
#[derive(Debug, Serialize, Clone)]
pub struct UserWithProfile {
    pub user: User,
    pub role: Role,
    pub profile: Option<Profile>,
}

/// Input record for user creation (single and bulk paths).
/// The role is a human-readable catalog name, resolved at insert time.
#[derive(Debug, Deserialize, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Input record for profile creation, attached to a user in the same
/// transaction by `save_user_with_profile`.
#[derive(Debug, Deserialize, Clone)]
pub struct NewProfile {
    pub first_name: String,
    pub last_name: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<Gender>,
    pub profession: Option<Profession>,
    pub contacts: Option<Value>,
}

/// Input record for patient admission.
#[derive(Debug, Deserialize, Clone)]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
    pub gender: Gender,
    pub profession: Option<Profession>,
    pub contacts: Option<Value>,
    pub diagnosis: Option<Diagnosis>,
    pub hospital_id: i64,
}
