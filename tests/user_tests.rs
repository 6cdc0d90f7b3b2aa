mod common;

use serde_json::json;
use telemed_backend::{
    db::{RoleExt, UserExt},
    error::DbError,
    models::{Gender, NewProfile, NewUser, Profession, RoleName},
};

fn new_user(username: &str, role: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password: "pass1234".to_string(),
        role: role.to_string(),
    }
}

fn sample_profile() -> NewProfile {
    NewProfile {
        first_name: "Michael".to_string(),
        last_name: Some("Brown".to_string()),
        age: Some(34),
        gender: Some(Gender::Male),
        profession: Some(Profession::Doctor),
        contacts: Some(json!({"phone": "+7-900-000-00-00"})),
    }
}

#[tokio::test]
async fn seed_roles_is_idempotent() {
    let db = common::test_db().await;

    db.seed_roles().await.unwrap();
    db.seed_roles().await.unwrap();

    for role in RoleName::ALL {
        let id = db.get_role_id(role.to_str()).await.unwrap();
        assert!(id > 0);
    }

    // Exactly one row per enumeration value, even after seeding twice.
    let roles = [
        db.get_role("администратор").await.unwrap(),
        db.get_role("модератор").await.unwrap(),
        db.get_role("пользователь").await.unwrap(),
    ];
    let mut ids: Vec<i64> = roles.iter().map(|r| r.as_ref().unwrap().id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}

#[tokio::test]
async fn get_role_id_is_case_insensitive() {
    let db = common::test_db().await;
    db.seed_roles().await.unwrap();

    let lower = db.get_role_id("администратор").await.unwrap();
    let upper = db.get_role_id("АДМИНИСТРАТОР").await.unwrap();
    let padded = db.get_role_id("  Администратор  ").await.unwrap();

    assert_eq!(lower, upper);
    assert_eq!(lower, padded);
}

#[tokio::test]
async fn get_role_id_reports_the_missing_name() {
    let db = common::test_db().await;
    db.seed_roles().await.unwrap();

    let err = db.get_role_id("директор").await.unwrap_err();
    match err {
        DbError::RoleNotFound(name) => assert_eq!(name, "директор"),
        other => panic!("expected RoleNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn create_user_returns_id_and_persists_fields() {
    let db = common::test_db().await;
    db.seed_roles().await.unwrap();

    let user_id = db
        .save_user(
            "michael_brown",
            "michael.brown@example.com",
            "pass1234",
            "администратор",
        )
        .await
        .unwrap();
    assert!(user_id > 0);

    let user = db
        .get_user(None, Some("michael_brown"), None)
        .await
        .unwrap()
        .expect("user should be retrievable");
    assert_eq!(user.id, user_id);
    assert_eq!(user.email, "michael.brown@example.com");
    assert_eq!(user.password, "pass1234");

    // The role reference resolves back to the name used at creation.
    let record = db.get_user_with_profile(user_id).await.unwrap().unwrap();
    assert_eq!(record.role.name, RoleName::Admin);
    assert_eq!(record.role.name.to_str(), "администратор");
    assert!(record.profile.is_none());
}

#[tokio::test]
async fn create_user_with_unknown_role_persists_nothing() {
    let db = common::test_db().await;
    db.seed_roles().await.unwrap();

    let err = db
        .save_user("ghost", "ghost@example.com", "pass1234", "директор")
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::RoleNotFound(_)));

    assert!(db.get_user(None, Some("ghost"), None).await.unwrap().is_none());
    assert_eq!(db.get_user_count().await.unwrap(), 0);
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let db = common::test_db().await;
    db.seed_roles().await.unwrap();

    db.save_user("dup", "dup@example.com", "pass1234", "пользователь")
        .await
        .unwrap();

    let err = db
        .save_user("dup", "other@example.com", "pass1234", "пользователь")
        .await
        .unwrap_err();
    match err {
        DbError::Sqlx(e) => {
            let db_err = e.as_database_error().expect("expected a database error");
            assert!(db_err.is_unique_violation());
        }
        other => panic!("expected a unique violation, got {:?}", other),
    }

    assert_eq!(db.get_user_count().await.unwrap(), 1);
}

#[tokio::test]
async fn user_with_profile_commits_both_rows() {
    let db = common::test_db().await;
    db.seed_roles().await.unwrap();

    let (user_id, profile_id) = db
        .save_user_with_profile(
            "michael_brown",
            "michael.brown@example.com",
            "pass1234",
            "администратор",
            sample_profile(),
        )
        .await
        .unwrap();
    assert!(user_id > 0);
    assert!(profile_id > 0);

    let record = db.get_user_with_profile(user_id).await.unwrap().unwrap();
    let profile = record.profile.expect("profile should be attached");
    assert_eq!(profile.id, profile_id);
    assert_eq!(profile.user_id, user_id);
    assert_eq!(profile.first_name, "Michael");
    assert_eq!(profile.profession, Profession::Doctor);
    let contacts = profile.contacts.expect("contacts should persist");
    assert_eq!(contacts.0["phone"], "+7-900-000-00-00");
}

#[tokio::test]
async fn user_with_profile_defaults_profession() {
    let db = common::test_db().await;
    db.seed_roles().await.unwrap();

    let profile = NewProfile {
        profession: None,
        ..sample_profile()
    };
    let (user_id, _) = db
        .save_user_with_profile(
            "no_profession",
            "no.profession@example.com",
            "pass1234",
            "пользователь",
            profile,
        )
        .await
        .unwrap();

    let record = db.get_user_with_profile(user_id).await.unwrap().unwrap();
    assert_eq!(record.profile.unwrap().profession, Profession::Unemployed);
}

#[tokio::test]
async fn failed_profile_insert_rolls_back_the_user() {
    let db = common::test_db().await;
    db.seed_roles().await.unwrap();

    // Negative age violates the profiles CHECK constraint after the user
    // insert has already succeeded inside the transaction.
    let bad_profile = NewProfile {
        age: Some(-5),
        ..sample_profile()
    };
    let err = db
        .save_user_with_profile(
            "half_created",
            "half.created@example.com",
            "pass1234",
            "администратор",
            bad_profile,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Sqlx(_)));

    // All-or-nothing: the user row must not survive the failed attempt.
    assert!(
        db.get_user(None, Some("half_created"), None)
            .await
            .unwrap()
            .is_none()
    );
    assert_eq!(db.get_user_count().await.unwrap(), 0);
}

#[tokio::test]
async fn bulk_create_returns_ids_in_input_order() {
    let db = common::test_db().await;
    db.seed_roles().await.unwrap();

    let users = vec![
        new_user("michael_brown", "администратор"),
        new_user("sarah_wilson", "администратор"),
        new_user("david_clark", "администратор"),
        new_user("emma_walker", "администратор"),
        new_user("james_martin", "пользователь"),
    ];

    let ids = db.save_users(&users).await.unwrap();
    assert_eq!(ids.len(), 5);

    for (id, input) in ids.iter().zip(&users) {
        let user = db.get_user(Some(*id), None, None).await.unwrap().unwrap();
        assert_eq!(user.username, input.username);
    }
}

#[tokio::test]
async fn bulk_create_aborts_before_any_insert_on_unknown_role() {
    let db = common::test_db().await;
    db.seed_roles().await.unwrap();

    let users = vec![
        new_user("first_ok", "администратор"),
        new_user("bad_role", "директор"),
        new_user("second_ok", "пользователь"),
    ];

    let err = db.save_users(&users).await.unwrap_err();
    match err {
        DbError::RoleNotFound(name) => assert_eq!(name, "директор"),
        other => panic!("expected RoleNotFound, got {:?}", other),
    }

    assert_eq!(db.get_user_count().await.unwrap(), 0);
}

#[tokio::test]
async fn delete_user_cascades_to_profile() {
    let db = common::test_db().await;
    db.seed_roles().await.unwrap();

    let (user_id, _) = db
        .save_user_with_profile(
            "to_delete",
            "to.delete@example.com",
            "pass1234",
            "пользователь",
            sample_profile(),
        )
        .await
        .unwrap();

    db.delete_user(user_id).await.unwrap();

    assert!(db.get_user(Some(user_id), None, None).await.unwrap().is_none());

    // Deleting again reports not-found.
    let err = db.delete_user(user_id).await.unwrap_err();
    assert!(matches!(err, DbError::Sqlx(sqlx::Error::RowNotFound)));
}

#[tokio::test]
async fn get_users_paginates() {
    let db = common::test_db().await;
    db.seed_roles().await.unwrap();

    let users: Vec<NewUser> = (0..7)
        .map(|i| new_user(&format!("user_{}", i), "пользователь"))
        .collect();
    db.save_users(&users).await.unwrap();

    let page1 = db.get_users(1, 5).await.unwrap();
    let page2 = db.get_users(2, 5).await.unwrap();
    assert_eq!(page1.len(), 5);
    assert_eq!(page2.len(), 2);
    assert_eq!(db.get_user_count().await.unwrap(), 7);
}
