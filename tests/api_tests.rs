mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use std::sync::Arc;
use telemed_backend::{AppState, config::Config, routes};
use tower::ServiceExt;

async fn test_app() -> Router {
    let db_client = common::test_db().await;
    let app_state = AppState {
        env: Arc::new(Config::init()),
        db_client,
    };
    routes::create_router(app_state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn greeting_routes_respond() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"message": "Hello World"}));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/hello/Anna")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"message": "Hello Anna"}));
}

#[tokio::test]
async fn user_creation_flow_over_http() {
    let app = test_app().await;

    // Seed the role catalog first.
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/roles/seed", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/users",
            json!({
                "username": "michael_brown",
                "email": "michael.brown@example.com",
                "password": "pass1234",
                "role": "администратор"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    let user_id = body["userId"].as_i64().unwrap();

    // The created user is retrievable with its role resolved back.
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/users/{}", user_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["user"]["username"], "michael_brown");
    assert_eq!(body["data"]["user"]["role"], "администратор");
}

#[tokio::test]
async fn unknown_role_maps_to_not_found() {
    let app = test_app().await;

    app.clone()
        .oneshot(json_request("POST", "/api/roles/seed", json!({})))
        .await
        .unwrap();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/users",
            json!({
                "username": "ghost",
                "email": "ghost@example.com",
                "password": "pass1234",
                "role": "директор"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["status"], "fail");
    assert!(body["message"].as_str().unwrap().contains("директор"));
}

#[tokio::test]
async fn duplicate_user_maps_to_conflict() {
    let app = test_app().await;

    app.clone()
        .oneshot(json_request("POST", "/api/roles/seed", json!({})))
        .await
        .unwrap();

    let payload = json!({
        "username": "dup",
        "email": "dup@example.com",
        "password": "pass1234",
        "role": "пользователь"
    });

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/users", payload.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(json_request("POST", "/api/users", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn invalid_payload_maps_to_bad_request() {
    let app = test_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/users",
            json!({
                "username": "",
                "email": "not-an-email",
                "password": "short",
                "role": "пользователь"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn hospital_and_patient_flow_over_http() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/hospitals",
            json!({"name": "Городская больница №1", "address": "ул. Ленина, 1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let hospital_id = body_json(response).await["hospitalId"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/hospitals/{}/patients", hospital_id),
            json!({
                "firstName": "Анна",
                "lastName": "Иванова",
                "age": 29,
                "gender": "женщина"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let patient_id = body_json(response).await["patientId"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/patients/{}/diagnosis", patient_id),
            json!({"diagnosis": "мигрень"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["patient"]["diagnosis"], "мигрень");

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/hospitals/{}/patients", hospital_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["results"], 1);
}

#[tokio::test]
async fn admitting_to_a_missing_hospital_is_not_found() {
    let app = test_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/hospitals/999/patients",
            json!({
                "firstName": "Никто",
                "lastName": "Никтов",
                "age": 50,
                "gender": "мужчина"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
