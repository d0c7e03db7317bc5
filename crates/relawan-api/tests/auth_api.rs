//! Black-box tests for the public and authentication endpoints.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use fake::faker::name::en::Name;
use fake::Fake;
use serde_json::json;

use common::{json_request, multipart_request, request, MultipartBody, TestApp, PASSWORD};
use relawan_core::domain::UserRole;

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nnot-really-a-png";

fn registration(email: &str, skills: &str) -> MultipartBody {
    let nama: String = Name().fake();
    MultipartBody::new()
        .text("nama", &nama)
        .text("email", email)
        .text("password", PASSWORD)
        .text("alamat", "Jl. Merdeka 1")
        .text("skills", skills)
}

#[tokio::test]
async fn root_and_health_respond() {
    let app = TestApp::new();

    let (status, body) = app.send_raw(request(Method::GET, "/", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"Server is running and ready for requests.");

    let (status, body) = app.send(request(Method::GET, "/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn skills_are_listed_in_id_order() {
    let app = TestApp::new();

    let (status, body) = app.send(request(Method::GET, "/api/skill", None)).await;
    assert_eq!(status, StatusCode::OK);
    let skills = body["data"].as_array().unwrap();
    assert_eq!(skills.len(), 8);
    assert_eq!(skills[0]["id"], 1);
    assert_eq!(skills[4]["name"], "#Evakuasi");
}

#[tokio::test]
async fn register_then_read_profile_and_photo() {
    let app = TestApp::new();

    let form = registration("Siti@Example.com", "1, 5, 5").file("foto", "me.png", PNG);
    let (status, body) = app.send(multipart_request("/api/auth/register", None, form)).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let access_token = body["data"]["access_token"].as_str().unwrap().to_string();
    assert!(body["data"]["refresh_token"].is_string());

    let (status, body) = app
        .send(request(Method::GET, "/api/auth/profile", Some(&access_token)))
        .await;
    assert_eq!(status, StatusCode::OK);
    let profile = &body["data"];
    assert_eq!(profile["email"], "siti@example.com");
    assert_eq!(profile["alamat"], "Jl. Merdeka 1");
    assert_eq!(profile["skills"], json!(["#KebersihanLingkungan", "#Evakuasi"]));
    assert_eq!(profile["volunteer_count"], 0);

    let foto = profile["foto"].as_str().unwrap().to_string();
    assert!(foto.starts_with("/api/file/"));
    let (status, bytes) = app.send_raw(request(Method::GET, &foto, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&bytes[..], PNG);

    // Login is case-insensitive on the email.
    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/api/auth/login",
            None,
            json!({ "identifier": "SITI@example.com", "password": PASSWORD }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["email"], "siti@example.com");
}

#[tokio::test]
async fn duplicate_registration_conflicts_and_discards_upload() {
    let app = TestApp::new();

    let form = registration("budi@example.com", "2").file("foto", "a.jpg", PNG);
    let (status, _) = app.send(multipart_request("/api/auth/register", None, form)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(app.uploaded_files(), 1);

    let form = registration("BUDI@example.com", "2").file("foto", "b.jpg", PNG);
    let (status, body) = app.send(multipart_request("/api/auth/register", None, form)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "CONFLICT");
    assert_eq!(app.uploaded_files(), 1);
}

#[tokio::test]
async fn registration_rejects_bad_input() {
    let app = TestApp::new();

    for (email, skills) in [
        ("ani@example.com", "a,b"),
        ("ani@example.com", "99"),
        ("ani@example.com", ""),
        ("not-an-email", "1"),
    ] {
        let form = registration(email, skills);
        let (status, _) = app.send(multipart_request("/api/auth/register", None, form)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{email} / {skills:?}");
    }

    let form = registration("ani@example.com", "1").file("foto", "run.sh", b"#!/bin/sh");
    let (status, _) = app.send(multipart_request("/api/auth/register", None, form)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.uploaded_files(), 0);
}

#[tokio::test]
async fn login_failures_are_unauthorized() {
    let app = TestApp::new();
    app.db.insert_user("Dewi", "dewi@example.com", UserRole::User, &[1]);

    let (status, _) = app
        .send(json_request(
            Method::POST,
            "/api/auth/login",
            None,
            json!({ "identifier": "dewi@example.com", "password": "wrong-password" }),
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(json_request(
            Method::POST,
            "/api/auth/login",
            None,
            json!({ "identifier": "nobody@example.com", "password": PASSWORD }),
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_rotates_the_token_pair() {
    let app = TestApp::new();
    app.db.insert_user("Rina", "rina@example.com", UserRole::User, &[3]);

    let (_, body) = app
        .send(json_request(
            Method::POST,
            "/api/auth/login",
            None,
            json!({ "identifier": "rina@example.com", "password": PASSWORD }),
        ))
        .await;
    let old_access = body["data"]["access_token"].as_str().unwrap().to_string();
    let old_refresh = body["data"]["refresh_token"].as_str().unwrap().to_string();

    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/api/auth/token",
            None,
            json!({ "refresh_token": old_refresh }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    let new_access = body["data"]["access_token"].as_str().unwrap().to_string();
    assert_ne!(new_access, old_access);

    // The previous pair is revoked.
    let (status, _) = app
        .send(json_request(
            Method::POST,
            "/api/auth/token",
            None,
            json!({ "refresh_token": old_refresh }),
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = app
        .send(request(Method::GET, "/api/auth/data", Some(&old_access)))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .send(request(Method::GET, "/api/auth/data", Some(&new_access)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["email"], "rina@example.com");
    assert_eq!(body["data"]["skills"], json!(["#PendampingLansia"]));

    let (status, _) = app
        .send(json_request(Method::POST, "/api/auth/token", None, json!({})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn concurrent_refreshes_redeem_a_token_once() {
    let app = TestApp::new();
    app.db.insert_user("Bayu", "bayu@example.com", UserRole::User, &[1]);

    let (_, body) = app
        .send(json_request(
            Method::POST,
            "/api/auth/login",
            None,
            json!({ "identifier": "bayu@example.com", "password": PASSWORD }),
        ))
        .await;
    let refresh = body["data"]["refresh_token"].as_str().unwrap().to_string();

    let redeem = || {
        app.send(json_request(
            Method::POST,
            "/api/auth/token",
            None,
            json!({ "refresh_token": refresh }),
        ))
    };
    let ((first, _), (second, _)) = tokio::join!(redeem(), redeem());

    let mut statuses = [first.as_u16(), second.as_u16()];
    statuses.sort();
    assert_eq!(statuses, [200, 401]);
}

#[tokio::test]
async fn refresh_accepts_camel_case_field() {
    let app = TestApp::new();
    app.db.insert_user("Sari", "sari@example.com", UserRole::User, &[2]);

    let (_, body) = app
        .send(json_request(
            Method::POST,
            "/api/auth/login",
            None,
            json!({ "email": "sari@example.com", "password": PASSWORD }),
        ))
        .await;
    let refresh = body["data"]["refresh_token"].as_str().unwrap().to_string();

    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/api/auth/token",
            None,
            json!({ "refreshToken": refresh }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["access_token"].is_string());
}

#[tokio::test]
async fn malformed_bodies_use_the_error_envelope() {
    let app = TestApp::new();

    let (status, body) = app
        .send(json_request(Method::POST, "/api/auth/login", None, json!({})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert!(body["timestamp"].is_string());

    let bad_json = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/token")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = app.send(bad_json).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    // Register expects multipart.
    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/api/auth/register",
            None,
            json!({ "email": "x@example.com" }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn logout_revokes_access() {
    let app = TestApp::new();
    let (user_id, token) = app
        .user_with_token("joko@example.com", UserRole::User, &[1])
        .await;

    let (status, body) = app
        .send(request(Method::POST, "/api/auth/logout", Some(&token)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logged out successfully");
    assert!(app.db.stored_access_token(user_id).is_none());

    let (status, _) = app
        .send(request(Method::GET, "/api/auth/profile", Some(&token)))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_routes_require_a_bearer_token() {
    let app = TestApp::new();

    let (status, body) = app.send(request(Method::GET, "/api/auth/data", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let (status, _) = app
        .send(request(Method::GET, "/api/event", Some("not-a-jwt")))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
