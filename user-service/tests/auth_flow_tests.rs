mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::legacy_hash;
use common::modern_hash;
use common::TestApp;

#[tokio::test]
async fn login_with_modern_hash_succeeds() {
    let app = TestApp::new();
    app.seed_user("alice", &modern_hash("secret1"), "user").await;

    let (status, body) = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "alice", "password": "secret1"})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["username"], "alice");
    assert!(body["data"]["token"].as_str().unwrap().contains('.'));
}

#[tokio::test]
async fn login_with_legacy_hash_rewrites_stored_hash() {
    let app = TestApp::new();
    app.seed_user("alice", &legacy_hash("secret1"), "user").await;

    let (status, _) = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "alice", "password": "secret1"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let stored = app.repository.stored_user("alice").unwrap();
    assert!(
        stored.password_hash.starts_with("$argon2id$"),
        "expected upgraded hash, got {}",
        stored.password_hash
    );

    // The rewritten hash still verifies on a second login.
    let (status, _) = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "alice", "password": "secret1"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn failed_login_does_not_rewrite_legacy_hash() {
    let app = TestApp::new();
    let hash = legacy_hash("secret1");
    app.seed_user("alice", &hash, "user").await;

    let (status, _) = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "alice", "password": "wrong"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let stored = app.repository.stored_user("alice").unwrap();
    assert_eq!(stored.password_hash, hash);
}

#[tokio::test]
async fn wrong_password_and_unknown_user_answer_identically() {
    let app = TestApp::new();
    app.seed_user("alice", &modern_hash("secret1"), "user").await;

    let (wrong_status, wrong_body) = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "alice", "password": "wrong"})),
        )
        .await;
    let (missing_status, missing_body) = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "nobody", "password": "secret1"})),
        )
        .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, missing_body);
    assert_eq!(wrong_body["data"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn login_with_corrupted_stored_hash_is_rejected() {
    let app = TestApp::new();
    app.seed_user("alice", "plaintext-not-a-hash", "user").await;

    let (status, body) = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "alice", "password": "plaintext-not-a-hash"})),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["data"]["message"], "Invalid credentials");

    // Corrupted records are never touched by the upgrade path.
    let stored = app.repository.stored_user("alice").unwrap();
    assert_eq!(stored.password_hash, "plaintext-not-a-hash");
}

#[tokio::test]
async fn validate_endpoint_accepts_freshly_issued_token() {
    let app = TestApp::new();
    app.seed_user("alice", &modern_hash("secret1"), "admin").await;

    let (_, login_body) = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "alice", "password": "secret1"})),
        )
        .await;
    let token = login_body["data"]["token"].as_str().unwrap().to_string();

    let (status, body) = app
        .request("POST", "/api/auth/validate", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["valid"], true);
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["role"], "admin");
}

#[tokio::test]
async fn validate_endpoint_reports_garbage_token_as_invalid() {
    let app = TestApp::new();

    let (status, body) = app
        .request("POST", "/api/auth/validate", Some("not.a.token"), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["valid"], false);
    assert!(body["data"].get("username").is_none());
}

#[tokio::test]
async fn validate_endpoint_without_header_is_not_an_error() {
    let app = TestApp::new();

    let (status, body) = app.request("POST", "/api/auth/validate", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["valid"], false);
}

#[tokio::test]
async fn protected_route_rejects_anonymous_requests() {
    let app = TestApp::new();

    let (status, _) = app.request("GET", "/api/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_route_rejects_forged_token() {
    let app = TestApp::new();

    let forged = auth::JwtHandler::new(b"a-different-signing-secret-entirely!!")
        .encode(&auth::Claims::for_user("alice", "admin", 24))
        .unwrap();

    let (status, _) = app.request("GET", "/api/users", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn password_stats_counts_every_format() {
    let app = TestApp::new();
    app.seed_user("legacy1", &legacy_hash("pw"), "user").await;
    app.seed_user("legacy2", &legacy_hash("pw"), "user").await;
    app.seed_user("legacy3", &legacy_hash("pw"), "user").await;
    app.seed_user("modern1", &modern_hash("pw"), "user").await;
    app.seed_user("modern2", &modern_hash("pw"), "user").await;
    app.seed_user("broken", "garbage", "user").await;

    let token = app.issue_token("admin", "admin");
    let (status, body) = app
        .request("GET", "/api/auth/password-stats", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["total_users"], 6);
    assert_eq!(data["bcrypt_count"], 3);
    assert_eq!(data["argon2id_count"], 2);
    assert_eq!(data["unknown_count"], 1);
    assert_eq!(data["bcrypt_percentage"], 50.0);
    assert_eq!(data["argon2id_percentage"], 33.33);
    assert_eq!(data["migration_complete"], false);
}

#[tokio::test]
async fn password_stats_with_no_users_reports_zeroes() {
    let app = TestApp::new();

    let token = app.issue_token("admin", "admin");
    let (status, body) = app
        .request("GET", "/api/auth/password-stats", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["total_users"], 0);
    assert_eq!(data["argon2id_percentage"], 0.0);
    assert_eq!(data["bcrypt_percentage"], 0.0);
    assert_eq!(data["migration_complete"], true);
}

#[tokio::test]
async fn password_stats_reaches_complete_after_migration_logins() {
    let app = TestApp::new();
    app.seed_user("alice", &legacy_hash("secret1"), "user").await;
    app.seed_user("bob", &legacy_hash("secret2"), "user").await;

    for (username, password) in [("alice", "secret1"), ("bob", "secret2")] {
        let (status, _) = app
            .request(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({"username": username, "password": password})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let token = app.issue_token("admin", "admin");
    let (_, body) = app
        .request("GET", "/api/auth/password-stats", Some(&token), None)
        .await;

    let data = &body["data"];
    assert_eq!(data["bcrypt_count"], 0);
    assert_eq!(data["argon2id_count"], 2);
    assert_eq!(data["migration_complete"], true);
}

#[tokio::test]
async fn reset_password_changes_only_the_callers_account() {
    let app = TestApp::new();
    app.seed_user("alice", &modern_hash("secret1"), "user").await;
    app.seed_user("bob", &modern_hash("secret1"), "user").await;

    let (_, login_body) = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "alice", "password": "secret1"})),
        )
        .await;
    let token = login_body["data"]["token"].as_str().unwrap().to_string();

    let (status, _) = app
        .request(
            "POST",
            "/api/users/reset-password",
            Some(&token),
            Some(json!({"current_password": "secret1", "new_password": "changed7"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // Old password is dead, new one works.
    let (status, _) = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "alice", "password": "secret1"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "alice", "password": "changed7"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // Bob, who shares the same original password, is untouched.
    let (status, _) = app
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "bob", "password": "secret1"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn reset_password_rejects_wrong_current_password() {
    let app = TestApp::new();
    app.seed_user("alice", &modern_hash("secret1"), "user").await;
    let token = app.issue_token("alice", "user");

    let (status, body) = app
        .request(
            "POST",
            "/api/users/reset-password",
            Some(&token),
            Some(json!({"current_password": "wrong", "new_password": "changed7"})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["message"], "Current password is incorrect");
}

#[tokio::test]
async fn reset_password_upgrades_legacy_account_in_place() {
    let app = TestApp::new();
    app.seed_user("alice", &legacy_hash("secret1"), "user").await;
    let token = app.issue_token("alice", "user");

    let (status, _) = app
        .request(
            "POST",
            "/api/users/reset-password",
            Some(&token),
            Some(json!({"current_password": "secret1", "new_password": "changed7"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let stored = app.repository.stored_user("alice").unwrap();
    assert!(stored.password_hash.starts_with("$argon2id$"));
}
