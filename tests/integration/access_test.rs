//! Integration tests for route access rules and role gates.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use reversevibe_api::{RouteAccess, access_table};
use reversevibe_auth::RoleGate;

#[tokio::test]
async fn test_moderator_gate_follows_current_role() {
    let app = helpers::TestApp::seeded().await;
    let (user, token) = app.register_user("climber").await;
    let id = user["id"].as_str().expect("id");

    let denied = app
        .request("GET", "/moderation/posts", None, Some(&token))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert_eq!(denied.message(), "Not authorized to access this route");

    let promoted = app
        .request(
            "PUT",
            &format!("/users/{id}"),
            Some(json!({ "role": "moderator" })),
            Some(&token),
        )
        .await;
    assert_eq!(promoted.status, StatusCode::OK);
    assert_eq!(promoted.body["data"]["role"], "moderator");

    // Same token, new role.
    let allowed = app
        .request("GET", "/moderation/posts", None, Some(&token))
        .await;
    assert_eq!(allowed.status, StatusCode::OK);
    assert_eq!(allowed.body["count"], 4);
}

#[tokio::test]
async fn test_administrator_gate_denies_moderator() {
    let app = helpers::TestApp::seeded().await;
    let token = app.login("mod@reversevibe.com", "user123").await;

    for path in ["/admin/users", "/admin/posts", "/admin/media", "/admin/logs"] {
        let response = app.request("GET", path, None, Some(&token)).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN, "{path}");
        assert_eq!(response.message(), "Not authorized to access this route");
    }
}

#[tokio::test]
async fn test_administrator_gate_admits_admin() {
    let app = helpers::TestApp::seeded().await;
    let token = app.login("admin@reversevibe.com", "admin123").await;

    let logs = app.request("GET", "/admin/logs", None, Some(&token)).await;
    assert_eq!(logs.status, StatusCode::OK);
    assert_eq!(logs.body["count"], 3);
    assert!(logs.body["data"][1]["details"]
        .as_str()
        .expect("details")
        .contains("CTF{l0g_3xp0sur3_vuln}"));

    let users = app.request("GET", "/admin/users", None, Some(&token)).await;
    assert!(users.body["data"][0].get("password").is_some());
}

#[tokio::test]
async fn test_gate_runs_after_resolution() {
    let app = helpers::TestApp::new().await;

    let anonymous = app.request("GET", "/admin/users", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let garbage = app
        .request("GET", "/admin/users", None, Some("garbage"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.message(), "Token is not valid");
}

#[tokio::test]
async fn test_debug_endpoint_open_to_any_session() {
    let app = helpers::TestApp::seeded().await;
    let (_, token) = app.register_user("snoop").await;

    let response = app.request("GET", "/admin/debug", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    let system = &response.body["data"]["system"];
    assert_eq!(system["jwtSecret"], helpers::SECRET);
    assert_eq!(system["secretFlag"], "You need admin access to see this flag");
    assert_eq!(
        response.body["data"]["request"]["headers"]["authorization"],
        format!("Bearer {token}")
    );

    let admin = app.login("admin@reversevibe.com", "admin123").await;
    let response = app.request("GET", "/admin/debug", None, Some(&admin)).await;
    assert_eq!(
        response.body["data"]["system"]["secretFlag"],
        "CTF{d3bug_3ndp01nt_vuln3r4bl3}"
    );
}

#[tokio::test]
async fn test_admin_notifications_need_only_a_role_field() {
    let app = helpers::TestApp::seeded().await;
    let (user, token) = app.register_user("plain").await;
    let id = user["id"].as_str().expect("id");

    let response = app
        .request("GET", "/notifications/admin", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["count"], 1);
    assert_eq!(response.body["data"][0]["recipient"]["username"], "admin");

    app.request(
        "PUT",
        &format!("/users/{id}"),
        Some(json!({ "role": null })),
        Some(&token),
    )
    .await;

    let response = app
        .request("GET", "/notifications/admin", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_secret_challenge_depends_on_role() {
    let app = helpers::TestApp::seeded().await;
    let (_, token) = app.register_user("seeker").await;

    let response = app
        .request("GET", "/admin/challenges/secret", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.get("flag").is_none());
    assert!(response.body.get("hint").is_some());

    let moderator = app.login("mod@reversevibe.com", "user123").await;
    let response = app
        .request("GET", "/admin/challenges/secret", None, Some(&moderator))
        .await;
    assert_eq!(response.body["flag"], "CTF{h1dd3n_3ndp01nt_f0und}");
}

#[tokio::test]
async fn test_self_promotion_to_admin() {
    let app = helpers::TestApp::new().await;
    let (user, token) = app.register_user("upstart").await;
    let id = user["id"].as_str().expect("id");

    app.request(
        "PUT",
        &format!("/users/{id}"),
        Some(json!({ "role": "admin" })),
        Some(&token),
    )
    .await;

    let response = app.request("GET", "/admin/users", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[test]
fn test_access_table_lists_gated_routes() {
    let gated: Vec<_> = access_table()
        .into_iter()
        .filter(|r| matches!(r.access, RouteAccess::Gated(_)))
        .map(|r| r.path)
        .collect();

    assert!(gated.contains(&"/admin/users"));
    assert!(gated.contains(&"/moderation/posts"));
    assert!(gated.contains(&"/notifications/admin"));
    assert!(!gated.contains(&"/admin/debug"));
    assert!(access_table().iter().any(|r| {
        r.path == "/notifications/admin" && r.access == RouteAccess::Gated(RoleGate::RoleFieldPresent)
    }));
}
