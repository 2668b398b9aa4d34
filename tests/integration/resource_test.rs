//! Integration tests for the resource routes.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nnot-really-an-image";

#[tokio::test]
async fn test_root_and_fallback() {
    let app = helpers::TestApp::new().await;

    let root = app.request("GET", "/", None, None).await;
    assert_eq!(root.status, StatusCode::OK);
    assert_eq!(root.message(), "Welcome to ReverseVibe API");
    assert_eq!(root.body["version"], "1.0.0");

    let missing = app.request("GET", "/nowhere", None, None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["success"], false);
    assert_eq!(missing.message(), "Route not found");
}

#[tokio::test]
async fn test_user_listing_is_projected() {
    let app = helpers::TestApp::seeded().await;

    let response = app.request("GET", "/users", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["count"], 4);
    for user in response.body["data"].as_array().expect("list") {
        assert!(user.get("password").is_none());
        assert!(user.get("phone").is_none());
        assert!(user.get("secretNotes").is_none());
        assert!(user.get("role").is_some());
    }

    let id = app.user_id("admin@reversevibe.com").await;
    let one = app.request("GET", &format!("/users/{id}"), None, None).await;
    assert_eq!(one.body["data"]["username"], "admin");
    assert!(one.body["data"].get("secretNotes").is_none());
}

#[tokio::test]
async fn test_user_search_exposes_full_records() {
    let app = helpers::TestApp::seeded().await;

    let response = app
        .request("GET", "/users/search?query=ADMIN", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["count"], 1);
    let admin = &response.body["data"][0];
    assert_eq!(admin["secretNotes"], "CTF{dummy_flag}");
    assert!(admin.get("password").is_none());

    let everyone = app
        .request("GET", "/users/search?query=.*", None, None)
        .await;
    assert_eq!(everyone.body["count"], 4);

    let broken = app
        .request("GET", "/users/search?query=(", None, None)
        .await;
    assert_eq!(broken.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_invalid_path_id_is_bad_request() {
    let app = helpers::TestApp::new().await;
    let response = app.request("GET", "/users/not-an-id", None, None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let missing = app
        .request(
            "GET",
            &format!("/users/{}", reversevibe_core::types::UserId::new()),
            None,
            None,
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.message(), "User not found");
}

#[tokio::test]
async fn test_any_user_can_edit_another() {
    let app = helpers::TestApp::seeded().await;
    let (_, token) = app.register_user("vandal").await;
    let victim = app.user_id("user1@reversevibe.com").await;

    let response = app
        .request(
            "PUT",
            &format!("/users/{victim}"),
            Some(json!({ "bio": "pwned" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["bio"], "pwned");
    assert_eq!(response.body["data"]["phone"], "+1-555-123-4567");
}

#[tokio::test]
async fn test_update_cannot_take_another_users_email() {
    let app = helpers::TestApp::seeded().await;
    let (me, token) = app.register_user("impostor").await;
    let id = me["id"].as_str().expect("id");

    let response = app
        .request(
            "PUT",
            &format!("/users/{id}"),
            Some(json!({ "email": "admin@reversevibe.com", "username": "admin" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["success"], false);

    let matching = app
        .state
        .db
        .users
        .find_all()
        .await
        .expect("users")
        .into_iter()
        .filter(|u| u.email == "admin@reversevibe.com")
        .count();
    assert_eq!(matching, 1);
    app.login("admin@reversevibe.com", "admin123").await;
    app.login("impostor@test.com", "password123").await;

    // Role stays writable through the same route.
    let promoted = app
        .request(
            "PUT",
            &format!("/users/{id}"),
            Some(json!({ "role": "admin", "email": "impostor@test.com" })),
            Some(&token),
        )
        .await;
    assert_eq!(promoted.status, StatusCode::OK);
    assert_eq!(promoted.body["data"]["role"], "admin");
}

#[tokio::test]
async fn test_malformed_json_body_is_bad_request() {
    let app = helpers::TestApp::new().await;

    let plain = app
        .send(
            "POST",
            "/auth/login",
            "text/plain",
            br#"{"email":"a@test.com","password":"x"}"#.to_vec(),
            None,
        )
        .await;
    assert_eq!(plain.status, StatusCode::BAD_REQUEST);
    assert_eq!(plain.body["success"], false);
    assert!(!plain.message().is_empty());

    let broken = app
        .send("POST", "/auth/register", "application/json", b"{".to_vec(), None)
        .await;
    assert_eq!(broken.status, StatusCode::BAD_REQUEST);
    assert_eq!(broken.body["success"], false);

    let (_, token) = app.register_user("typo").await;
    let wrong_shape = app
        .request(
            "PUT",
            "/moderation/posts/00000000-0000-0000-0000-000000000000/visibility",
            Some(json!({ "isHidden": "yes" })),
            Some(&token),
        )
        .await;
    // The gate runs before the body is read.
    assert_eq!(wrong_shape.status, StatusCode::FORBIDDEN);

    let wrong_shape = app
        .request(
            "POST",
            "/posts/00000000-0000-0000-0000-000000000000/comment",
            Some(json!({ "content": 42 })),
            Some(&token),
        )
        .await;
    assert_eq!(wrong_shape.status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_shape.body["success"], false);
}

#[tokio::test]
async fn test_post_lifecycle() {
    let app = helpers::TestApp::new().await;
    let (_, token) = app.register_user("poster").await;

    let created = app
        .request(
            "POST",
            "/posts",
            Some(json!({ "content": "hello world", "metadata": { "mood": "good" } })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.body["data"]["id"].as_str().expect("id").to_string();
    assert_eq!(created.body["data"]["isHidden"], false);

    let comment = app
        .request(
            "POST",
            &format!("/posts/{id}/comment"),
            Some(json!({ "content": "first" })),
            Some(&token),
        )
        .await;
    assert_eq!(comment.status, StatusCode::CREATED);
    assert_eq!(comment.body["data"]["comments"][0]["content"], "first");

    let fetched = app.request("GET", &format!("/posts/{id}"), None, None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["data"]["user"]["username"], "poster");
    assert_eq!(
        fetched.body["data"]["comments"][0]["user"]["username"],
        "poster"
    );

    let listed = app.request("GET", "/posts", None, None).await;
    assert_eq!(listed.body["count"], 1);

    let found = app
        .request("GET", "/posts/search?query=HELLO", None, None)
        .await;
    assert_eq!(found.body["count"], 1);

    let deleted = app
        .request("DELETE", &format!("/posts/{id}"), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["data"], json!({}));
}

#[tokio::test]
async fn test_post_requires_content() {
    let app = helpers::TestApp::new().await;
    let (_, token) = app.register_user("silent").await;
    let response = app
        .request("POST", "/posts", Some(json!({})), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_hidden_post_revealed_by_any_bearer_header() {
    let app = helpers::TestApp::seeded().await;
    let hidden = app
        .state
        .db
        .posts
        .find_all()
        .await
        .expect("posts")
        .into_iter()
        .find(|p| p.is_hidden)
        .expect("seeded hidden post");
    let path = format!("/posts/{}", hidden.id);

    let anonymous = app.request("GET", &path, None, None).await;
    assert_eq!(anonymous.status, StatusCode::NOT_FOUND);
    assert_eq!(anonymous.message(), "Post not found");

    let bogus = app
        .request_with_authorization("GET", &path, None, Some("Bearer nonsense"))
        .await;
    assert_eq!(bogus.status, StatusCode::OK);
    assert_eq!(bogus.body["data"]["metadata"]["secretKey"], "CTF{dummy_flag}");

    let listed = app.request("GET", "/posts", None, None).await;
    assert_eq!(listed.body["count"], 3);
    let searched = app
        .request("GET", "/posts/search?query=flag", None, None)
        .await;
    assert_eq!(searched.body["count"], 0);
}

#[tokio::test]
async fn test_anyone_can_edit_or_delete_any_post() {
    let app = helpers::TestApp::seeded().await;
    let (_, token) = app.register_user("griefer").await;
    let admin = app.user_id("admin@reversevibe.com").await;
    let post = app
        .state
        .db
        .posts
        .find_all()
        .await
        .expect("posts")
        .into_iter()
        .find(|p| p.user == admin && !p.is_hidden)
        .expect("admin post");

    let updated = app
        .request(
            "PUT",
            &format!("/posts/{}", post.id),
            Some(json!({ "content": "defaced", "isHidden": true })),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["content"], "defaced");
    assert_eq!(updated.body["data"]["isHidden"], true);

    let deleted = app
        .request("DELETE", &format!("/posts/{}", post.id), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
}

#[tokio::test]
async fn test_moderator_toggles_visibility() {
    let app = helpers::TestApp::seeded().await;
    let token = app.login("mod@reversevibe.com", "user123").await;
    let post = app
        .state
        .db
        .posts
        .find_visible()
        .await
        .expect("posts")
        .remove(0);

    let response = app
        .request(
            "PUT",
            &format!("/moderation/posts/{}/visibility", post.id),
            Some(json!({ "isHidden": true })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["isHidden"], true);

    let listed = app.request("GET", "/posts", None, None).await;
    assert_eq!(listed.body["count"], 2);
}

#[tokio::test]
async fn test_follow_flow() {
    let app = helpers::TestApp::seeded().await;
    let (me, token) = app.register_user("fan").await;
    let admin = app.user_id("admin@reversevibe.com").await;

    let missing = app
        .request(
            "POST",
            "/follow",
            Some(json!({ "userId": reversevibe_core::types::UserId::new() })),
            Some(&token),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.message(), "User not found");

    let follow = app
        .request(
            "POST",
            "/follow",
            Some(json!({ "userId": admin })),
            Some(&token),
        )
        .await;
    assert_eq!(follow.status, StatusCode::CREATED);
    let follow_id = follow.body["data"]["id"].as_str().expect("id").to_string();

    let followers = app
        .request("GET", &format!("/follow/followers/{admin}"), None, None)
        .await;
    assert_eq!(followers.body["count"], 3);
    let fan = followers.body["data"]
        .as_array()
        .expect("list")
        .iter()
        .find(|f| f["follower"]["username"] == "fan")
        .expect("new follower listed");
    assert!(fan["follower"].get("phone").is_some());

    let following = app
        .request("GET", "/follow/following", None, Some(&token))
        .await;
    assert_eq!(following.body["count"], 1);
    assert_eq!(following.body["data"][0]["following"]["username"], "admin");
    assert_eq!(following.body["data"][0]["follower"], me["id"]);

    let unfollow = app
        .request("DELETE", &format!("/follow/{follow_id}"), None, Some(&token))
        .await;
    assert_eq!(unfollow.status, StatusCode::OK);

    let again = app
        .request("DELETE", &format!("/follow/{follow_id}"), None, Some(&token))
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    assert_eq!(again.message(), "Follow relationship not found");
}

#[tokio::test]
async fn test_admin_only_notifications_filtered_by_role() {
    let app = helpers::TestApp::seeded().await;
    let (me, token) = app.register_user("reader").await;
    let id = me["id"].as_str().expect("id");

    for admin_only in [false, true] {
        let response = app
            .request(
                "POST",
                "/notifications",
                Some(json!({
                    "recipient": id,
                    "type": "system",
                    "message": format!("admin only: {admin_only}"),
                    "isAdminOnly": admin_only,
                })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let mine = app.request("GET", "/notifications", None, Some(&token)).await;
    assert_eq!(mine.body["count"], 1);
    assert_eq!(mine.body["data"][0]["sender"]["username"], "reader");

    let secret = app
        .state
        .db
        .notifications
        .admin_only()
        .await
        .expect("list")
        .into_iter()
        .find(|n| n.message == "admin only: true")
        .expect("created");

    let denied = app
        .request(
            "GET",
            &format!("/notifications/{}", secret.id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert_eq!(denied.message(), "Not authorized to access this notification");

    // Promote through the unfiltered profile update; the same token now sees it.
    app.request(
        "PUT",
        &format!("/users/{id}"),
        Some(json!({ "role": "moderator" })),
        Some(&token),
    )
    .await;
    let mine = app.request("GET", "/notifications", None, Some(&token)).await;
    assert_eq!(mine.body["count"], 2);

    let read = app
        .request(
            "PUT",
            &format!("/notifications/{}", secret.id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(read.status, StatusCode::OK);
    assert_eq!(read.body["data"]["read"], true);
}

#[tokio::test]
async fn test_notification_requires_recipient() {
    let app = helpers::TestApp::new().await;
    let (_, token) = app.register_user("sender").await;
    let response = app
        .request(
            "POST",
            "/notifications",
            Some(json!({ "type": "system", "message": "hi" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.message().contains("recipient"));
}

#[tokio::test]
async fn test_media_upload_and_fetch() {
    let app = helpers::TestApp::new().await;
    let (_, token) = app.register_user("photographer").await;
    let auth = format!("Bearer {token}");

    let (content_type, body) = helpers::multipart(
        &[
            ("isPrivate", "true"),
            ("exifData", r#"{"make":"Canon"}"#),
        ],
        Some(("../../shot.png", "image/png", PNG_BYTES)),
    );
    let uploaded = app
        .send("POST", "/media/upload", &content_type, body, Some(&auth))
        .await;
    assert_eq!(uploaded.status, StatusCode::CREATED, "{:?}", uploaded.body);
    let media = &uploaded.body["data"];
    assert_eq!(media["filename"], "shot.png");
    assert_eq!(media["isPrivate"], true);
    assert_eq!(media["exifData"]["make"], "Canon");
    assert_eq!(media["size"], PNG_BYTES.len());
    assert!(app.upload_dir.join("shot.png").exists());
    let id = media["id"].as_str().expect("id").to_string();

    let mine = app.request("GET", "/media", None, Some(&token)).await;
    assert_eq!(mine.body["count"], 1);

    let file = app
        .request("GET", &format!("/media/file/{id}"), None, Some(&token))
        .await;
    assert_eq!(file.status, StatusCode::OK);
    assert_eq!(file.bytes, PNG_BYTES);

    let served = app.request("GET", "/uploads/shot.png", None, None).await;
    assert_eq!(served.status, StatusCode::OK);
    assert_eq!(served.bytes, PNG_BYTES);

    let deleted = app
        .request("DELETE", &format!("/media/{id}"), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert!(!app.upload_dir.join("shot.png").exists());
}

#[tokio::test]
async fn test_media_upload_rejections() {
    let app = helpers::TestApp::new().await;
    let (_, token) = app.register_user("uploader").await;
    let auth = format!("Bearer {token}");

    let (content_type, body) =
        helpers::multipart(&[], Some(("shell.php", "application/x-php", b"<?php")));
    let wrong_type = app
        .send("POST", "/media/upload", &content_type, body, Some(&auth))
        .await;
    assert_eq!(wrong_type.status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_type.message(), "File type not allowed");

    let (content_type, body) = helpers::multipart(&[("isPrivate", "false")], None);
    let no_file = app
        .send("POST", "/media/upload", &content_type, body, Some(&auth))
        .await;
    assert_eq!(no_file.status, StatusCode::BAD_REQUEST);
    assert_eq!(no_file.message(), "Please upload a file");
}

#[tokio::test]
async fn test_media_readable_by_any_session() {
    let app = helpers::TestApp::seeded().await;
    let (_, token) = app.register_user("curious").await;
    let private = app
        .state
        .db
        .media
        .find_all()
        .await
        .expect("media")
        .into_iter()
        .find(|m| m.is_private)
        .expect("seeded private media");

    let response = app
        .request("GET", &format!("/media/{}", private.id), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["metadata"]["secretKey"], "CTF{dummy_flag}");

    let file = app
        .request(
            "GET",
            &format!("/media/file/{}", private.id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(file.status, StatusCode::NOT_FOUND);
    assert_eq!(file.message(), "File not found");
}
