//! Demo data loaded at startup in development.

use chrono::Utc;
use serde_json::{Value, json};
use tracing::info;

use reversevibe_core::error::AppError;
use reversevibe_core::result::AppResult;
use reversevibe_core::types::{MediaId, NotificationId, UserId};
use reversevibe_entity::{Follow, Media, Notification, NotificationKind, Post, User};

use crate::Database;

const FLAG: &str = "CTF{dummy_flag}";

/// Clears every collection and loads the demo accounts and content.
///
/// `hash_password` turns each plaintext demo password into the stored form.
pub async fn seed_database(
    db: &Database,
    hash_password: impl Fn(&str) -> AppResult<String>,
) -> AppResult<()> {
    db.clear();
    info!("Database cleared");

    let admin_password = hash_password("admin123")?;
    let user_password = hash_password("user123")?;

    let admin = create_user(
        db,
        json!({
            "username": "admin",
            "email": "admin@reversevibe.com",
            "password": admin_password,
            "role": "admin",
            "phone": "+1-555-CTF-FLAG",
            "secretNotes": FLAG,
            "verificationToken": FLAG,
        }),
    )
    .await?;
    let user1 = create_user(
        db,
        json!({
            "username": "user1",
            "email": "user1@reversevibe.com",
            "password": user_password,
            "role": "user",
            "phone": "+1-555-123-4567",
            "bio": "Regular user",
        }),
    )
    .await?;
    let user2 = create_user(
        db,
        json!({
            "username": "user2",
            "email": "user2@reversevibe.com",
            "password": user_password,
            "role": "user",
            "phone": "+1-555-765-4321",
            "bio": "Another regular user",
        }),
    )
    .await?;
    create_user(
        db,
        json!({
            "username": "moderator",
            "email": "mod@reversevibe.com",
            "password": user_password,
            "role": "moderator",
            "phone": "+1-555-MOD-FLAG",
            "secretNotes": FLAG,
        }),
    )
    .await?;
    info!("Users created");

    for post in [
        Post::new(
            user1.id,
            "Hello ReverseVibe! This is my first post.",
            None,
            false,
            None,
        ),
        Post::new(user2.id, "I love this platform!", None, false, None),
        Post::new(
            admin.id,
            "Welcome to ReverseVibe. This is an admin post.",
            None,
            false,
            None,
        ),
        Post::new(
            admin.id,
            format!("This is a hidden post with a flag: {FLAG}"),
            None,
            true,
            Some(json!({ "secretKey": FLAG })),
        ),
    ] {
        db.posts.create(post).await?;
    }
    info!("Posts created");

    for (follower, following) in [
        (user1.id, admin.id),
        (user2.id, admin.id),
        (user2.id, user1.id),
    ] {
        db.follows.create(Follow::new(follower, following)).await?;
    }
    info!("Follows created");

    for notification in [
        notification(
            user1.id,
            admin.id,
            NotificationKind::System,
            "Welcome to ReverseVibe!",
            false,
            json!({}),
        ),
        notification(
            user2.id,
            admin.id,
            NotificationKind::System,
            "Welcome to ReverseVibe!",
            false,
            json!({}),
        ),
        notification(
            admin.id,
            admin.id,
            NotificationKind::Admin,
            &format!("System check required. Flag: {FLAG}"),
            true,
            json!({ "priority": "high", "secretData": FLAG }),
        ),
    ] {
        db.notifications.create(notification).await?;
    }
    info!("Notifications created");

    db.media
        .create(media(
            user1.id,
            "profile.jpg",
            "image/jpeg",
            1024,
            json!({ "make": "Canon", "model": "EOS R5", "secretFlag": FLAG }),
            false,
            json!({}),
        ))
        .await?;
    db.media
        .create(media(
            admin.id,
            "admin_document.pdf",
            "application/pdf",
            2048,
            json!({}),
            true,
            json!({ "description": "Admin only document", "secretKey": FLAG }),
        ))
        .await?;
    info!("Media entries created");

    info!("Database seeded successfully");
    Ok(())
}

async fn create_user(db: &Database, fields: Value) -> AppResult<User> {
    let Value::Object(fields) = fields else {
        return Err(AppError::internal("Seed user must be a JSON object"));
    };
    db.users.create(User::from_fields(&fields)?).await
}

fn notification(
    recipient: UserId,
    sender: UserId,
    kind: NotificationKind,
    message: &str,
    is_admin_only: bool,
    metadata: Value,
) -> Notification {
    Notification {
        id: NotificationId::new(),
        recipient,
        sender,
        kind,
        reference: None,
        reference_model: None,
        message: message.to_string(),
        is_admin_only,
        metadata,
        read: false,
        created_at: Utc::now(),
    }
}

fn media(
    user: UserId,
    filename: &str,
    file_type: &str,
    size: u64,
    exif_data: Value,
    is_private: bool,
    metadata: Value,
) -> Media {
    Media {
        id: MediaId::new(),
        user,
        filename: filename.to_string(),
        file_type: file_type.to_string(),
        file_path: format!("./uploads/{filename}"),
        size,
        exif_data,
        is_private,
        metadata,
        created_at: Utc::now(),
    }
}
