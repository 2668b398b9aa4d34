//! Notification handlers.
//!
//! None of these check that the caller is the recipient.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use serde_json::{Value, json};
use uuid::Uuid;

use reversevibe_core::error::AppError;
use reversevibe_core::types::{NotificationId, UserId};
use reversevibe_database::populate;
use reversevibe_entity::{Notification, projection};

use super::with_users;
use crate::dto::request::CreateNotificationRequest;
use crate::dto::response::ApiResponse;
use crate::extractors::{CurrentSession, JsonBody, parse_id};
use crate::state::AppState;

const NOTIFICATION_NOT_FOUND: &str = "Notification not found";

/// GET /notifications
///
/// Admin-only notifications are included for moderators and admins.
pub async fn list_notifications(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Result<Json<ApiResponse<Vec<Value>>>, AppError> {
    let caller = session.user()?;
    let notifications = state
        .db
        .notifications
        .for_recipient(caller.id, caller.is_staff())
        .await?;
    let notifications = with_users(
        &state.db.users,
        &notifications,
        "sender",
        projection::USER_AUTHOR,
    )
    .await?;
    Ok(Json(ApiResponse::list(notifications)))
}

/// GET /notifications/admin
pub async fn admin_notifications(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Value>>>, AppError> {
    let notifications = state.db.notifications.admin_only().await?;
    let mut notifications = with_users(
        &state.db.users,
        &notifications,
        "sender",
        projection::USER_AUTHOR,
    )
    .await?;
    for notification in &mut notifications {
        populate::populate_user(
            &state.db.users,
            notification,
            "recipient",
            projection::USER_AUTHOR,
        )
        .await?;
    }
    Ok(Json(ApiResponse::list(notifications)))
}

/// GET /notifications/{id}
pub async fn get_notification(
    State(state): State<AppState>,
    session: CurrentSession,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let id: NotificationId = parse_id(&id)?;
    let notification = state
        .db
        .notifications
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(NOTIFICATION_NOT_FOUND))?;

    if notification.is_admin_only && !session.user()?.is_staff() {
        return Err(AppError::forbidden(
            "Not authorized to access this notification",
        ));
    }

    let mut notification = serde_json::to_value(&notification)?;
    populate::populate_user(
        &state.db.users,
        &mut notification,
        "sender",
        projection::USER_AUTHOR,
    )
    .await?;
    Ok(Json(ApiResponse::ok(notification)))
}

/// PUT /notifications/{id}
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Notification>>, AppError> {
    let id: NotificationId = parse_id(&id)?;
    let notification = state
        .db
        .notifications
        .mark_read(id)
        .await?
        .ok_or_else(|| AppError::not_found(NOTIFICATION_NOT_FOUND))?;
    Ok(Json(ApiResponse::ok(notification)))
}

/// DELETE /notifications/{id}
pub async fn delete_notification(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let id: NotificationId = parse_id(&id)?;
    state
        .db
        .notifications
        .delete(id)
        .await?
        .ok_or_else(|| AppError::not_found(NOTIFICATION_NOT_FOUND))?;
    Ok(Json(ApiResponse::empty()))
}

/// POST /notifications
///
/// Any caller may address any recipient, admin-only flag included.
pub async fn create_notification(
    State(state): State<AppState>,
    session: CurrentSession,
    JsonBody(req): JsonBody<CreateNotificationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Notification>>), AppError> {
    let sender = session.user()?.id;
    let recipient: UserId = parse_id(&required(req.recipient, "recipient")?)?;
    let kind = required(req.kind, "type")?;
    let message = required(req.message, "message")?;
    let reference = req
        .reference
        .as_deref()
        .map(parse_id::<Uuid>)
        .transpose()?;

    let notification = state
        .db
        .notifications
        .create(Notification {
            id: NotificationId::new(),
            recipient,
            sender,
            kind,
            reference,
            reference_model: req.reference_model,
            message,
            is_admin_only: req.is_admin_only.unwrap_or(false),
            metadata: req.metadata.unwrap_or_else(|| json!({})),
            read: false,
            created_at: Utc::now(),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(notification))))
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| {
        AppError::validation(format!("Notification validation failed: {field} is required"))
    })
}
