//! User document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use reversevibe_core::error::AppError;
use reversevibe_core::types::UserId;

use super::role::UserRole;

/// Placeholder stored in every new account's verification token.
pub const DEFAULT_VERIFICATION_TOKEN: &str = "CTF{n0t_4_r34l_fl4g_just_4_placeholder}";

/// Picture assigned to accounts that never uploaded one.
pub const DEFAULT_PROFILE_PICTURE: &str = "default.jpg";

/// A stored user account.
///
/// `password` is `None` only on copies that had it stripped for display;
/// stored records always carry a value. `role` is optional so that a raw
/// update can clear it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Primary key.
    pub id: UserId,
    /// Display name, unique.
    pub username: String,
    /// Login email, unique.
    pub email: String,
    /// Password hash (or whatever a raw update last wrote here).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Role tag consulted by the role gates.
    #[serde(default)]
    pub role: Option<UserRole>,
    /// Profile picture file name.
    #[serde(default = "default_profile_picture")]
    pub profile_picture: String,
    /// Free-form biography.
    #[serde(default)]
    pub bio: String,
    /// Phone number.
    #[serde(default)]
    pub phone: String,
    /// Private notes.
    #[serde(default)]
    pub secret_notes: String,
    /// Email verification token.
    #[serde(default = "default_verification_token")]
    pub verification_token: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Builds a new user from an unrestricted caller-supplied field set.
    ///
    /// Fields are overlaid on the defaults without an allow-list, so `role`
    /// and every other attribute may be chosen by the caller. Only `id` is
    /// always generated. The password is kept as given; hashing is the
    /// caller's job.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, AppError> {
        let mut document = Map::new();
        document.insert("id".to_string(), json!(UserId::new()));
        document.insert("role".to_string(), json!(UserRole::User));
        document.insert("profilePicture".to_string(), json!(DEFAULT_PROFILE_PICTURE));
        document.insert(
            "verificationToken".to_string(),
            json!(DEFAULT_VERIFICATION_TOKEN),
        );
        document.insert("createdAt".to_string(), json!(Utc::now()));

        for (key, value) in fields {
            if key == "id" {
                continue;
            }
            let value = match (key.as_str(), value) {
                ("username" | "email", Value::String(s)) => Value::String(s.trim().to_string()),
                _ => value.clone(),
            };
            document.insert(key.clone(), value);
        }

        for required in ["username", "email", "password"] {
            match document.get(required) {
                Some(Value::String(s)) if !s.is_empty() => {}
                _ => {
                    return Err(AppError::validation(format!(
                        "User validation failed: {required} is required"
                    )));
                }
            }
        }

        serde_json::from_value(Value::Object(document))
            .map_err(|e| AppError::validation(format!("User validation failed: {e}")))
    }

    /// Returns a copy with the password removed.
    pub fn without_password(mut self) -> Self {
        self.password = None;
        self
    }

    /// Whether the role is moderator or admin.
    pub fn is_staff(&self) -> bool {
        matches!(self.role, Some(UserRole::Moderator | UserRole::Admin))
    }
}

fn default_profile_picture() -> String {
    DEFAULT_PROFILE_PICTURE.to_string()
}

fn default_verification_token() -> String {
    DEFAULT_VERIFICATION_TOKEN.to_string()
}
