//! User repository implementation.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::{Map, Value};

use reversevibe_core::error::AppError;
use reversevibe_core::result::AppResult;
use reversevibe_core::types::UserId;
use reversevibe_entity::{User, UserRole};

use crate::search;
use crate::store::Collection;

/// Repository for user lookups and raw updates.
///
/// Usernames and emails are unique. Both are claimed in an index before a
/// record is written, on create and on update alike.
#[derive(Debug, Clone)]
pub struct UserRepository {
    users: Arc<Collection<User>>,
    usernames: Arc<DashMap<String, UserId>>,
    emails: Arc<DashMap<String, UserId>>,
}

impl Default for UserRepository {
    fn default() -> Self {
        Self {
            users: Arc::new(Collection::new("User")),
            usernames: Arc::new(DashMap::new()),
            emails: Arc::new(DashMap::new()),
        }
    }
}

/// Reserves `key` for `owner`. Re-claiming a key already held by `owner`
/// succeeds; returns whether a new reservation was made.
fn claim(
    index: &DashMap<String, UserId>,
    field: &str,
    key: &str,
    owner: UserId,
) -> AppResult<bool> {
    match index.entry(key.to_string()) {
        Entry::Occupied(entry) if *entry.get() == owner => Ok(false),
        Entry::Occupied(_) => Err(AppError::conflict(format!(
            "User with {field} '{key}' already exists"
        ))),
        Entry::Vacant(entry) => {
            entry.insert(owner);
            Ok(true)
        }
    }
}

/// Drops `key` from the index if `owner` still holds it.
fn release(index: &DashMap<String, UserId>, key: &str, owner: UserId) {
    index.remove_if(key, |_, holder| *holder == owner);
}

impl UserRepository {
    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.get(id))
    }

    /// Find a user by exact email.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let Some(id) = self.emails.get(email).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        Ok(self.users.get(id))
    }

    /// All users, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<User>> {
        Ok(self.users.find(|_| true))
    }

    /// Users with the given role value.
    pub async fn find_by_role(&self, role: UserRole) -> AppResult<Vec<User>> {
        Ok(self.users.find(|u| u.role == Some(role)))
    }

    /// Users whose username or email matches `pattern`.
    pub async fn search(&self, pattern: &str) -> AppResult<Vec<User>> {
        let re = search::compile(pattern)?;
        Ok(self
            .users
            .find(|u| re.is_match(&u.username) || re.is_match(&u.email)))
    }

    /// Insert a new user, enforcing unique username and email.
    pub async fn create(&self, user: User) -> AppResult<User> {
        self.claim_keys(user.id, &user.username, &user.email)?;
        Ok(self.users.insert(user))
    }

    /// Overlay caller-supplied fields onto a user record without filtering.
    ///
    /// Any field may change, but a username or email held by another user
    /// is a conflict.
    pub async fn update_fields(
        &self,
        id: UserId,
        fields: &Map<String, Value>,
    ) -> AppResult<Option<User>> {
        let Some(current) = self.users.get(id) else {
            return Ok(None);
        };

        let username = new_key(fields, "username").unwrap_or(current.username.as_str());
        let email = new_key(fields, "email").unwrap_or(current.email.as_str());
        let (new_username, new_email) = self.claim_keys(id, username, email)?;

        match self.users.patch(id, fields) {
            Ok(Some(updated)) => {
                if updated.username != current.username {
                    release(&self.usernames, &current.username, id);
                }
                if updated.email != current.email {
                    release(&self.emails, &current.email, id);
                }
                Ok(Some(updated))
            }
            other => {
                if new_username {
                    release(&self.usernames, username, id);
                }
                if new_email {
                    release(&self.emails, email, id);
                }
                other
            }
        }
    }

    /// Delete a user.
    pub async fn delete(&self, id: UserId) -> AppResult<Option<User>> {
        let removed = self.users.remove(id);
        if let Some(user) = &removed {
            release(&self.usernames, &user.username, id);
            release(&self.emails, &user.email, id);
        }
        Ok(removed)
    }

    /// Number of stored users.
    pub async fn count(&self) -> AppResult<usize> {
        Ok(self.users.len())
    }

    /// Remove every user.
    pub fn clear(&self) {
        self.users.clear();
        self.usernames.clear();
        self.emails.clear();
    }

    /// Claims both keys for `id`, undoing the first if the second is taken.
    /// Returns which of the two were newly claimed.
    fn claim_keys(&self, id: UserId, username: &str, email: &str) -> AppResult<(bool, bool)> {
        let new_username = claim(&self.usernames, "username", username, id)?;
        match claim(&self.emails, "email", email, id) {
            Ok(new_email) => Ok((new_username, new_email)),
            Err(e) => {
                if new_username {
                    release(&self.usernames, username, id);
                }
                Err(e)
            }
        }
    }
}

/// String value of `field` in an update, if the update sets one.
fn new_key<'a>(fields: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    fields.get(field).and_then(Value::as_str)
}
