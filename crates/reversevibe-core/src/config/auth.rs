//! Authentication configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Token signing and password hashing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret used to sign and verify every token.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Algorithm declared in the header of issued tokens.
    #[serde(default = "default_jwt_algorithm")]
    pub jwt_algorithm: String,
    /// Token lifetime, e.g. `"30d"`, `"12h"`, `"90m"`, `"3600s"`.
    #[serde(default = "default_jwt_expires_in")]
    pub jwt_expires_in: String,
    /// Argon2 iteration count.
    #[serde(default = "default_hash_time_cost")]
    pub hash_time_cost: u32,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_hash_memory_kib")]
    pub hash_memory_kib: u32,
}

impl AuthConfig {
    /// Parses `jwt_expires_in` into a [`Duration`].
    pub fn expires_in(&self) -> Result<Duration, AppError> {
        parse_duration(&self.jwt_expires_in)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_algorithm: default_jwt_algorithm(),
            jwt_expires_in: default_jwt_expires_in(),
            hash_time_cost: default_hash_time_cost(),
            hash_memory_kib: default_hash_memory_kib(),
        }
    }
}

/// Parses a compact duration such as `30d`. A bare number is seconds.
pub fn parse_duration(value: &str) -> Result<Duration, AppError> {
    let value = value.trim();
    let split = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (digits, unit) = value.split_at(split);

    let amount: u64 = digits
        .parse()
        .map_err(|_| AppError::configuration(format!("Invalid duration: '{value}'")))?;

    let multiplier = match unit {
        "" | "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        _ => {
            return Err(AppError::configuration(format!(
                "Invalid duration unit in '{value}'. Expected one of: s, m, h, d"
            )));
        }
    };

    let seconds = amount.checked_mul(multiplier).ok_or_else(|| {
        AppError::configuration(format!("Duration '{value}' is out of range"))
    })?;
    Ok(Duration::from_secs(seconds))
}

fn default_jwt_secret() -> String {
    "reversevibe2025".to_string()
}

fn default_jwt_algorithm() -> String {
    "HS256".to_string()
}

fn default_jwt_expires_in() -> String {
    "30d".to_string()
}

fn default_hash_time_cost() -> u32 {
    1
}

fn default_hash_memory_kib() -> u32 {
    1024
}
