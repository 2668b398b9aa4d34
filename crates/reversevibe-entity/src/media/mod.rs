//! Uploaded media record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use reversevibe_core::types::{MediaId, UserId};

use crate::post::model::empty_object;

/// Metadata for a file written to the upload directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    /// Primary key.
    pub id: MediaId,
    /// Uploader.
    pub user: UserId,
    /// Original file name as sent by the client.
    pub filename: String,
    /// Client-declared MIME type.
    pub file_type: String,
    /// Location on disk, used verbatim when the file is served.
    pub file_path: String,
    /// Size in bytes.
    pub size: u64,
    /// EXIF data as supplied by the client; never stripped.
    #[serde(default = "empty_object")]
    pub exif_data: Value,
    /// Private flag. Stored but not enforced.
    #[serde(default)]
    pub is_private: bool,
    /// Arbitrary metadata.
    #[serde(default = "empty_object")]
    pub metadata: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
