//! # Content Entities
//!
//! Row types for the five content tables. JSON field names keep the
//! original site's camelCase contract (`imagePath`, `sortOrder`, ...).
//! Every stored `imageRotation` is one of {0, 90, 180, 270}; the write
//! paths enforce this before anything reaches the store.

use serde::{Deserialize, Serialize};

use crate::db::{DbError, Row};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cocktail {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image_path: String,
    pub sort_order: i64,
    pub friend_name: Option<String>,
    pub ingredients: Option<String>,
    pub image_rotation: i64,
    pub created_at: String,
}

impl Cocktail {
    pub fn from_row(row: &Row) -> Result<Self, DbError> {
        Ok(Self {
            id: row.i64("id")?,
            name: row.text("name")?,
            description: row.text("description")?,
            image_path: row.text("imagePath")?,
            sort_order: row.i64("sortOrder")?,
            friend_name: row.opt_text("friendName")?,
            ingredients: row.opt_text("ingredients")?,
            image_rotation: row.i64("imageRotation")?,
            created_at: row.text("createdAt")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Homie {
    pub id: i64,
    pub name: String,
    pub title: String,
    pub description: String,
    pub image_path: Option<String>,
    pub sort_order: i64,
    pub image_rotation: i64,
    pub created_at: String,
}

impl Homie {
    pub fn from_row(row: &Row) -> Result<Self, DbError> {
        Ok(Self {
            id: row.i64("id")?,
            name: row.text("name")?,
            title: row.text("title")?,
            description: row.text("description")?,
            image_path: row.opt_text("imagePath")?,
            sort_order: row.i64("sortOrder")?,
            image_rotation: row.i64("imageRotation")?,
            created_at: row.text("createdAt")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Memorabilia {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_path: String,
    pub sort_order: i64,
    pub image_rotation: i64,
    pub created_at: String,
}

impl Memorabilia {
    pub fn from_row(row: &Row) -> Result<Self, DbError> {
        Ok(Self {
            id: row.i64("id")?,
            title: row.text("title")?,
            description: row.text("description")?,
            image_path: row.text("imagePath")?,
            sort_order: row.i64("sortOrder")?,
            image_rotation: row.i64("imageRotation")?,
            created_at: row.text("createdAt")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatsNewItem {
    pub id: i64,
    pub description: String,
    pub image_path: String,
    pub sort_order: i64,
    pub image_rotation: i64,
    pub created_at: String,
}

impl WhatsNewItem {
    pub fn from_row(row: &Row) -> Result<Self, DbError> {
        Ok(Self {
            id: row.i64("id")?,
            description: row.text("description")?,
            image_path: row.text("imagePath")?,
            sort_order: row.i64("sortOrder")?,
            image_rotation: row.i64("imageRotation")?,
            created_at: row.text("createdAt")?,
        })
    }
}

/// Moderation state of a visitor submission. The write path only ever
/// persists these three values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Denied,
}

impl SubmissionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Approved => "approved",
            SubmissionStatus::Denied => "denied",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(SubmissionStatus::Pending),
            "approved" => Some(SubmissionStatus::Approved),
            "denied" => Some(SubmissionStatus::Denied),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: i64,
    pub image_path: String,
    pub guest_name: Option<String>,
    pub comment: Option<String>,
    pub status: SubmissionStatus,
    pub image_rotation: i64,
    pub created_at: String,
}

impl Submission {
    pub fn from_row(row: &Row) -> Result<Self, DbError> {
        let raw_status = row.text("status")?;
        let status = SubmissionStatus::parse(&raw_status)
            .ok_or_else(|| DbError::Decode(format!("unknown submission status `{raw_status}`")))?;

        Ok(Self {
            id: row.i64("id")?,
            image_path: row.text("imagePath")?,
            guest_name: row.opt_text("guestName")?,
            comment: row.opt_text("comment")?,
            status,
            image_rotation: row.i64("imageRotation")?,
            created_at: row.text("createdAt")?,
        })
    }
}
