//! # Moodtrack — Request/Response DTOs
//!
//! API contract types shared by the server handlers and the `moodctl` client.
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON body or query params
//! - `*Response` → serialized to client JSON
//! - JSON field names are camelCase

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::mood::{calendar_date, validate_mood, DateRange, MoodChanges};
use crate::models::user::UserProfile;

// ============================================================================
// Common
// ============================================================================

/// Delete confirmation
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
    pub id: Uuid,
}

// ============================================================================
// Auth
// ============================================================================

/// POST /api/auth/register
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    #[validate(length(max = 254, message = "Email too long"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

impl RegisterRequest {
    /// Trims the username and trims and lowercases the email, so length and
    /// format checks see the values that get stored.
    pub fn normalized(self) -> Self {
        Self {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            password: self.password,
        }
    }
}

/// POST /api/auth/login
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response for register and login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

// ============================================================================
// Moods
// ============================================================================

/// POST /api/moods
///
/// Required fields are optional here so a missing value surfaces as a 400
/// with a readable message instead of an extractor rejection.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMoodRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub journal_entry: Option<String>,

    #[serde(
        default,
        deserialize_with = "calendar_date::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDate>,
}

/// A create request that passed validation.
#[derive(Debug)]
pub struct NewMood {
    pub mood: i32,
    pub journal_entry: String,
    pub date: NaiveDate,
}

impl CreateMoodRequest {
    pub fn validate_required(self) -> AppResult<NewMood> {
        let (mood, date) = match (self.mood, self.date) {
            (Some(mood), Some(date)) => (mood, date),
            _ => return Err(AppError::Validation("Mood and date are required".into())),
        };

        Ok(NewMood {
            mood: validate_mood(mood)?,
            journal_entry: self.journal_entry.unwrap_or_default(),
            date,
        })
    }
}

/// PUT /api/moods/{id} — partial update. An empty `journalEntry` is a value,
/// an absent one leaves the stored text unchanged.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMoodRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub journal_entry: Option<String>,
}

impl UpdateMoodRequest {
    pub fn into_changes(self) -> AppResult<MoodChanges> {
        let mood = self.mood.map(validate_mood).transpose()?;
        Ok(MoodChanges {
            mood,
            journal_entry: self.journal_entry,
        })
    }
}

/// GET /api/moods query params
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodQuery {
    #[serde(default, deserialize_with = "calendar_date::deserialize_option")]
    pub start_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "calendar_date::deserialize_option")]
    pub end_date: Option<NaiveDate>,
}

impl MoodQuery {
    pub fn range(&self) -> AppResult<DateRange> {
        DateRange::new(self.start_date, self.end_date)
    }
}
