use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::auth::middleware::{ensure_owner, AuthUser};
use crate::dto::{CreateMoodRequest, DeleteResponse, MoodQuery, UpdateMoodRequest};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::models::mood::MoodEntry;
use crate::AppState;

fn not_found() -> AppError {
    AppError::NotFound("Mood entry not found".into())
}

/// Loads an entry by id and checks it belongs to the caller.
/// Ids that are not UUIDs cannot name an entry and count as missing.
async fn load_owned_entry(
    state: &AppState,
    auth_user: &AuthUser,
    raw_id: &str,
) -> AppResult<MoodEntry> {
    let id = Uuid::parse_str(raw_id).map_err(|_| not_found())?;
    let entry = state.store.find_entry(id).await?.ok_or_else(not_found)?;
    ensure_owner(&entry, auth_user)?;
    Ok(entry)
}

pub async fn create_mood(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    AppJson(body): AppJson<CreateMoodRequest>,
) -> AppResult<(StatusCode, Json<MoodEntry>)> {
    let new = body.validate_required()?;

    let entry = state
        .store
        .insert_entry(&MoodEntry::new(
            auth_user.id,
            new.mood,
            new.journal_entry,
            new.date,
        ))
        .await?;

    tracing::info!(user_id = %auth_user.id, entry_id = %entry.id, "Mood entry created");
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn list_moods(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    AppQuery(query): AppQuery<MoodQuery>,
) -> AppResult<Json<Vec<MoodEntry>>> {
    let range = query.range()?;
    let entries = state.store.list_entries(auth_user.id, range).await?;
    Ok(Json(entries))
}

pub async fn get_mood(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(entry_id): Path<String>,
) -> AppResult<Json<MoodEntry>> {
    let entry = load_owned_entry(&state, &auth_user, &entry_id).await?;
    Ok(Json(entry))
}

pub async fn update_mood(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(entry_id): Path<String>,
    AppJson(body): AppJson<UpdateMoodRequest>,
) -> AppResult<Json<MoodEntry>> {
    let existing = load_owned_entry(&state, &auth_user, &entry_id).await?;
    let changes = body.into_changes()?;

    let entry = state
        .store
        .update_entry(existing.id, &changes)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(entry))
}

pub async fn delete_mood(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(entry_id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    let existing = load_owned_entry(&state, &auth_user, &entry_id).await?;

    if !state.store.delete_entry(existing.id).await? {
        return Err(not_found());
    }

    tracing::info!(user_id = %auth_user.id, entry_id = %existing.id, "Mood entry deleted");
    Ok(Json(DeleteResponse {
        message: "Mood entry deleted".into(),
        id: existing.id,
    }))
}
